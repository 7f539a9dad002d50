//! Line breaking.
//!
//! [`compute_layout`] turns a [`LayoutConfig`] into a [`LayoutResult`]: the
//! physical lines that fit the box, each with its measured width. Fitting is
//! driven purely by [`TextMeasurer::measure_width`]; a binary search over
//! prefix lengths finds the longest prefix of a paragraph that fits, and word
//! wrapping then backs off to the last space or hyphen inside that prefix.

use crate::content::{HorizontalAlign, LayoutConfig, Wrap};
use crate::font::FontDescriptor;
use crate::measure::TextMeasurer;

/// Glyph appended to the last visible line when text is cut short.
pub const ELLIPSIS: &str = "…";

/// One physical output row.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Line text with trailing (and leading break) whitespace removed
    pub text: String,
    /// Measured width in pixels, letter spacing included
    pub width: f32,
    /// True for the final line produced from a paragraph
    pub last_in_paragraph: bool,
}

/// Lines produced for one configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutResult {
    pub lines: Vec<Line>,
    /// Widest line, in pixels
    pub text_width: f32,
    /// Nominal single-line height (the font size)
    pub text_height: f32,
}

/// Break `config.text` into lines that fit the configured box.
pub fn compute_layout(config: &LayoutConfig, measurer: &mut dyn TextMeasurer) -> LayoutResult {
    let font = config.font_descriptor();
    let breaker = LineBreaker::new(config, &font, measurer);
    let result = breaker.run();

    log::debug!(
        "laid out {} line(s), text width {:.2}px, font `{}`",
        result.lines.len(),
        result.text_width,
        font
    );

    result
}

/// Width of `text` as the breaker sees it: measured advance plus letter
/// spacing between code points.
pub fn spaced_text_width(
    measurer: &mut dyn TextMeasurer,
    font: &FontDescriptor,
    letter_spacing: f32,
    text: &str,
) -> f32 {
    let count = text.chars().count();
    let spacing = if count > 0 {
        letter_spacing * (count - 1) as f32
    } else {
        0.0
    };
    measurer.measure_width(font, text) + spacing
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Move on to the next paragraph
    Continue,
    /// Vertical space (or the single allowed line) is used up
    Stop,
}

struct LineBreaker<'a> {
    config: &'a LayoutConfig,
    font: &'a FontDescriptor,
    measurer: &'a mut dyn TextMeasurer,
    lines: Vec<Line>,
    line_height_px: f32,
    current_height: f32,
    max_width: Option<f32>,
    max_height: Option<f32>,
}

impl<'a> LineBreaker<'a> {
    fn new(
        config: &'a LayoutConfig,
        font: &'a FontDescriptor,
        measurer: &'a mut dyn TextMeasurer,
    ) -> Self {
        Self {
            config,
            font,
            measurer,
            lines: Vec::new(),
            line_height_px: config.line_height_px(),
            current_height: 0.0,
            max_width: config.available_width(),
            max_height: config.available_height(),
        }
    }

    fn run(mut self) -> LayoutResult {
        let config = self.config;
        let ellipsis_margin = if config.ellipsis {
            self.text_width(ELLIPSIS)
        } else {
            0.0
        };

        let paragraphs: Vec<&str> = config.text.split('\n').collect();
        let count = paragraphs.len();

        for (index, paragraph) in paragraphs.into_iter().enumerate() {
            let is_last_paragraph = index + 1 == count;
            let flow = self.break_paragraph(paragraph, is_last_paragraph, ellipsis_margin);

            if let Some(last) = self.lines.last_mut() {
                last.last_in_paragraph = true;
            }

            if flow == Flow::Stop || self.height_exhausted() {
                break;
            }
        }

        let text_width = self
            .lines
            .iter()
            .map(|line| line.width)
            .fold(0.0_f32, f32::max);

        LayoutResult {
            lines: self.lines,
            text_width,
            text_height: config.font_size,
        }
    }

    fn break_paragraph(
        &mut self,
        paragraph: &str,
        is_last_paragraph: bool,
        ellipsis_margin: f32,
    ) -> Flow {
        let paragraph_width = self.text_width(paragraph);
        let max_width = match self.max_width {
            Some(max_width) if paragraph_width > max_width => max_width,
            _ => {
                self.push_line(paragraph);
                self.current_height += self.line_height_px;
                // Only cut (and mark) when later paragraphs would be hidden
                if !is_last_paragraph && self.should_stop() {
                    self.apply_ellipsis();
                    return Flow::Stop;
                }
                return Flow::Continue;
            }
        };

        let mut rest = paragraph;
        while !rest.is_empty() {
            let chars: Vec<char> = rest.chars().collect();
            let offsets: Vec<usize> = rest
                .char_indices()
                .map(|(offset, _)| offset)
                .chain(std::iter::once(rest.len()))
                .collect();

            let Some((matched, matched_width)) =
                self.longest_fitting_prefix(rest, &offsets, max_width, ellipsis_margin)
            else {
                log::debug!(
                    "nothing fits in {max_width:.2}px, dropping {} char(s) of paragraph",
                    chars.len()
                );
                break;
            };

            let mut cut = matched;
            if self.config.wrap == Wrap::Word {
                let next_is_break = matches!(chars.get(matched), Some(' ' | '-'));
                let wrap_at = if next_is_break && matched_width <= max_width {
                    matched
                } else {
                    chars[..matched]
                        .iter()
                        .rposition(|c| matches!(c, ' ' | '-'))
                        .map_or(0, |position| position + 1)
                };
                // No boundary: hard-split the unbreakable word
                if wrap_at > 0 {
                    cut = wrap_at;
                }
            }

            self.push_line(rest[..offsets[cut]].trim_end());
            self.current_height += self.line_height_px;

            if self.should_stop() {
                self.apply_ellipsis();
                return Flow::Stop;
            }

            rest = rest[offsets[cut]..].trim_start();
            if !rest.is_empty() && self.text_width(rest) <= max_width {
                self.push_line(rest);
                self.current_height += self.line_height_px;
                if !is_last_paragraph && self.should_stop() {
                    self.apply_ellipsis();
                    return Flow::Stop;
                }
                break;
            }
        }

        Flow::Continue
    }

    /// Binary search for the longest prefix (in code points) whose width plus
    /// `margin` fits `max_width`. Returns the prefix length and its width.
    fn longest_fitting_prefix(
        &mut self,
        text: &str,
        offsets: &[usize],
        max_width: f32,
        margin: f32,
    ) -> Option<(usize, f32)> {
        let mut low = 0;
        let mut high = offsets.len() - 1;
        let mut matched = None;

        while low < high {
            let mid = (low + high) / 2;
            let width = self.text_width(&text[..offsets[mid + 1]]) + margin;
            if width <= max_width {
                low = mid + 1;
                matched = Some((mid + 1, width));
            } else {
                high = mid;
            }
        }

        matched
    }

    /// Replace the last line with a version ending in [`ELLIPSIS`].
    ///
    /// When the ellipsis would not fit, three code points are dropped first;
    /// this is a fixed trim, not a search for the best fit.
    fn apply_ellipsis(&mut self) {
        if !self.config.ellipsis {
            return;
        }
        let Some(last) = self.lines.pop() else {
            return;
        };

        let mut text = last.text;
        if let Some(max_width) = self.max_width {
            let has_space = self.text_width(&format!("{text}{ELLIPSIS}")) < max_width;
            if !has_space {
                let keep = text.chars().count().saturating_sub(3);
                text = text.chars().take(keep).collect();
            }
        }
        text.push_str(ELLIPSIS);

        log::trace!("ellipsis applied, last line is now `{text}`");
        self.push_line(&text);
    }

    fn push_line(&mut self, text: &str) {
        let text = if self.config.align == HorizontalAlign::Justify {
            text.trim()
        } else {
            text
        };
        let width = self.text_width(text);
        self.lines.push(Line {
            text: text.to_owned(),
            width,
            last_in_paragraph: false,
        });
    }

    /// Whether one more line would overflow a fixed height
    fn height_exhausted(&self) -> bool {
        self.max_height
            .is_some_and(|max_height| self.current_height + self.line_height_px > max_height)
    }

    fn should_stop(&self) -> bool {
        self.config.wrap == Wrap::None || self.height_exhausted()
    }

    fn text_width(&mut self, text: &str) -> f32 {
        spaced_text_width(
            &mut *self.measurer,
            self.font,
            self.config.letter_spacing,
            text,
        )
    }
}
