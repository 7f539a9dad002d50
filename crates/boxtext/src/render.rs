//! Per-line placement: alignment, justification, decorations and the glyph
//! runs handed to a [`DrawSurface`].
//!
//! [`plan_lines`] computes everything up front into a [`RenderPlan`];
//! [`RenderPlan::paint_text`] and [`RenderPlan::paint_decorations`] replay it.

use crate::color::Color;
use crate::content::{HorizontalAlign, LayoutConfig};
use crate::layout::{LayoutResult, Line};
use crate::measure::TextMeasurer;
use crate::primitives::Point;
use crate::sizer::{vertical_offset, BoxSize};
use crate::surface::{DrawSurface, TextAlign, TextBaseline};

/// Decoration stroke thickness is the font size divided by this.
pub const DECORATION_THICKNESS_DIVISOR: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationKind {
    Underline,
    LineThrough,
}

/// A horizontal decoration segment in content space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub from: Point,
    pub to: Point,
    pub thickness: f32,
}

impl Decoration {
    pub fn length(&self) -> f32 {
        self.to.x - self.from.x
    }
}

/// Text drawn with a single `fill_text`/`stroke_text` call.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRun {
    pub text: String,
    pub position: Point,
}

/// Draw instructions for one line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineDraw {
    /// Start of the line relative to the content origin
    pub x: f32,
    /// Vertical middle of the line relative to the content origin
    pub baseline: f32,
    pub decorations: Vec<Decoration>,
    pub runs: Vec<GlyphRun>,
    /// Horizontal extent actually covered, justification spread included
    pub rendered_width: f32,
}

/// Draw instructions for a whole text box.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderPlan {
    /// Font specification string set on the surface
    pub font: String,
    /// Translation from the box origin to the content origin
    pub origin: Point,
    pub lines: Vec<LineDraw>,
}

impl RenderPlan {
    /// Set up text state and translate to the content origin. Pair with
    /// [`RenderPlan::end`].
    pub fn begin(&self, surface: &mut dyn DrawSurface) {
        surface.save();
        surface.set_font(&self.font);
        surface.set_text_baseline(TextBaseline::Middle);
        surface.set_text_align(TextAlign::Left);
        surface.translate(self.origin.x, self.origin.y);
    }

    pub fn end(&self, surface: &mut dyn DrawSurface) {
        surface.restore();
    }

    /// Draw every glyph run, filled or stroked.
    pub fn paint_text(&self, surface: &mut dyn DrawSurface, stroke: bool) {
        for line in &self.lines {
            for run in &line.runs {
                if stroke {
                    surface.stroke_text(&run.text, run.position.x, run.position.y);
                } else {
                    surface.fill_text(&run.text, run.position.x, run.position.y);
                }
            }
        }
    }

    /// Stroke underline/strike-through segments in `color`.
    pub fn paint_decorations(&self, surface: &mut dyn DrawSurface, color: Color) {
        for decoration in self.lines.iter().flat_map(|line| &line.decorations) {
            surface.save();
            surface.begin_path();
            surface.move_to(decoration.from.x, decoration.from.y);
            surface.line_to(decoration.to.x, decoration.to.y);
            surface.set_line_width(decoration.thickness);
            surface.set_stroke_style(color);
            surface.stroke();
            surface.restore();
        }
    }
}

/// Place every line of `layout` inside a box of `size`.
///
/// Lines are anchored on their vertical middle (`TextBaseline::Middle`), one
/// line height apart. Letter spacing or justification switch a line to
/// per-code-point runs; otherwise each line is a single run.
pub fn plan_lines(
    config: &LayoutConfig,
    layout: &LayoutResult,
    size: BoxSize,
    measurer: &mut dyn TextMeasurer,
) -> RenderPlan {
    let font = config.font_descriptor();
    let line_height_px = config.line_height_px();
    let content_width = size.width - config.padding * 2.0;
    let align_y = vertical_offset(config, layout.lines.len(), size.height);

    let mut baseline = line_height_px / 2.0;
    let mut lines = Vec::with_capacity(layout.lines.len());

    for line in &layout.lines {
        let justified = config.align == HorizontalAlign::Justify && !line.last_in_paragraph;
        let mut x = match config.align {
            HorizontalAlign::Right => content_width - line.width,
            HorizontalAlign::Center => (content_width - line.width) / 2.0,
            HorizontalAlign::Left | HorizontalAlign::Justify => 0.0,
        };

        let decoration_width = if justified { content_width } else { line.width };
        let decorations = decorations_for(config, x, baseline, decoration_width);

        let start_x = x;
        let mut runs = Vec::new();
        if config.letter_spacing != 0.0 || config.align == HorizontalAlign::Justify {
            let spread = justification_spread(line, content_width);
            for ch in line.text.chars() {
                if ch == ' ' && justified {
                    x += spread;
                }
                let mut buf = [0; 4];
                let glyph: &str = ch.encode_utf8(&mut buf);
                runs.push(GlyphRun {
                    text: glyph.to_owned(),
                    position: Point::new(x, baseline),
                });
                x += measurer.measure_width(&font, glyph) + config.letter_spacing;
            }
            // No spacing after the last glyph
            if !runs.is_empty() {
                x -= config.letter_spacing;
            }
        } else {
            runs.push(GlyphRun {
                text: line.text.clone(),
                position: Point::new(x, baseline),
            });
            x += line.width;
        }

        lines.push(LineDraw {
            x: start_x,
            baseline,
            decorations,
            runs,
            rendered_width: x - start_x,
        });
        baseline += line_height_px;
    }

    RenderPlan {
        font: font.to_string(),
        origin: Point::new(config.padding, align_y + config.padding),
        lines,
    }
}

/// Extra advance added at each space so the line fills `content_width`.
pub fn justification_spread(line: &Line, content_width: f32) -> f32 {
    let spaces = line.text.chars().filter(|ch| *ch == ' ').count();
    if spaces == 0 {
        0.0
    } else {
        (content_width - line.width) / spaces as f32
    }
}

fn decorations_for(config: &LayoutConfig, x: f32, baseline: f32, width: f32) -> Vec<Decoration> {
    let thickness = config.font_size / DECORATION_THICKNESS_DIVISOR;
    let mut decorations = Vec::new();

    if config.decoration.underline {
        let y = baseline + config.font_size / 2.0;
        decorations.push(Decoration {
            kind: DecorationKind::Underline,
            from: Point::new(x, y),
            to: Point::new(x + width, y),
            thickness,
        });
    }
    if config.decoration.line_through {
        decorations.push(Decoration {
            kind: DecorationKind::LineThrough,
            from: Point::new(x, baseline),
            to: Point::new(x + width, baseline),
            thickness,
        });
    }

    decorations
}
