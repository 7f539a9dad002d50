use std::str::FromStr;

use boxtext_macros::WithBuilders;

use crate::error::{parse_keyword, ParseKeywordError};
use crate::font::{FontDescriptor, FontStyle, FontVariant, FontWeight};

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
    /// Stretch inter-word gaps so each line fills the box, except the last
    /// line of a paragraph
    Justify,
}

impl FromStr for HorizontalAlign {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword(
            "align",
            s,
            &[
                ("left", HorizontalAlign::Left),
                ("center", HorizontalAlign::Center),
                ("right", HorizontalAlign::Right),
                ("justify", HorizontalAlign::Justify),
            ],
        )
    }
}

/// Vertical alignment of the line block within the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl FromStr for VerticalAlign {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword(
            "verticalAlign",
            s,
            &[
                ("top", VerticalAlign::Top),
                ("middle", VerticalAlign::Middle),
                ("bottom", VerticalAlign::Bottom),
            ],
        )
    }
}

/// Text wrapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Wrap {
    /// Wrap at the last space or hyphen, hard-splitting words longer than a line
    #[default]
    Word,
    /// Wrap at any character
    Char,
    /// A single line for the whole box: layout ends after the first emitted
    /// line, so later paragraphs are never shown (even with auto width). With
    /// `ellipsis` the line is marked when anything was cut or hidden.
    None,
}

impl FromStr for Wrap {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword(
            "wrap",
            s,
            &[
                ("word", Wrap::Word),
                ("char", Wrap::Char),
                ("none", Wrap::None),
            ],
        )
    }
}

/// Width or height of the layout box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Derived from the laid out lines
    #[default]
    Auto,
    /// Fixed size in pixels, padding included
    Fixed(f32),
}

impl Dimension {
    pub const fn px(pixels: f32) -> Self {
        Self::Fixed(pixels)
    }

    pub const fn is_auto(&self) -> bool {
        matches!(self, Dimension::Auto)
    }

    /// The fixed size, or `None` for `Auto`
    pub const fn fixed(&self) -> Option<f32> {
        match self {
            Dimension::Fixed(px) => Some(*px),
            Dimension::Auto => None,
        }
    }

    /// Lenient parse: a finite, non-negative number is fixed, anything else
    /// (including `"auto"`) is auto.
    pub fn parse_lenient(value: &str) -> Self {
        let value = value.trim();
        let value = value.strip_suffix("px").unwrap_or(value);
        match value.trim().parse::<f32>() {
            Ok(px) if px.is_finite() && px >= 0.0 => Dimension::Fixed(px),
            _ => Dimension::Auto,
        }
    }
}

impl From<f32> for Dimension {
    fn from(px: f32) -> Self {
        if px.is_finite() && px >= 0.0 {
            Dimension::Fixed(px)
        } else {
            Dimension::Auto
        }
    }
}

/// Underline / strike-through flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextDecoration {
    pub underline: bool,
    pub line_through: bool,
}

impl TextDecoration {
    pub const NONE: Self = Self {
        underline: false,
        line_through: false,
    };

    pub const fn underline() -> Self {
        Self {
            underline: true,
            line_through: false,
        }
    }

    pub const fn line_through() -> Self {
        Self {
            underline: false,
            line_through: true,
        }
    }

    pub const fn is_none(&self) -> bool {
        !self.underline && !self.line_through
    }
}

impl FromStr for TextDecoration {
    type Err = ParseKeywordError;

    /// Parses a space separated keyword list such as `"underline line-through"`.
    /// An empty string means no decoration.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut decoration = TextDecoration::NONE;
        for token in s.split_whitespace() {
            match token.to_ascii_lowercase().as_str() {
                "underline" => decoration.underline = true,
                "line-through" => decoration.line_through = true,
                "none" => {}
                _ => return Err(ParseKeywordError::unknown("textDecoration", token)),
            }
        }
        Ok(decoration)
    }
}

/// Everything that affects how text is broken into lines and positioned.
#[derive(Debug, Clone, PartialEq, WithBuilders)]
pub struct LayoutConfig {
    /// The text to lay out; `\n` separates paragraphs
    #[with_builders(into)]
    pub text: String,
    /// Comma separated family list, e.g. `"Fira Sans, sans-serif"`
    #[with_builders(into)]
    pub font_family: String,
    /// Font size in pixels
    pub font_size: f32,
    pub font_style: FontStyle,
    pub font_weight: FontWeight,
    pub font_variant: FontVariant,
    /// Line height as a multiplier of the font size
    pub line_height: f32,
    /// Extra pixels after every code point
    pub letter_spacing: f32,
    pub align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    pub wrap: Wrap,
    /// Replace the tail of the last visible line with an ellipsis when text is cut
    pub ellipsis: bool,
    /// Padding on every side, in pixels
    pub padding: f32,
    pub width: Dimension,
    pub height: Dimension,
    pub decoration: TextDecoration,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_family: "Arial".to_owned(),
            font_size: 12.0,
            font_style: FontStyle::Normal,
            font_weight: FontWeight::Normal,
            font_variant: FontVariant::Normal,
            line_height: 1.0,
            letter_spacing: 0.0,
            align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Top,
            wrap: Wrap::Word,
            ellipsis: false,
            padding: 0.0,
            width: Dimension::Auto,
            height: Dimension::Auto,
            decoration: TextDecoration::NONE,
        }
    }
}

impl LayoutConfig {
    pub fn new(text: impl Into<String>) -> Self {
        Self::default().with_text(text)
    }

    /// Build the font descriptor for the current font attributes
    pub fn font_descriptor(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.font_style,
            self.font_weight,
            self.font_variant,
            self.font_size,
            &self.font_family,
        )
    }

    /// Height of one line in pixels
    pub fn line_height_px(&self) -> f32 {
        self.line_height * self.font_size
    }

    /// Width available to text, or `None` when the width is auto
    pub fn available_width(&self) -> Option<f32> {
        self.width.fixed().map(|w| w - self.padding * 2.0)
    }

    /// Height available to text, or `None` when the height is auto
    pub fn available_height(&self) -> Option<f32> {
        self.height.fixed().map(|h| h - self.padding * 2.0)
    }
}
