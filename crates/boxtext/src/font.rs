use std::fmt;
use std::str::FromStr;

use crate::error::{parse_keyword, ParseKeywordError};

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    Thin,        // 100
    ExtraLight,  // 200
    Light,       // 300
    #[default]
    Normal,      // 400
    Medium,      // 500
    SemiBold,    // 600
    Bold,        // 700
    ExtraBold,   // 800
    Black,       // 900
    Custom(u16), // Exact weight for variable fonts
}

impl FontWeight {
    pub fn to_weight(self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::ExtraLight => 200,
            FontWeight::Light => 300,
            FontWeight::Normal => 400,
            FontWeight::Medium => 500,
            FontWeight::SemiBold => 600,
            FontWeight::Bold => 700,
            FontWeight::ExtraBold => 800,
            FontWeight::Black => 900,
            FontWeight::Custom(w) => w.clamp(100, 900),
        }
    }
}

impl FromStr for FontWeight {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(weight) = s.trim().parse::<u16>() {
            return Ok(FontWeight::Custom(weight));
        }
        parse_keyword(
            "fontWeight",
            s,
            &[
                ("normal", FontWeight::Normal),
                ("bold", FontWeight::Bold),
                ("lighter", FontWeight::Light),
                ("bolder", FontWeight::ExtraBold),
            ],
        )
    }
}

/// Font style (normal, italic or oblique)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Oblique => "oblique",
        }
    }
}

impl FromStr for FontStyle {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword(
            "fontStyle",
            s,
            &[
                ("normal", FontStyle::Normal),
                ("italic", FontStyle::Italic),
                ("oblique", FontStyle::Oblique),
            ],
        )
    }
}

/// Font variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontVariant {
    #[default]
    Normal,
    SmallCaps,
}

impl FontVariant {
    pub const fn as_str(self) -> &'static str {
        match self {
            FontVariant::Normal => "normal",
            FontVariant::SmallCaps => "small-caps",
        }
    }
}

impl FromStr for FontVariant {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword(
            "fontVariant",
            s,
            &[
                ("normal", FontVariant::Normal),
                ("small-caps", FontVariant::SmallCaps),
            ],
        )
    }
}

/// Canonical font specification handed to a [`crate::TextMeasurer`] and to
/// the drawing surface.
///
/// Displays as `style variant <size>px family-list`, e.g.
/// `italic normal 12px "Times New Roman", serif`. A non-normal weight is
/// appended to the style segment (`italic 700 normal 12px Arial`).
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub style: FontStyle,
    pub weight: FontWeight,
    pub variant: FontVariant,
    /// Font size in pixels
    pub size: f32,
    /// Normalized family names, in fallback order
    pub families: Vec<String>,
    css: String,
}

impl FontDescriptor {
    pub fn new(
        style: FontStyle,
        weight: FontWeight,
        variant: FontVariant,
        size: f32,
        family: &str,
    ) -> Self {
        let families = normalize_family_list(family);

        let mut css = String::from(style.as_str());
        if weight != FontWeight::Normal {
            css.push(' ');
            css.push_str(&weight.to_weight().to_string());
        }
        css.push(' ');
        css.push_str(variant.as_str());
        css.push(' ');
        css.push_str(&format!("{size}px "));
        css.push_str(&families.join(", "));

        Self {
            style,
            weight,
            variant,
            size,
            families,
            css,
        }
    }

    /// The descriptor as a single font specification string.
    pub fn as_str(&self) -> &str {
        &self.css
    }

    /// Family names with any surrounding quotes removed.
    pub fn unquoted_families(&self) -> impl Iterator<Item = &str> {
        self.families
            .iter()
            .map(|family| family.trim_matches(|c| c == '"' || c == '\'').trim())
            .filter(|family| !family.is_empty())
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css)
    }
}

/// Trim each comma separated family and quote multi-word names that are not
/// quoted yet.
pub fn normalize_family_list(family: &str) -> Vec<String> {
    family
        .split(',')
        .map(|name| {
            let name = name.trim();
            let has_space = name.contains(' ');
            let has_quotes = name.contains('"') || name.contains('\'');
            if has_space && !has_quotes {
                format!("\"{name}\"")
            } else {
                name.to_owned()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(family: &str) -> FontDescriptor {
        FontDescriptor::new(
            FontStyle::Normal,
            FontWeight::Normal,
            FontVariant::Normal,
            12.0,
            family,
        )
    }

    #[test]
    fn test_canonical_order() {
        assert_eq!(descriptor("Arial").as_str(), "normal normal 12px Arial");

        let italic = FontDescriptor::new(
            FontStyle::Italic,
            FontWeight::Normal,
            FontVariant::SmallCaps,
            13.5,
            "serif",
        );
        assert_eq!(italic.to_string(), "italic small-caps 13.5px serif");
    }

    #[test]
    fn test_weight_joins_style_segment() {
        let bold = FontDescriptor::new(
            FontStyle::Normal,
            FontWeight::Bold,
            FontVariant::Normal,
            10.0,
            "Arial",
        );
        assert_eq!(bold.as_str(), "normal 700 normal 10px Arial");
    }

    #[test]
    fn test_multi_word_families_are_quoted() {
        assert_eq!(
            descriptor(" Times New Roman ,serif").as_str(),
            "normal normal 12px \"Times New Roman\", serif"
        );
    }

    #[test]
    fn test_quoted_families_left_alone() {
        assert_eq!(
            descriptor("'Fira Sans', \"Open Sans\"").families,
            vec!["'Fira Sans'".to_owned(), "\"Open Sans\"".to_owned()]
        );
    }

    #[test]
    fn test_unquoted_families() {
        let font = descriptor("'Fira Sans', monospace, ");
        let names: Vec<&str> = font.unquoted_families().collect();
        assert_eq!(names, vec!["Fira Sans", "monospace"]);
    }

    #[test]
    fn test_keyword_parsing() {
        assert_eq!("italic".parse::<FontStyle>(), Ok(FontStyle::Italic));
        assert_eq!("small-caps".parse::<FontVariant>(), Ok(FontVariant::SmallCaps));
        assert_eq!("bold".parse::<FontWeight>(), Ok(FontWeight::Bold));
        assert_eq!("550".parse::<FontWeight>(), Ok(FontWeight::Custom(550)));
        assert!("slanted".parse::<FontStyle>().is_err());
    }
}
