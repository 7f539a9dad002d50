use boxtext::{FontBoundingBox, FontDescriptor, FontStyle, FontVariant, TextMeasurer};
use cosmic_text::{
    fontdb, Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, Weight, Wrap,
};

/// Fallback ratios used when shaping produced no layout line to read the
/// font's extents from.
const FALLBACK_ASCENT_RATIO: f32 = 0.8;
const FALLBACK_DESCENT_RATIO: f32 = 0.2;

/// Probe text for bounding boxes of empty strings.
const EMPTY_PROBE: &str = "M";

/// [`TextMeasurer`] backed by cosmic-text shaping.
///
/// The font system is created on first use, which loads the system font
/// database. Use [`CosmicMeasurer::with_font_system`] to supply a
/// preconfigured one instead.
pub struct CosmicMeasurer {
    font_system: Option<FontSystem>,
    warned_small_caps: bool,
}

impl CosmicMeasurer {
    pub fn new() -> Self {
        Self {
            font_system: None,
            warned_small_caps: false,
        }
    }

    pub fn with_font_system(font_system: FontSystem) -> Self {
        Self {
            font_system: Some(font_system),
            warned_small_caps: false,
        }
    }

    /// Register an additional font (TTF/OTF bytes) with the font database.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.font_system().db_mut().load_font_data(data);
    }

    pub fn font_system(&mut self) -> &mut FontSystem {
        self.font_system.get_or_insert_with(|| {
            log::debug!("loading system font database");
            FontSystem::new()
        })
    }

    /// Shape `text` as a single unwrapped line and return
    /// `(width, ascent, descent)`.
    fn shape_line(&mut self, font: &FontDescriptor, text: &str) -> (f32, f32, f32) {
        if font.variant == FontVariant::SmallCaps && !self.warned_small_caps {
            log::warn!("small-caps is not supported by the shaper, measuring as normal");
            self.warned_small_caps = true;
        }

        let size = font.size.max(f32::EPSILON);
        let font_system = self.font_system();
        let attrs = attrs_for(font, font_system.db());

        let mut buffer = Buffer::new(font_system, Metrics::new(size, size));
        buffer.set_wrap(font_system, Wrap::None);
        buffer.set_size(font_system, None, None);
        buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(font_system, false);

        let mut width: f32 = 0.0;
        let mut extents: Option<(f32, f32)> = None;
        for line_index in 0..buffer.lines.len() {
            let Some(layout_lines) = buffer.line_layout(font_system, line_index) else {
                continue;
            };
            for layout_line in layout_lines {
                width = width.max(layout_line.w);
                let (ascent, descent) = extents.unwrap_or((0.0, 0.0));
                extents = Some((
                    ascent.max(layout_line.max_ascent),
                    descent.max(layout_line.max_descent),
                ));
            }
        }

        let (ascent, descent) = match extents {
            Some((ascent, descent)) if ascent + descent > 0.0 => (ascent, descent),
            _ => (
                font.size * FALLBACK_ASCENT_RATIO,
                font.size * FALLBACK_DESCENT_RATIO,
            ),
        };
        (width, ascent, descent)
    }
}

impl Default for CosmicMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CosmicMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmicMeasurer")
            .field("font_system_loaded", &self.font_system.is_some())
            .finish()
    }
}

impl TextMeasurer for CosmicMeasurer {
    fn measure_width(&mut self, font: &FontDescriptor, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.shape_line(font, text).0
    }

    fn measure_bounding_box(&mut self, font: &FontDescriptor, text: &str) -> FontBoundingBox {
        // The probe treats the whole text as one line
        let probe = if text.trim().is_empty() {
            EMPTY_PROBE.to_owned()
        } else {
            text.replace('\n', " ")
        };
        let (_, ascent, descent) = self.shape_line(font, &probe);
        FontBoundingBox { ascent, descent }
    }
}

/// Map a family name onto a cosmic-text family, resolving CSS generic
/// families.
pub fn map_family(name: &str) -> Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans-serif" | "system-ui" => Family::SansSerif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

fn is_generic(family: &Family<'_>) -> bool {
    !matches!(family, Family::Name(_))
}

fn has_family(db: &fontdb::Database, name: &str) -> bool {
    db.faces().any(|face| {
        face.families
            .iter()
            .any(|(family, _)| family.eq_ignore_ascii_case(name))
    })
}

/// Pick the first family in the fallback list the database can satisfy.
/// Generic families always resolve; an unknown list falls back to
/// sans-serif.
fn pick_family<'a>(font: &'a FontDescriptor, db: &fontdb::Database) -> Family<'a> {
    font.unquoted_families()
        .map(map_family)
        .find(|family| match family {
            Family::Name(name) => has_family(db, name),
            _ => true,
        })
        .unwrap_or(Family::SansSerif)
}

/// Build shaping attributes for a descriptor.
pub fn attrs_for<'a>(font: &'a FontDescriptor, db: &fontdb::Database) -> Attrs<'a> {
    let family = pick_family(font, db);
    if !is_generic(&family) {
        log::trace!("resolved {} to {:?}", font, family);
    }

    let style = match font.style {
        FontStyle::Normal => Style::Normal,
        FontStyle::Italic => Style::Italic,
        FontStyle::Oblique => Style::Oblique,
    };

    Attrs::new()
        .family(family)
        .style(style)
        .weight(Weight(font.weight.to_weight()))
}
