use crate::content::{Dimension, LayoutConfig, VerticalAlign};
use crate::layout::LayoutResult;
use crate::measure::FontBoundingBox;

/// Resolved outer size of the text box, padding included.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxSize {
    pub width: f32,
    pub height: f32,
}

impl BoxSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Box width: the fixed width verbatim, or the widest line plus padding.
pub fn resolve_width(config: &LayoutConfig, layout: &LayoutResult) -> f32 {
    match config.width {
        Dimension::Fixed(width) => width,
        Dimension::Auto => layout.text_width + config.padding * 2.0,
    }
}

/// Box height: the fixed height verbatim, or the stacked line heights.
///
/// The auto height uses one ascent/descent probe for the whole text:
/// `lineHeight * (fontSize + descent) * lines - (fontSize - ascent)`.
/// Padding is not added.
pub fn resolve_height(
    config: &LayoutConfig,
    layout: &LayoutResult,
    metrics: FontBoundingBox,
) -> f32 {
    match config.height {
        Dimension::Fixed(height) => height,
        Dimension::Auto => {
            let lines = layout.lines.len() as f32;
            config.line_height * (config.font_size + metrics.descent) * lines
                - (config.font_size - metrics.ascent)
        }
    }
}

pub fn resolve_box(
    config: &LayoutConfig,
    layout: &LayoutResult,
    metrics: FontBoundingBox,
) -> BoxSize {
    BoxSize::new(
        resolve_width(config, layout),
        resolve_height(config, layout, metrics),
    )
}

/// Offset of the first line from the top of the content box.
pub fn vertical_offset(config: &LayoutConfig, line_count: usize, box_height: f32) -> f32 {
    let block = line_count as f32 * config.line_height_px() + config.padding * 2.0;
    match config.vertical_align {
        VerticalAlign::Top => 0.0,
        VerticalAlign::Middle => (box_height - block) / 2.0,
        VerticalAlign::Bottom => box_height - block,
    }
}
