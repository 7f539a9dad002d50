use boxtext_macros::WithBuilders;

use crate::color::{css, Color};

/// Configuration for debug visualization
#[derive(Clone, Copy, Debug, Default, PartialEq, WithBuilders)]
pub struct DebugOptions {
    /// Outline each laid out line (cyan)
    pub show_line_bounds: bool,
    /// Outline the content box inside the padding (gray)
    pub show_content_box: bool,
}

impl DebugOptions {
    pub const LINE_BOUNDS_COLOR: Color = css::CYAN;
    pub const CONTENT_BOX_COLOR: Color = css::GRAY;

    /// Create debug options with nothing enabled
    pub const fn none() -> Self {
        Self {
            show_line_bounds: false,
            show_content_box: false,
        }
    }

    /// Create debug options with all visualizations enabled
    pub const fn all() -> Self {
        Self {
            show_line_bounds: true,
            show_content_box: true,
        }
    }

    /// Check if any debug visualization is enabled
    pub const fn is_enabled(&self) -> bool {
        self.show_line_bounds || self.show_content_box
    }
}
