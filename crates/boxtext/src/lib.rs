//! # boxtext
//!
//! Backend agnostic text box layout.
//!
//! Given a styled string and a box (fixed or automatic width/height), this
//! crate breaks the text into physical lines using nothing but a
//! "measure text width" primitive, sizes the box, and produces per-line draw
//! instructions for a 2D canvas-like surface.
//!
//! ## Core Types
//!
//! - [`LayoutConfig`] - Text, font, alignment, wrapping and box settings
//! - [`TextMeasurer`] - Trait for text measurement (backends live elsewhere)
//! - [`compute_layout`] - Line breaking into a [`LayoutResult`]
//! - [`TextShape`] - Owns a config and keeps its layout current
//!
//! ## Rendering
//!
//! - [`DrawSurface`] - The drawing operations a host must provide
//! - [`RenderPlan`] - Alignment, justification and decoration geometry
//! - [`Renderable`] - `render_fill` / `render_stroke` / `render_hit`

mod color;
mod content;
mod debug;
mod error;
mod font;
mod layout;
mod measure;
mod primitives;
mod render;
mod shape;
mod sizer;
mod surface;

pub use color::*;
pub use content::*;
pub use debug::*;
pub use error::*;
pub use font::*;
pub use layout::*;
pub use measure::*;
pub use primitives::*;
pub use render::*;
pub use shape::*;
pub use sizer::*;
pub use surface::*;
