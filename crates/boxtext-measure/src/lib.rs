//! # boxtext-measure
//!
//! Font-backed implementations of [`boxtext::TextMeasurer`].
//!
//! With the default `cosmic` feature this crate provides [`CosmicMeasurer`],
//! which shapes text with `cosmic-text` against the system font database.
//! Wrap it in [`boxtext::MeasureCache`] to memoize repeated measurements.

#[cfg(feature = "cosmic")]
mod cosmic;

#[cfg(feature = "cosmic")]
pub use cosmic::*;
