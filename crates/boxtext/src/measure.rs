//! Text measurement for line breaking and box sizing.
//!
//! Layout never looks inside a font. Everything it knows comes from the
//! [`TextMeasurer`] trait: the advance width of a string and the font bounding
//! box (ascent/descent) of a single line. Backends such as `boxtext-measure`
//! implement the trait on top of a real shaping engine.
//!
//! ## Sharing a measurer
//!
//! A measurer is a stateful context object (a backend typically switches its
//! active font on every call). Layout is not re-entrant, so one measurer can be
//! shared by many shapes on one thread through `Rc<RefCell<M>>`; a nested
//! borrow panics instead of silently corrupting the active font. Concurrent
//! hosts either give each worker its own measurer or share one through
//! `Arc<Mutex<M>>`, which serializes every call. A shared [`MeasureCache`]
//! is bounded; call [`MeasureCache::clear`] when the backend's fonts change.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex, PoisonError};

use crate::font::FontDescriptor;

/// Ascent/descent of a single line of text, in pixels. Both are positive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FontBoundingBox {
    pub ascent: f32,
    pub descent: f32,
}

impl FontBoundingBox {
    pub const fn new(ascent: f32, descent: f32) -> Self {
        Self { ascent, descent }
    }
}

/// Intrinsic size measurement result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntrinsicSize {
    pub width: f32,
    pub height: f32,
}

impl IntrinsicSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Backend-agnostic text measurement.
pub trait TextMeasurer {
    /// Advance width of `text` set in `font`, in device pixels. Never negative.
    fn measure_width(&mut self, font: &FontDescriptor, text: &str) -> f32;

    /// Font bounding box of `text` set in `font`.
    ///
    /// Only meaningful for a single line; multi-line strings are measured as if
    /// they were one line.
    fn measure_bounding_box(&mut self, font: &FontDescriptor, text: &str) -> FontBoundingBox;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &mut M {
    fn measure_width(&mut self, font: &FontDescriptor, text: &str) -> f32 {
        (**self).measure_width(font, text)
    }

    fn measure_bounding_box(&mut self, font: &FontDescriptor, text: &str) -> FontBoundingBox {
        (**self).measure_bounding_box(font, text)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure_width(&mut self, font: &FontDescriptor, text: &str) -> f32 {
        (**self).measure_width(font, text)
    }

    fn measure_bounding_box(&mut self, font: &FontDescriptor, text: &str) -> FontBoundingBox {
        (**self).measure_bounding_box(font, text)
    }
}

impl<M: TextMeasurer> TextMeasurer for Rc<RefCell<M>> {
    fn measure_width(&mut self, font: &FontDescriptor, text: &str) -> f32 {
        self.borrow_mut().measure_width(font, text)
    }

    fn measure_bounding_box(&mut self, font: &FontDescriptor, text: &str) -> FontBoundingBox {
        self.borrow_mut().measure_bounding_box(font, text)
    }
}

impl<M: TextMeasurer> TextMeasurer for Arc<Mutex<M>> {
    fn measure_width(&mut self, font: &FontDescriptor, text: &str) -> f32 {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .measure_width(font, text)
    }

    fn measure_bounding_box(&mut self, font: &FontDescriptor, text: &str) -> FontBoundingBox {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .measure_bounding_box(font, text)
    }
}

/// Memoizing facade over another measurer.
///
/// Results are keyed by (font specification string, text). The binary search
/// in the line breaker measures many overlapping prefixes, and re-layout after
/// a style change that keeps the font re-measures the same strings.
///
/// Each map holds at most `capacity` entries. A map that is full is flushed
/// before the next insert, so a long-lived shared cache stays bounded while
/// text is edited.
#[derive(Debug)]
pub struct MeasureCache<M> {
    inner: M,
    capacity: usize,
    widths: HashMap<(String, String), f32>,
    boxes: HashMap<(String, String), FontBoundingBox>,
}

impl<M: TextMeasurer> MeasureCache<M> {
    /// Entries kept per map before a flush
    pub const DEFAULT_CAPACITY: usize = 4096;

    pub fn new(inner: M) -> Self {
        Self::with_capacity(inner, Self::DEFAULT_CAPACITY)
    }

    /// A cache holding at most `capacity` widths (and as many bounding
    /// boxes). A capacity of zero is raised to one.
    pub fn with_capacity(inner: M, capacity: usize) -> Self {
        Self {
            inner,
            capacity: capacity.max(1),
            widths: HashMap::new(),
            boxes: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn into_inner(self) -> M {
        self.inner
    }

    /// Number of memoized width entries
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Forget every memoized result, e.g. after fonts were added to the backend.
    pub fn clear(&mut self) {
        self.widths.clear();
        self.boxes.clear();
    }
}

impl<M: TextMeasurer + Default> Default for MeasureCache<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

/// Insert into a bounded map, flushing it first when it is full.
fn insert_bounded<V>(
    map: &mut HashMap<(String, String), V>,
    capacity: usize,
    key: (String, String),
    value: V,
) {
    if map.len() >= capacity {
        log::debug!("measure cache reached {capacity} entries, flushing");
        map.clear();
    }
    map.insert(key, value);
}

impl<M: TextMeasurer> TextMeasurer for MeasureCache<M> {
    fn measure_width(&mut self, font: &FontDescriptor, text: &str) -> f32 {
        let key = (font.as_str().to_owned(), text.to_owned());
        if let Some(width) = self.widths.get(&key) {
            return *width;
        }
        let width = self.inner.measure_width(font, text).max(0.0);
        insert_bounded(&mut self.widths, self.capacity, key, width);
        width
    }

    fn measure_bounding_box(&mut self, font: &FontDescriptor, text: &str) -> FontBoundingBox {
        let key = (font.as_str().to_owned(), text.to_owned());
        if let Some(bbox) = self.boxes.get(&key) {
            return *bbox;
        }
        let bbox = self.inner.measure_bounding_box(font, text);
        insert_bounded(&mut self.boxes, self.capacity, key, bbox);
        bbox
    }
}

/// Deterministic measurer: every code point advances by a fixed number of pixels.
///
/// Useful for headless hosts and tests where a real font stack is unavailable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Advance of one code point, in pixels
    pub advance: f32,
    /// Ascent as a fraction of the font size
    pub ascent_ratio: f32,
    /// Descent as a fraction of the font size
    pub descent_ratio: f32,
}

impl FixedAdvanceMeasurer {
    pub const fn new(advance: f32) -> Self {
        Self {
            advance,
            ascent_ratio: 0.8,
            descent_ratio: 0.2,
        }
    }

    pub const fn with_ratios(mut self, ascent_ratio: f32, descent_ratio: f32) -> Self {
        self.ascent_ratio = ascent_ratio;
        self.descent_ratio = descent_ratio;
        self
    }
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self::new(6.0)
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure_width(&mut self, _font: &FontDescriptor, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }

    fn measure_bounding_box(&mut self, font: &FontDescriptor, _text: &str) -> FontBoundingBox {
        FontBoundingBox::new(font.size * self.ascent_ratio, font.size * self.descent_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontStyle, FontVariant, FontWeight};

    /// Counts calls that reach the backend.
    struct CountingMeasurer {
        calls: usize,
    }

    impl TextMeasurer for CountingMeasurer {
        fn measure_width(&mut self, _font: &FontDescriptor, text: &str) -> f32 {
            self.calls += 1;
            text.len() as f32
        }

        fn measure_bounding_box(&mut self, _font: &FontDescriptor, _text: &str) -> FontBoundingBox {
            self.calls += 1;
            FontBoundingBox::new(8.0, 2.0)
        }
    }

    fn font(size: f32) -> FontDescriptor {
        FontDescriptor::new(
            FontStyle::Normal,
            FontWeight::Normal,
            FontVariant::Normal,
            size,
            "Arial",
        )
    }

    #[test]
    fn test_fixed_advance_counts_code_points() {
        let mut measurer = FixedAdvanceMeasurer::new(6.0);
        assert_eq!(measurer.measure_width(&font(10.0), "Hello"), 30.0);
        // One code point each, regardless of UTF-8 length
        assert_eq!(measurer.measure_width(&font(10.0), "é😀"), 12.0);
        assert_eq!(measurer.measure_width(&font(10.0), ""), 0.0);
    }

    #[test]
    fn test_fixed_advance_bounding_box_scales_with_size() {
        let mut measurer = FixedAdvanceMeasurer::new(6.0);
        let bbox = measurer.measure_bounding_box(&font(20.0), "Hg");
        assert_eq!(bbox, FontBoundingBox::new(16.0, 4.0));
    }

    #[test]
    fn test_cache_memoizes_by_font_and_text() {
        let mut cache = MeasureCache::new(CountingMeasurer { calls: 0 });

        assert_eq!(cache.measure_width(&font(10.0), "abc"), 3.0);
        assert_eq!(cache.measure_width(&font(10.0), "abc"), 3.0);
        assert_eq!(cache.inner().calls, 1);

        // A different font is a different key
        cache.measure_width(&font(11.0), "abc");
        assert_eq!(cache.inner().calls, 2);
        assert_eq!(cache.len(), 2);

        cache.measure_bounding_box(&font(10.0), "abc");
        cache.measure_bounding_box(&font(10.0), "abc");
        assert_eq!(cache.inner().calls, 3);

        cache.clear();
        assert!(cache.is_empty());
        cache.measure_width(&font(10.0), "abc");
        assert_eq!(cache.inner().calls, 4);
    }

    #[test]
    fn test_cache_stays_within_capacity() {
        let mut cache = MeasureCache::with_capacity(CountingMeasurer { calls: 0 }, 3);

        for text in ["a", "ab", "abc", "abcd", "abcde"] {
            cache.measure_width(&font(10.0), text);
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.inner().calls, 5);

        // "abcde" survived the flush and is still memoized
        cache.measure_width(&font(10.0), "abcde");
        assert_eq!(cache.inner().calls, 5);
        assert_eq!(cache.capacity(), 3);
    }

    #[test]
    fn test_shared_measurer_through_rc() {
        let shared = Rc::new(RefCell::new(FixedAdvanceMeasurer::new(5.0)));
        let mut a = Rc::clone(&shared);
        let mut b = Rc::clone(&shared);
        assert_eq!(a.measure_width(&font(10.0), "ab"), 10.0);
        assert_eq!(b.measure_width(&font(10.0), "abc"), 15.0);
    }

    #[test]
    fn test_shared_measurer_through_mutex() {
        let mut shared = Arc::new(Mutex::new(FixedAdvanceMeasurer::new(5.0)));
        assert_eq!(shared.measure_width(&font(10.0), "abcd"), 20.0);
    }
}
