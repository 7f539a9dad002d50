//! [`TextShape`]: a text box that owns its configuration and keeps its line
//! layout current.
//!
//! Every setter that touches a layout attribute re-runs line breaking
//! immediately, so getters and render calls always see a fresh
//! [`LayoutResult`].

use crate::color::{css, Color};
use crate::content::{
    Dimension, HorizontalAlign, LayoutConfig, TextDecoration, VerticalAlign, Wrap,
};
use crate::debug::DebugOptions;
use crate::font::{FontDescriptor, FontStyle, FontVariant, FontWeight};
use crate::layout::{compute_layout, spaced_text_width, LayoutResult, Line};
use crate::measure::{FontBoundingBox, IntrinsicSize, TextMeasurer};
use crate::primitives::Rect;
use crate::render::{plan_lines, RenderPlan};
use crate::sizer::{resolve_box, BoxSize};
use crate::surface::DrawSurface;

/// Fill and stroke paint of a text box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPaint {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
}

impl Default for TextPaint {
    fn default() -> Self {
        Self {
            fill: Some(css::BLACK),
            stroke: None,
            stroke_width: 1.0,
        }
    }
}

impl TextPaint {
    /// Colour for underline/strike-through: the fill, else the stroke.
    pub fn decoration_color(&self) -> Option<Color> {
        self.fill.or(self.stroke)
    }
}

/// Draw entry points called by the host render loop.
pub trait Renderable {
    /// Fill the text (and decorations) onto `surface`.
    fn render_fill(&mut self, surface: &mut dyn DrawSurface);

    /// Outline the text onto `surface`.
    fn render_stroke(&mut self, surface: &mut dyn DrawSurface);

    /// Draw the hit region; the host chooses the fill colour.
    fn render_hit(&mut self, surface: &mut dyn DrawSurface);

    /// Fill then stroke.
    fn render(&mut self, surface: &mut dyn DrawSurface) {
        self.render_fill(surface);
        self.render_stroke(surface);
    }
}

/// A text box laid out with measurer `M`.
#[derive(Debug)]
pub struct TextShape<M> {
    config: LayoutConfig,
    paint: TextPaint,
    measurer: M,
    layout: LayoutResult,
    metrics: FontBoundingBox,
    size: BoxSize,
}

impl<M: TextMeasurer> TextShape<M> {
    pub fn new(config: LayoutConfig, measurer: M) -> Self {
        let mut shape = Self {
            config,
            paint: TextPaint::default(),
            measurer,
            layout: LayoutResult::default(),
            metrics: FontBoundingBox::default(),
            size: BoxSize::default(),
        };
        shape.relayout();
        shape
    }

    pub fn with_paint(mut self, paint: TextPaint) -> Self {
        self.paint = paint;
        self
    }

    fn relayout(&mut self) {
        self.layout = compute_layout(&self.config, &mut self.measurer);
        let font = self.config.font_descriptor();
        self.metrics = self.measurer.measure_bounding_box(&font, &self.config.text);
        self.size = resolve_box(&self.config, &self.layout, self.metrics);
    }

    /// Apply `change` and relayout if the configuration actually changed.
    fn update(&mut self, change: impl FnOnce(&mut LayoutConfig)) {
        let previous = self.config.clone();
        change(&mut self.config);
        if self.config != previous {
            self.relayout();
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the whole configuration
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.update(|c| *c = config);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.update(|c| c.text = text);
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        let family = family.into();
        self.update(|c| c.font_family = family);
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.update(|c| c.font_size = size);
    }

    pub fn set_font_style(&mut self, style: FontStyle) {
        self.update(|c| c.font_style = style);
    }

    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.update(|c| c.font_weight = weight);
    }

    pub fn set_font_variant(&mut self, variant: FontVariant) {
        self.update(|c| c.font_variant = variant);
    }

    pub fn set_padding(&mut self, padding: f32) {
        self.update(|c| c.padding = padding);
    }

    pub fn set_align(&mut self, align: HorizontalAlign) {
        self.update(|c| c.align = align);
    }

    pub fn set_vertical_align(&mut self, align: VerticalAlign) {
        self.update(|c| c.vertical_align = align);
    }

    pub fn set_line_height(&mut self, line_height: f32) {
        self.update(|c| c.line_height = line_height);
    }

    pub fn set_width(&mut self, width: Dimension) {
        self.update(|c| c.width = width);
    }

    pub fn set_height(&mut self, height: Dimension) {
        self.update(|c| c.height = height);
    }

    pub fn set_wrap(&mut self, wrap: Wrap) {
        self.update(|c| c.wrap = wrap);
    }

    pub fn set_ellipsis(&mut self, ellipsis: bool) {
        self.update(|c| c.ellipsis = ellipsis);
    }

    pub fn set_letter_spacing(&mut self, spacing: f32) {
        self.update(|c| c.letter_spacing = spacing);
    }

    pub fn set_decoration(&mut self, decoration: TextDecoration) {
        self.update(|c| c.decoration = decoration);
    }

    pub fn paint(&self) -> &TextPaint {
        &self.paint
    }

    pub fn set_paint(&mut self, paint: TextPaint) {
        self.paint = paint;
    }

    pub fn set_fill(&mut self, fill: Option<Color>) {
        self.paint.fill = fill;
    }

    pub fn set_stroke(&mut self, stroke: Option<Color>, width: f32) {
        self.paint.stroke = stroke;
        self.paint.stroke_width = width;
    }

    /// Box width, padding included
    pub fn width(&self) -> f32 {
        self.size.width
    }

    /// Box height, padding included
    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn size(&self) -> BoxSize {
        self.size
    }

    /// Widest line, without padding
    pub fn text_width(&self) -> f32 {
        self.layout.text_width
    }

    /// Nominal height of a single line
    #[deprecated(note = "single-line height; use `height()` for the box height")]
    pub fn text_height(&self) -> f32 {
        self.layout.text_height
    }

    pub fn lines(&self) -> &[Line] {
        &self.layout.lines
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    /// Ascent/descent probe used for the auto height
    pub fn font_metrics(&self) -> FontBoundingBox {
        self.metrics
    }

    pub fn font_descriptor(&self) -> FontDescriptor {
        self.config.font_descriptor()
    }

    /// Measure `text` in the current font; the height is the font size.
    pub fn measure_size(&mut self, text: &str) -> IntrinsicSize {
        let font = self.config.font_descriptor();
        let width = spaced_text_width(
            &mut self.measurer,
            &font,
            self.config.letter_spacing,
            text,
        );
        IntrinsicSize::new(width, self.config.font_size)
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    pub fn into_measurer(self) -> M {
        self.measurer
    }

    /// Draw instructions for the current layout.
    pub fn render_plan(&mut self) -> RenderPlan {
        plan_lines(&self.config, &self.layout, self.size, &mut self.measurer)
    }

    /// Outline lines and the content box according to `options`.
    pub fn render_debug(&mut self, surface: &mut dyn DrawSurface, options: DebugOptions) {
        if !options.is_enabled() {
            return;
        }

        let plan = self.render_plan();
        let line_height_px = self.config.line_height_px();
        let padding = self.config.padding;

        surface.save();
        surface.set_line_width(1.0);

        if options.show_content_box {
            let content = Rect::from_min_size(
                [padding, padding],
                [
                    self.size.width - padding * 2.0,
                    self.size.height - padding * 2.0,
                ],
            );
            stroke_rect(surface, content, DebugOptions::CONTENT_BOX_COLOR);
        }

        if options.show_line_bounds {
            for line in &plan.lines {
                let bounds = Rect::from_min_size(
                    [
                        plan.origin.x + line.x,
                        plan.origin.y + line.baseline - line_height_px / 2.0,
                    ],
                    [line.rendered_width, line_height_px],
                );
                stroke_rect(surface, bounds, DebugOptions::LINE_BOUNDS_COLOR);
            }
        }

        surface.restore();
    }
}

fn stroke_rect(surface: &mut dyn DrawSurface, rect: Rect, color: Color) {
    surface.begin_path();
    surface.rect(rect.min[0], rect.min[1], rect.width(), rect.height());
    surface.set_stroke_style(color);
    surface.stroke();
}

impl<M: TextMeasurer> Renderable for TextShape<M> {
    fn render_fill(&mut self, surface: &mut dyn DrawSurface) {
        let Some(fill) = self.paint.fill else {
            return;
        };

        let plan = self.render_plan();
        plan.begin(surface);
        surface.set_fill_style(fill);
        plan.paint_decorations(surface, fill);
        plan.paint_text(surface, false);
        plan.end(surface);
    }

    fn render_stroke(&mut self, surface: &mut dyn DrawSurface) {
        let Some(stroke) = self.paint.stroke else {
            return;
        };
        if self.paint.stroke_width <= 0.0 {
            return;
        }

        let plan = self.render_plan();
        plan.begin(surface);
        // Decorations are painted by the fill pass when there is one
        if self.paint.fill.is_none() {
            plan.paint_decorations(surface, stroke);
        }
        surface.set_stroke_style(stroke);
        surface.set_line_width(self.paint.stroke_width);
        plan.paint_text(surface, true);
        plan.end(surface);
    }

    fn render_hit(&mut self, surface: &mut dyn DrawSurface) {
        surface.begin_path();
        surface.rect(0.0, 0.0, self.size.width, self.size.height);
        surface.fill();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::measure::{FixedAdvanceMeasurer, MeasureCache};
    use crate::surface::{RecordingSurface, SurfaceCall};

    fn shape(config: LayoutConfig) -> TextShape<FixedAdvanceMeasurer> {
        TextShape::new(config, FixedAdvanceMeasurer::new(6.0))
    }

    #[test]
    fn test_auto_size() {
        let shape = shape(
            LayoutConfig::new("Hello\nWorld!")
                .with_font_size(10.0)
                .with_padding(2.0),
        );

        assert_eq!(shape.lines().len(), 2);
        assert_eq!(shape.text_width(), 36.0);
        assert_eq!(shape.width(), 40.0);
        // 1 * (10 + 2) * 2 - (10 - 8), padding not included
        assert_eq!(shape.height(), 22.0);
    }

    #[test]
    fn test_setters_relayout_eagerly() {
        let mut shape = shape(LayoutConfig::new("Hello World").with_font_size(10.0));
        assert_eq!(shape.lines().len(), 1);

        shape.set_width(Dimension::px(40.0));
        assert_eq!(shape.lines().len(), 2);
        assert_eq!(shape.width(), 40.0);

        shape.set_text("Hi");
        assert_eq!(shape.lines().len(), 1);
        assert_eq!(shape.text_width(), 12.0);

        shape.set_wrap(Wrap::None);
        shape.set_text("Hello World");
        assert_eq!(shape.lines().len(), 1);
    }

    /// Counts width measurements that reach it.
    #[derive(Default)]
    struct CountingMeasurer {
        widths: usize,
    }

    impl TextMeasurer for CountingMeasurer {
        fn measure_width(&mut self, _font: &FontDescriptor, text: &str) -> f32 {
            self.widths += 1;
            text.chars().count() as f32 * 6.0
        }

        fn measure_bounding_box(&mut self, font: &FontDescriptor, _text: &str) -> FontBoundingBox {
            FontBoundingBox::new(font.size * 0.8, font.size * 0.2)
        }
    }

    #[test]
    fn test_unchanged_value_skips_relayout() {
        let mut shape = TextShape::new(LayoutConfig::new("abc"), CountingMeasurer::default());
        let calls = shape.measurer().widths;

        shape.set_padding(0.0);
        assert_eq!(shape.measurer().widths, calls);

        shape.set_padding(1.0);
        assert!(shape.measurer().widths > calls);
    }

    #[test]
    fn test_shapes_share_a_cached_measurer() {
        let shared = Rc::new(RefCell::new(MeasureCache::new(FixedAdvanceMeasurer::new(6.0))));
        let a = TextShape::new(LayoutConfig::new("same text"), Rc::clone(&shared));
        let b = TextShape::new(LayoutConfig::new("same text"), Rc::clone(&shared));

        assert_eq!(a.text_width(), b.text_width());
        assert_eq!(shared.borrow().len(), 1);
    }

    #[test]
    #[allow(deprecated)]
    fn test_text_height_is_font_size() {
        let shape = shape(LayoutConfig::new("a\nb\nc").with_font_size(14.0));
        assert_eq!(shape.text_height(), 14.0);
    }

    #[test]
    fn test_measure_size() {
        let mut shape = shape(LayoutConfig::new("").with_font_size(20.0));
        assert_eq!(shape.measure_size("four"), IntrinsicSize::new(24.0, 20.0));
    }

    #[test]
    fn test_render_fill_draws_every_line() {
        let mut shape = shape(
            LayoutConfig::new("Hello World")
                .with_font_size(10.0)
                .with_width(Dimension::px(40.0)),
        );
        let mut surface = RecordingSurface::new();
        shape.render_fill(&mut surface);

        assert_eq!(surface.filled_string(), "HelloWorld");
        assert!(surface
            .calls()
            .contains(&SurfaceCall::SetFont("normal normal 10px Arial".to_owned())));
        assert_eq!(surface.calls().first(), Some(&SurfaceCall::Save));
        assert_eq!(surface.calls().last(), Some(&SurfaceCall::Restore));
    }

    #[test]
    fn test_render_stroke_only_with_stroke_paint() {
        let mut shape = shape(LayoutConfig::new("ab"));
        let mut surface = RecordingSurface::new();

        shape.render_stroke(&mut surface);
        assert!(surface.calls().is_empty());

        shape.set_stroke(Some(css::RED), 2.0);
        shape.render(&mut surface);
        let stroked: Vec<&str> = surface
            .texts()
            .iter()
            .filter(|t| t.stroked)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(stroked, vec!["ab"]);
        assert!(surface.calls().contains(&SurfaceCall::SetLineWidth(2.0)));
    }

    #[test]
    fn test_stroke_pass_draws_decorations_without_fill() {
        let mut shape = shape(LayoutConfig::new("ab").with_decoration(TextDecoration::underline()));
        shape.set_paint(TextPaint {
            fill: None,
            stroke: Some(css::BLUE),
            stroke_width: 1.0,
        });

        let mut surface = RecordingSurface::new();
        shape.render(&mut surface);
        assert_eq!(surface.segments().len(), 1);
        assert!(surface.calls().contains(&SurfaceCall::SetStrokeStyle(css::BLUE)));
    }

    #[test]
    fn test_render_hit_covers_box() {
        let mut shape = shape(
            LayoutConfig::new("abc")
                .with_width(Dimension::px(50.0))
                .with_height(Dimension::px(20.0)),
        );
        let mut surface = RecordingSurface::new();
        shape.render_hit(&mut surface);

        assert_eq!(
            surface.calls(),
            &[
                SurfaceCall::BeginPath,
                SurfaceCall::Rect {
                    x: 0.0,
                    y: 0.0,
                    width: 50.0,
                    height: 20.0
                },
                SurfaceCall::Fill,
            ]
        );
    }

    #[test]
    fn test_render_debug_outlines_lines() {
        let mut shape = shape(
            LayoutConfig::new("Hello World")
                .with_font_size(10.0)
                .with_width(Dimension::px(40.0)),
        );
        let mut surface = RecordingSurface::new();

        shape.render_debug(&mut surface, DebugOptions::none());
        assert!(surface.calls().is_empty());

        shape.render_debug(&mut surface, DebugOptions::none().with_show_line_bounds(true));
        let rects: Vec<&SurfaceCall> = surface
            .calls()
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Rect { .. }))
            .collect();
        assert_eq!(
            rects,
            vec![
                &SurfaceCall::Rect {
                    x: 0.0,
                    y: 0.0,
                    width: 30.0,
                    height: 10.0
                },
                &SurfaceCall::Rect {
                    x: 0.0,
                    y: 10.0,
                    width: 30.0,
                    height: 10.0
                },
            ]
        );
    }
}
