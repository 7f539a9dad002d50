//! The drawing surface a text box paints onto.
//!
//! [`DrawSurface`] mirrors the small subset of a 2D canvas context that text
//! rendering needs. Hosts implement it over their raster backend;
//! [`RecordingSurface`] records calls in memory.

use crate::color::Color;
use crate::primitives::Point;

/// Vertical anchor of `fill_text`/`stroke_text` relative to `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Alphabetic,
    Bottom,
}

/// Horizontal anchor of `fill_text`/`stroke_text` relative to `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Scoped 2D drawing operations.
pub trait DrawSurface {
    fn set_font(&mut self, font: &str);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_line_width(&mut self, width: f32);
    fn set_fill_style(&mut self, color: Color);
    fn set_stroke_style(&mut self, color: Color);

    fn fill_text(&mut self, text: &str, x: f32, y: f32);
    fn stroke_text(&mut self, text: &str, x: f32, y: f32);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill(&mut self);
    fn stroke(&mut self);

    /// Push the current transform and state
    fn save(&mut self);
    /// Pop the state pushed by the matching `save`
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
}

/// One recorded [`DrawSurface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    SetFont(String),
    SetTextBaseline(TextBaseline),
    SetTextAlign(TextAlign),
    SetLineWidth(f32),
    SetFillStyle(Color),
    SetStrokeStyle(Color),
    FillText { text: String, x: f32, y: f32 },
    StrokeText { text: String, x: f32, y: f32 },
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Fill,
    Stroke,
    Save,
    Restore,
    Translate(f32, f32),
}

/// Text placed by `fill_text`/`stroke_text`, in surface space.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub position: Point,
    pub stroked: bool,
}

/// A straight segment from `move_to` + `line_to`, in surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedSegment {
    pub from: Point,
    pub to: Point,
    pub line_width: f32,
}

/// In-memory surface that records every call and tracks translation, so
/// tests and tools can inspect where things end up.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
    offset: Point,
    line_width: f32,
    stack: Vec<(Point, f32)>,
    pen: Option<Point>,
    texts: Vec<PlacedText>,
    segments: Vec<PlacedSegment>,
    pending_segments: Vec<(Point, Point)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            line_width: 1.0,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Every text call with its translated position
    pub fn texts(&self) -> &[PlacedText] {
        &self.texts
    }

    /// Every stroked segment with its translated end points
    pub fn segments(&self) -> &[PlacedSegment] {
        &self.segments
    }

    /// Concatenated text of all `fill_text` calls
    pub fn filled_string(&self) -> String {
        self.texts
            .iter()
            .filter(|placed| !placed.stroked)
            .map(|placed| placed.text.as_str())
            .collect()
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn place(&self, x: f32, y: f32) -> Point {
        self.offset.offset(x, y)
    }
}

impl DrawSurface for RecordingSurface {
    fn set_font(&mut self, font: &str) {
        self.calls.push(SurfaceCall::SetFont(font.to_owned()));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.calls.push(SurfaceCall::SetTextBaseline(baseline));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.calls.push(SurfaceCall::SetTextAlign(align));
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
        self.calls.push(SurfaceCall::SetLineWidth(width));
    }

    fn set_fill_style(&mut self, color: Color) {
        self.calls.push(SurfaceCall::SetFillStyle(color));
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.calls.push(SurfaceCall::SetStrokeStyle(color));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.texts.push(PlacedText {
            text: text.to_owned(),
            position: self.place(x, y),
            stroked: false,
        });
        self.calls.push(SurfaceCall::FillText {
            text: text.to_owned(),
            x,
            y,
        });
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        self.texts.push(PlacedText {
            text: text.to_owned(),
            position: self.place(x, y),
            stroked: true,
        });
        self.calls.push(SurfaceCall::StrokeText {
            text: text.to_owned(),
            x,
            y,
        });
    }

    fn begin_path(&mut self) {
        self.pen = None;
        self.pending_segments.clear();
        self.calls.push(SurfaceCall::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.pen = Some(self.place(x, y));
        self.calls.push(SurfaceCall::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let to = self.place(x, y);
        if let Some(from) = self.pen {
            self.pending_segments.push((from, to));
        }
        self.pen = Some(to);
        self.calls.push(SurfaceCall::LineTo(x, y));
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(SurfaceCall::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill(&mut self) {
        self.calls.push(SurfaceCall::Fill);
    }

    fn stroke(&mut self) {
        let line_width = self.line_width;
        self.segments.extend(
            self.pending_segments
                .iter()
                .map(|(from, to)| PlacedSegment {
                    from: *from,
                    to: *to,
                    line_width,
                }),
        );
        self.calls.push(SurfaceCall::Stroke);
    }

    fn save(&mut self) {
        self.stack.push((self.offset, self.line_width));
        self.calls.push(SurfaceCall::Save);
    }

    fn restore(&mut self) {
        if let Some((offset, line_width)) = self.stack.pop() {
            self.offset = offset;
            self.line_width = line_width;
        }
        self.calls.push(SurfaceCall::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.offset = self.offset.offset(x, y);
        self.calls.push(SurfaceCall::Translate(x, y));
    }
}
