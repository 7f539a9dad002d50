//! Lays out a string with system fonts and prints the lines and the draw
//! calls a surface would receive.
//!
//! ```text
//! RUST_LOG=debug cargo run -p boxtext-measure --example layout_dump -- "Some text" 120 justify
//! ```

use boxtext::{
    DebugOptions, Dimension, HorizontalAlign, LayoutConfig, MeasureCache, RecordingSurface,
    Renderable, TextDecoration, TextShape,
};
use boxtext_measure::CosmicMeasurer;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let text = args
        .next()
        .unwrap_or_else(|| "The quick brown fox jumps over the lazy dog.".to_owned());
    let width = args
        .next()
        .map(|value| Dimension::parse_lenient(&value))
        .unwrap_or(Dimension::px(160.0));
    let align = args
        .next()
        .and_then(|value| match value.parse::<HorizontalAlign>() {
            Ok(align) => Some(align),
            Err(err) => {
                log::warn!("{err}, using left");
                None
            }
        })
        .unwrap_or_default();

    let config = LayoutConfig::new(text)
        .with_font_family("Helvetica, sans-serif")
        .with_font_size(16.0)
        .with_line_height(1.2)
        .with_padding(4.0)
        .with_width(width)
        .with_align(align)
        .with_decoration(TextDecoration::underline());

    let mut shape = TextShape::new(config, MeasureCache::new(CosmicMeasurer::new()));

    println!("font: {}", shape.font_descriptor());
    println!(
        "box: {} x {} (text width {})",
        shape.width(),
        shape.height(),
        shape.text_width()
    );
    for (index, line) in shape.lines().iter().enumerate() {
        println!("{index:>3} {:>8.2} {:?}", line.width, line.text);
    }

    let mut surface = RecordingSurface::new();
    shape.render(&mut surface);
    shape.render_debug(&mut surface, DebugOptions::all());

    println!("\n{} draw calls", surface.calls().len());
    for call in surface.calls() {
        println!("  {call:?}");
    }
    println!("cached widths: {}", shape.measurer().len());
}
