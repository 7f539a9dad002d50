use boxtext::{
    compute_layout, plan_lines, resolve_box, Dimension, FixedAdvanceMeasurer, HorizontalAlign,
    LayoutConfig, LayoutResult, TextMeasurer, TextShape, Wrap, ELLIPSIS,
};

/// Monospace stub: 6px per code point.
fn mono() -> FixedAdvanceMeasurer {
    FixedAdvanceMeasurer::new(6.0)
}

fn layout(config: &LayoutConfig) -> LayoutResult {
    compute_layout(config, &mut mono())
}

fn texts(result: &LayoutResult) -> Vec<&str> {
    result.lines.iter().map(|line| line.text.as_str()).collect()
}

/// Strip all whitespace so line trimming doesn't matter.
fn squash(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn hello_world_wraps_into_two_lines() {
    let config = LayoutConfig::new("Hello World")
        .with_font_size(10.0)
        .with_width(Dimension::px(40.0));
    let result = layout(&config);

    assert_eq!(texts(&result), vec!["Hello", "World"]);
    assert!(result.lines.iter().all(|line| line.width <= 40.0));
}

#[test]
fn long_word_char_wrap_reconstructs_original() {
    let word = "Supercalifragilisticexpialidocious";
    let config = LayoutConfig::new(word)
        .with_width(Dimension::px(50.0))
        .with_wrap(Wrap::Char);
    let result = layout(&config);

    assert_eq!(
        texts(&result),
        vec!["Supercal", "ifragili", "sticexpi", "alidocio", "us"]
    );
    assert!(result.lines.iter().all(|line| line.width <= 50.0));
    let joined: String = result.lines.iter().map(|line| line.text.as_str()).collect();
    assert_eq!(joined, word);
}

#[test]
fn single_line_box_gets_ellipsis() {
    // 8px per code point so "a b c" (40px) is wider than the 30px box
    let config = LayoutConfig::new("a b c")
        .with_font_size(10.0)
        .with_width(Dimension::px(30.0))
        .with_height(Dimension::px(10.0))
        .with_ellipsis(true);
    let result = compute_layout(&config, &mut FixedAdvanceMeasurer::new(8.0));

    assert_eq!(result.lines.len(), 1);
    assert_eq!(result.lines[0].text, format!("a{ELLIPSIS}"));
    assert!(result.lines[0].width <= 30.0);
}

#[test]
fn justified_first_line_fills_box() {
    let config = LayoutConfig::new("one two six ten last")
        .with_width(Dimension::px(106.0))
        .with_padding(5.0)
        .with_align(HorizontalAlign::Justify);
    let mut measurer = mono();
    let result = compute_layout(&config, &mut measurer);

    // "one two six ten" (90px of 96px) then "last"
    assert_eq!(texts(&result), vec!["one two six ten", "last"]);
    assert_eq!(result.lines[0].text.matches(' ').count(), 3);

    let metrics = measurer.measure_bounding_box(&config.font_descriptor(), &config.text);
    let size = resolve_box(&config, &result, metrics);
    let plan = plan_lines(&config, &result, size, &mut measurer);

    assert_eq!(plan.lines[0].rendered_width, 106.0 - 2.0 * 5.0);
    assert_eq!(plan.lines[1].rendered_width, result.lines[1].width);
}

#[test]
fn fixed_width_lines_never_exceed_box() {
    let text = "The quick brown fox jumps over the lazy dog.\nPack my box with five dozen liquor jugs.";
    for width in [20.0, 37.0, 64.0, 111.0, 250.0] {
        let config = LayoutConfig::new(text).with_width(Dimension::px(width));
        let result = layout(&config);

        for line in &result.lines {
            assert!(line.width <= width, "{:?} wider than {width}", line.text);
        }
        assert_eq!(squash(&texts(&result).concat()), squash(text));
    }
}

#[test]
fn relayout_is_idempotent() {
    let config = LayoutConfig::new("alpha beta-gamma delta\n\nepsilon")
        .with_width(Dimension::px(45.0))
        .with_height(Dimension::px(40.0))
        .with_letter_spacing(0.5)
        .with_ellipsis(true);

    let mut measurer = mono();
    let first = compute_layout(&config, &mut measurer);
    let second = compute_layout(&config, &mut measurer);
    assert_eq!(first, second);
}

#[test]
fn auto_width_is_widest_line_plus_padding() {
    let config = LayoutConfig::new("short\na much longer line\nmid")
        .with_padding(7.0);
    let shape = TextShape::new(config, mono());

    let widest = shape
        .lines()
        .iter()
        .map(|line| line.width)
        .fold(0.0, f32::max);
    assert_eq!(shape.width(), widest + 14.0);
}

#[test]
fn auto_height_matches_formula() {
    let config = LayoutConfig::new("one\ntwo\nthree")
        .with_font_size(20.0)
        .with_line_height(1.25)
        .with_padding(0.0);
    let measurer = FixedAdvanceMeasurer::new(6.0).with_ratios(0.75, 0.25);
    let shape = TextShape::new(config, measurer);

    // 1.25 * (20 + 5) * 3 - (20 - 15)
    assert_eq!(shape.height(), 88.75);
}

#[test]
fn auto_height_ignores_padding() {
    let config = LayoutConfig::new("one\ntwo\nthree")
        .with_font_size(20.0)
        .with_line_height(1.25)
        .with_padding(4.0);
    let measurer = FixedAdvanceMeasurer::new(6.0).with_ratios(0.75, 0.25);
    let shape = TextShape::new(config, measurer);

    // Same formula as without padding; only the width grows by 2 * padding
    assert_eq!(shape.height(), 88.75);
    assert_eq!(shape.width(), shape.text_width() + 8.0);
}

#[test]
fn hidden_paragraph_marks_wrapped_last_row() {
    let config = LayoutConfig::new("aaa bbb\nccc")
        .with_font_size(10.0)
        .with_width(Dimension::px(30.0))
        .with_height(Dimension::px(20.0))
        .with_ellipsis(true);
    let result = layout(&config);

    assert_eq!(result.lines.len(), 2);
    assert_eq!(result.lines[1].text, format!("bbb{ELLIPSIS}"));
    assert!(result.lines.iter().all(|line| line.width <= 30.0));
}

#[test]
fn wrap_none_without_ellipsis_has_single_unmarked_line() {
    let config = LayoutConfig::new("this will not wrap at all")
        .with_width(Dimension::px(50.0))
        .with_wrap(Wrap::None);
    let result = layout(&config);

    assert_eq!(result.lines.len(), 1);
    assert!(!result.lines[0].text.ends_with(ELLIPSIS));
}

#[test]
fn wrap_none_with_ellipsis_always_marks_cut() {
    for text in ["abcdefghijklmnop", "a few short words here", "x y z w v u t s"] {
        let config = LayoutConfig::new(text)
            .with_width(Dimension::px(50.0))
            .with_wrap(Wrap::None)
            .with_ellipsis(true);
        let result = layout(&config);

        assert_eq!(result.lines.len(), 1, "{text}");
        assert!(result.lines[0].text.ends_with(ELLIPSIS), "{text}");
    }
}
