//! Integration tests for word-wrapping layout.

use wren_html::{Token, lex};
use wren_layout::{
    ApproximateFontMetrics, DisplayList, FontMetrics, LayoutConfig, LayoutItem, TextStyle, layout,
    layout_html,
};

/// Every character is 10px wide (12px in bold); lines are 20px tall.
struct FixedMetrics;

impl FontMetrics for FixedMetrics {
    fn text_width(&self, text: &str, style: TextStyle) -> i32 {
        let per_char = if style.bold { 12 } else { 10 };
        i32::try_from(text.chars().count()).unwrap() * per_char
    }

    fn line_height(&self, _style: TextStyle) -> i32 {
        20
    }
}

/// `round(20 * 1.25) + 8`
const LINE_ADVANCE: i32 = 33;

const BOLD: TextStyle = TextStyle {
    bold: true,
    italic: false,
};

const ITALIC: TextStyle = TextStyle {
    bold: false,
    italic: true,
};

fn item(x: i32, y: i32, text: &str, style: TextStyle) -> LayoutItem {
    LayoutItem {
        x,
        y,
        text: text.to_string(),
        style,
    }
}

fn lay_out(source: &str, width: i32) -> DisplayList {
    layout_html(source, &FixedMetrics, &LayoutConfig::new(width))
}

#[test]
fn test_empty_document() {
    assert!(lay_out("", 800).is_empty());
    assert!(lay_out("<p>   </p>", 800).is_empty());
}

#[test]
fn test_bold_then_plain_on_one_line() {
    let display_list = lay_out("<b>bold</b> plain", 800);
    assert_eq!(
        display_list.items(),
        &[
            item(10, 20, "bold", BOLD),
            // 10 + 4 * 12 + 12 (bold space)
            item(70, 20, "plain", TextStyle::NORMAL),
        ]
    );
}

#[test]
fn test_italic_toggle_and_other_tags_ignored() {
    let display_list = lay_out("<p>a <i>b</i></p><div>c</div>", 800);
    assert_eq!(
        display_list.items(),
        &[
            item(10, 20, "a", TextStyle::NORMAL),
            item(30, 20, "b", ITALIC),
            // "</i>" clears italic; no break for </p> or <div>.
            item(50, 20, "c", TextStyle::NORMAL),
        ]
    );
}

#[test]
fn test_tags_do_not_nest() {
    let display_list = lay_out("<b><b>x</b>y</b>", 800);
    assert_eq!(display_list.items()[0].style, BOLD);
    assert_eq!(display_list.items()[1].style, TextStyle::NORMAL);
}

#[test]
fn test_bold_and_italic_combine() {
    let display_list = lay_out("<b><i>both</i></b>", 800);
    assert_eq!(
        display_list.items()[0].style,
        TextStyle {
            bold: true,
            italic: true
        }
    );
}

#[test]
fn test_wraps_exactly_past_the_limit() {
    // width 100, hstep 10: a word may end at x = 90 but not beyond.
    let display_list = lay_out("aaaa bbb c d", 100);
    assert_eq!(
        display_list.items(),
        &[
            item(10, 20, "aaaa", TextStyle::NORMAL),
            // 60 + 30 = 90: fits exactly.
            item(60, 20, "bbb", TextStyle::NORMAL),
            // 100 + 10 > 90: wraps.
            item(10, 20 + LINE_ADVANCE, "c", TextStyle::NORMAL),
            item(30, 20 + LINE_ADVANCE, "d", TextStyle::NORMAL),
        ]
    );
}

#[test]
fn test_wrap_uses_vpad_and_hstep() {
    let config = LayoutConfig::new(60).with_hstep(5).with_vpad(0);
    // Limit is max(15, 55) = 55.
    let display_list = layout(&lex("aaaa bbbb"), &FixedMetrics, &config);
    assert_eq!(
        display_list.items(),
        &[
            item(5, 20, "aaaa", TextStyle::NORMAL),
            item(5, 45, "bbbb", TextStyle::NORMAL),
        ]
    );
}

#[test]
fn test_overlong_word_wraps_even_at_line_start() {
    let display_list = lay_out("abcdefgh", 50);
    assert_eq!(
        display_list.items(),
        &[item(10, 20 + LINE_ADVANCE, "abcdefgh", TextStyle::NORMAL)]
    );
}

#[test]
fn test_narrow_viewport_uses_minimum_limit() {
    // width - hstep would be negative; the limit stays at hstep + 10 = 20.
    let display_list = lay_out("a b", 0);
    assert_eq!(
        display_list.items(),
        &[
            item(10, 20, "a", TextStyle::NORMAL),
            item(10, 20 + LINE_ADVANCE, "b", TextStyle::NORMAL),
        ]
    );
}

#[test]
fn test_whitespace_runs_and_newlines_split_words() {
    let display_list = lay_out("one\n\ttwo   three", 800);
    let words: Vec<&str> = display_list.iter().map(|item| item.text.as_str()).collect();
    assert_eq!(words, ["one", "two", "three"]);
}

#[test]
fn test_script_and_style_are_not_laid_out() {
    let display_list = lay_out("<style>p { x }</style>shown<script>hidden()</script>", 800);
    assert_eq!(display_list.items(), &[item(10, 20, "shown", TextStyle::NORMAL)]);
}

#[test]
fn test_tokens_and_string_entry_points_agree() {
    let source = "<p>Some <b>bold</b> and <i>slanted</i> words &lt;here&gt; that wrap around</p>";
    let config = LayoutConfig::new(120);
    assert_eq!(
        layout_html(source, &FixedMetrics, &config),
        layout(&lex(source), &FixedMetrics, &config)
    );
}

#[test]
fn test_pretokenized_input() {
    let tokens = vec![
        Token::tag("i"),
        Token::text("x"),
        Token::tag("/i"),
        Token::text("y"),
    ];
    let display_list = layout(&tokens, &FixedMetrics, &LayoutConfig::default());
    assert_eq!(
        display_list.items(),
        &[
            item(10, 20, "x", ITALIC),
            item(30, 20, "y", TextStyle::NORMAL),
        ]
    );
}

#[test]
fn test_last_baseline() {
    assert_eq!(lay_out("", 800).last_baseline(), None);
    assert_eq!(
        lay_out("aaaa bbbb cccc", 100).last_baseline(),
        Some(20 + 2 * LINE_ADVANCE)
    );
}

#[test]
fn test_approximate_metrics() {
    let metrics = ApproximateFontMetrics::new(10.0);
    assert_eq!(metrics.text_width("abc", TextStyle::NORMAL), 18);
    assert_eq!(metrics.text_width("abc", BOLD), 18);
    assert_eq!(metrics.text_width("", TextStyle::NORMAL), 0);
    assert_eq!(metrics.line_height(TextStyle::NORMAL), 12);
}

#[test]
fn test_approximate_metrics_layout() {
    let display_list = layout_html(
        "hello world",
        &ApproximateFontMetrics::new(10.0),
        &LayoutConfig::default(),
    );
    // "hello" is 30px and a space is 6px.
    assert_eq!(
        display_list.items(),
        &[
            item(10, 12, "hello", TextStyle::NORMAL),
            item(46, 12, "world", TextStyle::NORMAL),
        ]
    );
}

#[test]
fn test_display_list_serializes_to_json() {
    let json = serde_json::to_value(lay_out("<b>hi</b>", 800)).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            { "x": 10, "y": 20, "text": "hi", "style": { "bold": true, "italic": false } }
        ])
    );
}
