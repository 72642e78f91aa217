// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::builder::{AttributedStringBuilder, SpanStyle};
use crate::config::{MarkdownTheme, TextProperty};
use crate::fragment::TextFragment;
use crate::style::{FontWeight, TextStyle};

use super::utils::{sized, TestEnv};

fn markdown() -> TestEnv {
    TestEnv::new().with(TextProperty::ParseBasicMarkdown(true))
}

#[test]
fn bold_and_code_become_two_spans() {
    let string = markdown().string("**bold** and `code`");
    assert_eq!(string.text(), "bold and code");

    let spans = string.spans();
    assert_eq!(spans.len(), 2);
    assert_eq!(&string.text()[spans[0].range.clone()], "bold");
    assert_eq!(spans[0].attr, SpanStyle::Bold);
    assert_eq!(&string.text()[spans[1].range.clone()], "code");
    let theme = MarkdownTheme::default();
    assert_eq!(
        spans[1].attr,
        SpanStyle::Code {
            background: theme.code_background,
            foreground: theme.code_foreground,
        }
    );
}

#[test]
fn unterminated_bold_is_literal() {
    let string = markdown().string("**oops");
    assert_eq!(string.text(), "**oops");
    assert!(string.spans().is_empty());
}

#[test]
fn unterminated_code_is_literal() {
    let string = markdown().string("a `b");
    assert_eq!(string.text(), "a `b");
    assert!(string.spans().is_empty());
}

#[test]
fn empty_pairs_are_literal() {
    let string = markdown().string("**** and ``");
    assert_eq!(string.text(), "**** and ``");
    assert!(string.spans().is_empty());
}

#[test]
fn other_delimiter_inside_a_pair_is_literal() {
    let string = markdown().string("**a `b** c");
    assert_eq!(string.text(), "a `b c");
    assert_eq!(string.spans().len(), 1);
    assert_eq!(string.spans()[0].range, 0..4);
    assert_eq!(string.spans()[0].attr, SpanStyle::Bold);

    let string = markdown().string("`x ** y`");
    assert_eq!(string.text(), "x ** y");
    assert_eq!(string.spans().len(), 1);
    assert!(matches!(string.spans()[0].attr, SpanStyle::Code { .. }));
}

#[test]
fn spans_are_sorted_and_disjoint() {
    let string = markdown().string("`a` **b** `c` **d**");
    assert_eq!(string.text(), "a b c d");
    let spans = string.spans();
    assert_eq!(spans.len(), 4);
    for pair in spans.windows(2) {
        assert!(
            pair[0].range.end <= pair[1].range.start,
            "spans overlap or are out of order"
        );
    }
}

#[test]
fn markup_is_plain_text_when_disabled() {
    let string = TestEnv::new().string("**bold** and `code`");
    assert_eq!(string.text(), "**bold** and `code`");
    assert!(string.spans().is_empty());
}

#[test]
fn equal_positions_keep_insertion_order() {
    let fragments = [
        TextFragment::new(1, "c", TextStyle::default()),
        TextFragment::new(0, "a", TextStyle::default()),
        TextFragment::new(1, "d", TextStyle::default()),
        TextFragment::new(0, "b", TextStyle::default()),
    ];
    let string = AttributedStringBuilder::new(&fragments).build();
    assert_eq!(string.text(), "abcd");
}

#[test]
fn runs_tile_the_rendered_text() {
    let fragments = [
        TextFragment::new(0, "**one", sized(10.0)),
        TextFragment::new(1, "", sized(12.0)),
        TextFragment::new(2, " two**", sized(14.0)),
        TextFragment::new(3, " three", sized(16.0)),
    ];
    let string = markdown().string_from(&fragments);
    assert_eq!(string.text(), "one two three");
    let mut end = 0;
    for run in string.runs() {
        assert_eq!(run.range.start, end, "runs leave a gap");
        assert!(!run.range.is_empty(), "empty runs are dropped");
        end = run.range.end;
    }
    assert_eq!(end, string.len());
    assert_eq!(string.runs().len(), 3);
    assert_eq!(string.resolve(0, 1.0).font_weight, FontWeight::BOLD);
    assert_eq!(string.resolve(8, 1.0).font_weight, FontWeight::NORMAL);
    assert_eq!(string.resolve(8, 0.5).font_size, 8.0);
}

#[test]
fn bold_never_lightens_a_heavier_fragment() {
    let fragments = [TextFragment::new(
        0,
        "**heavy**",
        TextStyle {
            font_weight: FontWeight::BLACK,
            ..TextStyle::default()
        },
    )];
    let string = markdown().string_from(&fragments);
    assert_eq!(string.resolve(0, 1.0).font_weight, FontWeight::BLACK);
}

#[test]
fn invalid_style_values_fall_back() {
    let fragments = [TextFragment::new(
        0,
        "x",
        TextStyle {
            font_size: -1.0,
            ..TextStyle::default()
        },
    )];
    let string = AttributedStringBuilder::new(&fragments).build();
    assert_eq!(string.runs()[0].style.font_size, crate::DEFAULT_FONT_SIZE);
}

#[test]
fn building_is_deterministic() {
    let env = markdown();
    let text = "Mixed **bold**, `code`, and **unterminated";
    let a = env.string(text);
    let b = env.string(text);
    assert_eq!(a, b);
    assert_eq!(a.text().as_bytes(), b.text().as_bytes());
}

#[test]
fn multibyte_text_keeps_char_boundaries() {
    let string = markdown().string("**héllo** `wörld` ✓");
    assert_eq!(string.text(), "héllo wörld ✓");
    for span in string.spans() {
        assert!(string.text().is_char_boundary(span.range.start));
        assert!(string.text().is_char_boundary(span.range.end));
    }
    assert_eq!(&string.text()[string.spans()[1].range.clone()], "wörld");
}
