// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::config::LineBreakMode;
use crate::layout::{Constraints, LayoutResult, ELLIPSIS};

use super::utils::{line_texts, TestEnv, TEST_FONT_SIZE};

const TEXT: &str = "one two three four";

fn truncate(mode: LineBreakMode, max_lines: u32, constraints: Constraints) -> LayoutResult {
    TestEnv::new()
        .mode(mode)
        .max_lines(max_lines)
        .measure(TEXT, constraints)
}

#[test]
fn tail_ends_with_ellipsis() {
    let result = truncate(LineBreakMode::TruncateTail, 2, Constraints::width(40.0));
    assert!(result.truncated);
    assert_eq!(line_texts(&result), ["one two ", "three f…"]);
    let last = &result.lines[1];
    assert!(last.text.ends_with(ELLIPSIS));
    assert_eq!(last.width, 40.0);
    assert_eq!(last.text_range, 8..15);
    assert_eq!(last.y, TEST_FONT_SIZE);
}

#[test]
fn tail_never_exceeds_line_limit() {
    for width in [5.0, 12.5, 20.0, 33.0, 47.5, 60.0, 85.0] {
        for max_lines in 1..=3 {
            let result = truncate(
                LineBreakMode::TruncateTail,
                max_lines,
                Constraints::width(width),
            );
            assert!(result.lines.len() <= max_lines as usize);
            if result.truncated {
                let last = result.lines.last().map(|line| line.text.as_str());
                assert!(
                    last.is_some_and(|text| text.ends_with(ELLIPSIS)),
                    "width {width}, {max_lines} lines: {last:?}"
                );
            }
        }
    }
}

#[test]
fn tail_trims_whitespace_before_the_marker() {
    // The space after "two" fits, but is not shown before the marker.
    let result = truncate(LineBreakMode::TruncateTail, 1, Constraints::width(45.0));
    assert_eq!(line_texts(&result), ["one two…"]);
    assert_eq!(result.width, 40.0);
}

#[test]
fn head_keeps_the_end() {
    let result = truncate(LineBreakMode::TruncateHead, 1, Constraints::width(40.0));
    assert!(result.truncated);
    assert_eq!(line_texts(&result), ["…ee four"]);
    assert_eq!(result.lines[0].text_range, 11..18);
    assert_eq!(result.width, 40.0);
}

#[test]
fn middle_keeps_both_ends() {
    let result = truncate(LineBreakMode::TruncateMiddle, 1, Constraints::width(40.0));
    assert!(result.truncated);
    assert_eq!(line_texts(&result), ["one…four"]);
    assert_eq!(result.lines[0].text_range, 0..18);
    assert_eq!(result.width, 40.0);
}

#[test]
fn middle_hides_text_even_when_everything_fits() {
    let result = TestEnv::new()
        .mode(LineBreakMode::TruncateMiddle)
        .max_lines(1)
        .measure("aa bb\ncc", Constraints::width(100.0));
    assert!(result.truncated);
    assert_eq!(line_texts(&result), ["aa b…cc"]);
    assert_eq!(result.lines[0].text_range, 0..8);
    assert_eq!(result.width, 35.0);
}

#[test]
fn clip_cuts_without_a_marker() {
    let result = truncate(LineBreakMode::Clip, 1, Constraints::width(40.0));
    assert!(result.truncated);
    assert_eq!(line_texts(&result), ["one two"]);
    assert_eq!(result.width, 35.0);
}

#[test]
fn wrapping_modes_keep_the_natural_line() {
    for mode in [LineBreakMode::WordWrap, LineBreakMode::CharWrap] {
        let result = truncate(mode, 1, Constraints::width(40.0));
        assert!(result.truncated);
        assert_eq!(result.lines.len(), 1);
        assert!(!result.lines[0].text.contains(ELLIPSIS));
    }
}

#[test]
fn height_limit_drops_lines() {
    let result = truncate(LineBreakMode::TruncateTail, 5, Constraints::new(40.0, 25.0));
    assert!(result.truncated);
    assert_eq!(line_texts(&result), ["one two ", "three f…"]);
    assert_eq!(result.height, 20.0);
}

#[test]
fn first_line_survives_any_height() {
    let result = truncate(LineBreakMode::TruncateTail, 3, Constraints::new(40.0, 1.0));
    assert!(result.truncated);
    assert_eq!(result.lines.len(), 1);
    assert!(result.lines[0].text.ends_with(ELLIPSIS));
}

#[test]
fn text_that_fits_is_untouched() {
    let result = truncate(LineBreakMode::TruncateTail, 4, Constraints::width(40.0));
    assert!(!result.truncated);
    assert_eq!(line_texts(&result), ["one two ", "three ", "four"]);
}

#[test]
fn tail_marks_hidden_paragraphs() {
    let result = TestEnv::new()
        .max_lines(1)
        .measure("first\nsecond", Constraints::UNBOUNDED);
    assert!(result.truncated);
    assert_eq!(line_texts(&result), ["first…"]);
    assert_eq!(result.lines[0].text_range, 0..5);
}

#[test]
fn head_joins_paragraphs_with_spaces() {
    let result = TestEnv::new()
        .mode(LineBreakMode::TruncateHead)
        .max_lines(1)
        .measure("ab\ncd\nef", Constraints::width(30.0));
    assert_eq!(line_texts(&result), ["…cd ef"]);
    assert_eq!(result.lines[0].text_range, 3..8);
    assert_eq!(result.width, 30.0);
}

#[test]
fn truncated_empty_paragraph_shows_only_the_marker() {
    let result = TestEnv::new()
        .max_lines(1)
        .measure("\nhidden", Constraints::UNBOUNDED);
    assert!(result.truncated);
    assert_eq!(line_texts(&result), ["…"]);
    assert_eq!(result.lines[0].height, TEST_FONT_SIZE);
}
