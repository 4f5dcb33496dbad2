// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{AttributedSpan, Attributes, BreakKind, BreakOpportunities, BreakReason};

use super::utils::{BLUE, TestEnv, line_chars, lines_chars, style};

#[test]
fn breaks_before_the_overflowing_glyph() {
    let mut env = TestEnv::new(40.0);
    let breaks =
        BreakOpportunities::from_offsets([(1, BreakKind::Allowed), (2, BreakKind::Allowed)]);
    let layout = env.layout_with_breaks(&AttributedSpan::plain("abc"), &breaks, style(100.0));

    assert_eq!(lines_chars(&layout), ["ab", "c"]);
    let lines = layout.lines();
    assert_eq!(lines[0].break_reason(), BreakReason::Regular);
    assert_eq!(lines[1].break_reason(), BreakReason::None);
    assert_eq!(lines[0].metrics().width, 80.0);
    assert_eq!(lines[1].metrics().width, 40.0);
    assert!(!layout.has_forced_overflow());
}

#[test]
fn wraps_at_word_boundaries() {
    let mut env = TestEnv::new(10.0);
    let layout = env.layout(&AttributedSpan::plain("hello world foo"), style(60.0));

    assert_eq!(lines_chars(&layout), ["hello ", "world ", "foo"]);
    let ranges: Vec<_> = layout.lines().iter().map(|line| line.text_range()).collect();
    assert_eq!(ranges, [0..6, 6..12, 12..15]);
    for line in layout.lines() {
        assert!(line.metrics().width <= 60.0, "{:?}", line.metrics());
    }
}

#[test]
fn glyphs_of_mixed_width_fill_the_line() {
    let mut env = TestEnv::new(10.0);
    env.shaper.set_advance('m', 20.0);
    let layout = env.layout(&AttributedSpan::plain("ab mm"), style(50.0));

    // The first wide glyph ends exactly on the edge, the second one wraps the word.
    assert_eq!(lines_chars(&layout), ["ab ", "mm"]);
    assert_eq!(layout.lines()[0].metrics().width, 20.0);
    assert_eq!(layout.lines()[1].metrics().width, 40.0);
    assert_eq!(layout.lines()[1].break_reason(), BreakReason::None);
}

#[test]
fn trailing_whitespace_hangs_past_the_edge() {
    let mut env = TestEnv::new(10.0);
    let layout = env.layout(&AttributedSpan::plain("ab   cd"), style(20.0));

    assert_eq!(lines_chars(&layout), ["ab   ", "cd"]);
    let metrics = layout.lines()[0].metrics();
    assert_eq!(metrics.width, 20.0);
    assert_eq!(metrics.trailing_whitespace, 30.0);
    assert!(!layout.lines()[0].is_overflowing());
}

#[test]
fn unbreakable_word_is_cut_at_the_overflow() {
    let mut env = TestEnv::new(10.0);
    let layout = env.layout(&AttributedSpan::plain("abcdefgh"), style(35.0));

    assert_eq!(lines_chars(&layout), ["abc", "def", "gh"]);
    let reasons: Vec<_> = layout.lines().iter().map(|line| line.break_reason()).collect();
    assert_eq!(
        reasons,
        [
            BreakReason::Emergency,
            BreakReason::Emergency,
            BreakReason::None
        ]
    );
    assert!(!layout.has_forced_overflow());
}

#[test]
fn glyph_wider_than_the_box_is_flagged() {
    let mut env = TestEnv::new(10.0);
    let layout = env.layout(&AttributedSpan::plain("ab"), style(5.0));

    assert_eq!(lines_chars(&layout), ["a", "b"]);
    assert!(layout.lines().iter().all(|line| line.is_overflowing()));
    assert!(layout.has_forced_overflow());
}

#[test]
fn falls_back_to_a_break_in_an_earlier_substring() {
    let mut env = TestEnv::new(10.0);
    let mut span = AttributedSpan::new();
    span.push("ab ", Attributes::default()).push(
        "cdef",
        Attributes {
            brush: Some(BLUE),
            ..Attributes::default()
        },
    );
    let layout = env.layout(&span, style(50.0));

    assert_eq!(lines_chars(&layout), ["ab ", "cdef"]);
    let second = &layout.lines()[1];
    assert_eq!(second.runs().len(), 1);
    assert_eq!(*second.runs()[0].brush(), BLUE);
    assert_eq!(second.runs()[0].text_range(), 3..7);
}

#[test]
fn newline_forces_a_break() {
    let mut env = TestEnv::new(10.0);
    let layout = env.layout(&AttributedSpan::plain("ab\ncd"), style(0.0));

    assert_eq!(lines_chars(&layout), ["ab", "cd"]);
    assert_eq!(layout.lines()[0].break_reason(), BreakReason::Explicit);
    assert_eq!(layout.lines()[0].text_range(), 0..3);
    assert_eq!(layout.lines()[1].break_reason(), BreakReason::None);
}

#[test]
fn trailing_newline_adds_no_line() {
    let mut env = TestEnv::new(10.0);
    let layout = env.layout(&AttributedSpan::plain("ab\n"), style(0.0));

    assert_eq!(lines_chars(&layout), ["ab"]);
    assert_eq!(layout.lines()[0].metrics().width, 20.0);
}

#[test]
fn line_break_substrings_can_leave_empty_lines() {
    let mut env = TestEnv::new(10.0);
    let mut span = AttributedSpan::new();
    span.push("ab", Attributes::default())
        .push_line_break()
        .push_line_break()
        .push("cd", Attributes::default());
    let layout = env.layout(&span, style(0.0));

    assert_eq!(layout.len(), 3);
    let blank = &layout.lines()[1];
    assert!(blank.is_empty());
    assert_eq!(blank.text_range(), 2..2);
    assert_eq!(blank.break_reason(), BreakReason::Explicit);
    assert_eq!(line_chars(&layout.lines()[2]), "cd");

    let tops: Vec<_> = layout.lines().iter().map(|line| line.metrics().top).collect();
    assert_eq!(tops, [0.0, 10.0, 20.0]);
}

#[test]
fn unbounded_width_keeps_one_line() {
    let mut env = TestEnv::new(10.0);
    let layout = env.layout(&AttributedSpan::plain("a very long line of text"), style(0.0));
    assert_eq!(layout.len(), 1);
    assert_eq!(layout.lines()[0].break_reason(), BreakReason::None);
}
