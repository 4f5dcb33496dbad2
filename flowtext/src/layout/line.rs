// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use super::{BreakReason, Glyph, Run};
use crate::style::Brush;

/// Metrics of a line.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LineMetrics {
    /// Largest ascent of the line's fonts.
    pub ascent: f32,
    /// Largest descent of the line's fonts.
    pub descent: f32,
    /// Resolved line height.
    pub line_height: f32,
    /// Offset from the top of the layout to the top of the line.
    pub top: f32,
    /// Offset from the top of the layout to the baseline.
    pub baseline: f32,
    /// Width of the content, excluding trailing whitespace.
    pub width: f32,
    /// Advance of the whitespace hanging past the end of the line.
    pub trailing_whitespace: f32,
    /// Horizontal offset applied by alignment.
    pub offset: f32,
}

impl LineMetrics {
    /// Offset from the top of the layout to the bottom of the line.
    pub fn bottom(&self) -> f32 {
        self.top + self.line_height
    }
}

/// One visual row of a layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Line<B: Brush> {
    pub(crate) runs: Vec<Run<B>>,
    pub(crate) metrics: LineMetrics,
    pub(crate) break_reason: BreakReason,
    pub(crate) text_range: Range<usize>,
    pub(crate) overflowing: bool,
}

impl<B: Brush> Line<B> {
    /// The runs, left to right.
    pub fn runs(&self) -> &[Run<B>] {
        &self.runs
    }

    /// The line's metrics.
    pub fn metrics(&self) -> &LineMetrics {
        &self.metrics
    }

    /// Why the line ended.
    pub fn break_reason(&self) -> BreakReason {
        self.break_reason
    }

    /// Byte range of the span text on this line.
    pub fn text_range(&self) -> Range<usize> {
        self.text_range.clone()
    }

    /// Returns `true` if the line is wider than the layout box because a
    /// single unbreakable piece of text did not fit.
    pub fn is_overflowing(&self) -> bool {
        self.overflowing
    }

    /// Returns `true` if the line holds no glyphs, as for a blank line.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Iterates every glyph of the line, left to right.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.runs.iter().flat_map(|run| run.glyphs.iter())
    }
}
