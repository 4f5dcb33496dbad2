// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Alignment, BreakReason};
use crate::style::Direction;

/// Horizontal adjustment of one line.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LineAdjustment {
    /// Shift applied to every glyph of the line.
    pub(crate) offset: f32,
    /// Space added after each break opportunity when justifying.
    pub(crate) gap: f32,
}

/// Geometry of a broken line, as needed to align it.
#[derive(Copy, Clone, Debug)]
pub(crate) struct LineExtent {
    /// Width of the content, without hanging whitespace.
    pub(crate) width: f32,
    pub(crate) trailing_whitespace: f32,
    pub(crate) break_reason: BreakReason,
    /// Break opportunities inside the content that justification may widen.
    pub(crate) opportunities: usize,
}

pub(crate) fn align(
    line: &LineExtent,
    alignment_width: f32,
    alignment: Alignment,
    direction: Direction,
) -> LineAdjustment {
    let is_rtl = direction.is_rtl();
    let free_space = alignment_width - line.width;
    let mut adjustment = LineAdjustment::default();

    // Overflowing lines stay at the start edge.
    if free_space <= 0.0 {
        if is_rtl {
            adjustment.offset = free_space - line.trailing_whitespace;
        }
        return adjustment;
    }

    match alignment {
        Alignment::Left => {}
        Alignment::Right => adjustment.offset = free_space,
        Alignment::Center => adjustment.offset = free_space * 0.5,
        Alignment::Justified => {
            // The last line of a paragraph, a line cut inside a word, or one
            // without gaps is start aligned instead.
            let justifiable = matches!(line.break_reason, BreakReason::Regular)
                && line.opportunities > 0;
            if justifiable {
                let count = line.opportunities as f32;
                adjustment.gap = free_space / count;
            } else if is_rtl {
                adjustment.offset = free_space;
            }
        }
    }

    if is_rtl {
        // Trailing whitespace hangs off the left edge.
        adjustment.offset -= line.trailing_whitespace;
    }
    adjustment
}
