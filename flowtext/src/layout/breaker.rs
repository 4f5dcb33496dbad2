// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking.

use smallvec::SmallVec;

use crate::breaks::{BreakKind, BreakOpportunities};
use crate::shape::ShapedGlyph;
use crate::style::{Brush, Direction};

use super::data::{next_cluster, visual_index, GlyphClass, ItemData, LineDraft, Piece};
use super::BreakReason;

/// Where a line ends inside one shaped run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BreakPoint {
    /// Shaper index of the last glyph kept on the line.
    pub glyph_index: usize,
    /// Number of glyphs, in reading order, from the start of the run up to
    /// and including the last kept glyph.
    pub glyph_end: usize,
    /// Byte offset in the run's text where the next line starts.
    pub text_index: usize,
}

/// Finds the closest break opportunity at or before an overflowing glyph.
///
/// `glyphs` is a run in shaper (visual) order and `breaks` holds the
/// opportunities of the run's text. `start` and `overflow` are positions in
/// reading order: `start` is the first glyph of the run on the current line
/// and `overflow` the first glyph that no longer fits. The scan walks back in
/// reading order from `overflow`, which for a right-to-left run means forward
/// through the shaped glyphs, so the glyphs pushed to the next line are
/// always the trailing ones.
///
/// Glyphs sharing a cluster (ligature parts, marks) are never separated.
/// Returns `None` if no opportunity lies in `start..overflow`.
pub fn closest_break(
    glyphs: &[ShapedGlyph],
    start: usize,
    overflow: usize,
    text_len: usize,
    breaks: &BreakOpportunities,
    direction: Direction,
) -> Option<BreakPoint> {
    let overflow = overflow.min(glyphs.len());
    (start..overflow).rev().find_map(|logical| {
        let index = visual_index(glyphs.len(), logical, direction);
        let cluster = glyphs[index].cluster as usize;
        let next = next_cluster(glyphs, logical, text_len, direction);
        (next != cluster && breaks.allows(next)).then_some(BreakPoint {
            glyph_index: index,
            glyph_end: logical + 1,
            text_index: next,
        })
    })
}

#[derive(Clone, Default)]
struct LineState {
    /// Pen position after the last glyph, including tracking.
    x: f32,
    pieces: SmallVec<[Piece; 4]>,
    /// Span offset of the first glyph, or of the break for an empty line.
    text_start: usize,
}

/// Snapshot taken at the last break opportunity of a finished item, so the
/// line can be cut there if a later item overflows.
#[derive(Clone)]
struct PrevBoundaryState {
    item_idx: usize,
    glyph_idx: usize,
    pieces: usize,
}

/// Breaks shaped items into lines one at a time.
pub(crate) struct BreakLines<'a, B: Brush> {
    items: &'a [ItemData<B>],
    max_advance: f32,
    tracking: f32,

    /// Iteration state: the current item.
    item_idx: usize,
    /// Iteration state: the current glyph, in reading order, within the item.
    glyph_idx: usize,

    line: LineState,
    prev_boundary: Option<PrevBoundaryState>,
}

impl<'a, B: Brush> BreakLines<'a, B> {
    pub(crate) fn new(items: &'a [ItemData<B>], max_advance: f32, tracking: f32) -> Self {
        Self {
            items,
            max_advance,
            tracking,
            item_idx: 0,
            glyph_idx: 0,
            line: LineState::default(),
            prev_boundary: None,
        }
    }

    /// Computes the next line, or `None` when the input is exhausted.
    pub(crate) fn break_next(&mut self) -> Option<LineDraft> {
        let items = self.items;
        while let Some(item) = items.get(self.item_idx) {
            if item.is_break {
                if self.line.pieces.is_empty() {
                    self.line.text_start = item.text_range.start;
                }
                self.item_idx += 1;
                self.glyph_idx = 0;
                return Some(self.commit(BreakReason::Explicit));
            }

            while self.glyph_idx < item.len() {
                let logical = self.glyph_idx;
                let visual = item.visual_index(logical);
                let fits = self.line.pieces.is_empty()
                    || item.classes[visual] != GlyphClass::Ink
                    || self.line.x + item.advance(visual) <= self.max_advance;

                if fits {
                    self.append_glyph(item, logical);
                    if item.break_after(logical) == Some(BreakKind::Mandatory) {
                        return Some(self.commit(BreakReason::Explicit));
                    }
                    continue;
                }

                let start = self.piece_start().unwrap_or(logical);
                if let Some(point) = closest_break(
                    &item.glyphs,
                    start,
                    logical,
                    item.text_len(),
                    &item.breaks,
                    item.direction,
                ) {
                    if let Some(piece) = self.line.pieces.last_mut() {
                        piece.glyphs.end = point.glyph_end;
                    }
                    self.glyph_idx = point.glyph_end;
                    return Some(self.commit(BreakReason::Regular));
                }

                if let Some(boundary) = self.prev_boundary.take() {
                    self.line.pieces.truncate(boundary.pieces);
                    if let Some(piece) = self.line.pieces.last_mut() {
                        piece.glyphs.end = boundary.glyph_idx;
                    }
                    self.item_idx = boundary.item_idx;
                    self.glyph_idx = boundary.glyph_idx;
                    return Some(self.commit(BreakReason::Regular));
                }

                log::trace!("no break opportunity before glyph {logical}, breaking there");
                return Some(self.commit(BreakReason::Emergency));
            }

            self.mark_line_break_opportunity();
            self.item_idx += 1;
            self.glyph_idx = 0;
        }

        if self.line.pieces.is_empty() {
            None
        } else {
            Some(self.commit(BreakReason::None))
        }
    }

    /// Adds the glyph at `logical` in the current item to the line.
    fn append_glyph(&mut self, item: &ItemData<B>, logical: usize) {
        let visual = item.visual_index(logical);
        match self.line.pieces.last_mut() {
            Some(piece) if piece.item == self.item_idx => piece.glyphs.end = logical + 1,
            _ => {
                if self.line.pieces.is_empty() {
                    self.line.text_start =
                        item.text_range.start + item.glyphs[visual].cluster as usize;
                }
                self.line.pieces.push(Piece {
                    item: self.item_idx,
                    glyphs: logical..logical + 1,
                });
            }
        }
        self.line.x += item.step(visual, self.tracking);
        self.glyph_idx = logical + 1;
    }

    /// Start of the current item's glyphs on this line, if it has any.
    fn piece_start(&self) -> Option<usize> {
        self.line
            .pieces
            .last()
            .filter(|piece| piece.item == self.item_idx)
            .map(|piece| piece.glyphs.start)
    }

    /// Remembers the last break opportunity of the item just finished.
    fn mark_line_break_opportunity(&mut self) {
        let items = self.items;
        let item = &items[self.item_idx];
        let Some(start) = self.piece_start() else {
            return;
        };
        if let Some(point) = closest_break(
            &item.glyphs,
            start,
            item.len(),
            item.text_len(),
            &item.breaks,
            item.direction,
        ) {
            self.prev_boundary = Some(PrevBoundaryState {
                item_idx: self.item_idx,
                glyph_idx: point.glyph_end,
                pieces: self.line.pieces.len(),
            });
        }
    }

    fn commit(&mut self, reason: BreakReason) -> LineDraft {
        let line = core::mem::take(&mut self.line);
        self.prev_boundary = None;
        LineDraft {
            pieces: line.pieces,
            reason,
            text_start: line.text_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::closest_break;
    use crate::breaks::{BreakKind, BreakOpportunities};
    use crate::shape::ShapedGlyph;
    use crate::style::Direction;

    fn glyphs(clusters: &[u32]) -> Vec<ShapedGlyph> {
        clusters
            .iter()
            .map(|&cluster| ShapedGlyph {
                glyph_id: cluster,
                cluster,
                advance: 10.0,
                ..ShapedGlyph::default()
            })
            .collect()
    }

    #[test]
    fn scans_back_from_the_overflow() {
        // "ab cd ef": opportunities before 'c' and 'e'.
        let breaks = BreakOpportunities::from_text("ab cd ef");
        let run = glyphs(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let point = closest_break(&run, 0, 7, 8, &breaks, Direction::Ltr).unwrap();
        assert_eq!(point.glyph_end, 6);
        assert_eq!(point.text_index, 6);
        assert_eq!(point.glyph_index, 5);

        assert_eq!(
            closest_break(&run, 0, 2, 8, &breaks, Direction::Ltr),
            None,
            "nothing before the first space"
        );
        assert_eq!(
            closest_break(&run, 3, 5, 8, &breaks, Direction::Ltr),
            None,
            "opportunities before the line start are ignored"
        );
    }

    #[test]
    fn rtl_runs_scan_forward_through_shaped_glyphs() {
        let breaks = BreakOpportunities::from_offsets([(2, BreakKind::Allowed)]);
        // Shaped right to left: logical order 0..4 appears reversed.
        let run = glyphs(&[3, 2, 1, 0]);
        let point = closest_break(&run, 0, 3, 4, &breaks, Direction::Rtl).unwrap();
        assert_eq!(point.glyph_end, 2);
        assert_eq!(point.glyph_index, 2, "logical glyph 1 is the third shaped glyph");
        assert_eq!(point.text_index, 2);
    }

    #[test]
    fn clusters_are_never_split() {
        // Two glyphs for cluster 0, as for a base and a mark.
        let breaks = BreakOpportunities::from_offsets([(0, BreakKind::Allowed)]);
        let run = glyphs(&[0, 0, 1]);
        assert_eq!(closest_break(&run, 0, 2, 2, &breaks, Direction::Ltr), None);
    }
}
