// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line break opportunities.

use alloc::vec::Vec;
use core::ops::Range;

use unicode_linebreak::BreakOpportunity;

/// Whether a line may or must wrap at an offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BreakKind {
    /// The line may wrap here.
    Allowed,
    /// The line must wrap here, as after a newline.
    Mandatory,
}

/// Sorted byte offsets at which a line may wrap.
///
/// An offset `o` means a break is permitted between the character ending at
/// `o` and the one starting there.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreakOpportunities {
    entries: Vec<(usize, BreakKind)>,
}

impl BreakOpportunities {
    /// Finds the opportunities of `text` with the Unicode line breaking algorithm (UAX #14).
    ///
    /// The implicit mandatory break at the end of the text is omitted.
    pub fn from_text(text: &str) -> Self {
        let entries = unicode_linebreak::linebreaks(text)
            .filter(|&(offset, _)| offset < text.len())
            .map(|(offset, kind)| {
                let kind = match kind {
                    BreakOpportunity::Mandatory => BreakKind::Mandatory,
                    BreakOpportunity::Allowed => BreakKind::Allowed,
                };
                (offset, kind)
            })
            .collect();
        Self { entries }
    }

    /// Builds opportunities from arbitrary offsets, for callers with their own segmentation.
    pub fn from_offsets(offsets: impl IntoIterator<Item = (usize, BreakKind)>) -> Self {
        let mut entries: Vec<_> = offsets.into_iter().collect();
        // Mandatory sorts first at equal offsets so it survives the dedup.
        entries.sort_by_key(|&(offset, kind)| (offset, kind != BreakKind::Mandatory));
        entries.dedup_by_key(|&mut (offset, _)| offset);
        Self { entries }
    }

    /// The kind of opportunity at `offset`, if any.
    pub fn kind_at(&self, offset: usize) -> Option<BreakKind> {
        self.entries
            .binary_search_by_key(&offset, |&(o, _)| o)
            .ok()
            .map(|index| self.entries[index].1)
    }

    /// Returns `true` if a line may wrap at `offset`.
    pub fn allows(&self, offset: usize) -> bool {
        self.kind_at(offset).is_some()
    }

    /// The opportunities inside `range`, shifted so that `range.start` becomes zero.
    ///
    /// Both ends of the range are included.
    pub fn window(&self, range: Range<usize>) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|&&(offset, _)| offset >= range.start && offset <= range.end)
            .map(|&(offset, kind)| (offset - range.start, kind))
            .collect();
        Self { entries }
    }

    /// Iterates the opportunities in offset order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, BreakKind)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of opportunities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there is no opportunity.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
