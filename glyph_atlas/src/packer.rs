// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guillotine rectangle packing for a single atlas page.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use crate::error::PackError;
use crate::rect::Rect;

/// Number of merge sweeps that is enough to fully coalesce typical glyph pages.
pub const DEFAULT_MERGE_PASSES: usize = 8;

/// Identifier of a free or used rectangle within one [`RectPacker`].
///
/// Ids are handed out from a single monotonic counter, so they are unique
/// across both sets for the lifetime of the packer (until [`RectPacker::clear`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RectId(u32);

impl RectId {
    /// The raw id value.
    pub fn to_u32(self) -> u32 {
        self.0
    }
}

/// A best-area-fit guillotine packer for one fixed-size page.
///
/// Free and used rectangles are kept in id-ordered maps. Scanning in id order
/// makes placement fully reproducible: the same sequence of requests always
/// yields the same ids and positions.
///
/// The free rectangles always tile the unused part of the page exactly, and
/// no two rectangles of the combined free and used sets overlap.
#[derive(Clone)]
pub struct RectPacker {
    width: u32,
    height: u32,
    free: BTreeMap<RectId, Rect>,
    used: BTreeMap<RectId, Rect>,
    next_id: u32,
}

impl RectPacker {
    /// Creates a packer for an empty `width` x `height` page.
    pub fn new(width: u32, height: u32) -> Self {
        let mut packer = Self {
            width,
            height,
            free: BTreeMap::new(),
            used: BTreeMap::new(),
            next_id: 0,
        };
        packer.clear();
        packer
    }

    /// Forgets every placement and resets the page to one free rectangle.
    pub fn clear(&mut self) {
        self.free.clear();
        self.used.clear();
        self.next_id = 0;
        let page = Rect::from_origin_size(0, 0, self.width, self.height);
        if !page.is_empty() {
            let id = self.allocate_id();
            self.free.insert(id, page);
        }
    }

    /// Width of the page.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the page.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Places a `width` x `height` box and returns its id and rectangle.
    ///
    /// Running out of space is an ordinary outcome: callers are expected to
    /// move on to another page when this returns [`PackError::OutOfSpace`].
    pub fn insert(&mut self, width: u32, height: u32) -> Result<(RectId, Rect), PackError> {
        if width == 0 || height == 0 {
            return Err(PackError::ZeroArea);
        }
        let (free_id, free_rect) = self
            .best_fit(width, height)
            .ok_or(PackError::OutOfSpace { width, height })?;
        self.free.remove(&free_id);

        let placed = Rect::from_origin_size(free_rect.x0, free_rect.y0, width, height);
        for leftover in guillotine_split(free_rect, placed) {
            if !leftover.is_empty() {
                let id = self.allocate_id();
                self.free.insert(id, leftover);
            }
        }

        let id = self.allocate_id();
        self.used.insert(id, placed);
        Ok((id, placed))
    }

    /// Returns a used rectangle to the free set.
    ///
    /// The freed area gets a fresh id. Returns the rectangle, or `None` if
    /// `id` does not name a used rectangle. Call
    /// [`merge_free_list`](Self::merge_free_list) afterwards to coalesce it
    /// with its neighbours.
    pub fn erase(&mut self, id: RectId) -> Option<Rect> {
        let rect = self.used.remove(&id)?;
        let free_id = self.allocate_id();
        self.free.insert(free_id, rect);
        Some(rect)
    }

    /// Coalesces free rectangles that share a full edge.
    ///
    /// Each pass compares every pair of free rectangles once, over a snapshot
    /// of the ids taken at the start of the pass. A merged rectangle keeps the
    /// lower id and keeps absorbing later neighbours within the same pass.
    /// Passes repeat until one makes no merge or `max_passes` is reached.
    ///
    /// Returns the number of merges performed.
    pub fn merge_free_list(&mut self, max_passes: usize) -> usize {
        let mut merges = 0;
        for _ in 0..max_passes {
            let ids: Vec<RectId> = self.free.keys().copied().collect();
            let mut merged_this_pass = false;
            for (i, &id) in ids.iter().enumerate() {
                let Some(mut rect) = self.free.get(&id).copied() else {
                    continue;
                };
                for other_id in &ids[i + 1..] {
                    let Some(other) = self.free.get(other_id) else {
                        continue;
                    };
                    if let Some(union) = rect.merge_adjacent(other) {
                        self.free.remove(other_id);
                        self.free.insert(id, union);
                        rect = union;
                        merges += 1;
                        merged_this_pass = true;
                    }
                }
            }
            if !merged_this_pass {
                break;
            }
        }
        merges
    }

    /// Returns the used rectangle with the given id.
    pub fn get(&self, id: RectId) -> Option<Rect> {
        self.used.get(&id).copied()
    }

    /// Iterates the free rectangles in id order.
    pub fn free_rects(&self) -> impl Iterator<Item = (RectId, Rect)> + '_ {
        self.free.iter().map(|(id, rect)| (*id, *rect))
    }

    /// Iterates the used rectangles in id order.
    pub fn used_rects(&self) -> impl Iterator<Item = (RectId, Rect)> + '_ {
        self.used.iter().map(|(id, rect)| (*id, *rect))
    }

    /// Total area of the free rectangles.
    pub fn free_area(&self) -> u64 {
        self.free.values().map(Rect::area).sum()
    }

    /// Total area of the used rectangles.
    pub fn used_area(&self) -> u64 {
        self.used.values().map(Rect::area).sum()
    }

    /// Number of used rectangles.
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// Returns `true` if nothing has been placed on the page.
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Finds the free rectangle with the least leftover area.
    ///
    /// An exact fit wins immediately. Otherwise the first rectangle with the
    /// minimal leftover wins.
    fn best_fit(&self, width: u32, height: u32) -> Option<(RectId, Rect)> {
        let requested = u64::from(width) * u64::from(height);
        let mut best: Option<(RectId, Rect, u64)> = None;
        for (&id, &rect) in &self.free {
            if rect.width() < width || rect.height() < height {
                continue;
            }
            if rect.width() == width && rect.height() == height {
                return Some((id, rect));
            }
            let leftover = rect.area() - requested;
            if best.is_none_or(|(_, _, score)| leftover < score) {
                best = Some((id, rect, leftover));
            }
        }
        best.map(|(id, rect, _)| (id, rect))
    }

    fn allocate_id(&mut self) -> RectId {
        let id = RectId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Debug for RectPacker {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RectPacker")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("free", &self.free.len())
            .field("used", &self.used.len())
            .finish_non_exhaustive()
    }
}

/// Splits the L-shaped leftover of `free` around `placed` into `[bottom, right]`.
///
/// The cut orientation keeps the larger of the two pieces as large as possible.
fn guillotine_split(free: Rect, placed: Rect) -> [Rect; 2] {
    let placed_w = placed.width();
    let placed_h = placed.height();
    let leftover_w = free.width() - placed_w;
    let leftover_h = free.height() - placed_h;

    let split_horizontal =
        u64::from(placed_w) * u64::from(leftover_h) > u64::from(leftover_w) * u64::from(placed_h);

    if split_horizontal {
        [
            Rect::from_origin_size(free.x0, free.y0 + placed_h, free.width(), leftover_h),
            Rect::from_origin_size(free.x0 + placed_w, free.y0, leftover_w, placed_h),
        ]
    } else {
        [
            Rect::from_origin_size(free.x0, free.y0 + placed_h, placed_w, leftover_h),
            Rect::from_origin_size(free.x0 + placed_w, free.y0, leftover_w, free.height()),
        ]
    }
}
