// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// An axis-aligned rectangle in integer pixel coordinates.
///
/// The rectangle covers `x0..x1` horizontally and `y0..y1` vertically, with
/// `x1 >= x0` and `y1 >= y0`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x0: u32,
    /// Top edge.
    pub y0: u32,
    /// Right edge (exclusive).
    pub x1: u32,
    /// Bottom edge (exclusive).
    pub y1: u32,
}

impl Rect {
    /// Creates a rectangle from its edges.
    ///
    /// Inverted edges are swapped so the invariant always holds.
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Creates a rectangle from its top-left corner and size.
    pub fn from_origin_size(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + width,
            y1: y + height,
        }
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Area of the rectangle.
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Returns `true` if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x0 == self.x1 || self.y0 == self.y1
    }

    /// Returns `true` if the interiors of the two rectangles overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    /// Returns `true` if `other` lies entirely within `self`.
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Returns the union of two rectangles that share a full edge.
    ///
    /// Two rectangles share a full edge when they span the same columns and
    /// touch vertically, or span the same rows and touch horizontally.
    pub fn merge_adjacent(&self, other: &Self) -> Option<Self> {
        let same_columns = self.x0 == other.x0 && self.x1 == other.x1;
        let same_rows = self.y0 == other.y0 && self.y1 == other.y1;
        let touch_vertically = self.y1 == other.y0 || other.y1 == self.y0;
        let touch_horizontally = self.x1 == other.x0 || other.x1 == self.x0;
        if (same_columns && touch_vertically) || (same_rows && touch_horizontally) {
            Some(self.union(other))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;

    #[test]
    fn merge_requires_a_shared_edge() {
        let top = Rect::from_origin_size(0, 0, 10, 10);
        let below = Rect::from_origin_size(0, 10, 10, 5);
        let offset = Rect::from_origin_size(2, 10, 10, 5);
        let beside = Rect::from_origin_size(10, 0, 3, 10);

        assert_eq!(top.merge_adjacent(&below), Some(Rect::new(0, 0, 10, 15)));
        assert_eq!(below.merge_adjacent(&top), Some(Rect::new(0, 0, 10, 15)));
        assert_eq!(top.merge_adjacent(&beside), Some(Rect::new(0, 0, 13, 10)));
        assert_eq!(top.merge_adjacent(&offset), None, "columns differ");
    }

    #[test]
    fn touching_rectangles_do_not_overlap() {
        let a = Rect::from_origin_size(0, 0, 10, 10);
        let b = Rect::from_origin_size(10, 0, 10, 10);
        let c = Rect::from_origin_size(9, 9, 2, 2);
        assert!(!a.overlaps(&b), "shared edges are not overlap");
        assert!(a.overlaps(&c), "corner intrusion is overlap");
        assert!(b.overlaps(&c), "corner intrusion is overlap");
    }
}
