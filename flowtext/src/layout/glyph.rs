// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A positioned glyph of a finished layout.
///
/// Coordinates are in layout space: the origin is the top-left corner of
/// the layout box and y grows downwards.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Glyph {
    /// Glyph index within the run's font.
    pub id: u32,
    /// Byte offset in the span text of the first character this glyph renders.
    pub source_index: usize,
    /// Offset reported by the shaper, y pointing up.
    pub shaped_offset: [f32; 2],
    /// Horizontal advance as laid out, including justification but not tracking.
    pub advance: f32,
    /// Pen position on the baseline, with the shaped offset applied.
    pub origin: [f32; 2],
    /// Top-left corner of the glyph's bounding box.
    pub position: [f32; 2],
    /// Size of the glyph's bounding box.
    pub size: [f32; 2],
}

impl Glyph {
    /// Returns `true` if the glyph has no visible extent, as for spaces.
    pub fn is_empty(&self) -> bool {
        self.size[0] <= 0.0 || self.size[1] <= 0.0
    }
}
