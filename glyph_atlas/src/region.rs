// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Atlas placement data structures.

use crate::packer::RectId;
use crate::rect::Rect;

/// Space allocated in one atlas layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    /// Global layer index.
    pub layer: usize,
    /// Block holding the layer.
    pub block: usize,
    /// Slice of the layer within its block.
    pub slice: u32,
    /// Area reserved for the content, already inset by the padding.
    ///
    /// Empty for zero-size requests.
    pub rect: Rect,
    /// Id of the padded allocation in the layer's packer. `None` for
    /// zero-size requests, which reserve nothing.
    pub id: Option<RectId>,
}

/// Where a cached glyph lives and how to draw it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphPlacement {
    /// Block holding the glyph.
    pub block: usize,
    /// Slice within the block.
    pub slice: u32,
    /// Global layer index.
    pub layer: usize,
    /// Pixel rectangle of the bitmap within the page.
    pub rect: Rect,
    /// Horizontal offset from the pen position to the left edge of the bitmap.
    pub bearing_x: f32,
    /// Vertical offset from the baseline up to the top edge of the bitmap.
    pub bearing_y: f32,
    /// Top-left of the bitmap in normalized texture coordinates.
    pub uv_offset: [f32; 2],
    /// Size of the bitmap in normalized texture coordinates.
    pub uv_size: [f32; 2],
}

impl GlyphPlacement {
    /// Bitmap width in pixels.
    pub fn width(&self) -> u32 {
        self.rect.width()
    }

    /// Bitmap height in pixels.
    pub fn height(&self) -> u32 {
        self.rect.height()
    }
}

/// Cache state of one glyph.
///
/// A placement is written once and never moves afterwards.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum GlyphSlot {
    /// Not packed, either because it was never requested or because the
    /// last attempt failed. Draw as invisible.
    #[default]
    Unpacked,
    /// Packed into the atlas.
    Packed(GlyphPlacement),
    /// Larger than an atlas page. Never retried.
    Rejected,
    /// The rasterizer produced an empty or malformed bitmap. Never retried.
    Invalid,
}

impl GlyphSlot {
    /// The placement, if the glyph is packed.
    pub fn placement(&self) -> Option<&GlyphPlacement> {
        match self {
            Self::Packed(placement) => Some(placement),
            _ => None,
        }
    }

    /// Returns `true` if the glyph is packed.
    pub fn is_packed(&self) -> bool {
        matches!(self, Self::Packed(_))
    }
}
