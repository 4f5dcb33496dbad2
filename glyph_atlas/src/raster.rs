// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interfaces to the font rasterizer.

use alloc::vec::Vec;

use crate::key::Font;

/// A rasterized glyph: one coverage byte per pixel, row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height` coverage values.
    pub pixels: Vec<u8>,
}

impl GlyphBitmap {
    /// Creates a bitmap.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Returns `true` if the bitmap has no pixels to draw.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the pixel buffer matches the dimensions.
    pub fn is_consistent(&self) -> bool {
        self.pixels.len() as u64 == u64::from(self.width) * u64::from(self.height)
    }
}

/// Glyph bounding box relative to the pen position, y pointing up.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GlyphMetrics {
    /// Left edge.
    pub x_min: f32,
    /// Bottom edge.
    pub y_min: f32,
    /// Right edge.
    pub x_max: f32,
    /// Top edge.
    pub y_max: f32,
}

impl GlyphMetrics {
    /// Width of the bounding box.
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }
}

/// Line metrics of a sized font.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VerticalMetrics {
    /// Distance from the baseline to the top of the line.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line, positive downwards.
    pub descent: f32,
    /// Extra space between lines.
    pub leading: f32,
}

/// Metrics queries answered by the font backend.
pub trait FontMetrics {
    /// Bounding box of a glyph.
    fn glyph_metrics(&self, font: Font, glyph_id: u32) -> GlyphMetrics;

    /// Ascent, descent and leading of a font.
    fn vertical_metrics(&self, font: Font) -> VerticalMetrics;

    /// The font's natural line height.
    fn line_height(&self, font: Font) -> f32 {
        let metrics = self.vertical_metrics(font);
        metrics.ascent + metrics.descent + metrics.leading
    }
}

/// A font backend that can also produce glyph bitmaps.
pub trait Rasterizer: FontMetrics {
    /// Rasterizes a glyph.
    ///
    /// Glyphs without ink (such as spaces) return an empty bitmap.
    fn glyph_bitmap(&mut self, font: Font, glyph_id: u32) -> GlyphBitmap;
}
