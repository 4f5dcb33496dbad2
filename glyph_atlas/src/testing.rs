// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic font backend for tests.

use alloc::vec;
use hashbrown::HashMap;

use crate::key::Font;
use crate::raster::{FontMetrics, GlyphBitmap, GlyphMetrics, Rasterizer, VerticalMetrics};

/// Rasterizes every glyph as a solid box.
pub(crate) struct BoxRasterizer {
    default_size: (u32, u32),
    sizes: HashMap<u32, (u32, u32)>,
    pub(crate) bitmap_calls: usize,
}

impl BoxRasterizer {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            default_size: (width, height),
            sizes: HashMap::new(),
            bitmap_calls: 0,
        }
    }

    pub(crate) fn set_size(&mut self, glyph_id: u32, width: u32, height: u32) {
        self.sizes.insert(glyph_id, (width, height));
    }

    fn size(&self, glyph_id: u32) -> (u32, u32) {
        self.sizes
            .get(&glyph_id)
            .copied()
            .unwrap_or(self.default_size)
    }
}

impl FontMetrics for BoxRasterizer {
    fn glyph_metrics(&self, _font: Font, glyph_id: u32) -> GlyphMetrics {
        let (width, height) = self.size(glyph_id);
        GlyphMetrics {
            x_min: 1.0,
            y_min: 0.0,
            x_max: 1.0 + width as f32,
            y_max: height as f32,
        }
    }

    fn vertical_metrics(&self, font: Font) -> VerticalMetrics {
        VerticalMetrics {
            ascent: font.size * 0.8,
            descent: font.size * 0.2,
            leading: 0.0,
        }
    }
}

impl Rasterizer for BoxRasterizer {
    fn glyph_bitmap(&mut self, _font: Font, glyph_id: u32) -> GlyphBitmap {
        self.bitmap_calls += 1;
        let (width, height) = self.size(glyph_id);
        GlyphBitmap::new(width, height, vec![255; (width * height) as usize])
    }
}
