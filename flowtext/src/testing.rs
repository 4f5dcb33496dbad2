// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic shaping and font backends for tests.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashMap;

use glyph_atlas::{Font, FontMetrics, GlyphBitmap, GlyphMetrics, Rasterizer, VerticalMetrics};

use crate::shape::{ShapeRequest, ShapedGlyph, Shaper};
use crate::style::Direction;

/// Shapes one glyph per character: the glyph id is the code point and the
/// cluster the character's byte offset.
pub(crate) struct MonoShaper {
    advance: f32,
    advances: HashMap<char, f32>,
    pub(crate) requests: Vec<(String, Direction)>,
}

impl MonoShaper {
    pub(crate) fn new(advance: f32) -> Self {
        Self {
            advance,
            advances: HashMap::new(),
            requests: Vec::new(),
        }
    }

    pub(crate) fn set_advance(&mut self, c: char, advance: f32) {
        self.advances.insert(c, advance);
    }
}

impl Shaper for MonoShaper {
    fn shape(&mut self, request: &ShapeRequest<'_>) -> Vec<ShapedGlyph> {
        self.requests
            .push((request.text.into(), request.direction));
        let mut glyphs: Vec<_> = request
            .text
            .char_indices()
            .map(|(index, c)| ShapedGlyph {
                glyph_id: u32::from(c),
                cluster: u32::try_from(index).unwrap(),
                x_offset: 0.0,
                y_offset: 0.0,
                advance: self.advances.get(&c).copied().unwrap_or(self.advance),
            })
            .collect();
        if request.direction.is_rtl() {
            glyphs.reverse();
        }
        glyphs
    }
}

/// Every font has an ascent of 0.8 and a descent of 0.2 times its size, so
/// its natural line height equals its size. Ink glyphs are `8x10` boxes
/// sitting on the baseline; whitespace has no extent.
pub(crate) struct MonoMetrics {
    pub(crate) bitmap_calls: usize,
}

impl MonoMetrics {
    pub(crate) const GLYPH_WIDTH: u32 = 8;
    pub(crate) const GLYPH_HEIGHT: u32 = 10;

    pub(crate) fn new() -> Self {
        Self { bitmap_calls: 0 }
    }

    fn has_ink(glyph_id: u32) -> bool {
        char::from_u32(glyph_id).is_some_and(|c| !c.is_whitespace() && !c.is_control())
    }
}

impl FontMetrics for MonoMetrics {
    fn glyph_metrics(&self, _font: Font, glyph_id: u32) -> GlyphMetrics {
        if !Self::has_ink(glyph_id) {
            return GlyphMetrics::default();
        }
        GlyphMetrics {
            x_min: 1.0,
            y_min: 0.0,
            x_max: 1.0 + Self::GLYPH_WIDTH as f32,
            y_max: Self::GLYPH_HEIGHT as f32,
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

impl Rasterizer for MonoMetrics {
    fn glyph_bitmap(&mut self, _font: Font, glyph_id: u32) -> GlyphBitmap {
        self.bitmap_calls += 1;
        if !Self::has_ink(glyph_id) {
            return GlyphBitmap::new(0, 0, Vec::new());
        }
        let (width, height) = (Self::GLYPH_WIDTH, Self::GLYPH_HEIGHT);
        GlyphBitmap::new(width, height, vec![255; (width * height) as usize])
    }
}
