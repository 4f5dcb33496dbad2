// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Flowtext Bench
//!
//! Benchmarks for rectangle packing, glyph caching and text layout.
//!
//! The benchmarks run against a synthetic font backend so that timings
//! reflect this workspace only, not a shaping or rasterization engine.

use flowtext::{ShapeRequest, ShapedGlyph, Shaper};
use glyph_atlas::{Font, FontMetrics, GlyphBitmap, GlyphMetrics, Rasterizer, VerticalMetrics};

pub mod benches;

/// A color brush.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorBrush {}

/// A named text sample.
#[derive(Clone, Debug)]
pub struct Sample {
    /// Short description.
    pub name: &'static str,
    /// The text.
    pub text: String,
}

/// Text samples of increasing length.
pub fn get_samples() -> Vec<Sample> {
    const WORDS: &str = "Most words are short. But Antidisestablishmentarianism is long and needs to wrap. ";
    [("sentence", 1), ("paragraph", 8), ("page", 64)]
        .into_iter()
        .map(|(name, repeat)| Sample {
            name,
            text: WORDS.repeat(repeat),
        })
        .collect()
}

/// Shapes one glyph per character with advances that vary by code point,
/// and answers metrics queries with boxes of similar variety.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyntheticFont;

impl SyntheticFont {
    fn extent(glyph_id: u32) -> (u32, u32) {
        (4 + glyph_id % 9, 8 + glyph_id % 7)
    }
}

impl Shaper for SyntheticFont {
    fn shape(&mut self, request: &ShapeRequest<'_>) -> Vec<ShapedGlyph> {
        let scale = request.font.size / 16.0;
        let mut glyphs: Vec<_> = request
            .text
            .char_indices()
            .map(|(index, c)| {
                let glyph_id = u32::from(c);
                let (width, _) = Self::extent(glyph_id);
                ShapedGlyph {
                    glyph_id,
                    cluster: u32::try_from(index).unwrap_or(u32::MAX),
                    advance: (width + 1) as f32 * scale,
                    ..ShapedGlyph::default()
                }
            })
            .collect();
        if request.direction.is_rtl() {
            glyphs.reverse();
        }
        glyphs
    }
}

impl FontMetrics for SyntheticFont {
    fn glyph_metrics(&self, _font: Font, glyph_id: u32) -> GlyphMetrics {
        let (width, height) = Self::extent(glyph_id);
        GlyphMetrics {
            x_min: 0.0,
            y_min: 0.0,
            x_max: width as f32,
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

impl Rasterizer for SyntheticFont {
    fn glyph_bitmap(&mut self, _font: Font, glyph_id: u32) -> GlyphBitmap {
        let (width, height) = Self::extent(glyph_id);
        GlyphBitmap::new(width, height, vec![0x80; (width * height) as usize])
    }
}
