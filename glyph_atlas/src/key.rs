// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::hash::{Hash, Hasher};

/// A sized font face, as understood by the rasterizer and shaper.
///
/// `id` is chosen by whoever loads fonts; the atlas only needs it to be
/// stable and unique per face. Two handles are equal when both the id and
/// the exact size match.
#[derive(Copy, Clone, Debug)]
pub struct Font {
    /// Identifier of the font face.
    pub id: u64,
    /// Size in pixels per em.
    pub size: f32,
}

impl Font {
    /// Creates a font handle.
    pub fn new(id: u64, size: f32) -> Self {
        Self { id, size }
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.size.to_bits() == other.size.to_bits()
    }
}

impl Eq for Font {}

impl Hash for Font {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.size.to_bits().hash(state);
    }
}

/// Unique identifier for a cached glyph bitmap.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    /// The font the glyph belongs to.
    pub font: Font,
    /// Glyph index within the font.
    pub glyph_id: u32,
}

impl GlyphKey {
    /// Creates a key.
    pub fn new(font: Font, glyph_id: u32) -> Self {
        Self { font, glyph_id }
    }
}
