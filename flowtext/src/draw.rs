// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-ready glyph quads.
//!
//! A render backend draws a layout by binding one atlas texture per
//! [`GlyphBatch`] and drawing its quads as instances.

use alloc::vec::Vec;

use bytemuck::{Pod, Zeroable};
use glyph_atlas::{CacheMode, Font, GlyphCache, GlyphPlacement, TextureId};
use hashbrown::HashMap;

use crate::layout::{Glyph, Layout};
use crate::style::Brush;

/// One textured glyph rectangle, laid out for direct upload as instance data.
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct GlyphQuad {
    /// Left, top, right and bottom edges in layout space.
    pub rect: [f32; 4],
    /// Texture coordinates of the same edges, normalized.
    pub uv: [f32; 4],
    /// Premultiplied or straight color, as produced by the color callback.
    pub color: [f32; 4],
    /// Slice of the block's array texture.
    pub slice: u32,
}

impl GlyphQuad {
    /// Builds the quad of a glyph drawn from `placement`.
    pub fn new(glyph: &Glyph, placement: &GlyphPlacement, color: [f32; 4]) -> Self {
        let x0 = glyph.origin[0] + placement.bearing_x;
        let y0 = glyph.origin[1] - placement.bearing_y;
        let [u0, v0] = placement.uv_offset;
        let [du, dv] = placement.uv_size;
        Self {
            rect: [
                x0,
                y0,
                x0 + placement.width() as f32,
                y0 + placement.height() as f32,
            ],
            uv: [u0, v0, u0 + du, v0 + dv],
            color,
            slice: placement.slice,
        }
    }
}

/// Quads that sample the same atlas texture.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphBatch {
    /// Font owning the atlas, or `None` for the shared atlas.
    pub atlas: Option<Font>,
    /// Block of the atlas.
    pub block: usize,
    /// Texture bound to the block, if the backend has bound one.
    pub texture: Option<TextureId>,
    /// The quads, in layout order.
    pub quads: Vec<GlyphQuad>,
}

/// Groups the cached glyphs of `layout` into per-texture batches.
///
/// `color` maps a run's brush and opacity to the quad color. Glyphs that are
/// not packed in `cache` are skipped, so they render as invisible.
pub fn glyph_batches<B: Brush>(
    layout: &Layout<B>,
    cache: &GlyphCache,
    color: impl Fn(&B, f32) -> [f32; 4],
) -> Vec<GlyphBatch> {
    let mut batches: Vec<GlyphBatch> = Vec::new();
    let mut index: HashMap<(Option<Font>, usize), usize> = HashMap::new();
    let mut skipped = 0_usize;

    for run in layout.lines().iter().flat_map(|line| line.runs()) {
        let owner = match cache.mode() {
            CacheMode::PerFont => Some(run.font()),
            CacheMode::Shared => None,
        };
        let atlas = cache.atlas(run.font());
        let run_color = color(run.brush(), run.opacity());
        for glyph in run.glyphs().iter().filter(|glyph| !glyph.is_empty()) {
            let slot = cache.get(run.font(), glyph.id);
            let Some(placement) = slot.placement() else {
                skipped += 1;
                continue;
            };
            let batch = *index.entry((owner, placement.block)).or_insert_with(|| {
                batches.push(GlyphBatch {
                    atlas: owner,
                    block: placement.block,
                    texture: atlas.and_then(|atlas| atlas.texture(placement.block)),
                    quads: Vec::new(),
                });
                batches.len() - 1
            });
            batches[batch]
                .quads
                .push(GlyphQuad::new(glyph, placement, run_color));
        }
    }

    if skipped > 0 {
        log::trace!("{skipped} unresolved glyphs left out of the batches");
    }
    batches
}
