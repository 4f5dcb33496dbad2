// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glyph_atlas::{
    AtlasConfig, AtlasGrowth, CacheMode, GlyphCache, GlyphError, TextureId,
};

use crate::draw::glyph_batches;
use crate::{AttributedSpan, Attributes, Layout};

use super::utils::{ColorBrush, LARGE, SMALL, TestEnv, style};

fn two_font_layout(env: &mut TestEnv) -> Layout<ColorBrush> {
    let mut span = AttributedSpan::new();
    span.push("aba b", Attributes::default()).push(
        "ab",
        Attributes {
            font: Some(LARGE),
            ..Attributes::default()
        },
    );
    env.layout(&span, style(0.0))
}

fn page(size: u32, growth: AtlasGrowth) -> AtlasConfig {
    AtlasConfig {
        page_width: size,
        page_height: size,
        padding: 2,
        growth,
        ..AtlasConfig::default()
    }
}

fn opaque(brush: &ColorBrush, opacity: f32) -> [f32; 4] {
    let [r, g, b, a] = brush.map(|c| f32::from(c) / 255.0);
    [r, g, b, a * opacity]
}

#[test]
fn required_glyphs_are_grouped_by_font() {
    let mut env = TestEnv::new(10.0);
    let layout = two_font_layout(&mut env);

    let a = u32::from('a');
    let b = u32::from('b');
    assert_eq!(
        layout.required_glyphs(),
        [(SMALL, vec![a, b]), (LARGE, vec![a, b])],
        "duplicates and spaces are left out"
    );
}

#[test]
fn caching_a_layout_is_idempotent() {
    let mut env = TestEnv::new(10.0);
    let layout = two_font_layout(&mut env);
    let mut cache = GlyphCache::new(page(64, AtlasGrowth::Grow), CacheMode::PerFont);

    let report = layout.cache_glyphs(&mut cache, &mut env.metrics);
    assert_eq!((report.packed, report.cached), (4, 0));
    assert!(report.is_complete());

    let again = layout.cache_glyphs(&mut cache, &mut env.metrics);
    assert_eq!((again.packed, again.cached), (0, 4));
    assert_eq!(env.metrics.bitmap_calls, 4, "cached glyphs are not rasterized again");
}

#[test]
fn batches_follow_atlas_textures() {
    let mut env = TestEnv::new(10.0);
    let layout = two_font_layout(&mut env);
    let mut cache = GlyphCache::new(page(64, AtlasGrowth::Grow), CacheMode::PerFont);
    layout.cache_glyphs(&mut cache, &mut env.metrics);
    assert!(cache.atlas_mut(SMALL).unwrap().bind_texture(0, TextureId(7)));

    let batches = glyph_batches(&layout, &cache, opaque);
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].atlas, Some(SMALL));
    assert_eq!(batches[0].texture, Some(TextureId(7)));
    assert_eq!(batches[0].quads.len(), 4);
    assert_eq!(batches[1].atlas, Some(LARGE));
    assert_eq!(batches[1].texture, None);
    assert_eq!(batches[1].quads.len(), 2);

    // The first glyph sits on the baseline at y = 16, set by the larger font.
    let glyph = &layout.lines()[0].runs()[0].glyphs()[0];
    let placement = *cache.get(SMALL, glyph.id).placement().unwrap();
    let quad = batches[0].quads[0];
    assert_eq!(quad.rect, [1.0, 6.0, 9.0, 16.0]);
    assert_eq!(
        quad.uv,
        [
            placement.uv_offset[0],
            placement.uv_offset[1],
            placement.uv_offset[0] + placement.uv_size[0],
            placement.uv_offset[1] + placement.uv_size[1],
        ]
    );
    assert_eq!(quad.color, [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(quad.slice, 0);
}

#[test]
fn shared_atlas_yields_one_batch() {
    let mut env = TestEnv::new(10.0);
    let layout = two_font_layout(&mut env);
    let mut cache = GlyphCache::new(page(64, AtlasGrowth::Grow), CacheMode::Shared);
    layout.cache_glyphs(&mut cache, &mut env.metrics);

    let batches = glyph_batches(&layout, &cache, opaque);
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].atlas, None);
    assert_eq!(batches[0].quads.len(), 6);
}

#[test]
fn unresolved_glyphs_are_not_drawn() {
    let mut env = TestEnv::new(10.0);
    let layout = env.layout(&AttributedSpan::plain("ab"), style(0.0));
    // One padded 8x10 glyph fills a 16x16 page.
    let mut cache = GlyphCache::new(page(16, AtlasGrowth::Fixed), CacheMode::PerFont);

    let report = layout.cache_glyphs(&mut cache, &mut env.metrics);
    assert_eq!(report.packed, 1);
    assert_eq!(
        report.failures,
        [(u32::from('b'), GlyphError::AtlasExhausted)]
    );

    let batches = glyph_batches(&layout, &cache, opaque);
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].quads.len(), 1);
}
