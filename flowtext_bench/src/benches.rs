// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Benchmarks
//!
//! This module provides benchmarks for packing, caching and layout.

use std::hint::black_box;

use flowtext::{Alignment, AttributedSpan, Attributes, BoxSize, Layout, LayoutStyle};
use glyph_atlas::{AtlasConfig, CacheMode, DEFAULT_MERGE_PASSES, Font, GlyphCache, RectPacker};
use tango_bench::{Benchmark, benchmark_fn};

use crate::{ColorBrush, SyntheticFont, get_samples};

const MAX_ADVANCE: f32 = 200.0;

/// Fills a page with glyph-sized rectangles, frees every other one and merges.
pub fn packing() -> Vec<Benchmark> {
    [256_u32, 1024]
        .into_iter()
        .map(|size| {
            benchmark_fn(format!("Packing - {size}x{size} page"), move |b| {
                b.iter(move || {
                    let mut packer = RectPacker::new(size, size);
                    let mut ids = Vec::new();
                    let mut n = 0_u32;
                    while let Ok((id, _)) = packer.insert(6 + n % 11, 9 + n % 13) {
                        ids.push(id);
                        n += 1;
                    }
                    for id in ids.iter().step_by(2) {
                        packer.erase(*id);
                    }
                    black_box(packer.merge_free_list(DEFAULT_MERGE_PASSES));
                    black_box(packer);
                })
            })
        })
        .collect()
}

/// Caches every glyph of the Latin-1 range in a fresh cache.
pub fn caching() -> Vec<Benchmark> {
    [CacheMode::PerFont, CacheMode::Shared]
        .into_iter()
        .map(|mode| {
            benchmark_fn(format!("Caching - {mode:?}"), move |b| {
                b.iter(move || {
                    let mut font = SyntheticFont;
                    let mut cache = GlyphCache::new(
                        AtlasConfig {
                            page_width: 256,
                            page_height: 256,
                            ..AtlasConfig::default()
                        },
                        mode,
                    );
                    for id in 0..3 {
                        cache.ensure(Font::new(id, 16.0), 33..256, &mut font);
                    }
                    black_box(cache);
                })
            })
        })
        .collect()
}

/// Lays out each sample, plain and with alternating fonts.
pub fn layout() -> Vec<Benchmark> {
    let samples = get_samples();
    let mut benches = Vec::new();
    for sample in samples {
        let plain = AttributedSpan::<ColorBrush>::plain(&sample.text);
        let mut styled = AttributedSpan::<ColorBrush>::new();
        for (index, word) in sample.text.split_inclusive(' ').enumerate() {
            let size = if index % 2 == 0 { 16.0 } else { 24.0 };
            styled.push(
                word,
                Attributes {
                    font: Some(Font::new(1, size)),
                    ..Attributes::default()
                },
            );
        }

        for (kind, span) in [("Plain", plain), ("Styled", styled)] {
            let bench = benchmark_fn(format!("Layout - {kind} {}", sample.name), move |b| {
                let span = span.clone();
                b.iter(move || {
                    let mut font = SyntheticFont;
                    let mut layout = Layout::new(LayoutStyle {
                        box_size: BoxSize::new(MAX_ADVANCE, 0.0),
                        alignment: Some(Alignment::Justified),
                        ..LayoutStyle::default()
                    });
                    layout.calculate_layout(&span, &mut font, &SyntheticFont);
                    black_box(layout);
                })
            });
            benches.push(bench);
        }
    }
    benches
}
