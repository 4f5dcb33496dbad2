// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph location cache backed by atlas arrays.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use hashbrown::HashMap;

use crate::array::AtlasArray;
use crate::config::AtlasConfig;
use crate::error::{AtlasError, GlyphError};
use crate::key::{Font, GlyphKey};
use crate::raster::{GlyphBitmap, GlyphMetrics, Rasterizer};
use crate::region::{GlyphPlacement, GlyphSlot, Region};

/// How fonts share atlas storage. Chosen once, when the cache is created.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// Every font packs into its own [`AtlasArray`].
    #[default]
    PerFont,
    /// All fonts pack into one [`AtlasArray`]. Fonts cannot be unloaded
    /// individually because their layers are shared.
    Shared,
}

/// Hit/miss counters for [`GlyphCache::ensure`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Glyphs that were already packed.
    pub hits: u64,
    /// Glyphs that needed rasterizing, or failed.
    pub misses: u64,
    /// Glyphs rejected as larger than a page.
    pub rejected: u64,
}

/// Outcome of one [`GlyphCache::ensure`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnsureReport {
    /// Glyphs packed by this call.
    pub packed: usize,
    /// Glyphs that were already packed.
    pub cached: usize,
    /// Glyphs left without a placement, with the reason.
    pub failures: Vec<(u32, GlyphError)>,
}

impl EnsureReport {
    /// Returns `true` if every requested glyph ended up packed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Adds the counts and failures of `other` to this report.
    pub fn merge(&mut self, other: Self) {
        self.packed += other.packed;
        self.cached += other.cached;
        self.failures.extend(other.failures);
    }
}

/// Glyph table of one font, plus its atlas in per-font mode.
struct FontEntry {
    glyphs: HashMap<u32, GlyphSlot>,
    atlas: Option<AtlasArray>,
}

/// Maps glyphs to atlas placements, rasterizing on demand.
///
/// The cache is an ordinary value owned by a rendering context. Sharing
/// between fonts is expressed by [`CacheMode::Shared`], where every font
/// handle resolves to the same [`AtlasArray`].
///
/// Mutation is not synchronized. Callers that lay out text on several
/// threads must serialize access to one cache.
pub struct GlyphCache {
    config: AtlasConfig,
    mode: CacheMode,
    fonts: HashMap<Font, FontEntry>,
    shared: Option<AtlasArray>,
    stats: CacheStats,
}

impl GlyphCache {
    /// Creates an empty cache. No atlas storage is allocated until the first
    /// glyph is requested.
    pub fn new(config: AtlasConfig, mode: CacheMode) -> Self {
        Self {
            config,
            mode,
            fonts: HashMap::new(),
            shared: None,
            stats: CacheStats::default(),
        }
    }

    /// The sharing mode.
    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    /// The atlas configuration.
    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// Makes sure every glyph in `glyphs` has an atlas placement.
    ///
    /// Already packed glyphs are skipped, so repeating a call changes
    /// nothing. Missing glyphs are rasterized and packed into the current
    /// atlas layer; when that layer fills up its pixels are flushed and the
    /// glyph is retried on the next layer. Glyphs that cannot be placed are
    /// reported and left [`GlyphSlot::Unpacked`], or marked
    /// [`GlyphSlot::Rejected`] when larger than a page and
    /// [`GlyphSlot::Invalid`] when the bitmap is unusable. Marked glyphs are
    /// not rasterized again. The call itself never fails.
    pub fn ensure<R>(
        &mut self,
        font: Font,
        glyphs: impl IntoIterator<Item = u32>,
        rasterizer: &mut R,
    ) -> EnsureReport
    where
        R: Rasterizer + ?Sized,
    {
        let Self {
            config,
            mode,
            fonts,
            shared,
            stats,
        } = self;

        let entry = fonts.entry(font).or_insert_with(|| FontEntry {
            glyphs: HashMap::new(),
            atlas: match mode {
                CacheMode::PerFont => Some(AtlasArray::new(config.clone())),
                CacheMode::Shared => None,
            },
        });
        let atlas = match entry.atlas.as_mut() {
            Some(atlas) => atlas,
            None => shared.get_or_insert_with(|| AtlasArray::new(config.clone())),
        };
        let padding = config.padding;

        let mut report = EnsureReport::default();
        for glyph_id in glyphs {
            match entry.glyphs.get(&glyph_id) {
                Some(GlyphSlot::Packed(_)) => {
                    stats.hits += 1;
                    report.cached += 1;
                    continue;
                }
                Some(GlyphSlot::Rejected) => {
                    stats.misses += 1;
                    report.failures.push((glyph_id, GlyphError::Oversized));
                    continue;
                }
                Some(GlyphSlot::Invalid) => {
                    stats.misses += 1;
                    report.failures.push((glyph_id, GlyphError::InvalidBitmap));
                    continue;
                }
                Some(GlyphSlot::Unpacked) | None => stats.misses += 1,
            }

            if atlas.is_filled() {
                entry.glyphs.insert(glyph_id, GlyphSlot::Unpacked);
                report.failures.push((glyph_id, GlyphError::AtlasExhausted));
                continue;
            }

            let bitmap = rasterizer.glyph_bitmap(font, glyph_id);
            if bitmap.is_empty() || !bitmap.is_consistent() {
                log::warn!(
                    "glyph {glyph_id} of {font:?} skipped: {}x{} bitmap with {} bytes",
                    bitmap.width,
                    bitmap.height,
                    bitmap.pixels.len()
                );
                entry.glyphs.insert(glyph_id, GlyphSlot::Invalid);
                report.failures.push((glyph_id, GlyphError::InvalidBitmap));
                continue;
            }

            let slot = match atlas.request(bitmap.width, bitmap.height, padding) {
                Ok(region) => {
                    let metrics = rasterizer.glyph_metrics(font, glyph_id);
                    match place(atlas, &region, &bitmap, metrics) {
                        Ok(placement) => {
                            report.packed += 1;
                            log::trace!("packed glyph {glyph_id} at {:?}", placement.rect);
                            GlyphSlot::Packed(placement)
                        }
                        Err(_) => {
                            report.failures.push((glyph_id, GlyphError::InvalidBitmap));
                            GlyphSlot::Unpacked
                        }
                    }
                }
                Err(AtlasError::Oversized { width, height }) => {
                    log::warn!("glyph {glyph_id} of {font:?} is {width}x{height}, larger than an atlas page");
                    stats.rejected += 1;
                    report.failures.push((glyph_id, GlyphError::Oversized));
                    GlyphSlot::Rejected
                }
                Err(err) => {
                    log::warn!("glyph {glyph_id} of {font:?} left unresolved: {err}");
                    report.failures.push((glyph_id, GlyphError::AtlasExhausted));
                    GlyphSlot::Unpacked
                }
            };
            entry.glyphs.insert(glyph_id, slot);
        }

        atlas.flush(atlas.current_layer());
        report
    }

    /// The cache state of a glyph.
    pub fn get(&self, font: Font, glyph_id: u32) -> GlyphSlot {
        self.fonts
            .get(&font)
            .and_then(|entry| entry.glyphs.get(&glyph_id))
            .copied()
            .unwrap_or_default()
    }

    /// The cache state of a glyph, by key.
    pub fn get_key(&self, key: GlyphKey) -> GlyphSlot {
        self.get(key.font, key.glyph_id)
    }

    /// Drops every glyph of `font` together with its atlas.
    ///
    /// Only possible in per-font mode. In shared mode this logs a warning and
    /// does nothing. Returns `true` if the font was cached and removed.
    pub fn unload(&mut self, font: Font) -> bool {
        match self.mode {
            CacheMode::PerFont => self.fonts.remove(&font).is_some(),
            CacheMode::Shared => {
                log::warn!("cannot unload {font:?} from a shared glyph cache");
                false
            }
        }
    }

    /// The atlas that holds the glyphs of `font`.
    pub fn atlas(&self, font: Font) -> Option<&AtlasArray> {
        match self.mode {
            CacheMode::PerFont => self.fonts.get(&font)?.atlas.as_ref(),
            CacheMode::Shared => self.shared.as_ref(),
        }
    }

    /// Mutable access to the atlas that holds the glyphs of `font`, for
    /// draining its pending GPU work.
    pub fn atlas_mut(&mut self, font: Font) -> Option<&mut AtlasArray> {
        match self.mode {
            CacheMode::PerFont => self.fonts.get_mut(&font)?.atlas.as_mut(),
            CacheMode::Shared => self.shared.as_mut(),
        }
    }

    /// Iterates every atlas with the font that owns it. The shared atlas is
    /// yielded once, with `None` as its owner.
    pub fn atlases_mut(&mut self) -> impl Iterator<Item = (Option<Font>, &mut AtlasArray)> + '_ {
        let per_font = self
            .fonts
            .iter_mut()
            .filter_map(|(font, entry)| entry.atlas.as_mut().map(|atlas| (Some(*font), atlas)));
        per_font.chain(self.shared.as_mut().map(|atlas| (None, atlas)))
    }

    /// Number of fonts with a glyph table.
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Number of packed glyphs across all fonts.
    pub fn len(&self) -> usize {
        self.fonts
            .values()
            .map(|entry| entry.glyphs.values().filter(|slot| slot.is_packed()).count())
            .sum()
    }

    /// Returns `true` if no glyph is packed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hit/miss counters since creation or the last [`clear_stats`](Self::clear_stats).
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Resets the hit/miss counters without touching cached glyphs.
    pub fn clear_stats(&mut self) {
        self.stats = CacheStats::default();
    }
}

impl Debug for GlyphCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GlyphCache")
            .field("mode", &self.mode)
            .field("fonts", &self.fonts.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Stages a bitmap into its region and computes the placement.
fn place(
    atlas: &mut AtlasArray,
    region: &Region,
    bitmap: &GlyphBitmap,
    metrics: GlyphMetrics,
) -> Result<GlyphPlacement, AtlasError> {
    atlas.write(region, &bitmap.pixels)?;
    let (uv_offset, uv_size) = atlas.normalize(region.rect);
    Ok(GlyphPlacement {
        block: region.block,
        slice: region.slice,
        layer: region.layer,
        rect: region.rect,
        bearing_x: metrics.x_min,
        bearing_y: metrics.y_max,
        uv_offset,
        uv_size,
    })
}

#[cfg(test)]
mod tests {
    use super::{CacheMode, GlyphCache};
    use crate::config::{AtlasConfig, AtlasGrowth};
    use crate::error::GlyphError;
    use crate::key::Font;
    use crate::region::GlyphSlot;
    use crate::testing::BoxRasterizer;

    const SANS: Font = Font { id: 1, size: 16.0 };
    const SERIF: Font = Font { id: 2, size: 16.0 };

    fn small_pages(growth: AtlasGrowth) -> AtlasConfig {
        AtlasConfig {
            page_width: 32,
            page_height: 32,
            padding: 2,
            growth,
            ..AtlasConfig::default()
        }
    }

    #[test]
    fn ensure_is_idempotent() {
        let mut rasterizer = BoxRasterizer::new(6, 10);
        let mut cache = GlyphCache::new(small_pages(AtlasGrowth::Grow), CacheMode::PerFont);

        let first = cache.ensure(SANS, [3, 4, 5], &mut rasterizer);
        assert_eq!(first.packed, 3);
        let entries: Vec<GlyphSlot> = (3..6).map(|g| cache.get(SANS, g)).collect();
        let layer = cache.atlas(SANS).unwrap().current_layer();
        let calls = rasterizer.bitmap_calls;

        let second = cache.ensure(SANS, [3, 4, 5], &mut rasterizer);
        assert_eq!(second.packed, 0);
        assert_eq!(second.cached, 3);
        assert_eq!(rasterizer.bitmap_calls, calls, "nothing is rasterized twice");
        assert_eq!(cache.atlas(SANS).unwrap().current_layer(), layer);
        let again: Vec<GlyphSlot> = (3..6).map(|g| cache.get(SANS, g)).collect();
        assert_eq!(entries, again);
        assert_eq!(cache.stats().hits, 3);
    }

    #[test]
    fn placement_records_metrics_and_uvs() {
        let mut rasterizer = BoxRasterizer::new(6, 10);
        let mut cache = GlyphCache::new(small_pages(AtlasGrowth::Grow), CacheMode::PerFont);
        cache.ensure(SANS, [7], &mut rasterizer);

        let placement = *cache.get(SANS, 7).placement().unwrap();
        assert_eq!((placement.width(), placement.height()), (6, 10));
        assert_eq!((placement.rect.x0, placement.rect.y0), (2, 2));
        assert_eq!(placement.bearing_x, 1.0);
        assert_eq!(placement.bearing_y, 10.0);
        assert_eq!(placement.uv_offset, [2.0 / 32.0, 2.0 / 32.0]);
        assert_eq!(placement.uv_size, [6.0 / 32.0, 10.0 / 32.0]);

        let uploads = cache.atlas_mut(SANS).unwrap().take_pending_uploads();
        assert_eq!(uploads.len(), 1, "the batch is flushed once at the end");
        assert_eq!(uploads[0].rect, placement.rect);
    }

    #[test]
    fn full_layer_moves_on_without_dropping_glyphs() {
        // Each padded glyph takes 12x16, so a 32x32 page holds four.
        let mut rasterizer = BoxRasterizer::new(8, 12);
        let mut cache = GlyphCache::new(small_pages(AtlasGrowth::Grow), CacheMode::PerFont);
        let report = cache.ensure(SANS, 0..6, &mut rasterizer);
        assert!(report.is_complete(), "{report:?}");

        let layers: Vec<usize> = (0..6)
            .map(|g| cache.get(SANS, g).placement().unwrap().layer)
            .collect();
        assert_eq!(layers, vec![0, 0, 0, 0, 1, 1]);
        assert_eq!(cache.atlas(SANS).unwrap().block_count(), 2);
    }

    #[test]
    fn exhausted_atlas_leaves_glyphs_unresolved() {
        let mut rasterizer = BoxRasterizer::new(8, 12);
        let mut cache = GlyphCache::new(small_pages(AtlasGrowth::Fixed), CacheMode::PerFont);
        let report = cache.ensure(SANS, 0..6, &mut rasterizer);
        assert_eq!(report.packed, 4);
        assert_eq!(
            report.failures,
            vec![(4, GlyphError::AtlasExhausted), (5, GlyphError::AtlasExhausted)]
        );
        assert_eq!(cache.get(SANS, 5), GlyphSlot::Unpacked);
        assert!(cache.atlas(SANS).unwrap().is_filled());

        let calls = rasterizer.bitmap_calls;
        let retry = cache.ensure(SANS, [9], &mut rasterizer);
        assert_eq!(retry.failures, vec![(9, GlyphError::AtlasExhausted)]);
        assert_eq!(rasterizer.bitmap_calls, calls, "filled atlases fail fast");
    }

    #[test]
    fn oversized_and_empty_glyphs_are_reported() {
        let mut rasterizer = BoxRasterizer::new(6, 6);
        rasterizer.set_size(100, 40, 40);
        rasterizer.set_size(32, 0, 0);
        let mut cache = GlyphCache::new(small_pages(AtlasGrowth::Grow), CacheMode::PerFont);

        let report = cache.ensure(SANS, [100, 32, 1], &mut rasterizer);
        assert_eq!(report.packed, 1);
        assert_eq!(
            report.failures,
            vec![(100, GlyphError::Oversized), (32, GlyphError::InvalidBitmap)]
        );
        assert_eq!(cache.get(SANS, 100), GlyphSlot::Rejected);
        assert_eq!(cache.get(SANS, 32), GlyphSlot::Invalid);
        assert_eq!(cache.stats().rejected, 1);
        assert_eq!(cache.atlas(SANS).unwrap().block_count(), 1);

        let calls = rasterizer.bitmap_calls;
        let retry = cache.ensure(SANS, [100, 32], &mut rasterizer);
        assert_eq!(
            retry.failures,
            vec![(100, GlyphError::Oversized), (32, GlyphError::InvalidBitmap)]
        );
        assert_eq!(
            rasterizer.bitmap_calls, calls,
            "rejected and invalid glyphs are never retried"
        );
    }

    #[test]
    fn shared_mode_uses_one_atlas_and_refuses_unload() {
        let mut rasterizer = BoxRasterizer::new(8, 12);
        let mut cache = GlyphCache::new(small_pages(AtlasGrowth::Grow), CacheMode::Shared);
        cache.ensure(SANS, [1, 2], &mut rasterizer);
        cache.ensure(SERIF, [1, 2], &mut rasterizer);

        let sans = *cache.get(SANS, 1).placement().unwrap();
        let serif = *cache.get(SERIF, 1).placement().unwrap();
        assert_ne!(sans.rect, serif.rect, "fonts share one page without overlap");
        assert_eq!(cache.atlases_mut().count(), 1);

        assert!(!cache.unload(SANS));
        assert!(cache.get(SANS, 1).is_packed(), "shared unload is a no-op");
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn per_font_mode_unloads_a_single_font() {
        let mut rasterizer = BoxRasterizer::new(8, 12);
        let mut cache = GlyphCache::new(small_pages(AtlasGrowth::Grow), CacheMode::PerFont);
        cache.ensure(SANS, [1], &mut rasterizer);
        cache.ensure(SERIF, [1], &mut rasterizer);
        assert_eq!(cache.atlases_mut().count(), 2);

        assert!(cache.unload(SANS));
        assert_eq!(cache.get(SANS, 1), GlyphSlot::Unpacked);
        assert!(cache.get(SERIF, 1).is_packed());
        assert!(!cache.unload(SANS));
    }
}
