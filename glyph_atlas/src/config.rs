// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// What an [`AtlasArray`](crate::AtlasArray) does once its last layer is full.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AtlasGrowth {
    /// Append a new block of layers.
    #[default]
    Grow,
    /// Mark the array as filled and refuse further requests.
    Fixed,
}

/// Atlas page and growth settings.
///
/// Set once before caching begins. Changing the page size of an atlas that
/// already holds glyphs is not supported; existing placements are never
/// repacked.
#[derive(Clone, Debug, PartialEq)]
pub struct AtlasConfig {
    /// Width of every page in pixels.
    pub page_width: u32,
    /// Height of every page in pixels.
    pub page_height: u32,
    /// Number of layers in each block (texture array depth). At least one
    /// layer is always allocated.
    pub page_depth: u32,
    /// Empty border kept around every glyph, in pixels.
    pub padding: u32,
    /// Whether the backend should generate mipmaps for atlas textures.
    pub mipmap: bool,
    /// Maximum anisotropic filtering level for atlas textures, if any.
    pub max_anisotropy: Option<f32>,
    /// Behaviour when the last layer fills up.
    pub growth: AtlasGrowth,
    /// Upper bound on the number of blocks, when growing.
    pub max_blocks: Option<usize>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            page_width: 1024,
            page_height: 1024,
            page_depth: 1,
            padding: 2,
            mipmap: false,
            max_anisotropy: None,
            growth: AtlasGrowth::Grow,
            max_blocks: None,
        }
    }
}

impl AtlasConfig {
    /// Number of layers allocated per block.
    pub fn layers_per_block(&self) -> u32 {
        self.page_depth.max(1)
    }
}
