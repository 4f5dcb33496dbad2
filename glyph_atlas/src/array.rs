// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layered atlas storage.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use smallvec::SmallVec;

use crate::commands::{BlockAllocation, LayerUpload, TextureId};
use crate::config::{AtlasConfig, AtlasGrowth};
use crate::error::AtlasError;
use crate::packer::RectPacker;
use crate::rect::Rect;
use crate::region::Region;

/// One texture resource holding `page_depth` layers.
#[derive(Debug)]
struct AtlasBlock {
    texture: Option<TextureId>,
}

/// One page of the atlas with its packer and CPU-side staging pixels.
struct AtlasLayer {
    block: usize,
    slice: u32,
    packer: RectPacker,
    /// Page-sized pixel buffer, allocated on first write.
    staging: Option<Vec<u8>>,
    /// Part of `staging` written since the last flush.
    dirty: Option<Rect>,
}

/// An append-only collection of atlas pages grouped into texture blocks.
///
/// Layers are addressed by a global index. Layer `i` lives in block
/// `i / page_depth` at slice `i % page_depth`. The array keeps a cursor on the
/// layer currently being filled and only ever moves it forward.
pub struct AtlasArray {
    config: AtlasConfig,
    blocks: SmallVec<[AtlasBlock; 1]>,
    layers: Vec<AtlasLayer>,
    current_layer: usize,
    filled: bool,
    pending_allocations: Vec<BlockAllocation>,
    pending_uploads: Vec<LayerUpload>,
}

impl AtlasArray {
    /// Creates an array with a single block.
    pub fn new(config: AtlasConfig) -> Self {
        let mut array = Self {
            config,
            blocks: SmallVec::new(),
            layers: Vec::new(),
            current_layer: 0,
            filled: false,
            pending_allocations: Vec::new(),
            pending_uploads: Vec::new(),
        };
        array.push_block();
        array
    }

    /// The configuration the array was created with.
    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// Number of blocks (texture resources).
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of layers across all blocks.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Global index of the layer currently being filled.
    pub fn current_layer(&self) -> usize {
        self.current_layer
    }

    /// Returns `true` once the array is full and not allowed to grow.
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    /// The `(block, slice)` pair of a global layer index.
    pub fn layer_location(&self, layer: usize) -> Option<(usize, u32)> {
        self.layers.get(layer).map(|l| (l.block, l.slice))
    }

    /// The packer of a layer.
    pub fn packer(&self, layer: usize) -> Option<&RectPacker> {
        self.layers.get(layer).map(|l| &l.packer)
    }

    /// Allocates `width` x `height` plus padding, starting at the current layer.
    ///
    /// When the current layer is full its staged pixels are flushed and the
    /// cursor moves to the next layer, growing the array if the growth policy
    /// allows it.
    pub fn request(&mut self, width: u32, height: u32, padding: u32) -> Result<Region, AtlasError> {
        loop {
            match self.request_in_layer(width, height, self.current_layer, padding) {
                Err(AtlasError::LayerFull { .. }) => {
                    self.advance_layer()?;
                }
                result => return result,
            }
        }
    }

    /// Allocates `width` x `height` plus padding in one specific layer.
    ///
    /// A zero-size request succeeds with an empty region and reserves nothing.
    pub fn request_in_layer(
        &mut self,
        width: u32,
        height: u32,
        layer: usize,
        padding: u32,
    ) -> Result<Region, AtlasError> {
        if self.filled {
            return Err(AtlasError::Exhausted);
        }
        let page_width = self.config.page_width;
        let page_height = self.config.page_height;
        let target = self
            .layers
            .get_mut(layer)
            .ok_or(AtlasError::InvalidLayer { layer })?;

        if width == 0 || height == 0 {
            return Ok(Region {
                layer,
                block: target.block,
                slice: target.slice,
                rect: Rect::default(),
                id: None,
            });
        }

        let Some((padded_width, padded_height)) = padded_extent(width, padding)
            .zip(padded_extent(height, padding))
            .filter(|&(w, h)| w <= page_width && h <= page_height)
        else {
            return Err(AtlasError::Oversized { width, height });
        };

        let (id, allocation) = target
            .packer
            .insert(padded_width, padded_height)
            .map_err(|_| AtlasError::LayerFull { layer })?;
        log::trace!("allocated {allocation:?} in atlas layer {layer}");

        Ok(Region {
            layer,
            block: target.block,
            slice: target.slice,
            rect: Rect::from_origin_size(
                allocation.x0 + padding,
                allocation.y0 + padding,
                width,
                height,
            ),
            id: Some(id),
        })
    }

    /// Moves the cursor past the current layer.
    ///
    /// Staged pixels of the current layer are flushed and its staging buffer
    /// released. Returns the new current layer, or [`AtlasError::Exhausted`]
    /// if the array was the last layer and growth is not permitted, in which
    /// case the array becomes filled.
    pub fn advance_layer(&mut self) -> Result<usize, AtlasError> {
        let finished = self.current_layer;
        self.flush(finished);
        if let Some(layer) = self.layers.get_mut(finished) {
            layer.staging = None;
        }

        if finished + 1 >= self.layers.len() {
            let grown = match self.config.growth {
                AtlasGrowth::Grow => self.expand().is_ok(),
                AtlasGrowth::Fixed => false,
            };
            if !grown {
                self.filled = true;
                log::error!(
                    "glyph atlas is full: {} layers in {} blocks",
                    self.layers.len(),
                    self.blocks.len()
                );
                return Err(AtlasError::Exhausted);
            }
        }
        self.current_layer = finished + 1;
        log::debug!("atlas cursor advanced to layer {}", self.current_layer);
        Ok(self.current_layer)
    }

    /// Appends a new block of layers and returns its index.
    ///
    /// Fails with [`AtlasError::Exhausted`] when `max_blocks` is reached. The
    /// growth policy only governs automatic growth; an explicit `expand` also
    /// clears the filled flag.
    pub fn expand(&mut self) -> Result<usize, AtlasError> {
        if self
            .config
            .max_blocks
            .is_some_and(|max| self.blocks.len() >= max)
        {
            return Err(AtlasError::Exhausted);
        }
        let block = self.push_block();
        self.filled = false;
        log::debug!("allocated atlas block {block}");
        Ok(block)
    }

    /// Copies `width` x `height` pixels into the staging buffer at `region`.
    ///
    /// The pixels reach the GPU on the next [`flush`](Self::flush).
    pub fn write(&mut self, region: &Region, pixels: &[u8]) -> Result<(), AtlasError> {
        let rect = region.rect;
        let expected = rect.width() as usize * rect.height() as usize;
        if pixels.len() != expected {
            return Err(AtlasError::PixelSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        if rect.is_empty() {
            return Ok(());
        }
        let page_width = self.config.page_width as usize;
        let page_len = page_width * self.config.page_height as usize;
        let layer = self
            .layers
            .get_mut(region.layer)
            .ok_or(AtlasError::InvalidLayer {
                layer: region.layer,
            })?;

        let staging = layer.staging.get_or_insert_with(|| vec![0; page_len]);
        let row_len = rect.width() as usize;
        for (row, src) in pixels.chunks_exact(row_len).enumerate() {
            let start = (rect.y0 as usize + row) * page_width + rect.x0 as usize;
            staging[start..start + row_len].copy_from_slice(src);
        }
        layer.dirty = Some(match layer.dirty {
            Some(dirty) => dirty.union(&rect),
            None => rect,
        });
        Ok(())
    }

    /// Queues an upload of the pixels written to `layer` since the last flush.
    ///
    /// Only the bounding rectangle of the written area is uploaded.
    pub fn flush(&mut self, layer: usize) {
        let page_width = self.config.page_width as usize;
        let Some(target) = self.layers.get_mut(layer) else {
            return;
        };
        let (Some(rect), Some(staging)) = (target.dirty.take(), target.staging.as_ref()) else {
            return;
        };
        let row_len = rect.width() as usize;
        let mut pixels = Vec::with_capacity(row_len * rect.height() as usize);
        for y in rect.y0..rect.y1 {
            let start = y as usize * page_width + rect.x0 as usize;
            pixels.extend_from_slice(&staging[start..start + row_len]);
        }
        log::trace!("queued upload of {rect:?} to atlas layer {layer}");
        self.pending_uploads.push(LayerUpload {
            block: target.block,
            slice: target.slice,
            layer,
            rect,
            pixels,
        });
    }

    /// Queues an upload replacing the whole content of `layer`.
    ///
    /// `pixels` must hold one byte per pixel of a page. Pending staged writes
    /// to the layer are flushed first so they are not lost.
    pub fn update(&mut self, layer: usize, pixels: Vec<u8>) -> Result<(), AtlasError> {
        let expected = self.config.page_width as usize * self.config.page_height as usize;
        if pixels.len() != expected {
            return Err(AtlasError::PixelSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        let (block, slice) = self
            .layer_location(layer)
            .ok_or(AtlasError::InvalidLayer { layer })?;
        self.flush(layer);
        self.pending_uploads.push(LayerUpload {
            block,
            slice,
            layer,
            rect: Rect::from_origin_size(0, 0, self.config.page_width, self.config.page_height),
            pixels,
        });
        Ok(())
    }

    /// Records the texture the backend created for `block`.
    ///
    /// Returns `false` if the block does not exist.
    pub fn bind_texture(&mut self, block: usize, texture: TextureId) -> bool {
        match self.blocks.get_mut(block) {
            Some(entry) => {
                entry.texture = Some(texture);
                true
            }
            None => false,
        }
    }

    /// The texture bound to `block`, if any.
    pub fn texture(&self, block: usize) -> Option<TextureId> {
        self.blocks.get(block).and_then(|b| b.texture)
    }

    /// Takes the queued block allocations, leaving the queue empty.
    pub fn take_pending_allocations(&mut self) -> Vec<BlockAllocation> {
        core::mem::take(&mut self.pending_allocations)
    }

    /// Takes the queued layer uploads, leaving the queue empty.
    pub fn take_pending_uploads(&mut self) -> Vec<LayerUpload> {
        core::mem::take(&mut self.pending_uploads)
    }

    /// Returns `true` if there is GPU work waiting to be drained.
    pub fn has_pending_work(&self) -> bool {
        !self.pending_allocations.is_empty() || !self.pending_uploads.is_empty()
    }

    /// Normalized texture coordinates of a page rectangle: `(offset, size)`.
    pub fn normalize(&self, rect: Rect) -> ([f32; 2], [f32; 2]) {
        let width = self.config.page_width as f32;
        let height = self.config.page_height as f32;
        (
            [rect.x0 as f32 / width, rect.y0 as f32 / height],
            [rect.width() as f32 / width, rect.height() as f32 / height],
        )
    }

    fn push_block(&mut self) -> usize {
        let block = self.blocks.len();
        let depth = self.config.layers_per_block();
        self.blocks.push(AtlasBlock { texture: None });
        self.layers.extend((0..depth).map(|slice| AtlasLayer {
            block,
            slice,
            packer: RectPacker::new(self.config.page_width, self.config.page_height),
            staging: None,
            dirty: None,
        }));
        self.pending_allocations.push(BlockAllocation {
            block,
            width: self.config.page_width,
            height: self.config.page_height,
            depth,
            mipmap: self.config.mipmap,
            max_anisotropy: self.config.max_anisotropy,
        });
        block
    }
}

impl Debug for AtlasArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AtlasArray")
            .field("config", &self.config)
            .field("blocks", &self.blocks)
            .field("layers", &self.layers.len())
            .field("current_layer", &self.current_layer)
            .field("filled", &self.filled)
            .finish_non_exhaustive()
    }
}

/// Adds `padding` on both sides and rounds up to a multiple of 4.
///
/// Returns `None` when the result does not fit in a `u32`.
fn padded_extent(extent: u32, padding: u32) -> Option<u32> {
    padding
        .checked_mul(2)
        .and_then(|padding| extent.checked_add(padding))
        .and_then(|padded| padded.checked_next_multiple_of(4))
}
