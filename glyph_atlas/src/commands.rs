// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred GPU work recorded by an [`AtlasArray`](crate::AtlasArray).
//!
//! The atlas never calls into a graphics API. Growing the atlas queues a
//! [`BlockAllocation`] and flushing staged pixels queues a [`LayerUpload`].
//! The render backend drains both queues and reports the texture it created
//! for each block through [`AtlasArray::bind_texture`](crate::AtlasArray::bind_texture).

use alloc::vec::Vec;

use crate::rect::Rect;

/// Opaque handle of the texture backing one atlas block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// A request to create the texture for a new atlas block.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockAllocation {
    /// Index of the new block.
    pub block: usize,
    /// Page width in pixels.
    pub width: u32,
    /// Page height in pixels.
    pub height: u32,
    /// Number of layers (array slices).
    pub depth: u32,
    /// Whether mipmaps should be generated.
    pub mipmap: bool,
    /// Maximum anisotropic filtering level, if any.
    pub max_anisotropy: Option<f32>,
}

/// Single-channel pixels to copy into one layer of a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerUpload {
    /// Block holding the layer.
    pub block: usize,
    /// Slice index within the block.
    pub slice: u32,
    /// Global layer index in the atlas.
    pub layer: usize,
    /// Destination rectangle within the page.
    pub rect: Rect,
    /// Row-major pixels covering `rect`, one byte per pixel.
    pub pixels: Vec<u8>,
}
