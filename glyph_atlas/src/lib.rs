// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph Atlas packs rasterized glyph bitmaps into layered GPU texture atlases.
//!
//! The crate is built from three layers, leaves first:
//!
//! - [`RectPacker`]: a guillotine bin packer for one atlas page, with
//!   best-area-fit placement and free-list coalescing.
//! - [`AtlasArray`]: an ordered list of texture blocks, each holding a fixed
//!   number of layers with one packer per layer. It grows by appending blocks
//!   and records the GPU work (texture allocations and pixel uploads) that a
//!   render backend must perform.
//! - [`GlyphCache`]: maps `(font, glyph)` pairs to their atlas placement,
//!   rasterizing and packing glyphs on demand through a [`Rasterizer`].
//!
//! Nothing here talks to a GPU directly. The backend drains
//! [`AtlasArray::take_pending_allocations`] and
//! [`AtlasArray::take_pending_uploads`] once per frame.
//!
//! ## Features
//!
//! - `std` (enabled by default): Link against the standard library.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

mod array;
mod cache;
mod commands;
mod config;
mod error;
mod key;
mod packer;
mod raster;
mod rect;
mod region;

#[cfg(test)]
mod testing;

pub use array::AtlasArray;
pub use cache::{CacheMode, CacheStats, EnsureReport, GlyphCache};
pub use commands::{BlockAllocation, LayerUpload, TextureId};
pub use config::{AtlasConfig, AtlasGrowth};
pub use error::{AtlasError, GlyphError, PackError};
pub use key::{Font, GlyphKey};
pub use packer::{DEFAULT_MERGE_PASSES, RectId, RectPacker};
pub use raster::{FontMetrics, GlyphBitmap, GlyphMetrics, Rasterizer, VerticalMetrics};
pub use rect::Rect;
pub use region::{GlyphPlacement, GlyphSlot, Region};
