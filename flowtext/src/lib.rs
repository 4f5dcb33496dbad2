// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flowtext lays out attributed text into lines of positioned glyphs.
//!
//! Text arrives as an [`AttributedSpan`]: ordered substrings, each with its
//! own font, brush, script and direction. A [`Layout`] shapes every substring
//! through a [`Shaper`], places the glyphs on a pen line advanced by each
//! glyph's advance plus tracking, wraps greedily at the closest break
//! opportunity before the box edge and finally aligns each line.
//!
//! Glyph bitmaps live in a [`GlyphCache`](glyph_atlas::GlyphCache) from the
//! `glyph_atlas` crate. [`Layout::cache_glyphs`] packs everything a layout
//! needs and [`draw::glyph_batches`] turns the result into textured quads.
//!
//! ```
//! use flowtext::{AttributedSpan, BoxSize, Layout, LayoutStyle, ShapeRequest, ShapedGlyph, Shaper};
//! use glyph_atlas::{Font, FontMetrics, GlyphMetrics, VerticalMetrics};
//!
//! // A shaper giving every character a 10px advance.
//! struct Fixed;
//!
//! impl Shaper for Fixed {
//!     fn shape(&mut self, request: &ShapeRequest<'_>) -> Vec<ShapedGlyph> {
//!         request
//!             .text
//!             .char_indices()
//!             .map(|(index, c)| ShapedGlyph {
//!                 glyph_id: u32::from(c),
//!                 cluster: index as u32,
//!                 advance: 10.0,
//!                 ..ShapedGlyph::default()
//!             })
//!             .collect()
//!     }
//! }
//!
//! impl FontMetrics for Fixed {
//!     fn glyph_metrics(&self, _font: Font, _glyph_id: u32) -> GlyphMetrics {
//!         GlyphMetrics { x_min: 0.0, y_min: 0.0, x_max: 8.0, y_max: 10.0 }
//!     }
//!
//!     fn vertical_metrics(&self, font: Font) -> VerticalMetrics {
//!         VerticalMetrics { ascent: font.size * 0.8, descent: font.size * 0.2, leading: 0.0 }
//!     }
//! }
//!
//! let mut layout = Layout::new(LayoutStyle::<()> {
//!     box_size: BoxSize::new(60.0, 0.0),
//!     ..LayoutStyle::default()
//! });
//! layout.calculate_layout(&AttributedSpan::plain("hello world"), &mut Fixed, &Fixed);
//! assert_eq!(layout.len(), 2);
//! ```
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

mod attributed;
mod breaks;
mod shape;
mod style;

pub mod draw;
pub mod layout;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use glyph_atlas;

pub use attributed::{AttributedSpan, Attributes, Substring};
pub use breaks::{BreakKind, BreakOpportunities};
pub use layout::{
    BoxSize, BreakPoint, BreakReason, Glyph, Layout, LayoutStyle, Line, LineMetrics, Run,
    closest_break,
};
pub use shape::{ShapeRequest, ShapedGlyph, Shaper};
pub use style::{Alignment, Brush, Direction, Script, ShapingFeatures, Unit};
