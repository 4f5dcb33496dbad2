// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Failure to place a rectangle on a single page.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PackError {
    /// The request had zero width or zero height.
    ZeroArea,

    /// No free rectangle on the page can hold the request.
    ///
    /// This is the normal signal to move on to another page.
    OutOfSpace {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroArea => f.write_str("cannot pack a zero-area rectangle"),
            Self::OutOfSpace { width, height } => {
                write!(f, "no free rectangle can hold {width}x{height}")
            }
        }
    }
}

impl core::error::Error for PackError {}

/// Failure to allocate a region in an [`AtlasArray`](crate::AtlasArray).
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum AtlasError {
    /// The padded request is larger than a whole page. Retrying cannot help.
    Oversized {
        /// Requested width, before padding.
        width: u32,
        /// Requested height, before padding.
        height: u32,
    },

    /// The targeted layer has no room for the request.
    LayerFull {
        /// Global index of the layer.
        layer: usize,
    },

    /// Every layer is full and the array may not grow any further.
    Exhausted,

    /// The layer index does not exist.
    InvalidLayer {
        /// The offending layer index.
        layer: usize,
    },

    /// A pixel buffer does not match the dimensions it was written with.
    PixelSizeMismatch {
        /// Number of bytes the destination expects.
        expected: usize,
        /// Number of bytes supplied.
        actual: usize,
    },
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Oversized { width, height } => {
                write!(f, "{width}x{height} does not fit on an atlas page")
            }
            Self::LayerFull { layer } => write!(f, "atlas layer {layer} is full"),
            Self::Exhausted => f.write_str("atlas is full and cannot grow"),
            Self::InvalidLayer { layer } => write!(f, "atlas layer {layer} does not exist"),
            Self::PixelSizeMismatch { expected, actual } => {
                write!(f, "expected {expected} bytes of pixel data, got {actual}")
            }
        }
    }
}

impl core::error::Error for AtlasError {}

/// Reason a glyph was left without an atlas placement.
///
/// These never abort a caching pass. They are collected into an
/// [`EnsureReport`](crate::EnsureReport) and the glyph is drawn as invisible.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum GlyphError {
    /// The rasterizer returned an empty bitmap, or one whose pixel buffer
    /// does not match its dimensions.
    InvalidBitmap,

    /// The glyph is larger than a whole atlas page. It is never retried.
    Oversized,

    /// The atlas is full and may not grow.
    AtlasExhausted,
}

impl fmt::Display for GlyphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidBitmap => "rasterizer returned an invalid bitmap",
            Self::Oversized => "glyph is larger than an atlas page",
            Self::AtlasExhausted => "glyph atlas is exhausted",
        })
    }
}

impl core::error::Error for GlyphError {}
