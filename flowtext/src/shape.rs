// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interface to the text shaping engine.

use alloc::vec::Vec;

use glyph_atlas::Font;

use crate::style::{Direction, Script, ShapingFeatures};

/// Everything the shaper needs to shape one substring.
#[derive(Clone, Debug)]
pub struct ShapeRequest<'a> {
    /// The text to shape.
    pub text: &'a str,
    /// The font to shape with.
    pub font: Font,
    /// BCP 47 language tag.
    pub language: &'a str,
    /// Script of the text.
    pub script: Script,
    /// Direction of the run.
    pub direction: Direction,
    /// Feature switches.
    pub features: ShapingFeatures,
}

/// One positioned glyph produced by the shaper.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ShapedGlyph {
    /// Glyph index within the font.
    pub glyph_id: u32,
    /// Byte offset in the shaped text of the first character this glyph renders.
    pub cluster: u32,
    /// Horizontal offset from the pen position.
    pub x_offset: f32,
    /// Vertical offset from the baseline, y pointing up.
    pub y_offset: f32,
    /// Horizontal pen advance.
    pub advance: f32,
}

/// A text shaping engine.
pub trait Shaper {
    /// Shapes `request.text`.
    ///
    /// Glyphs are returned in visual order: left to right, so a right-to-left
    /// run lists its logically last glyph first.
    fn shape(&mut self, request: &ShapeRequest<'_>) -> Vec<ShapedGlyph>;
}
