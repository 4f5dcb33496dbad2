// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use glyph_atlas::Font;

use super::Glyph;
use crate::style::{Brush, Direction};

/// A sequence of glyphs on one line sharing font, brush, opacity and direction.
#[derive(Clone, Debug, PartialEq)]
pub struct Run<B: Brush> {
    pub(crate) font: Font,
    pub(crate) brush: B,
    pub(crate) opacity: f32,
    pub(crate) direction: Direction,
    pub(crate) text_range: Range<usize>,
    pub(crate) glyphs: Vec<Glyph>,
    pub(crate) advance: f32,
}

impl<B: Brush> Run<B> {
    /// Font of the run.
    pub fn font(&self) -> Font {
        self.font
    }

    /// Brush of the run.
    pub fn brush(&self) -> &B {
        &self.brush
    }

    /// Opacity of the run.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Direction the run was shaped in.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Byte range of the span text covered by the run.
    pub fn text_range(&self) -> Range<usize> {
        self.text_range.clone()
    }

    /// The glyphs, left to right.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Total pen advance of the run, tracking included.
    pub fn advance(&self) -> f32 {
        self.advance
    }

    /// Ids of the run's glyphs.
    pub fn glyph_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.glyphs.iter().map(|glyph| glyph.id)
    }
}
