// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use glyph_atlas::{Font, FontMetrics, GlyphMetrics, VerticalMetrics};
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::attributed::{AttributedSpan, Substring};
use crate::breaks::{BreakKind, BreakOpportunities};
use crate::shape::{ShapeRequest, ShapedGlyph, Shaper};
use crate::style::{Brush, Direction, Unit};

use super::{BreakReason, LayoutStyle};

/// How a glyph takes part in line breaking.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum GlyphClass {
    /// Visible content.
    Ink,
    /// Whitespace: may hang past the line end.
    Space,
    /// Control characters such as newlines: zero width, never drawn.
    Control,
}

/// One shaped substring, or a forced break.
#[derive(Clone, Debug)]
pub(crate) struct ItemData<B: Brush> {
    pub(crate) font: Font,
    pub(crate) brush: B,
    pub(crate) opacity: f32,
    pub(crate) direction: Direction,
    /// Byte range in the span text.
    pub(crate) text_range: Range<usize>,
    /// Glyphs in shaper (visual) order.
    pub(crate) glyphs: Vec<ShapedGlyph>,
    /// Per glyph, in shaper order.
    pub(crate) classes: Vec<GlyphClass>,
    /// Per glyph, in shaper order.
    pub(crate) bounds: Vec<GlyphMetrics>,
    /// Opportunities relative to `text_range.start`.
    pub(crate) breaks: BreakOpportunities,
    pub(crate) line_height: f32,
    pub(crate) vertical: VerticalMetrics,
    pub(crate) is_break: bool,
}

impl<B: Brush> ItemData<B> {
    pub(crate) fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Shaper index of the `logical`-th glyph in reading order.
    pub(crate) fn visual_index(&self, logical: usize) -> usize {
        visual_index(self.glyphs.len(), logical, self.direction)
    }

    /// Pen advance of a glyph (by shaper index), including tracking.
    pub(crate) fn step(&self, visual: usize, tracking: f32) -> f32 {
        match self.classes[visual] {
            GlyphClass::Control => 0.0,
            _ => self.glyphs[visual].advance + tracking,
        }
    }

    /// Visible advance of a glyph (by shaper index).
    pub(crate) fn advance(&self, visual: usize) -> f32 {
        match self.classes[visual] {
            GlyphClass::Control => 0.0,
            _ => self.glyphs[visual].advance,
        }
    }

    /// Local byte offset where the `logical`-th glyph's cluster ends.
    pub(crate) fn cluster_end(&self, logical: usize) -> usize {
        next_cluster(&self.glyphs, logical, self.text_len(), self.direction)
    }

    /// The break opportunity right after the `logical`-th glyph, if any.
    pub(crate) fn break_after(&self, logical: usize) -> Option<BreakKind> {
        let cluster = self.glyphs[self.visual_index(logical)].cluster as usize;
        let end = self.cluster_end(logical);
        if end == cluster {
            return None;
        }
        self.breaks.kind_at(end)
    }

    pub(crate) fn text_len(&self) -> usize {
        self.text_range.len()
    }

    /// Returns `true` if both items can share one run.
    pub(crate) fn same_style(&self, other: &Self) -> bool {
        self.font == other.font
            && self.brush == other.brush
            && self.opacity == other.opacity
            && self.direction == other.direction
    }
}

pub(crate) fn visual_index(len: usize, logical: usize, direction: Direction) -> usize {
    match direction {
        Direction::Ltr => logical,
        Direction::Rtl => len - 1 - logical,
    }
}

/// Byte offset of the cluster following the `logical`-th glyph, or `text_len`.
pub(crate) fn next_cluster(
    glyphs: &[ShapedGlyph],
    logical: usize,
    text_len: usize,
    direction: Direction,
) -> usize {
    let next = logical + 1;
    if next < glyphs.len() {
        glyphs[visual_index(glyphs.len(), next, direction)].cluster as usize
    } else {
        text_len
    }
}

/// A contiguous slice of one item placed on a line.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Piece {
    pub(crate) item: usize,
    /// Logical glyph range within the item.
    pub(crate) glyphs: Range<usize>,
}

/// A line as produced by the breaker, before metrics and positions.
#[derive(Clone, Debug)]
pub(crate) struct LineDraft {
    pub(crate) pieces: SmallVec<[Piece; 4]>,
    pub(crate) reason: BreakReason,
    /// Span offset where the line starts, used for empty lines.
    pub(crate) text_start: usize,
}

/// Resolved per-font measures, computed once per layout pass.
#[derive(Copy, Clone, Debug)]
pub(crate) struct FontMeasures {
    pub(crate) line_height: f32,
    pub(crate) vertical: VerticalMetrics,
}

pub(crate) fn font_measures<M: FontMetrics + ?Sized>(
    cache: &mut HashMap<Font, FontMeasures>,
    style_line_height: Unit,
    font: Font,
    metrics: &M,
) -> FontMeasures {
    *cache.entry(font).or_insert_with(|| FontMeasures {
        line_height: style_line_height.resolve(metrics.line_height(font)),
        vertical: metrics.vertical_metrics(font),
    })
}

/// Shapes every text substring of `span` and records forced breaks.
pub(crate) fn shape_items<B, S, M>(
    span: &AttributedSpan<B>,
    breaks: &BreakOpportunities,
    style: &LayoutStyle<B>,
    shaper: &mut S,
    metrics: &M,
    measures: &mut HashMap<Font, FontMeasures>,
) -> Vec<ItemData<B>>
where
    B: Brush,
    S: Shaper + ?Sized,
    M: FontMetrics + ?Sized,
{
    let mut items = Vec::with_capacity(span.substrings().len());
    for (range, substring) in span.ranges() {
        let (text, attributes) = match substring {
            Substring::LineBreak => {
                let resolved = font_measures(measures, style.line_height, style.font, metrics);
                items.push(ItemData {
                    font: style.font,
                    brush: style.brush.clone(),
                    opacity: style.opacity,
                    direction: style.direction,
                    text_range: range,
                    glyphs: Vec::new(),
                    classes: Vec::new(),
                    bounds: Vec::new(),
                    breaks: BreakOpportunities::default(),
                    line_height: resolved.line_height,
                    vertical: resolved.vertical,
                    is_break: true,
                });
                continue;
            }
            Substring::Text { text, attributes } => (text, attributes),
        };

        let font = attributes.font.unwrap_or(style.font);
        let direction = attributes.direction.unwrap_or(style.direction);
        let request = ShapeRequest {
            text,
            font,
            language: attributes.language.as_deref().unwrap_or(&style.language),
            script: attributes.script.unwrap_or(style.script),
            direction,
            features: style.features,
        };
        let mut glyphs = shaper.shape(&request);
        glyphs.retain(|glyph| (glyph.cluster as usize) < text.len());

        let classes = glyphs
            .iter()
            .map(|glyph| classify(text.get(glyph.cluster as usize..).unwrap_or_default()))
            .collect();
        let bounds = glyphs
            .iter()
            .map(|glyph| metrics.glyph_metrics(font, glyph.glyph_id))
            .collect();
        let resolved = font_measures(measures, style.line_height, font, metrics);
        log::trace!("shaped {} glyphs for {:?}", glyphs.len(), range);

        items.push(ItemData {
            font,
            brush: attributes.brush.clone().unwrap_or_else(|| style.brush.clone()),
            opacity: attributes.opacity.unwrap_or(style.opacity),
            direction,
            breaks: breaks.window(range.clone()),
            text_range: range,
            glyphs,
            classes,
            bounds,
            line_height: resolved.line_height,
            vertical: resolved.vertical,
            is_break: false,
        });
    }
    items
}

fn classify(text: &str) -> GlyphClass {
    match text.chars().next() {
        Some(c) if c.is_control() => GlyphClass::Control,
        Some(c) if c.is_whitespace() => GlyphClass::Space,
        _ => GlyphClass::Ink,
    }
}
