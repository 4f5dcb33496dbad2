// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout types.

mod alignment;
mod breaker;
mod glyph;
mod line;
mod run;

pub(crate) mod data;

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use glyph_atlas::{EnsureReport, Font, FontMetrics, GlyphCache, Rasterizer};
use hashbrown::{HashMap, HashSet};

use self::alignment::{align, LineAdjustment, LineExtent};
use self::breaker::BreakLines;
use self::data::{font_measures, shape_items, FontMeasures, GlyphClass, ItemData, LineDraft};
use crate::attributed::AttributedSpan;
use crate::breaks::BreakOpportunities;
use crate::shape::Shaper;
use crate::style::{Alignment, Brush, Direction, Script, ShapingFeatures, Unit};

pub use breaker::{closest_break, BreakPoint};
pub use glyph::Glyph;
pub use line::{Line, LineMetrics};
pub use run::Run;

/// Why a line ended.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BreakReason {
    /// The text ran out.
    #[default]
    None,
    /// Wrapped at a break opportunity.
    Regular,
    /// A forced break: a newline character or a line break substring.
    Explicit,
    /// No break opportunity fit, so the line was cut at the overflowing glyph.
    Emergency,
}

/// Size of the layout box. A zero dimension grows to fit the content.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxSize {
    /// Maximum line width, or `0.0` for unbounded lines.
    pub width: f32,
    /// Maximum height, or `0.0` to keep every line.
    pub height: f32,
}

impl BoxSize {
    /// A box that grows in both directions.
    pub const GROW: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a box size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Configuration of a [`Layout`], fixed for the lifetime of the layout.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutStyle<B: Brush> {
    /// Font for substrings that don't name one.
    pub font: Font,
    /// Brush for substrings that don't name one.
    pub brush: B,
    /// Opacity for substrings that don't name one.
    pub opacity: f32,
    /// The layout box.
    pub box_size: BoxSize,
    /// Requested alignment. `None` aligns to the start edge of [`direction`](Self::direction).
    pub alignment: Option<Alignment>,
    /// Base direction: orders runs on a line and picks the default alignment.
    pub direction: Direction,
    /// Script for substrings that don't name one.
    pub script: Script,
    /// BCP 47 language tag for substrings that don't name one.
    pub language: String,
    /// Line height, relative to the natural line height of each font.
    pub line_height: Unit,
    /// Extra space after every glyph, relative to the size of [`font`](Self::font).
    pub tracking: Unit,
    /// Lines beyond this count are dropped and the layout is flagged as truncated.
    pub max_lines: Option<usize>,
    /// Feature switches passed to the shaper.
    pub features: ShapingFeatures,
}

impl<B: Brush> Default for LayoutStyle<B> {
    fn default() -> Self {
        Self {
            font: Font::new(0, 16.0),
            brush: B::default(),
            opacity: 1.0,
            box_size: BoxSize::GROW,
            alignment: None,
            direction: Direction::Ltr,
            script: Script::LATIN,
            language: "en".into(),
            line_height: Unit::Relative(1.0),
            tracking: Unit::Px(0.0),
            max_lines: None,
            features: ShapingFeatures::default(),
        }
    }
}

/// Text broken into lines of positioned glyphs.
///
/// Every call to [`calculate_layout`](Self::calculate_layout) discards the
/// previous lines and lays the span out from scratch.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout<B: Brush> {
    style: LayoutStyle<B>,
    lines: Vec<Line<B>>,
    truncated: bool,
}

impl<B: Brush> Default for Layout<B> {
    fn default() -> Self {
        Self::new(LayoutStyle::default())
    }
}

impl<B: Brush> Layout<B> {
    /// Creates an empty layout.
    pub fn new(style: LayoutStyle<B>) -> Self {
        Self {
            style,
            lines: Vec::new(),
            truncated: false,
        }
    }

    /// The layout's configuration.
    pub fn style(&self) -> &LayoutStyle<B> {
        &self.style
    }

    /// Replaces the configuration. The lines are cleared until the next
    /// [`calculate_layout`](Self::calculate_layout).
    pub fn set_style(&mut self, style: LayoutStyle<B>) {
        self.style = style;
        self.lines.clear();
        self.truncated = false;
    }

    /// The alignment in effect: the requested one, or the start edge of the
    /// base direction.
    pub fn effective_alignment(&self) -> Alignment {
        self.style
            .alignment
            .unwrap_or_else(|| Alignment::default_for(self.style.direction))
    }

    /// Shapes `span`, breaks it into lines and positions every glyph.
    ///
    /// Break opportunities come from the Unicode line breaking algorithm
    /// applied to the span's text.
    pub fn calculate_layout<S, M>(&mut self, span: &AttributedSpan<B>, shaper: &mut S, metrics: &M)
    where
        S: Shaper + ?Sized,
        M: FontMetrics + ?Sized,
    {
        let breaks = BreakOpportunities::from_text(span.text());
        self.calculate_with_breaks(span, &breaks, shaper, metrics);
    }

    /// Like [`calculate_layout`](Self::calculate_layout), with break
    /// opportunities supplied by the caller as offsets into the span's text.
    pub fn calculate_with_breaks<S, M>(
        &mut self,
        span: &AttributedSpan<B>,
        breaks: &BreakOpportunities,
        shaper: &mut S,
        metrics: &M,
    ) where
        S: Shaper + ?Sized,
        M: FontMetrics + ?Sized,
    {
        self.lines.clear();
        self.truncated = false;

        let style = &self.style;
        let mut measures = HashMap::new();
        let items = shape_items(span, breaks, style, shaper, metrics, &mut measures);
        let fallback = font_measures(&mut measures, style.line_height, style.font, metrics);
        let tracking = style.tracking.resolve(style.font.size);
        let max_advance = if style.box_size.width > 0.0 {
            style.box_size.width
        } else {
            f32::INFINITY
        };

        let mut pending: Vec<PendingLine> = Vec::new();
        let mut breaker = BreakLines::new(&items, max_advance, tracking);
        let mut top = 0.0;
        while let Some(draft) = breaker.break_next() {
            if style.max_lines.is_some_and(|max| pending.len() >= max) {
                self.truncated = true;
                break;
            }
            let line = PendingLine::measure(&items, draft, fallback, tracking, top, max_advance);
            if style.box_size.height > 0.0 && line.metrics.bottom() > style.box_size.height {
                self.truncated = true;
                break;
            }
            top = line.metrics.bottom();
            pending.push(line);
        }
        if self.truncated {
            log::debug!("layout truncated after {} lines", pending.len());
        }

        let alignment = self.effective_alignment();
        let alignment_width = if style.box_size.width > 0.0 {
            style.box_size.width
        } else {
            pending
                .iter()
                .map(|line| line.metrics.width)
                .max_by(f32::total_cmp)
                .unwrap_or(0.0)
        };
        let direction = style.direction;
        self.lines = pending
            .into_iter()
            .map(|line| {
                let extent = LineExtent {
                    width: line.metrics.width,
                    trailing_whitespace: line.metrics.trailing_whitespace,
                    break_reason: line.draft.reason,
                    opportunities: line.opportunities,
                };
                let adjustment = align(&extent, alignment_width, alignment, direction);
                line.position(&items, adjustment, tracking, direction)
            })
            .collect();
    }

    /// The lines, top to bottom.
    pub fn lines(&self) -> &[Line<B>] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the layout has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns `true` if lines were dropped because of
    /// [`max_lines`](LayoutStyle::max_lines) or the box height.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Returns `true` if some line is wider than the box because an
    /// unbreakable piece of text did not fit.
    pub fn has_forced_overflow(&self) -> bool {
        self.lines.iter().any(Line::is_overflowing)
    }

    /// Width of the widest line and total height of the lines.
    pub fn measure(&self) -> (f32, f32) {
        let width = self
            .lines
            .iter()
            .map(|line| line.metrics.width)
            .max_by(f32::total_cmp)
            .unwrap_or(0.0);
        let height = self.lines.last().map_or(0.0, |line| line.metrics.bottom());
        (width, height)
    }

    /// Size of the layout box, with growing dimensions replaced by the
    /// measured content.
    pub fn size(&self) -> (f32, f32) {
        let (width, height) = self.measure();
        let BoxSize {
            width: box_width,
            height: box_height,
        } = self.style.box_size;
        (
            if box_width > 0.0 { box_width } else { width },
            if box_height > 0.0 { box_height } else { height },
        )
    }

    /// The visible glyphs of the layout, grouped by font in order of first use.
    ///
    /// Each glyph id is listed once per font. Glyphs without extent, such as
    /// spaces, are left out since they are never drawn.
    pub fn required_glyphs(&self) -> Vec<(Font, Vec<u32>)> {
        let mut fonts: Vec<(Font, Vec<u32>)> = Vec::new();
        let mut index: HashMap<Font, usize> = HashMap::new();
        let mut seen: HashSet<(Font, u32)> = HashSet::new();
        for run in self.lines.iter().flat_map(|line| line.runs.iter()) {
            let slot = *index.entry(run.font).or_insert_with(|| {
                fonts.push((run.font, Vec::new()));
                fonts.len() - 1
            });
            for glyph in run.glyphs.iter().filter(|glyph| !glyph.is_empty()) {
                if seen.insert((run.font, glyph.id)) {
                    fonts[slot].1.push(glyph.id);
                }
            }
        }
        fonts
    }

    /// Makes sure every glyph of the layout is packed in `cache`.
    pub fn cache_glyphs<R>(&self, cache: &mut GlyphCache, rasterizer: &mut R) -> EnsureReport
    where
        R: Rasterizer + ?Sized,
    {
        let mut report = EnsureReport::default();
        for (font, glyphs) in self.required_glyphs() {
            report.merge(cache.ensure(font, glyphs, rasterizer));
        }
        if !report.is_complete() {
            log::debug!(
                "{} glyphs of the layout are unresolved and will not be drawn",
                report.failures.len()
            );
        }
        report
    }
}

/// A broken line with its vertical metrics, before alignment.
struct PendingLine {
    draft: LineDraft,
    metrics: LineMetrics,
    text_range: Range<usize>,
    overflowing: bool,
    /// Position, in reading order, of the last glyph with ink.
    last_ink: Option<usize>,
    opportunities: usize,
}

impl PendingLine {
    fn measure<B: Brush>(
        items: &[ItemData<B>],
        draft: LineDraft,
        fallback: FontMeasures,
        tracking: f32,
        top: f32,
        max_advance: f32,
    ) -> Self {
        let mut pen = 0.0;
        let mut width = 0.0;
        let mut content_end = 0.0;
        let mut last_ink = None;
        let mut seq = 0;
        for piece in &draft.pieces {
            let item = &items[piece.item];
            for logical in piece.glyphs.clone() {
                let visual = item.visual_index(logical);
                if item.classes[visual] == GlyphClass::Ink {
                    width = pen + item.advance(visual);
                    content_end = pen + item.step(visual, tracking);
                    last_ink = Some(seq);
                }
                pen += item.step(visual, tracking);
                seq += 1;
            }
        }

        let mut opportunities = 0;
        if let Some(last_ink) = last_ink {
            let mut seq = 0;
            for piece in &draft.pieces {
                let item = &items[piece.item];
                for logical in piece.glyphs.clone() {
                    if seq < last_ink && item.break_after(logical).is_some() {
                        opportunities += 1;
                    }
                    seq += 1;
                }
            }
        }

        let (ascent, descent, line_height) = if draft.pieces.is_empty() {
            (
                fallback.vertical.ascent,
                fallback.vertical.descent,
                fallback.line_height,
            )
        } else {
            draft
                .pieces
                .iter()
                .map(|piece| &items[piece.item])
                .fold((0.0_f32, 0.0_f32, 0.0_f32), |(a, d, h), item| {
                    (
                        a.max(item.vertical.ascent),
                        d.max(item.vertical.descent),
                        h.max(item.line_height),
                    )
                })
        };

        let text_end = draft.pieces.last().map_or(draft.text_start, |piece| {
            let item = &items[piece.item];
            match piece.glyphs.end.checked_sub(1) {
                Some(last) => item.text_range.start + item.cluster_end(last),
                None => draft.text_start,
            }
        });

        Self {
            metrics: LineMetrics {
                ascent,
                descent,
                line_height,
                top,
                baseline: top + (line_height - (ascent + descent)) * 0.5 + ascent,
                width,
                trailing_whitespace: pen - content_end,
                offset: 0.0,
            },
            text_range: draft.text_start..text_end,
            overflowing: width > max_advance,
            last_ink,
            opportunities,
            draft,
        }
    }

    /// Assigns final positions to the glyphs and groups them into runs.
    ///
    /// Whitespace after the last glyph with ink hangs at the end edge of the
    /// base direction, whatever the direction of the run it belongs to.
    fn position<B: Brush>(
        self,
        items: &[ItemData<B>],
        adjustment: LineAdjustment,
        tracking: f32,
        direction: Direction,
    ) -> Line<B> {
        let mut metrics = self.metrics;
        metrics.offset = adjustment.offset;

        let mut order: Vec<usize> = (0..self.draft.pieces.len()).collect();
        if direction.is_rtl() {
            order.reverse();
        }

        // Position of each piece's first glyph in reading order.
        let mut seq_starts = Vec::with_capacity(self.draft.pieces.len());
        let mut seq = 0;
        for piece in &self.draft.pieces {
            seq_starts.push(seq);
            seq += piece.glyphs.len();
        }

        let mut content: Vec<Slot> = Vec::new();
        let mut hanging: Vec<Slot> = Vec::new();
        for index in order {
            let piece = &self.draft.pieces[index];
            // Reading order positions, arranged left to right.
            let mut glyph_order: Vec<usize> = piece.glyphs.clone().collect();
            if items[piece.item].direction.is_rtl() {
                glyph_order.reverse();
            }
            for logical in glyph_order {
                let slot = Slot {
                    item: piece.item,
                    logical,
                    seq: seq_starts[index] + logical - piece.glyphs.start,
                };
                if self.last_ink.is_some_and(|last| slot.seq <= last) {
                    content.push(slot);
                } else {
                    hanging.push(slot);
                }
            }
        }
        hanging.sort_by_key(|slot| slot.seq);
        let slots = if direction.is_rtl() {
            hanging.reverse();
            hanging.extend(content);
            hanging
        } else {
            content.extend(hanging);
            content
        };

        let mut runs: Vec<Run<B>> = Vec::new();
        let mut last_item: Option<usize> = None;
        let mut pen = adjustment.offset;
        for slot in slots {
            let item = &items[slot.item];
            let visual = item.visual_index(slot.logical);
            let shaped = &item.glyphs[visual];
            let cluster = item.text_range.start + shaped.cluster as usize;
            let cluster_end = item.text_range.start + item.cluster_end(slot.logical);

            let merge = last_item.is_some_and(|last| items[last].same_style(item));
            last_item = Some(slot.item);
            if !merge {
                runs.push(Run {
                    font: item.font,
                    brush: item.brush.clone(),
                    opacity: item.opacity,
                    direction: item.direction,
                    text_range: cluster..cluster_end,
                    glyphs: Vec::new(),
                    advance: 0.0,
                });
            }
            let Some(run) = runs.last_mut() else {
                continue;
            };
            run.text_range.start = run.text_range.start.min(cluster);
            run.text_range.end = run.text_range.end.max(cluster_end);

            let justify = self.last_ink.is_some_and(|last| slot.seq < last)
                && item.break_after(slot.logical).is_some();
            let extra = if justify { adjustment.gap } else { 0.0 };
            let step = item.step(visual, tracking) + extra;

            if item.classes[visual] != GlyphClass::Control {
                let bounds = &item.bounds[visual];
                let origin = [pen + shaped.x_offset, metrics.baseline - shaped.y_offset];
                run.glyphs.push(Glyph {
                    id: shaped.glyph_id,
                    source_index: cluster,
                    shaped_offset: [shaped.x_offset, shaped.y_offset],
                    advance: item.advance(visual) + extra,
                    origin,
                    position: [origin[0] + bounds.x_min, origin[1] - bounds.y_max],
                    size: [bounds.width(), bounds.height()],
                });
            }
            run.advance += step;
            pen += step;
        }
        runs.retain(|run| !run.glyphs.is_empty());

        Line {
            runs,
            metrics,
            break_reason: self.draft.reason,
            text_range: self.text_range,
            overflowing: self.overflowing,
        }
    }
}

/// A glyph of a line, identified by its item and reading order position.
#[derive(Copy, Clone, Debug)]
struct Slot {
    item: usize,
    logical: usize,
    /// Position in reading order across the whole line.
    seq: usize,
}
