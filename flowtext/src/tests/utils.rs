// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glyph_atlas::Font;

use crate::testing::{MonoMetrics, MonoShaper};
use crate::{AttributedSpan, BoxSize, BreakOpportunities, Layout, LayoutStyle, Line};

/// RGBA color used as the brush in tests.
pub(crate) type ColorBrush = [u8; 4];

pub(crate) const RED: ColorBrush = [255, 0, 0, 255];
pub(crate) const BLUE: ColorBrush = [0, 0, 255, 255];

/// Font size 10: line height 10, ascent 8, descent 2.
pub(crate) const SMALL: Font = Font { id: 1, size: 10.0 };
/// Font size 20: line height 20, ascent 16, descent 4.
pub(crate) const LARGE: Font = Font { id: 2, size: 20.0 };

/// Shaper and font backend shared by the layout tests.
pub(crate) struct TestEnv {
    pub(crate) shaper: MonoShaper,
    pub(crate) metrics: MonoMetrics,
}

impl TestEnv {
    /// Every glyph advances by `advance`.
    pub(crate) fn new(advance: f32) -> Self {
        Self {
            shaper: MonoShaper::new(advance),
            metrics: MonoMetrics::new(),
        }
    }

    pub(crate) fn layout(
        &mut self,
        span: &AttributedSpan<ColorBrush>,
        style: LayoutStyle<ColorBrush>,
    ) -> Layout<ColorBrush> {
        let mut layout = Layout::new(style);
        layout.calculate_layout(span, &mut self.shaper, &self.metrics);
        layout
    }

    pub(crate) fn layout_with_breaks(
        &mut self,
        span: &AttributedSpan<ColorBrush>,
        breaks: &BreakOpportunities,
        style: LayoutStyle<ColorBrush>,
    ) -> Layout<ColorBrush> {
        let mut layout = Layout::new(style);
        layout.calculate_with_breaks(span, breaks, &mut self.shaper, &self.metrics);
        layout
    }
}

/// Left-to-right style in [`SMALL`] with a box `width` wide and unbounded height.
pub(crate) fn style(width: f32) -> LayoutStyle<ColorBrush> {
    LayoutStyle {
        font: SMALL,
        brush: RED,
        box_size: BoxSize::new(width, 0.0),
        ..LayoutStyle::default()
    }
}

/// The characters of a line's glyphs, left to right.
pub(crate) fn line_chars(line: &Line<ColorBrush>) -> String {
    line.glyphs()
        .map(|glyph| char::from_u32(glyph.id).unwrap())
        .collect()
}

/// The characters of every line.
pub(crate) fn lines_chars(layout: &Layout<ColorBrush>) -> Vec<String> {
    layout.lines().iter().map(line_chars).collect()
}

/// Pen x position of every glyph on a line.
pub(crate) fn origins_x(line: &Line<ColorBrush>) -> Vec<f32> {
    line.glyphs().map(|glyph| glyph.origin[0]).collect()
}
