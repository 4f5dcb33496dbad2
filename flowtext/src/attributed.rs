// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributed text: ordered substrings, each with its own style.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use glyph_atlas::Font;

use crate::style::{Brush, Direction, Script};

/// Style overrides for one substring. Unset fields fall back to the layout style.
#[derive(Clone, Debug, PartialEq)]
pub struct Attributes<B: Brush> {
    /// Font of the substring.
    pub font: Option<Font>,
    /// Color of the substring.
    pub brush: Option<B>,
    /// Opacity multiplier in `0.0..=1.0`.
    pub opacity: Option<f32>,
    /// Script passed to the shaper.
    pub script: Option<Script>,
    /// Direction of the substring's glyph run.
    pub direction: Option<Direction>,
    /// BCP 47 language tag passed to the shaper.
    pub language: Option<String>,
}

impl<B: Brush> Default for Attributes<B> {
    fn default() -> Self {
        Self {
            font: None,
            brush: None,
            opacity: None,
            script: None,
            direction: None,
            language: None,
        }
    }
}

/// One element of an [`AttributedSpan`].
#[derive(Clone, Debug, PartialEq)]
pub enum Substring<B: Brush> {
    /// Styled text.
    Text {
        /// The text.
        text: String,
        /// Its style overrides.
        attributes: Attributes<B>,
    },
    /// A forced line break.
    LineBreak,
}

/// An ordered sequence of styled substrings.
///
/// Text offsets reported by layouts are byte offsets into [`text`](Self::text),
/// the concatenation of every text substring.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributedSpan<B: Brush> {
    substrings: Vec<Substring<B>>,
    text: String,
}

impl<B: Brush> Default for AttributedSpan<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Brush> AttributedSpan<B> {
    /// Creates an empty span.
    pub fn new() -> Self {
        Self {
            substrings: Vec::new(),
            text: String::new(),
        }
    }

    /// Creates a span holding one unstyled substring.
    pub fn plain(text: &str) -> Self {
        let mut span = Self::new();
        span.push(text, Attributes::default());
        span
    }

    /// Appends styled text. Empty text is ignored.
    pub fn push(&mut self, text: &str, attributes: Attributes<B>) -> &mut Self {
        if !text.is_empty() {
            self.text.push_str(text);
            self.substrings.push(Substring::Text {
                text: text.into(),
                attributes,
            });
        }
        self
    }

    /// Appends a forced line break.
    pub fn push_line_break(&mut self) -> &mut Self {
        self.substrings.push(Substring::LineBreak);
        self
    }

    /// The substrings in order.
    pub fn substrings(&self) -> &[Substring<B>] {
        &self.substrings
    }

    /// The concatenated text of all substrings.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` if the span holds no substrings.
    pub fn is_empty(&self) -> bool {
        self.substrings.is_empty()
    }

    /// Iterates the substrings with the byte range each covers in [`text`](Self::text).
    ///
    /// Line breaks cover an empty range at their position.
    pub fn ranges(&self) -> impl Iterator<Item = (Range<usize>, &Substring<B>)> + '_ {
        let mut offset = 0;
        self.substrings.iter().map(move |substring| {
            let start = offset;
            if let Substring::Text { text, .. } = substring {
                offset += text.len();
            }
            (start..offset, substring)
        })
    }
}
