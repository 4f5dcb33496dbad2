// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style types shared by spans and layouts.

use core::fmt;

/// Trait for types that represent the color of glyphs.
pub trait Brush: Clone + PartialEq + Default + fmt::Debug {}

impl<T: Clone + PartialEq + Default + fmt::Debug> Brush for T {}

/// Horizontal writing direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

impl Direction {
    /// Returns `true` for right-to-left.
    pub fn is_rtl(self) -> bool {
        self == Self::Rtl
    }
}

/// An ISO 15924 script identifier (four ASCII letters), passed through to the shaper.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Script([u8; 4]);

impl Script {
    /// Latin (`Latn`).
    pub const LATIN: Self = Self(*b"Latn");
    /// Arabic (`Arab`).
    pub const ARABIC: Self = Self(*b"Arab");
    /// Hebrew (`Hebr`).
    pub const HEBREW: Self = Self(*b"Hebr");
    /// The "common" script (`Zyyy`).
    pub const COMMON: Self = Self(*b"Zyyy");
    /// The "unknown" script (`Zzzz`).
    pub const UNKNOWN: Self = Self(*b"Zzzz");

    /// Creates a script from raw ISO 15924 bytes without validation.
    pub const fn from_bytes(raw: [u8; 4]) -> Self {
        Self(raw)
    }

    /// Parses a four letter code, normalizing it to `Titlecase`.
    pub fn parse(code: &str) -> Option<Self> {
        let bytes: [u8; 4] = code.as_bytes().try_into().ok()?;
        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            return None;
        }
        let mut raw = bytes.map(|b| b.to_ascii_lowercase());
        raw[0] = raw[0].to_ascii_uppercase();
        Some(Self(raw))
    }

    /// The raw bytes.
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0
    }

    /// The code as a string. Unchecked scripts that are not ASCII read as `"????"`.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::LATIN
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Script").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A length given either in pixels or relative to a font measure.
///
/// Line height is resolved against the font's natural line height and
/// tracking against the font size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Unit {
    /// An absolute length in pixels.
    Px(f32),
    /// A multiple of the reference measure.
    Relative(f32),
}

impl Unit {
    /// Resolves the unit against `reference`.
    pub fn resolve(self, reference: f32) -> f32 {
        match self {
            Self::Px(px) => px,
            Self::Relative(factor) => factor * reference,
        }
    }
}

/// Horizontal alignment of lines within the layout box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Flush with the left edge.
    #[default]
    Left,
    /// Flush with the right edge.
    Right,
    /// Centered.
    Center,
    /// Stretched to both edges by widening break opportunities, except on
    /// the last line of a paragraph.
    Justified,
}

impl Alignment {
    /// The alignment used when none is requested.
    pub fn default_for(direction: Direction) -> Self {
        match direction {
            Direction::Ltr => Self::Left,
            Direction::Rtl => Self::Right,
        }
    }
}

/// OpenType feature switches forwarded to the shaper.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShapingFeatures {
    /// Standard ligatures (`liga`).
    pub ligatures: bool,
    /// Kerning (`kern`).
    pub kerning: bool,
    /// Contextual ligatures (`clig`).
    pub contextual_ligatures: bool,
    /// Contextual alternates (`calt`).
    pub contextual_alternates: bool,
}

impl Default for ShapingFeatures {
    fn default() -> Self {
        Self {
            ligatures: true,
            kerning: true,
            contextual_ligatures: true,
            contextual_alternates: true,
        }
    }
}
