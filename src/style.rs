// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Text styles

use crate::{Align, Rgba};
use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A supported font family
///
/// Only this fixed list of families is supported. Each maps to a named face
/// with a generic fallback; see [`FontFamily::name`] and [`FontFamily::generic`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FontFamily {
    #[default]
    Arial,
    Helvetica,
    Verdana,
    Georgia,
    TimesNewRoman,
    CourierNew,
    ComicSans,
    Impact,
}

/// Generic classification of a [`FontFamily`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GenericFamily {
    SansSerif,
    Serif,
    Monospace,
    Cursive,
    Fantasy,
}

impl FontFamily {
    /// All supported families
    pub const ALL: [FontFamily; 8] = [
        FontFamily::Arial,
        FontFamily::Helvetica,
        FontFamily::Verdana,
        FontFamily::Georgia,
        FontFamily::TimesNewRoman,
        FontFamily::CourierNew,
        FontFamily::ComicSans,
        FontFamily::Impact,
    ];

    /// The family name, as used to look up system fonts
    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Verdana => "Verdana",
            FontFamily::Georgia => "Georgia",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::CourierNew => "Courier New",
            FontFamily::ComicSans => "Comic Sans MS",
            FontFamily::Impact => "Impact",
        }
    }

    /// The generic family used when the named family is unavailable
    pub fn generic(self) -> GenericFamily {
        match self {
            FontFamily::Arial | FontFamily::Helvetica | FontFamily::Verdana => {
                GenericFamily::SansSerif
            }
            FontFamily::Georgia | FontFamily::TimesNewRoman => GenericFamily::Serif,
            FontFamily::CourierNew => GenericFamily::Monospace,
            FontFamily::ComicSans => GenericFamily::Cursive,
            FontFamily::Impact => GenericFamily::Fantasy,
        }
    }

    /// Look up a family by name (ASCII case-insensitive)
    ///
    /// Returns `None` for families outside the supported list.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(name))
    }
}

bitflags::bitflags! {
    /// Boolean style properties
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct StyleFlags: u8 {
        /// Bold weight
        const BOLD = 1 << 0;
        /// Italic slant
        const ITALIC = 1 << 1;
        /// Draw a rule under glyphs
        const UNDERLINE = 1 << 2;
    }
}

/// Style applied to a character
///
/// The style is an immutable value; use the `with_*` methods to derive
/// modified copies.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Style {
    /// Font family
    pub family: FontFamily,
    /// Font size in pixels (must be positive)
    pub size: f32,
    /// Text colour
    pub color: Rgba,
    /// Bold, italic and underline
    pub flags: StyleFlags,
    /// Space added after every character, in pixels
    pub letter_spacing: f32,
    /// Space added after every space character, in pixels
    pub word_spacing: f32,
    /// Alignment override
    ///
    /// If `None`, the document's alignment applies.
    pub align: Option<Align>,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            family: FontFamily::default(),
            size: 16.0,
            color: Rgba::BLACK,
            flags: StyleFlags::empty(),
            letter_spacing: 0.0,
            word_spacing: 0.0,
            align: None,
        }
    }
}

impl Style {
    /// Supported font sizes (pixels) for editing controls
    pub const FONT_SIZE: RangeInclusive<f32> = 8.0..=48.0;
    /// Supported letter spacing (pixels) for editing controls
    pub const LETTER_SPACING: RangeInclusive<f32> = -2.0..=10.0;
    /// Supported word spacing (pixels) for editing controls
    pub const WORD_SPACING: RangeInclusive<f32> = -5.0..=20.0;
    /// Supported line-height multipliers for editing controls
    pub const LINE_HEIGHT: RangeInclusive<f32> = 0.8..=3.0;

    #[inline]
    pub fn bold(&self) -> bool {
        self.flags.contains(StyleFlags::BOLD)
    }

    #[inline]
    pub fn italic(&self) -> bool {
        self.flags.contains(StyleFlags::ITALIC)
    }

    #[inline]
    pub fn underline(&self) -> bool {
        self.flags.contains(StyleFlags::UNDERLINE)
    }

    pub fn with_family(self, family: FontFamily) -> Self {
        Style { family, ..self }
    }

    pub fn with_size(self, size: f32) -> Self {
        debug_assert!(size > 0.0);
        Style { size, ..self }
    }

    pub fn with_color(self, color: Rgba) -> Self {
        Style { color, ..self }
    }

    /// Set or clear the given flags
    pub fn with_flags(mut self, flags: StyleFlags, value: bool) -> Self {
        self.flags.set(flags, value);
        self
    }

    pub fn with_letter_spacing(self, letter_spacing: f32) -> Self {
        Style {
            letter_spacing,
            ..self
        }
    }

    pub fn with_word_spacing(self, word_spacing: f32) -> Self {
        Style {
            word_spacing,
            ..self
        }
    }

    pub fn with_align(self, align: Option<Align>) -> Self {
        Style { align, ..self }
    }
}

/// Clamp `value` to `range`, logging when it changes
fn clamp_to(what: &str, value: f32, range: &RangeInclusive<f32>) -> f32 {
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        log::warn!("{what} {value} out of range {range:?}; using {clamped}");
    }
    clamped
}

/// Style parameters held by an editor for the next application
///
/// Editing controls write here; nothing changes in a
/// [`Document`](crate::Document) until the pending style is applied with
/// [`Document::apply`](crate::Document::apply) or
/// [`Document::apply_style`](crate::Document::apply_style).
///
/// Setters clamp values to the ranges supported by editing controls
/// ([`Style::FONT_SIZE`] etc.). The layout engine itself accepts any positive
/// font size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PendingStyle {
    style: Style,
}

impl PendingStyle {
    /// Start from an existing style (unclamped)
    pub fn new(style: Style) -> Self {
        PendingStyle { style }
    }

    /// The style which will be applied
    #[inline]
    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn set_family(&mut self, family: FontFamily) {
        self.style.family = family;
    }

    pub fn set_size(&mut self, size: f32) {
        self.style.size = clamp_to("font size", size, &Style::FONT_SIZE);
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.style.color = color;
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.style.flags.set(StyleFlags::BOLD, bold);
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.style.flags.set(StyleFlags::ITALIC, italic);
    }

    pub fn set_underline(&mut self, underline: bool) {
        self.style.flags.set(StyleFlags::UNDERLINE, underline);
    }

    pub fn set_letter_spacing(&mut self, spacing: f32) {
        self.style.letter_spacing = clamp_to("letter spacing", spacing, &Style::LETTER_SPACING);
    }

    pub fn set_word_spacing(&mut self, spacing: f32) {
        self.style.word_spacing = clamp_to("word spacing", spacing, &Style::WORD_SPACING);
    }

    pub fn set_align(&mut self, align: Option<Align>) {
        self.style.align = align;
    }
}

impl From<Style> for PendingStyle {
    fn from(style: Style) -> Self {
        PendingStyle::new(style)
    }
}
