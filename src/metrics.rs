// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph metrics and rastering providers
//!
//! Layout consumes a [`MetricsProvider`]; drawing additionally requires
//! [`GlyphRaster`]. Two implementations are included:
//!
//! -   [`BlockMetrics`]: deterministic synthetic metrics which draw each glyph
//!     as a solid box. Useful for tests and headless layout.
//! -   [`FontMetrics`](crate::fonts::FontMetrics) (feature `ab_glyph`): real
//!     fonts located via `fontdb`.

use crate::{FontFamily, GenericFamily, Style};
use easy_cast::{Conv, ConvFloat};
use thiserror::Error;

/// Glyph metrics errors
///
/// Providers must support all printable characters in all valid styles; any
/// error is a configuration problem and aborts layout.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("no glyph for {character:?} in family {family:?}")]
    NoGlyph { character: char, family: FontFamily },
    #[error("no font loaded for family {0:?}")]
    UnknownFamily(FontFamily),
    #[error("font load error: {0}")]
    FontLoad(String),
}

/// True for chars treated as word separators (wrap points, justification)
#[inline]
pub fn is_space(c: char) -> bool {
    c == ' '
}

/// Apply `style` spacing to a base glyph advance
///
/// Letter spacing is added after every char; word spacing is added after
/// space chars only.
#[inline]
pub fn spaced_advance(base: f32, c: char, style: &Style) -> f32 {
    let mut advance = base + style.letter_spacing;
    if is_space(c) {
        advance += style.word_spacing;
    }
    advance
}

/// Source of glyph metrics
///
/// Implementations must be deterministic: identical `(char, style)` inputs
/// must always yield identical results.
pub trait MetricsProvider {
    /// Advance width of `c` under `style`, in pixels
    ///
    /// This includes `style.letter_spacing` and (for space chars)
    /// `style.word_spacing`; see [`spaced_advance`].
    fn measure(&self, c: char, style: &Style) -> Result<f32, MetricsError>;

    /// Distance from the top of a line box to the baseline, in pixels
    fn ascent(&self, style: &Style) -> f32;
}

/// A rastered glyph
///
/// Coverage values are relative to the glyph's pen position on the baseline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    /// Offset to be added to the pen position
    pub offset: (i32, i32),
    /// Size of the sprite in pixels
    pub size: (u32, u32),
    /// Coverage, row major order, length `size.0 * size.1`
    pub data: Vec<u8>,
}

/// Source of rastered glyphs
pub trait GlyphRaster: MetricsProvider {
    /// Raster `c` under `style`
    ///
    /// Returns `None` for chars with no visible representation (e.g. spaces).
    fn raster(&self, c: char, style: &Style) -> Option<Sprite>;
}

impl<P: MetricsProvider + ?Sized> MetricsProvider for &P {
    #[inline]
    fn measure(&self, c: char, style: &Style) -> Result<f32, MetricsError> {
        (**self).measure(c, style)
    }

    #[inline]
    fn ascent(&self, style: &Style) -> f32 {
        (**self).ascent(style)
    }
}

impl<P: GlyphRaster + ?Sized> GlyphRaster for &P {
    #[inline]
    fn raster(&self, c: char, style: &Style) -> Option<Sprite> {
        (**self).raster(c, style)
    }
}

/// Synthetic metrics: each glyph is a solid box
///
/// Advances are fixed fractions of the font size (em):
///
/// | chars                                    | advance  |
/// | ---------------------------------------- | -------- |
/// | any, in a monospace family               | 0.6 em   |
/// | space and narrow chars (`il.,:;'!\|`)    | 0.25 em  |
/// | wide chars (`mwMW@`)                     | 0.8 em   |
/// | other printable chars                    | 0.5 em   |
///
/// Bold multiplies the base advance by 1.1. Spacing is then applied as per
/// [`spaced_advance`]. The ascent is 0.8 em.
///
/// Glyph boxes have a 1px side bearing on each side and are 0.7 em tall for
/// capitals, digits and symbols or 0.5 em tall for lowercase letters.
/// Control chars are not supported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockMetrics;

impl BlockMetrics {
    /// Advance width excluding spacing
    pub fn base_advance(&self, c: char, style: &Style) -> Result<f32, MetricsError> {
        if c.is_control() {
            return Err(MetricsError::NoGlyph {
                character: c,
                family: style.family,
            });
        }

        let em = if style.family.generic() == GenericFamily::Monospace {
            0.6
        } else if is_space(c) || "il.,:;'!|".contains(c) {
            0.25
        } else if "mwMW@".contains(c) {
            0.8
        } else {
            0.5
        };
        let bold = if style.bold() { 1.1 } else { 1.0 };
        Ok(style.size * em * bold)
    }

    /// Height of the glyph box in pixels
    fn glyph_height(&self, c: char, style: &Style) -> u32 {
        let em = if c.is_lowercase() { 0.5 } else { 0.7 };
        u32::conv_nearest(style.size * em).max(1)
    }
}

impl MetricsProvider for BlockMetrics {
    fn measure(&self, c: char, style: &Style) -> Result<f32, MetricsError> {
        let base = self.base_advance(c, style)?;
        Ok(spaced_advance(base, c, style))
    }

    fn ascent(&self, style: &Style) -> f32 {
        style.size * 0.8
    }
}

impl GlyphRaster for BlockMetrics {
    fn raster(&self, c: char, style: &Style) -> Option<Sprite> {
        if c.is_whitespace() {
            return None;
        }
        let base = self.base_advance(c, style).ok()?;
        let width = u32::conv_nearest(base).saturating_sub(2).max(1);
        let height = self.glyph_height(c, style);
        Some(Sprite {
            offset: (1, -i32::conv(height)),
            size: (width, height),
            data: vec![255; usize::conv(width * height)],
        })
    }
}
