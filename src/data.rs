// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Simple data types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Horizontal alignment of a line
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Align {
    /// Align to the left edge
    #[default]
    Left,
    /// Align to centre
    Center,
    /// Align to the right edge
    Right,
    /// Stretch spaces to fill the width
    ///
    /// This is known as "justified alignment". Lines without spaces (or with
    /// only spaces) fall back to [`Align::Left`].
    Justify,
}

/// An sRGB colour with straight (non-premultiplied) alpha
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    /// Opaque black
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    /// Construct from components
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    /// Construct an opaque colour
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba::new(r, g, b, 255)
    }

    /// Same colour with alpha forced to 255
    #[inline]
    pub fn opaque(self) -> Self {
        Rgba { a: 255, ..self }
    }

    /// Scale alpha by a coverage value (`0` = none, `255` = full)
    #[inline]
    pub fn with_coverage(self, coverage: u8) -> Self {
        let a = (u16::from(self.a) * u16::from(coverage) + 127) / 255;
        Rgba { a: a as u8, ..self }
    }
}

impl From<Rgba> for tiny_skia::Color {
    fn from(c: Rgba) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

impl From<Rgba> for tiny_skia::ColorU8 {
    fn from(c: Rgba) -> Self {
        tiny_skia::ColorU8::from_rgba(c.r, c.g, c.b, c.a)
    }
}

impl From<tiny_skia::ColorU8> for Rgba {
    fn from(c: tiny_skia::ColorU8) -> Self {
        Rgba::new(c.red(), c.green(), c.blue(), c.alpha())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage() {
        let c = Rgba::rgb(10, 20, 30);
        assert_eq!(c.with_coverage(255), c);
        assert_eq!(c.with_coverage(0).a, 0);
        assert_eq!(Rgba::new(1, 2, 3, 128).with_coverage(128).a, 64);
    }

    #[test]
    fn opaque() {
        assert_eq!(Rgba::TRANSPARENT.opaque(), Rgba::BLACK);
    }
}
