// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Type conversion utilities
//!
//! Character indices are stored as `u32` instead of `usize` in order to save
//! space (documents are not expected to approach `u32::MAX` chars). Pixel
//! measures are `f32` until they reach the drawing surface.

use easy_cast::{Cast, ConvFloat};

/// Convert `usize` → `u32`
///
/// This is a "safer" wrapper around `as` ensuring (on debug builds) that the
/// input value may be represented correctly by `u32`.
#[inline]
pub fn to_u32(x: usize) -> u32 {
    x.cast()
}

/// Convert `u32` → `usize`
///
/// This is a "safer" wrapper around `as` ensuring that the operation is
/// zero-extension.
#[inline]
pub fn to_usize(x: u32) -> usize {
    x.cast()
}

/// Round a non-negative pixel length up to whole pixels
///
/// Negative and NaN inputs yield zero.
#[inline]
pub fn px_ceil(x: f32) -> u32 {
    if x > 0.0 {
        u32::conv_ceil(x)
    } else {
        0
    }
}

/// Round a pixel coordinate down to a whole pixel
#[inline]
pub fn px_floor(x: f32) -> i32 {
    i32::conv_floor(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_rounding() {
        assert_eq!(px_ceil(0.0), 0);
        assert_eq!(px_ceil(-3.5), 0);
        assert_eq!(px_ceil(f32::NAN), 0);
        assert_eq!(px_ceil(599.01), 600);
        assert_eq!(px_floor(-0.5), -1);
        assert_eq!(px_floor(10.9), 10);
    }
}
