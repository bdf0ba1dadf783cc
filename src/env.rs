// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Layout and rendering environment

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Environment in which documents are laid out and rendered
///
/// Document-specific properties (alignment, line height, background) belong
/// to the [`Document`](crate::Document); this holds everything else.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Environment {
    /// Width lines are wrapped against, in pixels
    pub target_width: f32,
    /// Padding around the drawn region of preview surfaces, in pixels
    pub preview_padding: u32,
    /// Padding around the content of export surfaces, in pixels
    pub export_padding: u32,
    /// Minimum margin around the working surface, in pixels
    ///
    /// The margin also grows with the largest font size drawn so that glyph
    /// overhang and underlines are never clipped.
    pub margin: u32,
}

impl Default for Environment {
    fn default() -> Self {
        Environment {
            target_width: 600.0,
            preview_padding: 10,
            export_padding: 2,
            margin: 16,
        }
    }
}

impl Environment {
    /// Default environment with the given target width
    pub fn new(target_width: f32) -> Self {
        debug_assert!(target_width > 0.0);
        Environment {
            target_width,
            ..Default::default()
        }
    }
}
