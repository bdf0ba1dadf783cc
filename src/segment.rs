// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Text segmentation: one measured segment per char

use crate::metrics::{is_space, MetricsError, MetricsProvider};
use crate::{Style, StyleResolver};

/// A char with its resolved style and advance width
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// The char
    pub ch: char,
    /// Resolved style
    pub style: Style,
    /// Advance width in pixels, including spacing
    pub width: f32,
}

impl Segment {
    /// True for a space (word separator)
    #[inline]
    pub fn is_space(&self) -> bool {
        is_space(self.ch)
    }

    /// True for an explicit line break
    #[inline]
    pub fn is_newline(&self) -> bool {
        self.ch == '\n'
    }
}

/// Break `text` into measured segments
///
/// Each char at index `i` gets the style `resolver.resolve(i)` and is measured
/// by `metrics`. Line breaks (`'\n'`) are not measured and have zero width.
///
/// Fails on the first char `metrics` cannot measure.
pub fn segment<M: MetricsProvider + ?Sized>(
    text: &str,
    resolver: &StyleResolver,
    metrics: &M,
) -> Result<Vec<Segment>, MetricsError> {
    let mut segments = Vec::with_capacity(text.len());
    for (index, ch) in text.chars().enumerate() {
        let style = *resolver.resolve(index);
        let width = if ch == '\n' {
            0.0
        } else {
            metrics.measure(ch, &style)?
        };
        segments.push(Segment { ch, style, width });
    }
    Ok(segments)
}
