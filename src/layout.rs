// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Laid-out documents

use crate::metrics::{GlyphRaster, MetricsError, MetricsProvider};
use crate::raster::{self, Mode, RenderError, Surface};
use crate::{place_line, segment, wrap, Document, Environment, Line, Placed, Rgba, StyleResolver};
use smallvec::SmallVec;

/// A document broken into lines
///
/// This is rebuilt from scratch for every change to the document; it holds
/// no reference to its source.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    // Most previews are a single line
    lines: SmallVec<[Line; 1]>,
    target_width: f32,
    background: Rgba,
}

impl Layout {
    /// Lay out `document`
    ///
    /// This resolves styles, measures each char with `metrics` and wraps lines
    /// against `env.target_width`.
    pub fn new<M: MetricsProvider + ?Sized>(
        document: &Document,
        env: &Environment,
        metrics: &M,
    ) -> Result<Self, MetricsError> {
        let resolver = StyleResolver::new(document);
        let segments = segment(document.text(), &resolver, metrics)?;
        let lines = wrap(
            &segments,
            env.target_width,
            document.line_height(),
            document.align(),
        );
        log::debug!(
            "Layout::new: {} chars in {} lines",
            segments.len(),
            lines.len()
        );
        Ok(Layout {
            lines,
            target_width: env.target_width,
            background: document.background(),
        })
    }

    /// Width lines were wrapped against
    #[inline]
    pub fn target_width(&self) -> f32 {
        self.target_width
    }

    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[inline]
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// Sum of line heights
    pub fn height(&self) -> f32 {
        self.lines.iter().map(|line| line.line_height()).sum()
    }

    /// Width of the widest line
    ///
    /// This exceeds [`Self::target_width`] only where a single char is wider
    /// than the target width.
    pub fn content_width(&self) -> f32 {
        self.lines
            .iter()
            .map(|line| line.content_width())
            .fold(0.0, f32::max)
    }

    /// Iterate over lines with their top edge and placed segments
    pub fn placed(&self) -> impl Iterator<Item = (f32, Vec<Placed<'_>>)> + '_ {
        let mut top = 0.0;
        self.lines.iter().map(move |line| {
            let y = top;
            top += line.line_height();
            (y, place_line(line, self.target_width))
        })
    }

    /// Render to a surface
    ///
    /// `env` must use the same target width as when laying out.
    pub fn render<G: GlyphRaster + ?Sized>(
        &self,
        env: &Environment,
        mode: Mode,
        glyphs: &G,
    ) -> Result<Surface, RenderError> {
        debug_assert_eq!(env.target_width, self.target_width);
        raster::render(&self.lines, env, self.background, mode, glyphs)
    }
}
