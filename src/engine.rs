// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The layout and rendering pipeline

use crate::metrics::{GlyphRaster, MetricsError};
use crate::raster::{Mode, RenderError, Surface};
use crate::{Document, Environment, Layout};

/// A glyph provider with its environment
///
/// Every operation re-runs the whole pipeline (style resolution,
/// segmentation, wrapping, alignment and rastering) from a consistent
/// snapshot of the document, thus repeated calls with identical inputs
/// produce identical output.
///
/// ```
/// use kas_text_raster::{BlockMetrics, Document, Engine, Environment};
///
/// let engine = Engine::new(Environment::default(), BlockMetrics);
/// let doc = Document::new("Hello world");
/// let layout = engine.layout(&doc).unwrap();
/// assert_eq!(layout.num_lines(), 1);
///
/// let png = engine.export_png(&doc).unwrap();
/// assert!(png.starts_with(b"\x89PNG"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Engine<G> {
    env: Environment,
    glyphs: G,
}

impl<G: GlyphRaster> Engine<G> {
    /// Construct
    pub fn new(env: Environment, glyphs: G) -> Self {
        Engine { env, glyphs }
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Replace the environment
    pub fn set_env(&mut self, env: Environment) {
        self.env = env;
    }

    #[inline]
    pub fn glyphs(&self) -> &G {
        &self.glyphs
    }

    /// Lay out a document
    pub fn layout(&self, document: &Document) -> Result<Layout, MetricsError> {
        Layout::new(document, &self.env, &self.glyphs)
    }

    /// Lay out and render a document
    pub fn render(&self, document: &Document, mode: Mode) -> Result<Surface, RenderError> {
        let layout = self.layout(document)?;
        layout.render(&self.env, mode, &self.glyphs)
    }

    /// Render a document in [`Mode::Export`] and encode as PNG
    pub fn export_png(&self, document: &Document) -> Result<Vec<u8>, RenderError> {
        self.render(document, Mode::Export)?.encode_png()
    }
}
