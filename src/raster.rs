// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Rastering of wrapped lines
//!
//! Lines are drawn onto a working surface with a generous margin, then
//! copied to the output surface:
//!
//! -   [`Mode::Preview`]: the full target width and height, over an opaque
//!     background, with [`Environment::preview_padding`] on each side
//! -   [`Mode::Export`]: the bounding box of all non-transparent pixels, over
//!     a transparent background, with [`Environment::export_padding`] on
//!     each side
//!
//! # Example
//!
//! ```
//! use kas_text_raster::{wrap, segment, BlockMetrics, Document, Environment, StyleResolver};
//! use kas_text_raster::raster::{render, Mode};
//!
//! let doc = Document::new("Hello world");
//! let env = Environment::default();
//! let segments = segment(doc.text(), &StyleResolver::new(&doc), &BlockMetrics).unwrap();
//! let lines = wrap(&segments, env.target_width, doc.line_height(), doc.align());
//! let surface = render(&lines, &env, doc.background(), Mode::Preview, &BlockMetrics).unwrap();
//! assert_eq!(surface.width(), 620);
//! ```

use crate::conv::{px_ceil, px_floor};
use crate::metrics::{GlyphRaster, MetricsError, Sprite};
use crate::{place_line, Environment, Line, Placed, Rgba};
use easy_cast::{Cast, Conv};
use thiserror::Error;
use tiny_skia::{ColorU8, IntRect, Paint, Pixmap, PixmapPaint, Rect, Transform};

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error("failed to allocate a {width}x{height} surface")]
    Alloc { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Output mode
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Fixed width, opaque background
    #[default]
    Preview,
    /// Tight crop of content, transparent background
    Export,
}

/// An RGBA pixel surface
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// Allocate a transparent surface
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        Pixmap::new(width, height)
            .map(|pixmap| Surface { pixmap })
            .ok_or(RenderError::Alloc { width, height })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Get a pixel (straight alpha)
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixmap.pixel(x, y).map(|p| Rgba::from(p.demultiply()))
    }

    /// Premultiplied RGBA data, row major order
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Access the underlying pixmap
    #[inline]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// True if every pixel is fully transparent
    pub fn is_transparent(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Bounding box of all pixels which are not fully transparent
    ///
    /// Returns `None` if there are no such pixels.
    pub fn opaque_bounds(&self) -> Option<IntRect> {
        let width = usize::conv(self.width());
        let (mut x0, mut y0) = (usize::MAX, usize::MAX);
        let (mut x1, mut y1) = (0, 0);
        for (i, p) in self.pixmap.pixels().iter().enumerate() {
            if p.alpha() != 0 {
                let (x, y) = (i % width, i / width);
                x0 = x0.min(x);
                y0 = y0.min(y);
                x1 = x1.max(x + 1);
                y1 = y1.max(y + 1);
            }
        }
        if x0 >= x1 {
            return None;
        }
        IntRect::from_ltrb(x0.cast(), y0.cast(), x1.cast(), y1.cast())
    }

    /// Encode as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|err| RenderError::Encode(err.to_string()))
    }

    fn fill(&mut self, color: Rgba) {
        self.pixmap.fill(color.into());
    }

    /// Draw `sprite` in `color` with its origin at `(x, y)`
    fn blit(
        &mut self,
        sprite: &Sprite,
        x: i32,
        y: i32,
        color: Rgba,
    ) -> Result<(), RenderError> {
        let (width, height) = sprite.size;
        let mut glyph =
            Pixmap::new(width, height).ok_or(RenderError::Alloc { width, height })?;
        for (p, coverage) in glyph.pixels_mut().iter_mut().zip(&sprite.data) {
            *p = ColorU8::from(color.with_coverage(*coverage)).premultiply();
        }
        let (x, y) = (x + sprite.offset.0, y + sprite.offset.1);
        self.pixmap.draw_pixmap(
            x,
            y,
            glyph.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }

    /// Draw a 1px tall rule from `x0` to `x1` on row `y`
    fn rule(&mut self, x0: i32, x1: i32, y: i32, color: Rgba) {
        let width = (x1 - x0).max(1);
        let Some(rect) = Rect::from_xywh(x0.cast(), y.cast(), width.cast(), 1.0) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color.into());
        paint.anti_alias = false;
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Copy `rect` of `src` to `(x, y)` without blending
    fn copy_from(&mut self, src: &Surface, rect: IntRect, x: u32, y: u32) {
        let row_len = usize::conv(rect.width()) * 4;
        let (src_x, src_y) = (u32::conv(rect.x()), u32::conv(rect.y()));
        for row in 0..rect.height() {
            let s = usize::conv((src_y + row) * src.width() + src_x) * 4;
            let d = usize::conv((y + row) * self.width() + x) * 4;
            self.pixmap.data_mut()[d..d + row_len]
                .copy_from_slice(&src.pixmap.data()[s..s + row_len]);
        }
    }
}

/// Draw one positioned segment with its pen at `(x, top)`
fn draw_segment<G: GlyphRaster + ?Sized>(
    surface: &mut Surface,
    placed: &Placed,
    x: f32,
    top: f32,
    glyphs: &G,
) -> Result<(), RenderError> {
    let segment = placed.segment;
    let style = &segment.style;
    let baseline = px_floor(top + glyphs.ascent(style));
    let pen = px_floor(x);

    if let Some(sprite) = glyphs.raster(segment.ch, style) {
        if sprite.size.0 == 0 || sprite.size.1 == 0 {
            log::warn!("Zero-sized glyph: {:?}", segment.ch);
        } else {
            surface.blit(&sprite, pen, baseline, style.color)?;
        }
    }
    if style.underline() {
        surface.rule(pen, px_floor(x + segment.width), baseline + 1, style.color);
    }
    Ok(())
}

/// Render wrapped lines
///
/// `lines` must have been wrapped against `env.target_width`. `background`
/// is used (as an opaque colour) in [`Mode::Preview`] only.
///
/// Output is deterministic: identical inputs yield identical surfaces.
pub fn render<G: GlyphRaster + ?Sized>(
    lines: &[Line],
    env: &Environment,
    background: Rgba,
    mode: Mode,
    glyphs: &G,
) -> Result<Surface, RenderError> {
    let target_width = px_ceil(env.target_width);
    let height: f32 = lines.iter().map(|line| line.line_height()).sum();
    let height = px_ceil(height);

    let max_width = lines
        .iter()
        .map(|line| line.content_width())
        .fold(env.target_width, f32::max);
    let max_size = lines
        .iter()
        .flat_map(|line| line.segments())
        .map(|segment| segment.style.size)
        .fold(0.0, f32::max);
    let margin = env.margin.max(px_ceil(max_size));
    // Right and centre aligned lines wider than the target start left of zero
    let left = margin + px_ceil(max_width - env.target_width);

    let mut work = Surface::new(left + px_ceil(max_width) + margin, height + 2 * margin)?;
    let (origin_x, origin_y) = (f32::conv(left), f32::conv(margin));
    let mut top = origin_y;
    for line in lines {
        for placed in place_line(line, env.target_width) {
            draw_segment(&mut work, &placed, origin_x + placed.x, top, glyphs)?;
        }
        top += line.line_height();
    }

    match mode {
        Mode::Preview => {
            let pad = env.preview_padding;
            let mut out = Surface::new(target_width + 2 * pad, height + 2 * pad)?;
            out.fill(background.opaque());
            let region = IntRect::from_xywh(left.cast(), margin.cast(), target_width, height);
            if let Some(content) = region.and_then(|rect| work.pixmap.clone_rect(rect)) {
                out.pixmap.draw_pixmap(
                    pad.cast(),
                    pad.cast(),
                    content.as_ref(),
                    &PixmapPaint::default(),
                    Transform::identity(),
                    None,
                );
            }
            log::debug!("render: preview {}x{}", out.width(), out.height());
            Ok(out)
        }
        Mode::Export => {
            let pad = env.export_padding;
            let Some(bounds) = work.opaque_bounds() else {
                log::debug!("render: export of blank content");
                return Surface::new(2 * pad, 2 * pad);
            };
            let mut out = Surface::new(bounds.width() + 2 * pad, bounds.height() + 2 * pad)?;
            out.copy_from(&work, bounds, pad, pad);
            log::debug!(
                "render: export {}x{} (content at {}, {})",
                out.width(),
                out.height(),
                bounds.x() - i32::conv(left),
                bounds.y() - i32::conv(margin),
            );
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{segment, wrap, Align, BlockMetrics, Document, StyleFlags, StyleResolver};

    fn lines_of(doc: &Document, env: &Environment) -> Vec<Line> {
        let resolver = StyleResolver::new(doc);
        let segments = segment(doc.text(), &resolver, &BlockMetrics).unwrap();
        wrap(&segments, env.target_width, doc.line_height(), doc.align()).into_vec()
    }

    fn render_doc(doc: &Document, env: &Environment, mode: Mode) -> Surface {
        let lines = lines_of(doc, env);
        render(&lines, env, doc.background(), mode, &BlockMetrics).unwrap()
    }

    #[test]
    fn empty_export() {
        let env = Environment::default();
        let surface = render_doc(&Document::default(), &env, Mode::Export);
        assert_eq!((surface.width(), surface.height()), (4, 4));
        assert!(surface.is_transparent());
        assert_eq!(surface.opaque_bounds(), None);
    }

    #[test]
    fn empty_preview() {
        let env = Environment::default();
        let mut doc = Document::default();
        doc.set_background(Rgba::new(10, 20, 30, 0));
        let surface = render_doc(&doc, &env, Mode::Preview);
        assert_eq!((surface.width(), surface.height()), (620, 20));
        assert_eq!(surface.pixel(0, 0), Some(Rgba::rgb(10, 20, 30)));
        assert_eq!(surface.pixel(619, 19), Some(Rgba::rgb(10, 20, 30)));
    }

    #[test]
    fn export_crops_single_glyph() {
        let env = Environment::default();
        let doc = Document::new("A");
        let sprite = BlockMetrics.raster('A', doc.default_style()).unwrap();

        let surface = render_doc(&doc, &env, Mode::Export);
        assert_eq!(surface.width(), sprite.size.0 + 4);
        assert_eq!(surface.height(), sprite.size.1 + 4);

        // Padding is transparent, content starts at (2, 2):
        assert_eq!(surface.pixel(1, 1).map(|p| p.a), Some(0));
        assert_eq!(surface.pixel(2, 2), Some(Rgba::BLACK));
        let (w, h) = (surface.width(), surface.height());
        assert_eq!(surface.pixel(w - 3, h - 3), Some(Rgba::BLACK));
        assert_eq!(surface.pixel(w - 2, h - 2).map(|p| p.a), Some(0));
    }

    #[test]
    fn preview_size() {
        let env = Environment::new(300.0);
        let mut doc = Document::new("Hello world\nsecond line");
        doc.set_line_height(1.5);
        let surface = render_doc(&doc, &env, Mode::Preview);
        // Two lines of 16 × 1.5 = 24 px
        assert_eq!((surface.width(), surface.height()), (320, 48 + 20));
        assert_eq!(surface.pixel(0, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn preview_keeps_alignment() {
        let env = Environment::new(200.0);
        let mut doc = Document::new("ab");
        doc.set_align(Align::Right);
        let surface = render_doc(&doc, &env, Mode::Preview);

        // "ab" is 16 px wide, placed at x = 184; the last glyph column is
        // 184 + 8 + 1 + 5 = 198, offset by the 10 px padding.
        assert_eq!(surface.pixel(208, 20), Some(Rgba::BLACK));
        assert_eq!(surface.pixel(209, 20), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(10, 20), Some(Rgba::WHITE));
    }

    #[test]
    fn underline() {
        let env = Environment::default();
        let mut doc = Document::new("a");
        let export = render_doc(&doc, &env, Mode::Export);

        let style = doc.default_style().with_flags(StyleFlags::UNDERLINE, true);
        doc.set_default_style(style);
        let underlined = render_doc(&doc, &env, Mode::Export);

        // The rule spans the full advance (8 px) and sits 2 px below the
        // glyph box: baseline row + 1.
        assert_eq!(underlined.width(), 8 + 4);
        assert_eq!(underlined.height(), export.height() + 2);
        let y = underlined.height() - 3;
        for x in 2..10 {
            assert_eq!(underlined.pixel(x, y), Some(Rgba::BLACK), "x={x}");
        }
        assert_eq!(underlined.pixel(2, y - 1).map(|p| p.a), Some(0));
    }

    #[test]
    fn export_keeps_overflowing_right_aligned_line() {
        let env = Environment::new(10.0);
        let mut doc = Document::new("A");
        let style = doc.default_style().with_letter_spacing(100.0);
        doc.set_default_style(style);
        let sprite = BlockMetrics.raster('A', &style).unwrap();
        let left = render_doc(&doc, &env, Mode::Export);
        assert_eq!(left.width(), sprite.size.0 + 4);

        for align in [Align::Right, Align::Center] {
            doc.set_align(align);
            let surface = render_doc(&doc, &env, Mode::Export);
            assert!(!surface.is_transparent(), "{align:?}");
            assert_eq!(surface, left, "{align:?}");
        }
    }

    #[test]
    fn deterministic() {
        let env = Environment::new(120.0);
        let mut doc = Document::new("the quick brown fox jumps over the lazy dog");
        doc.set_align(Align::Justify);
        let a = render_doc(&doc, &env, Mode::Export);
        let b = render_doc(&doc, &env, Mode::Export);
        assert_eq!(a.data(), b.data());
        assert_eq!(a.encode_png().unwrap(), b.encode_png().unwrap());
    }
}
