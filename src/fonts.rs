// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Metrics and rastering from font files
//!
//! This module is only available with feature `ab_glyph`.
//!
//! ### Font sizes
//!
//! [`Style::size`] is the font size in pixels per Em (the size of an 'M').
//! `ab_glyph` scales by line height instead, thus sizes are converted via
//! `scale = size × height / units_per_em` (in font units).

use crate::metrics::{spaced_advance, GlyphRaster, MetricsError, MetricsProvider, Sprite};
use crate::{FontFamily, GenericFamily, Style};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use easy_cast::{CastFloat, Conv, ConvFloat};
use fontdb::{Database, Family, Query, Stretch, Weight};
use std::collections::HashMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct FaceKey {
    family: FontFamily,
    bold: bool,
    italic: bool,
}

impl FaceKey {
    fn of(style: &Style) -> Self {
        FaceKey {
            family: style.family,
            bold: style.bold(),
            italic: style.italic(),
        }
    }
}

fn generic(family: GenericFamily) -> Family<'static> {
    match family {
        GenericFamily::SansSerif => Family::SansSerif,
        GenericFamily::Serif => Family::Serif,
        GenericFamily::Monospace => Family::Monospace,
        GenericFamily::Cursive => Family::Cursive,
        GenericFamily::Fantasy => Family::Fantasy,
    }
}

/// Glyph metrics from loaded font faces
///
/// Up to four faces are held per [`FontFamily`] (regular, bold, italic and
/// bold italic). Where the exact face is missing the family's regular face
/// is used.
#[derive(Default)]
pub struct FontMetrics {
    faces: HashMap<FaceKey, FontVec>,
}

impl std::fmt::Debug for FontMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("FontMetrics")
            .field("faces", &self.faces.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FontMetrics {
    /// Construct with no faces
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct, loading faces for all families from system fonts
    ///
    /// Families with no matching system font are left unloaded; measuring
    /// text in these families fails with [`MetricsError::UnknownFamily`].
    pub fn from_system() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("FontMetrics::from_system: {} faces found", db.len());

        let mut metrics = Self::new();
        metrics.load_database(&db);
        metrics
    }

    /// Load faces for all families from a font database
    ///
    /// Each family is matched by name, falling back to its generic family.
    pub fn load_database(&mut self, db: &Database) {
        for family in FontFamily::ALL {
            let families = [Family::Name(family.name()), generic(family.generic())];
            for (bold, italic) in [(false, false), (true, false), (false, true), (true, true)] {
                let query = Query {
                    families: &families,
                    weight: if bold { Weight::BOLD } else { Weight::NORMAL },
                    stretch: Stretch::Normal,
                    style: if italic {
                        fontdb::Style::Italic
                    } else {
                        fontdb::Style::Normal
                    },
                };
                let Some(id) = db.query(&query) else {
                    log::debug!("no face for {family:?} (bold={bold}, italic={italic})");
                    continue;
                };

                let loaded = db.with_face_data(id, |data, index| {
                    FontVec::try_from_vec_and_index(data.to_vec(), index)
                });
                match loaded {
                    Some(Ok(font)) => {
                        let key = FaceKey {
                            family,
                            bold,
                            italic,
                        };
                        self.faces.insert(key, font);
                    }
                    Some(Err(err)) => log::error!("Failed to load font: {err}"),
                    None => log::error!("Failed to load font: no data for {id:?}"),
                }
            }
        }
    }

    /// Load a face from font data
    ///
    /// Replaces any face previously loaded for the same family and variant.
    pub fn insert_face(
        &mut self,
        family: FontFamily,
        bold: bool,
        italic: bool,
        data: Vec<u8>,
        index: u32,
    ) -> Result<(), MetricsError> {
        let font = FontVec::try_from_vec_and_index(data, index)
            .map_err(|err| MetricsError::FontLoad(err.to_string()))?;
        let key = FaceKey {
            family,
            bold,
            italic,
        };
        self.faces.insert(key, font);
        Ok(())
    }

    /// Number of loaded faces
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    fn face(&self, style: &Style) -> Result<&FontVec, MetricsError> {
        let key = FaceKey::of(style);
        let regular = FaceKey {
            bold: false,
            italic: false,
            ..key
        };
        self.faces
            .get(&key)
            .or_else(|| self.faces.get(&regular))
            .ok_or(MetricsError::UnknownFamily(style.family))
    }

    fn scale(font: &FontVec, size: f32) -> PxScale {
        match font.units_per_em() {
            Some(upem) => PxScale::from(size * font.height_unscaled() / upem),
            None => PxScale::from(size),
        }
    }
}

impl MetricsProvider for FontMetrics {
    fn measure(&self, c: char, style: &Style) -> Result<f32, MetricsError> {
        let font = self.face(style)?;
        let id = font.glyph_id(c);
        // GlyphId 0 is the 'missing glyph'
        if id.0 == 0 && !c.is_whitespace() {
            return Err(MetricsError::NoGlyph {
                character: c,
                family: style.family,
            });
        }
        let base = font.as_scaled(Self::scale(font, style.size)).h_advance(id);
        Ok(spaced_advance(base, c, style))
    }

    fn ascent(&self, style: &Style) -> f32 {
        match self.face(style) {
            Ok(font) => font.as_scaled(Self::scale(font, style.size)).ascent(),
            Err(_) => style.size * 0.8,
        }
    }
}

impl GlyphRaster for FontMetrics {
    fn raster(&self, c: char, style: &Style) -> Option<Sprite> {
        let font = self.face(style).ok()?;
        let glyph = font
            .glyph_id(c)
            .with_scale_and_position(Self::scale(font, style.size), ab_glyph::point(0.0, 0.0));
        let outline = font.outline_glyph(glyph)?;

        let bounds = outline.px_bounds();
        let offset = (bounds.min.x.cast_trunc(), bounds.min.y.cast_trunc());
        let size = bounds.max - bounds.min;
        let size = (u32::conv_trunc(size.x), u32::conv_trunc(size.y));
        if size.0 == 0 || size.1 == 0 {
            log::warn!("Zero-sized glyph: {c:?}");
            return None;
        }

        let mut data = vec![0; usize::conv(size.0 * size.1)];
        outline.draw(|x, y, coverage| {
            if x < size.0 && y < size.1 {
                // Convert to u8 with saturating conversion, rounding down:
                data[usize::conv((y * size.0) + x)] = (coverage * 256.0) as u8;
            }
        });

        Some(Sprite { offset, size, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unloaded_family() {
        let metrics = FontMetrics::new();
        let style = Style::default().with_family(FontFamily::Georgia);
        assert_eq!(metrics.num_faces(), 0);
        assert_eq!(
            metrics.measure('a', &style),
            Err(MetricsError::UnknownFamily(FontFamily::Georgia))
        );
        assert_eq!(metrics.raster('a', &style), None);
        assert_eq!(metrics.ascent(&style), 16.0 * 0.8);
    }

    #[test]
    fn invalid_font_data() {
        let mut metrics = FontMetrics::new();
        let result = metrics.insert_face(FontFamily::Arial, false, false, vec![0; 16], 0);
        assert!(matches!(result, Err(MetricsError::FontLoad(_))));
        assert_eq!(metrics.num_faces(), 0);
    }
}
