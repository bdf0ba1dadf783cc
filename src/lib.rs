// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Styled text layout and rasterization
//!
//! A [`Document`] is plain text with a default [`Style`] and non-overlapping
//! [`StyleRange`]s. Laying out a document runs a pipeline of pure steps:
//!
//! 1.  [`StyleResolver`]: the effective style of each char
//! 2.  [`segment`]: one measured [`Segment`] per char, using a
//!     [`MetricsProvider`]
//! 3.  [`wrap`]: greedy line breaking at spaces against a target width
//! 4.  [`place_line`]: left, centre, right or justified placement
//! 5.  [`raster::render`]: drawing to a preview or tightly cropped export
//!     [`Surface`]
//!
//! [`Engine`] bundles these steps with an [`Environment`] and glyph provider.
//!
//! Glyph metrics are not computed here: [`BlockMetrics`] provides synthetic
//! box glyphs, while `fonts::FontMetrics` (feature `ab_glyph`) uses system
//! fonts.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod conv;

mod data;
pub use data::*;

mod env;
pub use env::Environment;

mod style;
pub use style::{FontFamily, GenericFamily, PendingStyle, Style, StyleFlags};

mod document;
pub use document::{Document, EditTarget, InvalidRange, RangeId, StyleRange};

mod resolver;
pub use resolver::StyleResolver;

pub mod metrics;
pub use metrics::{BlockMetrics, GlyphRaster, MetricsError, MetricsProvider};

#[cfg_attr(docsrs, doc(cfg(feature = "ab_glyph")))]
#[cfg(feature = "ab_glyph")]
pub mod fonts;

mod segment;
pub use segment::{segment, Segment};

mod wrap;
pub use wrap::{wrap, Line};

mod align;
pub use align::{place_line, Placed};

pub mod raster;
pub use raster::{Mode, RenderError, Surface};

mod layout;
pub use layout::Layout;

mod engine;
pub use engine::Engine;
