// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Documents: text plus style ranges

use crate::conv::{to_u32, to_usize};
use crate::{Align, PendingStyle, Rgba, Style};
use thiserror::Error;

/// Identifier of a [`StyleRange`] within its [`Document`]
///
/// Identifiers are never reused by a document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct RangeId(u32);

impl RangeId {
    /// Get as `usize`
    pub fn get(self) -> usize {
        to_usize(self.0)
    }
}

/// A style applied to a half-open interval of characters
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRange {
    id: RangeId,
    start: u32,
    end: u32,
    style: Style,
    source_text: String,
}

impl StyleRange {
    #[inline]
    pub fn id(&self) -> RangeId {
        self.id
    }

    /// First character index (inclusive)
    #[inline]
    pub fn start(&self) -> usize {
        to_usize(self.start)
    }

    /// Last character index (exclusive)
    #[inline]
    pub fn end(&self) -> usize {
        to_usize(self.end)
    }

    #[inline]
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Copy of the covered text, for display only
    ///
    /// This is refreshed when the document text is replaced but is otherwise
    /// not authoritative.
    #[inline]
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// True if `index` is within this range
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.start() <= index && index < self.end()
    }

    /// True if this range shares at least one character with `start..end`
    #[inline]
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start() < end && start < self.end()
    }
}

/// Error returned when creating a style range over an invalid interval
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid style range {start}..{end} for text of {len} chars")]
pub struct InvalidRange {
    pub start: usize,
    pub end: usize,
    pub len: usize,
}

/// Which style an edit applies to
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditTarget {
    /// The document's default style
    #[default]
    Default,
    /// An existing style range
    Range(RangeId),
}

/// A plain-text document with style overrides
///
/// Indices used by this type are *character* indices (not byte offsets).
///
/// Style ranges never overlap: [`Document::apply_style`] discards every
/// existing range touched by the new one.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    text: String,
    len: usize,
    ranges: Vec<StyleRange>,
    next_id: u32,
    default_style: Style,
    align: Align,
    line_height: f32,
    background: Rgba,
}

impl Default for Document {
    fn default() -> Self {
        Document::new(String::new())
    }
}

impl Document {
    /// Construct with default styling
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Document {
            text,
            len,
            ranges: vec![],
            next_id: 0,
            default_style: Style::default(),
            align: Align::Left,
            line_height: 1.2,
            background: Rgba::WHITE,
        }
    }

    /// Access the text
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Replace the text
    ///
    /// Style ranges which no longer fit are removed; others keep their
    /// indices and have their cached source text refreshed.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.len = self.text.chars().count();

        let len = self.len;
        self.ranges.retain(|range| {
            let keep = range.end() <= len;
            if !keep {
                log::debug!(
                    "set_text: dropping range {:?} ({}..{})",
                    range.id,
                    range.start,
                    range.end
                );
            }
            keep
        });
        for i in 0..self.ranges.len() {
            let (start, end) = (self.ranges[i].start(), self.ranges[i].end());
            self.ranges[i].source_text = self.slice(start, end);
        }
    }

    /// Copy of the characters `start..end`
    fn slice(&self, start: usize, end: usize) -> String {
        self.text.chars().skip(start).take(end - start).collect()
    }

    #[inline]
    pub fn default_style(&self) -> &Style {
        &self.default_style
    }

    pub fn set_default_style(&mut self, style: Style) {
        self.default_style = style;
    }

    /// Document alignment, used where styles do not override it
    #[inline]
    pub fn align(&self) -> Align {
        self.align
    }

    pub fn set_align(&mut self, align: Align) {
        self.align = align;
    }

    /// Line height as a multiple of font size
    #[inline]
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn set_line_height(&mut self, multiplier: f32) {
        debug_assert!(multiplier > 0.0);
        self.line_height = multiplier;
    }

    /// Background colour of preview surfaces
    #[inline]
    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn set_background(&mut self, color: Rgba) {
        self.background = color;
    }

    /// Style ranges, in order of application
    #[inline]
    pub fn ranges(&self) -> &[StyleRange] {
        &self.ranges
    }

    /// Find a range by identifier
    pub fn range(&self, id: RangeId) -> Option<&StyleRange> {
        self.ranges.iter().find(|range| range.id == id)
    }

    /// Apply a style to characters `range`
    ///
    /// Every existing range which overlaps `range` (partially or completely)
    /// is removed in full; overlapping ranges are never trimmed or split.
    ///
    /// Fails if the range is empty, reversed or extends beyond the text, in
    /// which case the document is unchanged.
    pub fn apply_style(
        &mut self,
        range: std::ops::Range<usize>,
        pending: &PendingStyle,
    ) -> Result<RangeId, InvalidRange> {
        let (start, end) = (range.start, range.end);
        if start >= end || end > self.len {
            return Err(InvalidRange {
                start,
                end,
                len: self.len,
            });
        }

        self.ranges.retain(|r| {
            let overlaps = r.overlaps(start, end);
            if overlaps {
                log::debug!(
                    "apply_style: range {:?} ({}..{}) replaced by {start}..{end}",
                    r.id,
                    r.start,
                    r.end
                );
            }
            !overlaps
        });

        let id = RangeId(self.next_id);
        self.next_id += 1;
        let source_text = self.slice(start, end);
        self.ranges.push(StyleRange {
            id,
            start: to_u32(start),
            end: to_u32(end),
            style: *pending.style(),
            source_text,
        });
        Ok(id)
    }

    /// Apply a style to an edit target
    ///
    /// For [`EditTarget::Default`] this replaces the default style; for
    /// [`EditTarget::Range`] the range's style is replaced in place.
    ///
    /// Returns `false` if the target range does not exist.
    pub fn apply(&mut self, target: EditTarget, pending: &PendingStyle) -> bool {
        match target {
            EditTarget::Default => {
                self.default_style = *pending.style();
                true
            }
            EditTarget::Range(id) => match self.ranges.iter_mut().find(|r| r.id == id) {
                Some(range) => {
                    range.style = *pending.style();
                    true
                }
                None => {
                    log::debug!("apply: no range {id:?}");
                    false
                }
            },
        }
    }

    /// Remove a style range
    pub fn remove_range(&mut self, id: RangeId) -> Option<StyleRange> {
        let index = self.ranges.iter().position(|range| range.id == id)?;
        Some(self.ranges.remove(index))
    }

    /// Remove all style ranges
    pub fn clear_ranges(&mut self) {
        self.ranges.clear();
    }
}
