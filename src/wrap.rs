// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Line wrapping

use crate::conv::to_u32;
use crate::{Align, Segment};
use smallvec::SmallVec;

/// A wrapped line
///
/// Lines are produced by [`wrap`] and never modified afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    segments: Vec<Segment>,
    width: f32,
    height: f32,
    spaces: u32,
    align: Align,
}

impl Line {
    /// Segments, in order
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Sum of segment widths (including any trailing space)
    #[inline]
    pub fn content_width(&self) -> f32 {
        self.width
    }

    /// Height of the line box
    #[inline]
    pub fn line_height(&self) -> f32 {
        self.height
    }

    /// Number of space segments
    #[inline]
    pub fn space_count(&self) -> u32 {
        self.spaces
    }

    /// Alignment used to place this line
    #[inline]
    pub fn effective_alignment(&self) -> Align {
        self.align
    }

    /// Text of the line
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.ch).collect()
    }
}

/// Accumulates segments of the line under construction
struct LineBuilder {
    segments: Vec<Segment>,
    width: f32,
    height: f32,
    spaces: u32,
    align: Align,
    doc_align: Align,
    line_height: f32,
}

impl LineBuilder {
    fn new(doc_align: Align, line_height: f32) -> Self {
        LineBuilder {
            segments: Vec::with_capacity(32),
            width: 0.0,
            height: 0.0,
            spaces: 0,
            align: doc_align,
            doc_align,
            line_height,
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn push(&mut self, segment: Segment) {
        self.width += segment.width;
        self.height = self.height.max(segment.style.size * self.line_height);
        if segment.is_space() {
            self.spaces += 1;
        }
        // A styled alignment is only adopted while the line still uses the
        // document alignment.
        if let Some(align) = segment.style.align {
            if self.align == self.doc_align {
                self.align = align;
            }
        }
        self.segments.push(segment);
    }

    /// Reset, returning the finished line
    fn take(&mut self) -> Line {
        let line = Line {
            segments: std::mem::take(&mut self.segments),
            width: self.width,
            height: self.height,
            spaces: self.spaces,
            align: self.align,
        };
        self.width = 0.0;
        self.height = 0.0;
        self.spaces = 0;
        self.align = self.doc_align;
        log::trace!(
            "wrap: line of {} segments, width {}, align {:?}",
            line.segments.len(),
            line.width,
            line.align
        );
        line
    }

    /// Break after the last space, returning the line up to and including
    /// that space
    ///
    /// Segments after the space are kept as the start of the next line. If
    /// there is no space, the whole content forms the line.
    fn take_at_word_boundary(&mut self) -> Line {
        let Some(k) = self.segments.iter().rposition(|s| s.is_space()) else {
            return self.take();
        };

        let tail = self.segments.split_off(k + 1);
        let head = std::mem::take(&mut self.segments);
        let line = Line {
            width: head.iter().map(|s| s.width).sum(),
            height: head
                .iter()
                .map(|s| s.style.size * self.line_height)
                .fold(0.0, f32::max),
            spaces: to_u32(head.iter().filter(|s| s.is_space()).count()),
            align: self.align,
            segments: head,
        };
        log::trace!(
            "wrap: line of {} segments broken at space, {} moved",
            line.segments.len(),
            tail.len()
        );

        self.width = 0.0;
        self.height = 0.0;
        self.spaces = 0;
        self.align = self.doc_align;
        for segment in tail {
            self.push(segment);
        }
        line
    }
}

/// Wrap segments into lines
///
/// Lines are broken greedily: before appending a segment which would push
/// the line beyond `target_width`, the line is broken after its last space
/// and the following segments move to the next line. Without a space, or if
/// the moved segments still do not fit with the new segment, the line is
/// broken before the new segment. A segment is always appended to an empty
/// line, thus a line only exceeds `target_width` when a single segment is
/// wider than `target_width`.
///
/// A `'\n'` segment ends the current line and is not included in any line;
/// empty lines are not emitted. Consecutive `'\n'` therefore yield fewer
/// lines than the number of hard breaks plus one.
///
/// Line height is the maximum over segments of `size × line_height`.
///
/// Each line starts with alignment `doc_align`. The first segment with a
/// style alignment adopts that alignment for the line, but only while the
/// line has not already diverged from `doc_align`.
pub fn wrap(
    segments: &[Segment],
    target_width: f32,
    line_height: f32,
    doc_align: Align,
) -> SmallVec<[Line; 1]> {
    let mut lines = SmallVec::new();
    let mut builder = LineBuilder::new(doc_align, line_height);

    for segment in segments {
        if segment.is_newline() {
            if !builder.is_empty() {
                lines.push(builder.take());
            }
            continue;
        }

        if !builder.is_empty() && builder.width + segment.width > target_width {
            lines.push(builder.take_at_word_boundary());
            // The moved word may still not fit alongside this segment
            if !builder.is_empty() && builder.width + segment.width > target_width {
                lines.push(builder.take());
            }
        }
        builder.push(*segment);
    }

    if !builder.is_empty() {
        lines.push(builder.take());
    }
    lines
}
