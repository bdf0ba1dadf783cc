// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Horizontal alignment of lines

use crate::{Align, Line, Segment};

/// A segment positioned within its line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placed<'a> {
    pub segment: &'a Segment,
    /// Offset from the left edge of the target width
    pub x: f32,
}

/// Place the segments of `line` according to its effective alignment
///
/// `target_width` must be the width the line was wrapped against.
///
/// Justified lines distribute `target_width - content_width` equally after
/// each space; this requires at least one space and one non-space segment,
/// otherwise the line is left-aligned. The last line of a paragraph is
/// justified like any other.
pub fn place_line(line: &Line, target_width: f32) -> Vec<Placed<'_>> {
    let segments = line.segments();
    let slack = target_width - line.content_width();

    let (mut x, extra) = match line.effective_alignment() {
        Align::Left => (0.0, 0.0),
        Align::Center => (0.5 * slack, 0.0),
        Align::Right => (slack, 0.0),
        Align::Justify => {
            let spaces = line.space_count();
            if spaces > 0 && segments.iter().any(|s| !s.is_space()) {
                (0.0, slack / spaces as f32)
            } else {
                (0.0, 0.0)
            }
        }
    };

    let mut placed = Vec::with_capacity(segments.len());
    for segment in segments {
        placed.push(Placed { segment, x });
        x += segment.width;
        if segment.is_space() {
            x += extra;
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{wrap, Style};

    fn line(text: &str, align: Align) -> Line {
        let segments: Vec<Segment> = text
            .chars()
            .map(|ch| Segment {
                ch,
                style: Style::default(),
                width: if ch == ' ' { 5.0 } else { 10.0 },
            })
            .collect();
        let mut lines = wrap(&segments, 1000.0, 1.0, align);
        assert_eq!(lines.len(), 1);
        lines.remove(0)
    }

    fn offsets(placed: &[Placed]) -> Vec<f32> {
        placed.iter().map(|p| p.x).collect()
    }

    #[test]
    fn left_center_right() {
        let l = line("ab c", Align::Left);
        assert_eq!(offsets(&place_line(&l, 100.0)), [0.0, 10.0, 20.0, 25.0]);

        let l = line("ab c", Align::Right);
        assert_eq!(offsets(&place_line(&l, 100.0)), [65.0, 75.0, 85.0, 90.0]);

        let l = line("ab c", Align::Center);
        assert_eq!(
            offsets(&place_line(&l, 100.0)),
            [32.5, 42.5, 52.5, 57.5]
        );
    }

    #[test]
    fn justify_fills_width() {
        let l = line("a bb c d", Align::Justify);
        assert_eq!(l.space_count(), 3);
        let placed = place_line(&l, 200.0);
        let last = placed.last().unwrap();
        let right = last.x + last.segment.width;
        assert!((right - 200.0).abs() < 1e-3, "right edge {right}");

        // extra = (200 - 65) / 3 = 45
        assert_eq!(offsets(&placed)[..4], [0.0, 10.0, 60.0, 70.0]);
    }

    #[test]
    fn justify_fallback() {
        // No spaces:
        let l = line("abc", Align::Justify);
        assert_eq!(offsets(&place_line(&l, 100.0)), [0.0, 10.0, 20.0]);

        // Only spaces:
        let l = line("   ", Align::Justify);
        assert_eq!(offsets(&place_line(&l, 100.0)), [0.0, 5.0, 10.0]);
    }

    #[test]
    fn justify_trailing_space() {
        // Extra space after a trailing space lies beyond the last segment
        let l = line("ab ", Align::Justify);
        let placed = place_line(&l, 50.0);
        assert_eq!(offsets(&placed), [0.0, 10.0, 20.0]);
        let last = placed.last().unwrap();
        assert_eq!(last.x + last.segment.width, 25.0);
    }
}
