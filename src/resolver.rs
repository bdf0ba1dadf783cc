// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Style resolution

use crate::{Document, Style, StyleRange};

/// Maps character indices to their effective [`Style`]
#[derive(Clone, Copy, Debug)]
pub struct StyleResolver<'a> {
    ranges: &'a [StyleRange],
    default: &'a Style,
}

impl<'a> StyleResolver<'a> {
    /// Construct over a document's ranges and default style
    pub fn new(document: &'a Document) -> Self {
        Self::from_parts(document.ranges(), document.default_style())
    }

    /// Construct over an explicit list of ranges
    pub fn from_parts(ranges: &'a [StyleRange], default: &'a Style) -> Self {
        StyleResolver { ranges, default }
    }

    /// Resolve the style of the char at `index`
    ///
    /// This is the style of the first range (in order of application)
    /// containing `index`, otherwise the default style.
    pub fn resolve(&self, index: usize) -> &'a Style {
        self.ranges
            .iter()
            .find(|range| range.contains(index))
            .map(|range| range.style())
            .unwrap_or(self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PendingStyle, StyleFlags};

    #[test]
    fn every_index_resolves() {
        let mut doc = Document::new("abcdefghij");
        let italic = Style::default().with_flags(StyleFlags::ITALIC, true);
        let big = Style::default().with_size(30.0);
        doc.apply_style(1..3, &PendingStyle::from(italic)).unwrap();
        doc.apply_style(7..10, &PendingStyle::from(big)).unwrap();

        let resolver = StyleResolver::new(&doc);
        let expected = [0, 1, 1, 0, 0, 0, 0, 2, 2, 2];
        for (index, which) in expected.into_iter().enumerate() {
            let style = match which {
                0 => doc.default_style(),
                1 => &italic,
                _ => &big,
            };
            assert_eq!(resolver.resolve(index), style, "index {index}");
        }
        // Beyond the end of text:
        assert_eq!(resolver.resolve(10), doc.default_style());
    }

    #[test]
    fn first_range_wins() {
        // The non-overlap invariant is bypassed via `from_parts`:
        let mut a = Document::new("abcdef");
        let red = Style::default().with_color(crate::Rgba::rgb(255, 0, 0));
        a.apply_style(0..4, &red.into()).unwrap();
        let mut b = Document::new("abcdef");
        b.apply_style(2..6, &PendingStyle::default()).unwrap();

        let ranges = [a.ranges()[0].clone(), b.ranges()[0].clone()];
        let default = Style::default().with_size(9.0);
        let resolver = StyleResolver::from_parts(&ranges, &default);
        assert_eq!(resolver.resolve(3), &red);
        assert_eq!(resolver.resolve(5), &Style::default());
        assert_eq!(resolver.resolve(6), &default);
    }
}
