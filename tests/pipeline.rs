// Layout and rendering through the public API, using synthetic box glyphs

use kas_text_raster::{
    place_line, Align, BlockMetrics, Document, Engine, Environment, GlyphRaster, Mode,
    PendingStyle, Rgba, Style, StyleFlags, StyleResolver,
};

fn engine(target_width: f32) -> Engine<BlockMetrics> {
    Engine::new(Environment::new(target_width), BlockMetrics)
}

#[test]
fn hello_world_preview() {
    let engine = engine(600.0);
    let doc = Document::new("Hello world");
    let layout = engine.layout(&doc).unwrap();

    assert_eq!(layout.num_lines(), 1);
    let line = &layout.lines()[0];
    assert_eq!(line.space_count(), 1);
    assert_eq!(line.segments().len(), 11);
    assert_eq!(line.effective_alignment(), Align::Left);

    let surface = engine.render(&doc, Mode::Preview).unwrap();
    assert_eq!(surface.width(), 620);
    let height = layout.height().ceil() as u32;
    assert_eq!(surface.height(), height + 20);
}

#[test]
fn hard_breaks() {
    // Breaks + 1 lines holds only without blank lines (empty lines are not emitted)
    let text = "one\ntwo two\nthree\nfour";
    assert!(!text.contains("\n\n"));
    let layout = engine(600.0).layout(&Document::new(text)).unwrap();
    let lines: Vec<String> = layout.lines().iter().map(|l| l.text()).collect();
    assert_eq!(lines.len(), text.matches('\n').count() + 1);
    assert_eq!(lines, text.split('\n').collect::<Vec<_>>());

    let layout = engine(600.0).layout(&Document::new("one\n\ntwo")).unwrap();
    assert_eq!(layout.num_lines(), 2);
}

#[test]
fn wrap_within_width() {
    let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
        eiusmod tempor incididunt ut labore et dolore magna aliqua.";
    let mut doc = Document::new(text);
    let big = Style::default().with_size(24.0);
    doc.apply_style(6..11, &PendingStyle::from(big)).unwrap();

    for target in [120.0, 200.0, 333.0, 600.0] {
        let layout = engine(target).layout(&doc).unwrap();
        assert!(layout.num_lines() > 1 || target == 600.0);
        for line in layout.lines() {
            assert!(
                line.content_width() <= target,
                "line {:?} exceeds {target}",
                line.text()
            );
        }
        let joined: String = layout.lines().iter().map(|l| l.text()).collect();
        assert_eq!(joined, text);
    }
}

#[test]
fn justified_lines_fill_width() {
    let text = "the quick brown fox jumps over the lazy dog and runs away";
    let mut doc = Document::new(text);
    doc.set_align(Align::Justify);
    let layout = engine(150.0).layout(&doc).unwrap();
    assert!(layout.num_lines() > 2);

    for line in layout.lines() {
        let placed = place_line(line, 150.0);
        let last = placed.last().unwrap();
        if line.space_count() > 0 && !last.segment.is_space() {
            let right = last.x + last.segment.width;
            assert!((right - 150.0).abs() < 1e-3, "{:?}: {right}", line.text());
        }
    }
}

#[test]
fn resolver_covers_document() {
    let mut doc = Document::new("abcdefghijklmnop");
    let red = PendingStyle::from(Style::default().with_color(Rgba::rgb(255, 0, 0)));
    let bold = PendingStyle::from(Style::default().with_flags(StyleFlags::BOLD, true));
    doc.apply_style(2..5, &red).unwrap();
    doc.apply_style(4..8, &bold).unwrap();
    doc.apply_style(10..12, &red).unwrap();

    assert_eq!(doc.ranges().len(), 2);
    let resolver = StyleResolver::new(&doc);
    for index in 0..doc.len() {
        let matching = doc.ranges().iter().filter(|r| r.contains(index)).count();
        assert!(matching <= 1);
        let style = resolver.resolve(index);
        match matching {
            0 => assert_eq!(style, doc.default_style()),
            _ => assert_ne!(style, doc.default_style()),
        }
    }
    assert_eq!(resolver.resolve(2), doc.default_style());
    assert!(resolver.resolve(4).bold());
}

#[test]
fn export_crop() {
    let engine = engine(600.0);
    let doc = Document::new("A");
    let sprite = BlockMetrics.raster('A', doc.default_style()).unwrap();
    let surface = engine.render(&doc, Mode::Export).unwrap();
    assert_eq!(surface.width(), sprite.size.0 + 4);
    assert_eq!(surface.height(), sprite.size.1 + 4);

    let empty = engine.render(&Document::default(), Mode::Export).unwrap();
    assert_eq!((empty.width(), empty.height()), (4, 4));
    assert!(empty.is_transparent());
}

#[test]
fn export_ignores_alignment() {
    let mut doc = Document::new("centred text");
    let left = engine(400.0).render(&doc, Mode::Export).unwrap();
    doc.set_align(Align::Center);
    let centred = engine(400.0).render(&doc, Mode::Export).unwrap();
    assert_eq!(left, centred);

    let preview_left = engine(400.0).render(&Document::new("centred text"), Mode::Preview);
    let preview_centred = engine(400.0).render(&doc, Mode::Preview);
    assert_ne!(preview_left.unwrap(), preview_centred.unwrap());
}

#[test]
fn control_chars_fail() {
    let result = engine(600.0).render(&Document::new("tab\there"), Mode::Preview);
    assert!(result.is_err());
}

#[test]
fn png_export() {
    let png = engine(600.0)
        .export_png(&Document::new("Hello world"))
        .unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}
