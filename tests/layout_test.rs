//! Integration tests for the layout engine.

use studypdf::{render, BulletSpacing, Font, LayoutEngine, LayoutOptions, LineKind};

fn words(doc: &studypdf::Document) -> Vec<String> {
    doc.runs()
        .flat_map(|run| run.text.split_whitespace())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_any_input_yields_a_page() {
    for text in ["", "\n", "   ", "# ", "- ", "plain"] {
        assert!(render(text).page_count() >= 1, "input {:?}", text);
    }
}

#[test]
fn test_empty_string() {
    let doc = render("");
    assert_eq!(doc.page_count(), 1);
    assert!(doc.pages[0].runs.is_empty());
}

#[test]
fn test_single_heading() {
    let doc = render("# Title");
    assert_eq!(doc.page_count(), 1);
    assert_eq!(doc.pages[0].runs.len(), 1);

    let run = &doc.pages[0].runs[0];
    assert_eq!(run.text, "Title");
    assert_eq!(run.style, LineKind::Heading1);
    assert_eq!(run.font, Font::HelveticaBold);
    assert_eq!(run.size, 16.0);
    assert_eq!((run.x, run.y), (50.0, 750.0));
}

#[test]
fn test_bullet_then_line() {
    let doc = render("- a b c\nnext");
    let runs = &doc.pages[0].runs;

    assert_eq!(runs[0].text, "\u{2022} a b c");
    assert_eq!(runs[0].style, LineKind::Bullet);
    assert_eq!(runs[0].font, Font::Helvetica);
    assert_eq!(runs[0].y, 750.0);

    assert_eq!(runs[1].text, "next");
    assert_eq!(runs[1].y, 730.0);
}

#[test]
fn test_mixed_document_positions() {
    let doc = render("# Rust\n## Ownership\n- one\n- two\nBody text");
    let ys: Vec<f32> = doc.pages[0].runs.iter().map(|r| r.y).collect();
    assert_eq!(ys, vec![750.0, 730.0, 710.0, 690.0, 670.0]);
}

#[test]
fn test_uniform_bullet_spacing() {
    let engine =
        LayoutEngine::new(LayoutOptions::default().with_bullet_spacing(BulletSpacing::Uniform));
    let doc = engine.render("- a\n- b\nc");
    let ys: Vec<f32> = doc.pages[0].runs.iter().map(|r| r.y).collect();
    assert_eq!(ys, vec![750.0, 710.0, 670.0]);
}

#[test]
fn test_long_paragraph_crosses_page() {
    let paragraph = vec!["lorem"; 1000].join(" ");
    let doc = render(&paragraph);

    assert_eq!(doc.page_count(), 2);
    // 750 down to 50 inclusive
    assert_eq!(doc.pages[0].runs.len(), 36);
    assert_eq!(doc.pages[0].runs.last().map(|r| r.y), Some(50.0));
    assert_eq!(doc.pages[1].runs[0].y, 750.0);
    assert!(doc.runs().all(|r| r.style == LineKind::Body));

    let words = words(&doc);
    assert_eq!(words.len(), 1000);
    assert!(words.iter().all(|w| w == "lorem"));
}

#[test]
fn test_wrapped_lines_fit_width() {
    let paragraph = "The quick brown fox jumps over the lazy dog. ".repeat(40);
    let doc = render(&paragraph);
    for run in doc.runs() {
        let width = run.font.text_width(&run.text, run.size);
        assert!(width <= 500.0, "run {:?} is {} wide", run.text, width);
    }
}

#[test]
fn test_overwide_word_sits_alone() {
    let long_word = "W".repeat(60);
    let doc = render(&format!("a {} b", long_word));
    let texts: Vec<&str> = doc.runs().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["a", long_word.as_str(), "b"]);
}

#[test]
fn test_rendering_is_deterministic() {
    let text = "# Plan\n## Week 1\n- Read the book\n- Do exercises\n\nA longer paragraph that goes on. "
        .repeat(30);
    let first = render(&text);
    let second = render(&text);
    assert_eq!(first, second);
}

#[test]
fn test_y_never_increases_within_page() {
    let text = "# Heading\n- bullet item\nbody line\n\n".repeat(50);
    let doc = render(&text);
    assert!(doc.page_count() > 1);
    for page in &doc.pages {
        for pair in page.runs.windows(2) {
            assert!(pair[1].y <= pair[0].y);
        }
        assert!(page.runs.iter().all(|r| r.y >= 50.0));
    }
}

#[test]
fn test_every_line_yields_a_run() {
    let text = "# A\n\n- \n## B\n   \nbody";
    let doc = render(text);
    assert_eq!(doc.run_count(), 6);

    let kinds: Vec<LineKind> = doc.runs().map(|r| r.style).collect();
    assert_eq!(
        kinds,
        vec![
            LineKind::Heading1,
            LineKind::Body,
            LineKind::Bullet,
            LineKind::Heading2,
            LineKind::Body,
            LineKind::Body,
        ]
    );
}

#[test]
fn test_prefix_needs_space() {
    let doc = render("#NoSpace\n-dash\n### Three");
    assert!(doc.runs().all(|r| r.style == LineKind::Body));
    assert_eq!(doc.pages[0].runs[2].text, "### Three");
}

#[test]
fn test_crlf_line_endings() {
    let doc = render("# Title\r\nbody\r\n");
    let texts: Vec<&str> = doc.runs().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["Title", "body", ""]);
}

#[test]
fn test_custom_geometry() {
    let options = LayoutOptions::default()
        .with_top(400.0)
        .with_left_margin(72.0)
        .with_line_height(10.0)
        .with_paragraph_spacing(5.0);
    let doc = LayoutEngine::new(options).render("one\ntwo");
    let positions: Vec<(f32, f32)> = doc.runs().map(|r| (r.x, r.y)).collect();
    assert_eq!(positions, vec![(72.0, 400.0), (72.0, 385.0)]);
}

#[test]
fn test_pages_are_numbered() {
    let text = vec!["line"; 60].join("\n");
    let doc = render(&text);
    let numbers: Vec<u32> = doc.pages.iter().map(|p| p.number).collect();
    assert_eq!(numbers, (1..=doc.page_count()).collect::<Vec<_>>());
}
