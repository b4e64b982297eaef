//! Integration tests for PDF output.

use std::io::Read;

use flate2::read::ZlibDecoder;
use studypdf::{render, save_pdf, to_pdf, write_pdf, Document, LayoutEngine, LayoutOptions, PdfOptions};

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// The PDF text with all whitespace runs collapsed to one space.
fn squash(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A PDF hex string for the given bytes, in lowercase.
fn hex_string(bytes: &[u8]) -> String {
    let digits: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!("<{}>", digits)
}

/// Parse the xref table and return `(object id, offset)` pairs for objects
/// in use.
fn xref_entries(pdf: &[u8]) -> Vec<(usize, usize)> {
    let marker = b"startxref";
    let start = pdf
        .windows(marker.len())
        .rposition(|window| window == marker)
        .expect("startxref")
        + marker.len();
    let tail = std::str::from_utf8(&pdf[start..]).unwrap();
    let offset: usize = tail.split_whitespace().next().unwrap().parse().unwrap();

    let table = std::str::from_utf8(&pdf[offset..]).unwrap();
    assert!(table.starts_with("xref"));
    let mut lines = table.lines().skip(1);
    let size: usize = lines
        .next()
        .unwrap()
        .split_whitespace()
        .nth(1)
        .unwrap()
        .parse()
        .unwrap();

    lines
        .take(size)
        .enumerate()
        .filter(|(_, line)| line.trim_end().ends_with('n'))
        .map(|(id, line)| (id, line[..10].parse().unwrap()))
        .collect()
}

/// Decompressed content streams in file order.
fn content_streams(pdf: &[u8]) -> Vec<String> {
    let mut streams = Vec::new();
    let mut rest = pdf;
    while let Some(start) = find(rest, b"stream\n") {
        let body = &rest[start + "stream\n".len()..];
        let end = find(body, b"\nendstream").expect("endstream");
        let mut decoded = String::new();
        ZlibDecoder::new(&body[..end])
            .read_to_string(&mut decoded)
            .unwrap();
        streams.push(decoded);
        rest = &body[end + "\nendstream".len()..];
    }
    streams
}

#[test]
fn test_header_and_trailer() {
    let pdf = to_pdf(&render("# Title\nBody"), &PdfOptions::default()).unwrap();
    let text = squash(&pdf);
    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(text.ends_with("%%EOF"));
    assert!(text.contains("/Root 1 0 R"));
    assert!(text.contains("/Info 5 0 R"));
}

#[test]
fn test_xref_offsets_point_at_objects() {
    let text = vec!["A line of body text"; 40].join("\n");
    let pdf = to_pdf(&render(&text), &PdfOptions::default()).unwrap();

    let entries = xref_entries(&pdf);
    // Catalog, page tree, two fonts, info, then a page and content pair per page
    assert_eq!(entries.len(), 5 + 2 * 3);
    for (id, offset) in entries {
        let expected = format!("{} 0 obj", id);
        assert!(
            pdf[offset..].starts_with(expected.as_bytes()),
            "object {} not at offset {}",
            id,
            offset
        );
    }
}

#[test]
fn test_page_count_matches_layout() {
    let text = vec!["line"; 60].join("\n");
    let doc = render(&text);
    assert_eq!(doc.page_count(), 4);

    let pdf = to_pdf(&doc, &PdfOptions::default()).unwrap();
    let squashed = squash(&pdf);
    assert!(squashed.contains("/Count 4"));
    assert!(squashed.contains("/Kids [6 0 R 8 0 R 10 0 R 12 0 R]"));
    assert_eq!(squashed.matches("/Type /Page ").count(), 4);
}

#[test]
fn test_empty_document_has_one_blank_page() {
    let pdf = to_pdf(&render(""), &PdfOptions::default()).unwrap();
    assert!(squash(&pdf).contains("/Count 1"));
    assert_eq!(content_streams(&pdf), vec![String::new()]);
}

#[test]
fn test_compressed_streams_decode_to_runs() {
    let pdf = to_pdf(&render("# Title\n- item (one)"), &PdfOptions::default()).unwrap();
    assert!(squash(&pdf).contains("/Filter /FlateDecode"));

    let streams = content_streams(&pdf);
    assert_eq!(streams.len(), 1);
    let stream = squash(streams[0].as_bytes()).to_lowercase();
    assert!(stream.contains("bt /f2 16 tf 50 750 td (title) tj et"));

    let bullet = hex_string(b"\x95 item (one)");
    assert!(stream.contains(&format!("/f1 12 tf 50 730 td {} tj", bullet)));
}

#[test]
fn test_uncompressed_streams() {
    let options = PdfOptions::default().with_compression(false);
    let pdf = to_pdf(&render("## Section"), &options).unwrap();
    let text = squash(&pdf);
    assert!(!text.contains("/FlateDecode"));
    assert!(text.contains("BT /F2 14 Tf 50 750 Td (Section) Tj ET"));
}

#[test]
fn test_standard_fonts() {
    let text = squash(&to_pdf(&render("x"), &PdfOptions::default()).unwrap());
    assert!(text.contains("/BaseFont /Helvetica /Encoding /WinAnsiEncoding"));
    assert!(text.contains("/BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding"));
    assert!(text.contains("/MediaBox [0 0 612 792]"));
    assert!(text.contains("/F1 3 0 R"));
    assert!(text.contains("/F2 4 0 R"));
}

#[test]
fn test_info_dictionary() {
    let engine = LayoutEngine::new(LayoutOptions::default().with_title("Café notes"));
    let pdf = to_pdf(&engine.render("x"), &PdfOptions::default().with_producer("tests")).unwrap();
    let text = squash(&pdf);
    assert!(text.to_lowercase().contains("/title <feff00430061006600e9"));
    assert!(text.contains("/Producer (tests)"));
}

#[test]
fn test_non_latin_text_degrades() {
    let options = PdfOptions::default().with_compression(false);
    let pdf = to_pdf(&render("naïve → 漢"), &options).unwrap();
    let expected = format!("{} tj", hex_string(b"na\xefve ? ?"));
    assert!(squash(&pdf).to_lowercase().contains(&expected));
}

#[test]
fn test_output_is_deterministic() {
    let doc = render("# Same\nInput");
    let options = PdfOptions::default();
    assert_eq!(to_pdf(&doc, &options).unwrap(), to_pdf(&doc, &options).unwrap());
}

#[test]
fn test_write_pdf_matches_to_pdf() {
    let doc = render("Body");
    let options = PdfOptions::default();
    let mut buffer = Vec::new();
    write_pdf(&doc, &options, &mut buffer).unwrap();
    assert_eq!(buffer, to_pdf(&doc, &options).unwrap());
}

#[test]
fn test_save_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");
    let doc = render("# Saved");

    save_pdf(&doc, &PdfOptions::default(), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes, to_pdf(&doc, &PdfOptions::default()).unwrap());
}

#[test]
fn test_save_pdf_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.pdf");
    let result = save_pdf(&Document::new(), &PdfOptions::default(), &path);
    assert!(matches!(result, Err(studypdf::Error::Io(_))));
}
