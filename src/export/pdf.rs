//! PDF serialization for laid-out documents.
//!
//! Produces a PDF 1.4 file with `pdf-writer`, using the standard Type 1
//! Helvetica faces with WinAnsi encoding so no font data is embedded. Each
//! page gets one content stream in which every run is an absolutely
//! positioned `Tj`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Datelike, Timelike, Utc};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use pdf_writer::{Content, Date, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::{Error, Result};
use crate::layout::winansi;
use crate::model::{Document, Font, Metadata, Page};

/// Options for PDF output.
#[derive(Debug, Clone)]
pub struct PdfOptions {
    /// Compress page content streams with Flate
    pub compress: bool,

    /// Producer written when the document metadata has none
    pub producer: String,
}

impl PdfOptions {
    /// Create new PDF options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the fallback producer string.
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            compress: true,
            producer: format!("studypdf {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Serialize a document to PDF bytes.
pub fn to_pdf(doc: &Document, options: &PdfOptions) -> Result<Vec<u8>> {
    let blank;
    let pages: Vec<&Page> = if doc.pages.is_empty() {
        blank = Page::letter(1);
        vec![&blank]
    } else {
        doc.pages.iter().collect()
    };
    for page in &pages {
        check_page_size(page)?;
    }

    let mut pdf = Pdf::new();
    pdf.set_version(1, 4);

    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let font_ids: Vec<(Font, Ref)> = Font::ALL.iter().map(|font| (*font, alloc())).collect();
    let info_id = alloc();
    let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc(), alloc())).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(pages.len() as i32);

    for (font, font_id) in &font_ids {
        pdf.type1_font(*font_id)
            .base_font(Name(font.base_name().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    write_info(&mut pdf, info_id, &doc.metadata, options);

    for (page, (page_id, content_id)) in pages.iter().zip(&page_ids) {
        {
            let mut page_writer = pdf.page(*page_id);
            page_writer
                .parent(pages_id)
                .media_box(Rect::new(0.0, 0.0, page.width, page.height))
                .contents(*content_id);
            let mut resources = page_writer.resources();
            let mut fonts = resources.fonts();
            for (font, font_id) in &font_ids {
                fonts.pair(Name(font.resource_name().as_bytes()), *font_id);
            }
        }

        let content = content_stream(page);
        let data = if options.compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&content)?;
            encoder.finish()?
        } else {
            content
        };
        let mut stream = pdf.stream(*content_id, &data);
        if options.compress {
            stream.filter(Filter::FlateDecode);
        }
    }

    let bytes = pdf.finish();
    log::debug!(
        "Wrote PDF with {} pages ({} bytes)",
        pages.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Serialize a document as PDF into a writer.
pub fn write_pdf<W: Write>(doc: &Document, options: &PdfOptions, mut writer: W) -> Result<()> {
    let bytes = to_pdf(doc, options)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Serialize a document as PDF into a file.
pub fn save_pdf<P: AsRef<Path>>(doc: &Document, options: &PdfOptions, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_pdf(doc, options, BufWriter::new(file))
}

fn check_page_size(page: &Page) -> Result<()> {
    let (width, height) = page.dimensions();
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(Error::Pdf(format!(
            "page {} has invalid size {}x{}",
            page.number, width, height
        )))
    }
}

fn content_stream(page: &Page) -> Vec<u8> {
    let mut content = Content::new();
    for run in page.runs.iter().filter(|run| !run.is_empty()) {
        let encoded = winansi::encode(&run.text);
        content.begin_text();
        content
            .set_font(Name(run.font.resource_name().as_bytes()), run.size)
            .next_line(run.x, run.y)
            .show(Str(&encoded));
        content.end_text();
    }
    content.finish().to_vec()
}

fn write_info(pdf: &mut Pdf, id: Ref, metadata: &Metadata, options: &PdfOptions) {
    let mut info = pdf.document_info(id);
    if let Some(title) = &metadata.title {
        info.title(TextStr(title));
    }
    if let Some(author) = &metadata.author {
        info.author(TextStr(author));
    }
    if let Some(subject) = &metadata.subject {
        info.subject(TextStr(subject));
    }
    if let Some(creator) = &metadata.creator {
        info.creator(TextStr(creator));
    }
    let producer = metadata.producer.as_deref().unwrap_or(&options.producer);
    info.producer(TextStr(producer));
    if let Some(created) = &metadata.created {
        info.creation_date(pdf_date(created));
    }
}

fn pdf_date(date: &DateTime<Utc>) -> Date {
    Date::new(date.year().clamp(0, 9999) as u16)
        .month(date.month() as u8)
        .day(date.day() as u8)
        .hour(date.hour() as u8)
        .minute(date.minute() as u8)
        .second(date.second().min(59) as u8)
        .utc_offset_hour(0)
        .utc_offset_minute(0)
}
