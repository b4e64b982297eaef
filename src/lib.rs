//! # studypdf
//!
//! Markdown-lite to paginated PDF rendering, with an optional study plan
//! pipeline on top.
//!
//! The layout engine understands four kinds of lines: `# ` headings, `## `
//! subheadings, `- ` bullets and body text. Bullets and body text are wrapped
//! greedily to the page width using Helvetica metrics, and runs flow onto new
//! US Letter pages as the cursor reaches the bottom margin.
//!
//! ## Quick Start
//!
//! ```
//! use studypdf::{render, to_pdf, PdfOptions};
//!
//! fn main() -> studypdf::Result<()> {
//!     let doc = render("# Rust\n## Ownership\n- Each value has one owner\nBorrowing follows.");
//!     assert_eq!(doc.page_count(), 1);
//!
//!     let bytes = to_pdf(&doc, &PdfOptions::default())?;
//!     assert!(bytes.starts_with(b"%PDF-1.4"));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Deterministic layout**: identical input always gives identical pages
//! - **Standard fonts**: Helvetica and Helvetica-Bold, nothing embedded
//! - **Multiple outputs**: PDF, JSON layout dump, plain text
//! - **Study pipeline**: roadmap and assessment documents from a [`crew::StudyCrew`]

pub mod config;
pub mod crew;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod pipeline;

// Re-export commonly used types
pub use config::{Level, StudyConfig};
pub use error::{Error, Result};
pub use export::{from_json, save_pdf, to_json, to_pdf, to_text, write_pdf, JsonFormat, PdfOptions};
pub use layout::{
    BulletSpacing, LayoutEngine, LayoutOptions, LayoutResult, LayoutStats, StyleSheet, TextStyle,
};
pub use model::{Document, Font, LineKind, Metadata, Page, TextRun};
pub use pipeline::{Artifact, StudyOutput, StudyPipeline};

use std::path::Path;

/// Lay out Markdown-lite text with the default options.
///
/// # Example
///
/// ```
/// use studypdf::{render, LineKind};
///
/// let doc = render("# Title");
/// let run = &doc.pages[0].runs[0];
/// assert_eq!(run.text, "Title");
/// assert_eq!(run.style, LineKind::Heading1);
/// ```
pub fn render(text: &str) -> Document {
    LayoutEngine::default().render(text)
}

/// Lay out text and serialize it to PDF bytes.
pub fn render_pdf(text: &str) -> Result<Vec<u8>> {
    to_pdf(&render(text), &PdfOptions::default())
}

/// Lay out text and write it to a PDF file.
///
/// # Example
///
/// ```no_run
/// studypdf::render_to_file("# Notes\nSome text.", "notes.pdf")?;
/// # Ok::<(), studypdf::Error>(())
/// ```
pub fn render_to_file<P: AsRef<Path>>(text: &str, path: P) -> Result<()> {
    save_pdf(&render(text), &PdfOptions::default(), path)
}

/// Read a Markdown-lite file and lay it out.
pub fn render_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let text = std::fs::read_to_string(path)?;
    Ok(render(&text))
}

/// Builder for laying out and exporting documents.
///
/// # Example
///
/// ```
/// use studypdf::{BulletSpacing, StudyPdf};
///
/// let pdf = StudyPdf::new()
///     .with_title("Notes")
///     .with_bullet_spacing(BulletSpacing::Uniform)
///     .uncompressed()
///     .render("- one\n- two")
///     .to_pdf()?;
/// assert!(pdf.starts_with(b"%PDF-1.4"));
/// # Ok::<(), studypdf::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct StudyPdf {
    layout: LayoutOptions,
    pdf: PdfOptions,
}

impl StudyPdf {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.layout = self.layout.with_title(title);
        self
    }

    /// Set bullet spacing.
    pub fn with_bullet_spacing(mut self, spacing: BulletSpacing) -> Self {
        self.layout = self.layout.with_bullet_spacing(spacing);
        self
    }

    /// Replace all layout options.
    pub fn with_layout(mut self, options: LayoutOptions) -> Self {
        self.layout = options;
        self
    }

    /// Write uncompressed content streams.
    pub fn uncompressed(mut self) -> Self {
        self.pdf = self.pdf.with_compression(false);
        self
    }

    /// Lay out text.
    pub fn render(&self, text: &str) -> Rendered {
        let LayoutResult { document, stats } =
            LayoutEngine::new(self.layout.clone()).render_with_stats(text);
        Rendered {
            document,
            stats,
            pdf_options: self.pdf.clone(),
        }
    }

    /// Read a file and lay it out.
    pub fn render_file<P: AsRef<Path>>(&self, path: P) -> Result<Rendered> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.render(&text))
    }
}

/// A laid-out document ready for export.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// The laid-out document
    pub document: Document,

    /// Layout statistics
    pub stats: LayoutStats,

    pdf_options: PdfOptions,
}

impl Rendered {
    /// Convert to PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        to_pdf(&self.document, &self.pdf_options)
    }

    /// Write a PDF file.
    pub fn save_pdf<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_pdf(&self.document, &self.pdf_options, path)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(&self.document, format)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        to_text(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
