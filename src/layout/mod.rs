//! Layout engine turning Markdown-lite text into a paginated document.
//!
//! Each input line is classified by prefix (`# `, `## `, `- `, anything else),
//! bullet and body lines are greedily wrapped to the maximum width, and runs
//! are placed top to bottom with a vertical cursor. When the cursor has gone
//! below the bottom margin the next run starts a new page.
//!
//! # Example
//!
//! ```
//! use studypdf::layout::{LayoutEngine, LayoutOptions};
//! use studypdf::LineKind;
//!
//! let engine = LayoutEngine::new(LayoutOptions::default());
//! let doc = engine.render("# Title\nSome body text.");
//!
//! assert_eq!(doc.page_count(), 1);
//! let title = &doc.pages[0].runs[0];
//! assert_eq!(title.style, LineKind::Heading1);
//! assert_eq!((title.x, title.y), (50.0, 750.0));
//! ```

mod line;
mod metrics;
mod options;
mod stats;
pub mod winansi;
mod wrap;

pub use line::split_lines;
pub use options::{BulletSpacing, LayoutOptions, StyleSheet, TextStyle};
pub use stats::{LayoutResult, LayoutStats};
pub use wrap::wrap;

use crate::model::{Document, LineKind, Page, TextRun};

/// Lays out text according to a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    /// Create a new engine.
    ///
    /// A top baseline below the bottom margin is raised to the margin, so
    /// the first run never forces a page break on its own.
    pub fn new(mut options: LayoutOptions) -> Self {
        if options.top < options.bottom_margin {
            log::warn!(
                "Top baseline {} is below the bottom margin {}, using {}",
                options.top,
                options.bottom_margin,
                options.bottom_margin
            );
            options.top = options.bottom_margin;
        }
        Self { options }
    }

    /// Get the layout options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lay out text into a document.
    ///
    /// Never fails; the empty string produces a single empty page.
    pub fn render(&self, text: &str) -> Document {
        self.render_with_stats(text).document
    }

    /// Lay out text and collect statistics.
    pub fn render_with_stats(&self, text: &str) -> LayoutResult {
        let options = &self.options;
        let mut stats = LayoutStats::new();
        let mut pager = Pager::new(options);

        for line in split_lines(text) {
            let (kind, content) = LineKind::classify(line);
            let sub_lines = self.sub_lines(kind, content);
            stats.add_line(kind, sub_lines.len());

            for sub_line in sub_lines {
                stats.count_text(&sub_line);
                pager.draw(sub_line, kind);
                if kind.wraps() {
                    pager.advance(options.line_height);
                }
            }

            if options.spacing_after(kind) {
                pager.advance(options.paragraph_spacing);
            }
        }

        let document = pager.finish();
        stats.page_count = document.page_count();

        log::debug!(
            "Laid out {} lines into {} runs on {} pages",
            stats.line_count,
            stats.run_count,
            stats.page_count
        );

        LayoutResult { document, stats }
    }

    /// Text of each run a line produces; never empty.
    fn sub_lines(&self, kind: LineKind, content: &str) -> Vec<String> {
        let style = self.options.styles.get(kind);
        let mut lines = match kind {
            LineKind::Heading1 | LineKind::Heading2 => vec![content.to_string()],
            LineKind::Bullet => {
                let item = format!("{} {}", self.options.bullet_glyph, content);
                wrap(&item, style.font, style.size, self.options.max_width)
            }
            LineKind::Body => wrap(content, style.font, style.size, self.options.max_width),
        };
        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }
}

/// Page assembly state for a single render call.
struct Pager<'a> {
    options: &'a LayoutOptions,
    document: Document,
    page: Page,
    cursor: f32,
}

impl<'a> Pager<'a> {
    fn new(options: &'a LayoutOptions) -> Self {
        let mut document = Document::new();
        document.metadata = options.metadata.clone();
        Self {
            options,
            document,
            page: Page::new(1, options.page_width, options.page_height),
            cursor: options.top,
        }
    }

    /// Place a run at the cursor, breaking the page first if the cursor is
    /// below the bottom margin.
    fn draw(&mut self, text: String, kind: LineKind) {
        if self.cursor < self.options.bottom_margin {
            self.break_page();
        }
        let style = self.options.styles.get(kind);
        self.page.add_run(TextRun::new(
            text,
            kind,
            style.font,
            style.size,
            self.options.left_margin,
            self.cursor,
        ));
    }

    fn advance(&mut self, amount: f32) {
        self.cursor -= amount;
    }

    fn break_page(&mut self) {
        let number = self.page.number + 1;
        log::debug!(
            "Cursor at {} below bottom margin, starting page {}",
            self.cursor,
            number
        );
        let next = Page::new(number, self.options.page_width, self.options.page_height);
        let full = std::mem::replace(&mut self.page, next);
        self.document.add_page(full);
        self.cursor = self.options.top;
    }

    fn finish(mut self) -> Document {
        self.document.add_page(self.page);
        self.document
    }
}
