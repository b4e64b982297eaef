//! Page-level types.

use super::{LineKind, TextRun};
use serde::{Deserialize, Serialize};

/// A single page in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Text runs in drawing order
    pub runs: Vec<TextRun>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            runs: Vec::new(),
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0) // 8.5 * 72, 11 * 72
    }

    /// Add a run to the page.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get plain text content of the page, one run per line.
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .map(|run| run.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the page has no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Get the number of runs on the page.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Iterate over runs of one kind.
    pub fn runs_of(&self, kind: LineKind) -> impl Iterator<Item = &TextRun> {
        self.runs.iter().filter(move |run| run.style == kind)
    }

    /// Lowest baseline drawn on the page, if any.
    pub fn lowest_baseline(&self) -> Option<f32> {
        self.runs.iter().map(|run| run.y).reduce(f32::min)
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::letter(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Font;

    #[test]
    fn test_page_letter() {
        let page = Page::letter(1);
        assert_eq!(page.number, 1);
        assert_eq!(page.dimensions(), (612.0, 792.0));
        assert!(page.is_empty());
        assert_eq!(page.lowest_baseline(), None);
    }

    #[test]
    fn test_page_runs() {
        let mut page = Page::letter(1);
        page.add_run(TextRun::new(
            "Title",
            LineKind::Heading1,
            Font::HelveticaBold,
            16.0,
            50.0,
            750.0,
        ));
        page.add_run(TextRun::new(
            "Body",
            LineKind::Body,
            Font::Helvetica,
            12.0,
            50.0,
            710.0,
        ));

        assert_eq!(page.run_count(), 2);
        assert_eq!(page.runs_of(LineKind::Body).count(), 1);
        assert_eq!(page.lowest_baseline(), Some(710.0));
        assert_eq!(page.plain_text(), "Title\nBody");
    }
}
