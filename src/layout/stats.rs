//! Layout result with statistics.

use super::winansi;
use crate::model::{Document, LineKind};
use serde::{Deserialize, Serialize};

/// Result of laying out text, including the document and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutResult {
    /// The laid-out document
    pub document: Document,

    /// Layout statistics
    pub stats: LayoutStats,
}

/// Statistics collected while laying out text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Number of input lines
    pub line_count: u32,

    /// Number of pages produced
    pub page_count: u32,

    /// Number of runs drawn
    pub run_count: u32,

    /// Number of `# ` and `## ` lines
    pub heading_count: u32,

    /// Number of `- ` lines
    pub bullet_count: u32,

    /// Number of body lines, blank ones included
    pub body_count: u32,

    /// Runs beyond the first produced by wrapping a line
    pub wrapped_line_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,

    /// Runs with characters outside WinAnsi, drawn with substitutes
    #[serde(default)]
    pub degraded_run_count: u32,
}

impl LayoutStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classified input line and the number of runs it produced.
    pub fn add_line(&mut self, kind: LineKind, runs: usize) {
        self.line_count += 1;
        self.run_count += runs as u32;
        self.wrapped_line_count += runs.saturating_sub(1) as u32;
        match kind {
            LineKind::Heading1 | LineKind::Heading2 => self.heading_count += 1,
            LineKind::Bullet => self.bullet_count += 1,
            LineKind::Body => self.body_count += 1,
        }
    }

    /// Add word and character counts from the text of one run.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
        if !winansi::is_encodable(text) {
            self.degraded_run_count += 1;
        }
    }
}
