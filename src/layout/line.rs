//! Line splitting and classification.

use crate::model::LineKind;

impl LineKind {
    /// Classify a line and strip its prefix.
    ///
    /// Prefixes are tested in order `# `, `## `, `- `; a line matching none
    /// is body text and keeps its content unchanged.
    pub fn classify(line: &str) -> (LineKind, &str) {
        if let Some(rest) = line.strip_prefix("# ") {
            (LineKind::Heading1, rest)
        } else if let Some(rest) = line.strip_prefix("## ") {
            (LineKind::Heading2, rest)
        } else if let Some(rest) = line.strip_prefix("- ") {
            (LineKind::Bullet, rest)
        } else {
            (LineKind::Body, line)
        }
    }
}

/// Split text into lines, keeping empty lines.
///
/// The empty string has no lines. A `\r` before each `\n` is dropped.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let lines = if text.is_empty() {
        None
    } else {
        Some(text.split('\n'))
    };
    lines
        .into_iter()
        .flatten()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}
