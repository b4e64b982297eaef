//! Plain text rendering for laid-out documents.

use crate::model::Document;

/// Separator placed between pages.
pub const PAGE_SEPARATOR: &str = "\n\u{000C}\n";

/// Convert a document to plain text, one run per line, pages separated by a
/// form feed.
pub fn to_text(doc: &Document) -> String {
    doc.pages
        .iter()
        .map(|page| page.plain_text())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}
