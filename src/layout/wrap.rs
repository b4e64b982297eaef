//! Greedy word wrapping.

use crate::model::Font;

/// Break text into lines no wider than `max_width` points.
///
/// Words are whitespace-separated and rejoined with single spaces. Each line
/// takes words while `width(line) + width(" ") + width(word)` stays within
/// `max_width`; earlier breaks are never revisited. A word wider than
/// `max_width` is placed alone on its own line and never split.
///
/// Text with no words yields no lines.
pub fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let space = font.text_width(" ", size);
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut width = -space;

    for word in text.split_whitespace() {
        let word_width = font.text_width(word, size);
        if current.is_empty() || width + space + word_width <= max_width {
            current.push(word);
            width += space + word_width;
        } else {
            lines.push(current.join(" "));
            current.clear();
            current.push(word);
            width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines
}
