//! WinAnsi (PDF standard Latin) text encoding.
//!
//! The standard Type 1 fonts are referenced with `/WinAnsiEncoding`, so every
//! string drawn or measured goes through this single-byte mapping. Characters
//! outside the repertoire degrade to their compatibility decomposition when
//! that is encodable (`ﬁ` -> `fi`, `é` stays `é`, `ā` -> `a`) and to `?`
//! otherwise.

use unicode_normalization::UnicodeNormalization;

/// Byte drawn for characters with no WinAnsi representation.
pub const REPLACEMENT: u8 = b'?';

/// Map a character to its WinAnsi code, if it has one.
pub fn encode_char(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match ch {
            '\u{20AC}' => Some(0x80),
            '\u{201A}' => Some(0x82),
            '\u{0192}' => Some(0x83),
            '\u{201E}' => Some(0x84),
            '\u{2026}' => Some(0x85),
            '\u{2020}' => Some(0x86),
            '\u{2021}' => Some(0x87),
            '\u{02C6}' => Some(0x88),
            '\u{2030}' => Some(0x89),
            '\u{0160}' => Some(0x8A),
            '\u{2039}' => Some(0x8B),
            '\u{0152}' => Some(0x8C),
            '\u{017D}' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '\u{2022}' => Some(0x95),
            '\u{2013}' => Some(0x96),
            '\u{2014}' => Some(0x97),
            '\u{02DC}' => Some(0x98),
            '\u{2122}' => Some(0x99),
            '\u{0161}' => Some(0x9A),
            '\u{203A}' => Some(0x9B),
            '\u{0153}' => Some(0x9C),
            '\u{017E}' => Some(0x9E),
            '\u{0178}' => Some(0x9F),
            '\t' => Some(b' '),
            _ => None,
        },
    }
}

/// Encode text as WinAnsi bytes, degrading unsupported characters.
pub fn encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match encode_char(ch) {
            Some(byte) => out.push(byte),
            None => push_fallback(ch, &mut out),
        }
    }
    out
}

/// Check if every character of the text encodes without degradation.
pub fn is_encodable(text: &str) -> bool {
    text.chars().all(|ch| encode_char(ch).is_some())
}

fn push_fallback(ch: char, out: &mut Vec<u8>) {
    let before = out.len();
    for decomposed in std::iter::once(ch).nfkd() {
        if let Some(byte) = encode_char(decomposed) {
            out.push(byte);
        }
    }
    if out.len() == before {
        out.push(REPLACEMENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_and_latin1_are_identity() {
        assert_eq!(encode("Hello"), b"Hello".to_vec());
        assert_eq!(encode("caf\u{e9}"), vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_bullet_and_quotes() {
        assert_eq!(encode_char('\u{2022}'), Some(0x95));
        assert_eq!(encode("\u{201C}x\u{201D}"), vec![0x93, b'x', 0x94]);
    }

    #[test]
    fn test_fallback_decomposition() {
        // Latin small a with macron is not in WinAnsi; its base letter is.
        assert_eq!(encode("\u{101}"), b"a".to_vec());
        // Ligature decomposes to two letters.
        assert_eq!(encode("\u{FB01}"), b"fi".to_vec());
    }

    #[test]
    fn test_unencodable_becomes_replacement() {
        assert_eq!(encode("\u{6F22}"), vec![REPLACEMENT]);
        assert_eq!(encode("\u{1}"), vec![REPLACEMENT]);
        assert!(!is_encodable("\u{6F22}"));
        assert!(is_encodable("plain text"));
    }
}
