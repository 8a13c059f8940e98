// Chunk: docs/chunks/utf16_offsets - UTF-16 offset translation for UTF-8 strings

//! Offset translation between UTF-16 code units and UTF-8 byte indices.
//!
//! Storage offsets throughout the crate count UTF-16 code units, while Rust
//! strings index by byte. These helpers walk a `&str` once to translate.

use crate::span::Span;

/// Returns the number of UTF-16 code units needed to encode `s`.
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Converts a UTF-16 offset into a byte offset within `s`.
///
/// Returns `None` if the offset is past the end of the string, or if it falls
/// between the two halves of a surrogate pair.
pub fn byte_offset(s: &str, utf16_offset: usize) -> Option<usize> {
    let mut units = 0;

    for (idx, ch) in s.char_indices() {
        if units == utf16_offset {
            return Some(idx);
        }
        units += ch.len_utf16();
        if units > utf16_offset {
            return None;
        }
    }

    if units == utf16_offset {
        Some(s.len())
    } else {
        None
    }
}

/// Converts a UTF-16 span into a byte range within `s`.
pub fn byte_range(s: &str, span: Span) -> Option<std::ops::Range<usize>> {
    let start = byte_offset(s, span.location)?;
    let end = start + byte_offset(&s[start..], span.length)?;
    Some(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_len_ascii() {
        assert_eq!(utf16_len("hello"), 5);
        assert_eq!(utf16_len(""), 0);
    }

    #[test]
    fn test_utf16_len_astral() {
        // U+1F600 needs a surrogate pair
        assert_eq!(utf16_len("a😀b"), 4);
        // U+00E9 is one unit but two bytes
        assert_eq!(utf16_len("é"), 1);
    }

    #[test]
    fn test_byte_offset() {
        let s = "aé😀b";
        assert_eq!(byte_offset(s, 0), Some(0));
        assert_eq!(byte_offset(s, 1), Some(1));
        assert_eq!(byte_offset(s, 2), Some(3));
        assert_eq!(byte_offset(s, 3), None); // inside the surrogate pair
        assert_eq!(byte_offset(s, 4), Some(7));
        assert_eq!(byte_offset(s, 5), Some(8));
        assert_eq!(byte_offset(s, 6), None);
    }

    #[test]
    fn test_byte_range() {
        let s = "aé😀b";
        assert_eq!(byte_range(s, Span::new(1, 3)), Some(1..7));
        assert_eq!(byte_range(s, Span::new(2, 1)), None);
        assert_eq!(byte_range(s, Span::new(5, 1)), None);
    }
}
