// Chunk: docs/chunks/storing_ranges - Line and whitespace range queries

//! Line and whitespace queries available on every [`TextStoring`].
//!
//! These read the storage one UTF-16 unit at a time, so they suit short scans
//! around a location (the current line, indentation) rather than whole-text
//! searches.

use crate::span::Span;
use crate::storing::TextStoring;

/// Characters that terminate a line.
pub fn is_newline(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

pub fn is_whitespace_or_newline(ch: char) -> bool {
    ch.is_whitespace() || is_newline(ch)
}

pub trait TextStoringRanges: TextStoring {
    /// Reads the single UTF-16 unit at `location` as a character.
    ///
    /// Halves of surrogate pairs have no character of their own.
    fn unit_char_at(&self, location: usize) -> Option<char> {
        self.substring(Span::new(location, 1))?.chars().next()
    }

    /// Scans backwards from just before `location` for a unit matching
    /// `predicate`, returning the offset just past the match, or 0.
    fn find_preceding_occurrence<P>(&self, location: usize, predicate: P) -> usize
    where
        P: Fn(char) -> bool,
    {
        let length = self.length();
        let mut check = (location as isize - 1).min(length as isize - 1);

        while check >= 0 {
            if self.unit_char_at(check as usize).is_some_and(&predicate) {
                return check as usize + 1;
            }
            check -= 1;
        }

        0
    }

    /// Scans forwards from `location` for a unit matching `predicate`.
    fn find_next_occurrence<P>(&self, location: usize, predicate: P) -> Option<usize>
    where
        P: Fn(char) -> bool,
    {
        (location..self.length()).find(|&check| self.unit_char_at(check).is_some_and(&predicate))
    }

    fn find_start_of_line(&self, location: usize) -> usize {
        self.find_preceding_occurrence(location, is_newline)
    }

    /// The offset just past the line terminator of the line containing
    /// `location`, or the storage length for the last line.
    fn find_end_of_line(&self, location: usize) -> usize {
        let length = self.length();
        let newline = self.find_next_occurrence(location, is_newline).unwrap_or(length);

        (newline + 1).min(length)
    }

    /// The full line containing `location`, including its terminator.
    fn line_range(&self, location: usize) -> Span {
        let start = self.find_start_of_line(location);
        let end = self.find_end_of_line(location);

        Span::from_bounds(start, end)
    }

    /// The prefix of `range` made up of characters matching `predicate`.
    fn leading_range<P>(&self, range: Span, predicate: P) -> Option<Span>
    where
        P: Fn(char) -> bool,
    {
        let text = self.substring(range)?;

        let mut offset = 0;
        for ch in text.chars() {
            if !predicate(ch) {
                return Some(Span::new(range.location, offset));
            }
            offset += ch.len_utf16();
        }

        Some(range)
    }

    /// The suffix of `range` made up of characters matching `predicate`.
    fn trailing_range<P>(&self, range: Span, predicate: P) -> Option<Span>
    where
        P: Fn(char) -> bool,
    {
        let text = self.substring(range)?;

        let mut offset = range.length;
        for ch in text.chars().rev() {
            if !predicate(ch) {
                return Some(Span::new(range.location + offset, range.length - offset));
            }
            offset -= ch.len_utf16();
        }

        Some(range)
    }

    fn leading_whitespace_range(&self, range: Span) -> Option<Span> {
        self.leading_range(range, is_whitespace_or_newline)
    }

    fn trailing_whitespace_range(&self, range: Span) -> Option<Span> {
        self.trailing_range(range, is_whitespace_or_newline)
    }

    /// Indentation of the line containing `location`, up to `location`.
    fn leading_whitespace_range_containing(&self, location: usize) -> Option<Span> {
        let line_start = self.find_start_of_line(location);

        self.leading_whitespace_range(Span::from_bounds(line_start, location))
    }
}

impl<T: TextStoring + ?Sized> TextStoringRanges for T {}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Lines ====================

    #[test]
    fn test_line_ranges() {
        let storage = String::from("abc\ndef");

        assert_eq!(storage.line_range(0), Span::from(0..4));
        assert_eq!(storage.line_range(4), Span::from(4..7));
        assert_eq!(storage.line_range(7), Span::from(4..7));
    }

    #[test]
    fn test_line_ranges_of_empty_string() {
        let storage = String::new();

        assert_eq!(storage.line_range(0), Span::from(0..0));
    }

    #[test]
    fn test_line_range_with_crlf() {
        let storage = String::from("ab\r\ncd");

        assert_eq!(storage.find_end_of_line(0), 3);
        assert_eq!(storage.find_start_of_line(5), 4);
    }

    #[test]
    fn test_find_next_occurrence_misses() {
        let storage = String::from("abc");
        assert_eq!(storage.find_next_occurrence(0, is_newline), None);
    }

    // ==================== Whitespace ====================

    #[test]
    fn test_trailing_whitespace_with_spaces() {
        let storage = String::from("trailing\n    abc");

        assert_eq!(
            storage.trailing_whitespace_range(Span::from(0..13)),
            Some(Span::from(8..13))
        );
    }

    #[test]
    fn test_leading_whitespace_with_two_newlines() {
        let storage = String::from("abc\n\ndef");

        assert_eq!(
            storage.leading_whitespace_range(Span::from(3..8)),
            Some(Span::from(3..5))
        );
    }

    #[test]
    fn test_leading_whitespace_with_tab() {
        let storage = String::from("these\n\tare\n    some\n lines");

        assert_eq!(
            storage.leading_whitespace_range(Span::new(6, 4)),
            Some(Span::new(6, 1))
        );
    }

    #[test]
    fn test_leading_whitespace_with_no_whitespace() {
        let storage = String::from("these\n\tare\n    some\n lines");

        assert_eq!(
            storage.leading_whitespace_range(Span::new(0, 6)),
            Some(Span::new(0, 0))
        );
    }

    #[test]
    fn test_leading_whitespace_with_spaces() {
        let storage = String::from("these\n\tare\n    some\n lines");

        assert_eq!(
            storage.leading_whitespace_range(Span::new(11, 9)),
            Some(Span::new(11, 4))
        );
    }

    #[test]
    fn test_all_whitespace_range() {
        let storage = String::from("a   ");

        assert_eq!(
            storage.trailing_whitespace_range(Span::new(1, 3)),
            Some(Span::new(1, 3))
        );
        assert_eq!(
            storage.leading_whitespace_range(Span::new(1, 3)),
            Some(Span::new(1, 3))
        );
    }

    #[test]
    fn test_leading_whitespace_containing_location() {
        let storage = String::from("fn main() {\n    let x = 1;\n}");

        assert_eq!(
            storage.leading_whitespace_range_containing(20),
            Some(Span::new(12, 4))
        );
    }

    #[test]
    fn test_out_of_bounds_range() {
        let storage = String::from("abc");
        assert_eq!(storage.leading_whitespace_range(Span::new(2, 5)), None);
    }
}
