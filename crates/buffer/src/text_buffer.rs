// Chunk: docs/chunks/text_buffer - UTF-16 gap buffer storage

//! TextBuffer: a gap buffer plus a line index, addressed in UTF-16 units.

use text_story::{Mutation, Span, StoringError, TextStoring};
use tracing::trace;

use crate::gap_buffer::GapBuffer;
use crate::line_index::LineIndex;
use crate::segmentation;
use crate::types::Position;

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

#[derive(Debug, Clone)]
pub struct TextBuffer {
    buffer: GapBuffer,
    line_index: LineIndex,
    /// Mutation counter for sampling debug assertions (debug builds only).
    #[cfg(debug_assertions)]
    debug_mutation_count: u64,
}

impl TextBuffer {
    /// An empty buffer with a single empty line.
    pub fn new() -> Self {
        Self {
            buffer: GapBuffer::new(),
            line_index: LineIndex::new(),
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        }
    }

    /// Creates a text buffer holding `content`.
    ///
    /// Not `FromStr`: building a buffer from a string cannot fail.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        let buffer = GapBuffer::from_str(content);
        let mut line_index = LineIndex::new();
        line_index.rebuild(content.encode_utf16());

        Self {
            buffer,
            line_index,
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        }
    }

    // ==================== Accessors ====================

    /// Length in UTF-16 units.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The whole buffer as a `String`.
    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    /// Always at least 1, even for an empty buffer.
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// The content of `line` without its newline, or an empty string if the
    /// line does not exist.
    pub fn line_content(&self, line: usize) -> String {
        let total_len = self.buffer.len();

        let (Some(start), Some(end)) = (
            self.line_index.line_start(line),
            self.line_index.line_end(line, total_len),
        ) else {
            return String::new();
        };

        String::from_utf16_lossy(&self.buffer.slice(start, end))
    }

    /// Length of `line` in UTF-16 units, excluding its newline.
    pub fn line_len(&self, line: usize) -> usize {
        self.line_index
            .line_len(line, self.buffer.len())
            .unwrap_or(0)
    }

    /// Converts an offset to a position, clamping it to the buffer length.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len());
        let line = self.line_index.line_at_offset(offset);
        let start = self.line_index.line_start(line).unwrap_or(0);

        Position::new(line, offset - start)
    }

    /// Converts a position to an offset, clamping the line and column.
    pub fn position_to_offset(&self, pos: Position) -> usize {
        let line = pos.line.min(self.line_count() - 1);
        let start = self.line_index.line_start(line).unwrap_or(0);

        start + pos.col.min(self.line_len(line))
    }

    // ==================== Segmentation ====================

    /// The grapheme cluster containing the unit at `offset`.
    pub fn grapheme_range_at(&self, offset: usize) -> Option<Span> {
        self.segment_at(offset, segmentation::grapheme_range)
    }

    /// The word-boundary segment containing the unit at `offset`.
    pub fn word_range_at(&self, offset: usize) -> Option<Span> {
        self.segment_at(offset, segmentation::word_range)
    }

    fn segment_at<F>(&self, offset: usize, find: F) -> Option<Span>
    where
        F: Fn(&str, usize) -> Option<(usize, usize)>,
    {
        if offset >= self.len() {
            return None;
        }

        let position = self.offset_to_position(offset);
        let line_start = offset - position.col;
        let (start, end) = find(&self.line_content(position.line), position.col)
            // the newline itself
            .unwrap_or((position.col, position.col + 1));

        Some(Span::from_bounds(line_start + start, line_start + end))
    }

    // ==================== Validation ====================

    /// Checks that `range` lies within the buffer and does not split a
    /// surrogate pair at either end.
    fn validate(&self, range: Span) -> Result<(), StoringError> {
        let length = self.len();
        if range.max() > length {
            return Err(StoringError::OutOfBounds { range, length });
        }

        let splits = |offset: usize| self.buffer.unit_at(offset).is_some_and(is_low_surrogate);
        if splits(range.location) || splits(range.max()) {
            return Err(StoringError::SplitCharacter { range });
        }

        Ok(())
    }

    /// Debug assertion: the incremental line index matches a fresh rebuild.
    ///
    /// Checks every 64th mutation. Compiled out in release builds.
    #[cfg(debug_assertions)]
    fn assert_line_index_consistent(&mut self) {
        self.debug_mutation_count += 1;
        if self.debug_mutation_count % 64 != 0 {
            return;
        }

        let mut expected = LineIndex::new();
        expected.rebuild(self.buffer.units());
        assert_eq!(
            self.line_index.line_starts(),
            expected.line_starts(),
            "line index drift after {} mutations (buffer len {})",
            self.debug_mutation_count,
            self.buffer.len(),
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_line_index_consistent(&mut self) {}

    // ==================== Mutations ====================

    /// Replaces `range` with `content`.
    ///
    /// Fails without touching the buffer if `range` is out of bounds or
    /// splits a surrogate pair.
    pub fn replace(&mut self, range: Span, content: &str) -> Result<(), StoringError> {
        self.validate(range)?;

        let units: Vec<u16> = content.encode_utf16().collect();
        if range.is_empty() && units.is_empty() {
            return Ok(());
        }

        self.buffer.replace(range.location, range.max(), &units);
        self.line_index
            .apply_edit(range.location, range.max(), &units);

        self.assert_line_index_consistent();
        trace!(range = %range, inserted = units.len(), "replaced");

        Ok(())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStoring for TextBuffer {
    fn length(&self) -> usize {
        self.len()
    }

    fn substring(&self, range: Span) -> Option<String> {
        if range.max() > self.len() {
            return None;
        }

        String::from_utf16(&self.buffer.slice(range.location, range.max())).ok()
    }

    fn apply_mutation(&mut self, mutation: &Mutation) {
        if let Err(err) = self.replace(mutation.range(), mutation.content()) {
            panic!("unable to apply mutation: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Basic Tests ====================

    #[test]
    fn test_new_empty() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_content(0), "");
    }

    #[test]
    fn test_from_str() {
        let buf = TextBuffer::from_str("hello\nworld");
        assert_eq!(buf.len(), 11);
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_content(0), "hello");
        assert_eq!(buf.line_content(1), "world");
        assert_eq!(buf.line_content(2), "");
    }

    #[test]
    fn test_len_counts_utf16_units() {
        let buf = TextBuffer::from_str("a😀\nb");
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.line_len(0), 3);
    }

    // ==================== Positions ====================

    #[test]
    fn test_offset_to_position() {
        let buf = TextBuffer::from_str("ab\ncd\n");
        assert_eq!(buf.offset_to_position(0), Position::new(0, 0));
        assert_eq!(buf.offset_to_position(2), Position::new(0, 2));
        assert_eq!(buf.offset_to_position(3), Position::new(1, 0));
        assert_eq!(buf.offset_to_position(6), Position::new(2, 0));
        assert_eq!(buf.offset_to_position(60), Position::new(2, 0));
    }

    #[test]
    fn test_position_to_offset_clamps() {
        let buf = TextBuffer::from_str("ab\ncd");
        assert_eq!(buf.position_to_offset(Position::new(1, 1)), 4);
        assert_eq!(buf.position_to_offset(Position::new(0, 9)), 2);
        assert_eq!(buf.position_to_offset(Position::new(9, 0)), 3);
    }

    // ==================== Replace ====================

    #[test]
    fn test_replace_within_line() {
        let mut buf = TextBuffer::from_str("hello\nworld");
        buf.replace(Span::new(6, 5), "there").unwrap();
        assert_eq!(buf.content(), "hello\nthere");
        assert_eq!(buf.line_count(), 2);
    }

    #[test]
    fn test_replace_joining_lines() {
        let mut buf = TextBuffer::from_str("ab\ncd\nef");
        buf.replace(Span::new(1, 3), "").unwrap();
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_content(0), "ad");
    }

    #[test]
    fn test_replace_noop() {
        let mut buf = TextBuffer::from_str("ab");
        assert_eq!(buf.replace(Span::empty(1), ""), Ok(()));
        assert_eq!(buf.content(), "ab");
    }

    #[test]
    fn test_replace_out_of_bounds() {
        let mut buf = TextBuffer::from_str("ab");
        assert_eq!(
            buf.replace(Span::new(1, 2), "x"),
            Err(StoringError::OutOfBounds {
                range: Span::new(1, 2),
                length: 2
            })
        );
        assert_eq!(buf.content(), "ab");
    }

    #[test]
    fn test_replace_splitting_surrogate_pair() {
        let mut buf = TextBuffer::from_str("a😀b");
        assert_eq!(
            buf.replace(Span::new(2, 1), ""),
            Err(StoringError::SplitCharacter {
                range: Span::new(2, 1)
            })
        );
        assert_eq!(
            buf.replace(Span::new(0, 2), ""),
            Err(StoringError::SplitCharacter {
                range: Span::new(0, 2)
            })
        );
        assert!(buf.replace(Span::new(1, 2), "").is_ok());
        assert_eq!(buf.content(), "ab");
    }

    #[test]
    fn test_many_replacements_keep_line_index_in_sync() {
        let mut buf = TextBuffer::new();
        for i in 0..200 {
            let text = if i % 7 == 0 { "\n" } else { "x" };
            buf.replace(Span::empty(buf.len() / 2), text).unwrap();
        }
        assert_eq!(buf.len(), 200);
        assert_eq!(buf.line_count(), 30);
    }

    // ==================== TextStoring ====================

    #[test]
    fn test_substring() {
        let buf = TextBuffer::from_str("a😀b");
        assert_eq!(buf.substring(Span::new(1, 2)), Some("😀".to_string()));
        assert_eq!(buf.substring(Span::new(1, 1)), None);
        assert_eq!(buf.substring(Span::new(3, 2)), None);
    }

    #[test]
    fn test_apply_mutation() {
        let mut buf = TextBuffer::from_str("hello");
        buf.apply_mutation(&Mutation::insert(" world", 5, 5));
        assert_eq!(buf.string(), "hello world");
    }

    #[test]
    #[should_panic(expected = "unable to apply mutation")]
    fn test_apply_invalid_mutation_panics() {
        let mut buf = TextBuffer::from_str("hello");
        buf.apply_mutation(&Mutation::delete(Span::new(3, 5), 5));
    }

    // ==================== Segmentation ====================

    #[test]
    fn test_grapheme_range_at() {
        let buf = TextBuffer::from_str("ab\nae\u{0301}z");
        assert_eq!(buf.grapheme_range_at(4), Some(Span::new(4, 2)));
        assert_eq!(buf.grapheme_range_at(2), Some(Span::new(2, 1)));
        assert_eq!(buf.grapheme_range_at(7), None);
    }

    #[test]
    fn test_word_range_at() {
        let buf = TextBuffer::from_str("first line\nsecond word");
        assert_eq!(buf.word_range_at(14), Some(Span::new(11, 6)));
        assert_eq!(buf.word_range_at(8), Some(Span::new(6, 4)));
        assert_eq!(buf.word_range_at(10), Some(Span::new(10, 1)));
    }
}
