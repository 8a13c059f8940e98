// Chunk: docs/chunks/text_buffer - UTF-16 gap buffer storage

//! Gap buffer of UTF-16 code units.
//!
//! Storage is laid out as `[front | gap | back]`. A replacement first seeks
//! the gap to the start of the replaced range, then widens the gap over the
//! removed units and writes the new units into its front. Seeking costs the
//! distance moved, so edits clustered together stay cheap.

use std::ops::Range;

/// Spare slots reserved by a fresh buffer.
const MIN_GAP: usize = 64;

#[derive(Debug, Clone)]
pub struct GapBuffer {
    slots: Vec<u16>,
    /// Unused slots. `gap.start` is also the logical position of the gap.
    gap: Range<usize>,
}

impl GapBuffer {
    pub fn new() -> Self {
        Self::from_units(Vec::new())
    }

    /// A buffer holding `text`, with the gap after it.
    pub fn from_str(text: &str) -> Self {
        Self::from_units(text.encode_utf16().collect())
    }

    fn from_units(mut slots: Vec<u16>) -> Self {
        let used = slots.len();
        slots.resize(used + MIN_GAP, 0);

        Self {
            gap: used..slots.len(),
            slots,
        }
    }

    /// Stored units, not counting the gap.
    pub fn len(&self) -> usize {
        self.slots.len() - self.gap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    pub fn gap_position(&self) -> usize {
        self.gap.start
    }

    /// Moves the gap so that `offset` logical units precede it.
    pub fn move_gap_to(&mut self, offset: usize) {
        let offset = offset.min(self.len());

        match offset.cmp(&self.gap.start) {
            std::cmp::Ordering::Less => {
                // Slide front[offset..] to the far side of the gap.
                let count = self.gap.start - offset;
                let dest = self.gap.end - count;
                self.slots.copy_within(offset..self.gap.start, dest);
                self.gap = offset..dest;
            }
            std::cmp::Ordering::Greater => {
                let count = offset - self.gap.start;
                let source = self.gap.end..self.gap.end + count;
                self.slots.copy_within(source, self.gap.start);
                self.gap = offset..self.gap.end + count;
            }
            std::cmp::Ordering::Equal => {}
        }
    }

    /// Makes room for at least `wanted` units in the gap.
    ///
    /// The storage at least doubles when it has to grow. The gap start stays
    /// where it is.
    fn reserve(&mut self, wanted: usize) {
        if self.gap.len() >= wanted {
            return;
        }

        let old_size = self.slots.len();
        let back = old_size - self.gap.end;
        let new_size = (old_size + wanted - self.gap.len()).max(old_size * 2).max(MIN_GAP);

        self.slots.resize(new_size, 0);
        self.slots.copy_within(self.gap.end..old_size, new_size - back);
        self.gap.end = new_size - back;
    }

    /// Replaces the units in `start..end` with `units`.
    ///
    /// The range is clamped to the buffer; callers validate it beforehand.
    pub fn replace(&mut self, start: usize, end: usize, units: &[u16]) {
        let end = end.min(self.len());
        let start = start.min(end);

        self.move_gap_to(start);
        self.gap.end += end - start;

        self.reserve(units.len());
        let write = self.gap.start..self.gap.start + units.len();
        self.slots[write].copy_from_slice(units);
        self.gap.start += units.len();
    }

    fn physical(&self, offset: usize) -> usize {
        if offset < self.gap.start {
            offset
        } else {
            offset + self.gap.len()
        }
    }

    pub fn unit_at(&self, offset: usize) -> Option<u16> {
        (offset < self.len()).then(|| self.slots[self.physical(offset)])
    }

    /// All units in logical order.
    pub fn units(&self) -> impl Iterator<Item = u16> + '_ {
        let (front, rest) = self.slots.split_at(self.gap.start);
        front.iter().chain(&rest[self.gap.len()..]).copied()
    }

    /// Copies out `start..end`, clamped to the buffer.
    pub fn slice(&self, start: usize, end: usize) -> Vec<u16> {
        let end = end.min(self.len());
        let start = start.min(end);
        let split = self.gap.start.clamp(start, end);

        let mut out = Vec::with_capacity(end - start);
        out.extend_from_slice(&self.slots[start..split]);
        out.extend_from_slice(&self.slots[self.physical(split)..self.physical(split) + (end - split)]);
        out
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        char::decode_utf16(self.units())
            .map(|ch| ch.unwrap_or(char::REPLACEMENT_CHARACTER))
            .try_for_each(|ch| write!(f, "{}", ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_empty_buffer() {
        let buf = GapBuffer::default();
        assert!(buf.is_empty());
        assert_eq!(buf.unit_at(0), None);
        assert_eq!(buf.to_string(), "");
    }

    #[test]
    fn test_length_is_in_utf16_units() {
        let buf = GapBuffer::from_str("a😀");
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.to_string(), "a😀");
    }

    // ==================== Replace ====================

    #[test]
    fn test_insert_leaves_gap_after_insertion() {
        let mut buf = GapBuffer::from_str("ac");
        buf.replace(1, 1, &units("b"));
        assert_eq!(buf.to_string(), "abc");
        assert_eq!(buf.gap_position(), 2);
    }

    #[test]
    fn test_delete_widens_gap() {
        let mut buf = GapBuffer::from_str("abcdef");
        buf.replace(1, 4, &[]);
        assert_eq!(buf.to_string(), "aef");
        assert_eq!(buf.gap_position(), 1);
    }

    #[test]
    fn test_replace_with_different_lengths() {
        let mut buf = GapBuffer::from_str("one two three");
        buf.replace(4, 7, &units("2"));
        buf.replace(0, 3, &units("uno"));
        buf.replace(6, 11, &units("tres!"));
        assert_eq!(buf.to_string(), "uno 2 tres!");
    }

    #[test]
    fn test_out_of_range_replace_is_clamped() {
        let mut buf = GapBuffer::from_str("abc");
        buf.replace(10, 20, &units("d"));
        assert_eq!(buf.to_string(), "abcd");
    }

    #[test]
    fn test_large_insert_keeps_back_half() {
        let mut buf = GapBuffer::from_str("[]");
        let filler = vec![b'.' as u16; 300];

        buf.replace(1, 1, &filler);

        assert_eq!(buf.len(), 302);
        assert_eq!(buf.unit_at(0), Some(b'[' as u16));
        assert_eq!(buf.unit_at(301), Some(b']' as u16));
    }

    #[test]
    fn test_typing_backwards() {
        let mut buf = GapBuffer::new();
        for ch in "zyxw".encode_utf16() {
            buf.replace(0, 0, &[ch]);
        }
        assert_eq!(buf.to_string(), "wxyz");
    }

    // ==================== Reads ====================

    #[test]
    fn test_gap_moves_preserve_content() {
        let mut buf = GapBuffer::from_str("0123456789");

        for offset in [7, 2, 10, 0, 5] {
            buf.move_gap_to(offset);
            assert_eq!(buf.gap_position(), offset);
            assert_eq!(buf.to_string(), "0123456789");
        }
    }

    #[test]
    fn test_unit_at_either_side_of_gap() {
        let mut buf = GapBuffer::from_str("wxyz");
        buf.move_gap_to(2);
        assert_eq!(buf.unit_at(1), Some(b'x' as u16));
        assert_eq!(buf.unit_at(2), Some(b'y' as u16));
        assert_eq!(buf.unit_at(4), None);
    }

    #[test]
    fn test_slice_spanning_gap() {
        let mut buf = GapBuffer::from_str("hello world");
        buf.move_gap_to(4);
        assert_eq!(buf.slice(0, 5), units("hello"));
        assert_eq!(buf.slice(2, 4), units("ll"));
        assert_eq!(buf.slice(6, 11), units("world"));
        assert_eq!(buf.slice(9, 20), units("ld"));
        assert!(buf.slice(5, 5).is_empty());
    }
}
