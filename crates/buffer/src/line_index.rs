// Chunk: docs/chunks/text_buffer - UTF-16 gap buffer storage

//! Line start offsets, in UTF-16 units.
//!
//! Lines are terminated by `\n` only. A `\r` before it stays part of the line
//! content.

const NEWLINE: u16 = b'\n' as u16;

#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Offset of the first unit of each line. `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new() -> Self {
        Self {
            line_starts: vec![0],
        }
    }

    /// Rebuilds the whole index from `units`.
    pub fn rebuild<I>(&mut self, units: I)
    where
        I: IntoIterator<Item = u16>,
    {
        self.line_starts.clear();
        self.line_starts.push(0);

        for (offset, unit) in units.into_iter().enumerate() {
            if unit == NEWLINE {
                self.line_starts.push(offset + 1);
            }
        }
    }

    /// Always at least 1.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Offset of the line's newline, or `total_len` for the last line.
    pub fn line_end(&self, line: usize, total_len: usize) -> Option<usize> {
        if line >= self.line_count() {
            return None;
        }

        match self.line_starts.get(line + 1) {
            Some(next) => Some(next - 1),
            None => Some(total_len),
        }
    }

    /// Length of the line excluding its newline.
    pub fn line_len(&self, line: usize, total_len: usize) -> Option<usize> {
        let start = self.line_start(line)?;
        let end = self.line_end(line, total_len)?;
        Some(end - start)
    }

    /// The line containing `offset`.
    pub fn line_at_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// Updates the index for `start..end` being replaced by `inserted`.
    pub fn apply_edit(&mut self, start: usize, end: usize, inserted: &[u16]) {
        let delta = inserted.len() as isize - (end - start) as isize;

        // Line starts in (start, end] follow a removed newline.
        let first_removed = self.line_starts.partition_point(|&s| s <= start);
        let first_kept = self.line_starts.partition_point(|&s| s <= end);

        let added: Vec<usize> = inserted
            .iter()
            .enumerate()
            .filter(|(_, &unit)| unit == NEWLINE)
            .map(|(i, _)| start + i + 1)
            .collect();

        for line_start in &mut self.line_starts[first_kept..] {
            *line_start = line_start.wrapping_add_signed(delta);
        }

        self.line_starts.splice(first_removed..first_kept, added);
    }

    #[cfg(any(debug_assertions, test))]
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
