// Chunk: docs/chunks/text_buffer - UTF-16 gap buffer storage

/// A `(line, col)` position, both 0-indexed. `col` counts UTF-16 units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}
