// Chunk: docs/chunks/mutation_model - Text mutation record and storage contract

use std::fmt;
use std::ops::Range;

/// A half-open range of UTF-16 code units, expressed as `(location, length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub location: usize,
    pub length: usize,
}

impl Span {
    /// A span of `length` units starting at `location`.
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// A zero-length span at `location`.
    pub const fn empty(location: usize) -> Self {
        Self::new(location, 0)
    }

    /// Builds a span from `start..end`.
    ///
    /// Panics if `end < start`.
    pub fn from_bounds(start: usize, end: usize) -> Self {
        assert!(end >= start, "span end {} precedes start {}", end, start);
        Self::new(start, end - start)
    }

    /// The exclusive end offset.
    pub const fn max(&self) -> usize {
        self.location + self.length
    }

    /// Returns true for zero-length spans, which mark a position.
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns true if `location` falls within `[location, max)`.
    pub fn contains(&self, location: usize) -> bool {
        location >= self.location && location < self.max()
    }

    /// Moves the span by a signed offset, keeping its length.
    ///
    /// Returns `None` if the new location would be negative.
    pub fn shifted(&self, offset: isize) -> Option<Span> {
        let location = self.location.checked_add_signed(offset)?;
        Some(Span::new(location, self.length))
    }

    /// The span as `location..max()`, for slicing.
    pub fn range(&self) -> Range<usize> {
        self.location..self.max()
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::from_bounds(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.range()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.location, self.max())
    }
}
