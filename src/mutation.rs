// Chunk: docs/chunks/mutation_model - Text mutation record and storage contract

use crate::range_mutation::RangeMutation;
use crate::span::Span;
use crate::utf16::utf16_len;

/// An immutable description of a single text replacement.
///
/// `range` is replaced by `content`. `limit` records how much of the storage
/// was known when the mutation was recorded; for a mutation drawn from a
/// storage's current state it is that storage's length, and `range.max()`
/// never exceeds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mutation {
    content: String,
    range: Span,
    limit: usize,
    /// Cached UTF-16 length of `content`.
    content_len: usize,
}

impl Mutation {
    /// Replaces `range` with `content` in a storage of length `limit`.
    pub fn new(content: impl Into<String>, range: Span, limit: usize) -> Self {
        let content = content.into();
        let content_len = utf16_len(&content);

        Self {
            content,
            range,
            limit,
            content_len,
        }
    }

    /// A pure insertion of `content` at `location`.
    pub fn insert(content: impl Into<String>, location: usize, limit: usize) -> Self {
        Self::new(content, Span::empty(location), limit)
    }

    /// A pure deletion of `range`.
    pub fn delete(range: Span, limit: usize) -> Self {
        Self::new(String::new(), range, limit)
    }

    /// The replacement text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The replaced span, in pre-edit coordinates.
    pub fn range(&self) -> Span {
        self.range
    }

    /// The storage length the mutation was made against.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Length of the replacement content in UTF-16 code units.
    pub fn content_len(&self) -> usize {
        self.content_len
    }

    /// Returns a copy of this mutation with a different limit.
    pub fn with_limit(&self, limit: usize) -> Self {
        Self {
            limit,
            ..self.clone()
        }
    }

    /// Change in storage length caused by applying this mutation.
    pub fn delta(&self) -> isize {
        self.content_len as isize - self.range.length as isize
    }

    /// Change in storage length caused by undoing this mutation.
    pub fn inverse_delta(&self) -> isize {
        -self.delta()
    }

    /// The span the content occupies once applied; an undo replaces this span.
    pub fn inverse_range(&self) -> Span {
        Span::new(self.range.location, self.content_len)
    }

    /// The range this mutation occupies in the storage after it has been applied.
    pub fn post_apply_range(&self) -> Span {
        let start = self.range.location;
        let end = (self.range.max() as isize + self.delta()) as usize;

        Span::from_bounds(start, end)
    }

    /// The positional effect of this mutation, without its content.
    pub fn range_mutation(&self) -> RangeMutation {
        RangeMutation::with_limit(self.range, self.delta(), self.limit)
    }
}
