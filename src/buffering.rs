// Chunk: docs/chunks/buffering_storage - Pending-edit history over a storage

//! A storage decorator that remembers the edits made since some point.
//!
//! While buffering is enabled, every applied mutation pushes its inverse onto
//! a queue (most recent first). The queue lets callers read the text as it
//! was before those edits ([`BufferingTextStorage::buffered_substring`]) and
//! carry ranges expressed against that older text forward into the current
//! text ([`BufferingTextStorage::transform_base_range`]).
//!
//! [`BufferingTextStorage::apply_next_change`] drops the oldest queued edit,
//! moving the "base" text forward by one edit.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::mutation::Mutation;
use crate::range_mutation::RangeMutation;
use crate::span::Span;
use crate::storing::TextStoring;

#[derive(Debug, Clone, Default)]
pub struct BufferingTextStorage<S> {
    storage: S,
    /// Inverses of applied mutations, most recent at the front.
    change_queue: VecDeque<Mutation>,
    buffering_enabled: bool,
}

impl<S: TextStoring> BufferingTextStorage<S> {
    /// Wraps `storage` with buffering disabled.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            change_queue: VecDeque::new(),
            buffering_enabled: false,
        }
    }

    /// The wrapped storage, holding the current text.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Unwraps the storage, discarding any queued history.
    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Whether applied mutations are being queued.
    pub fn buffering_enabled(&self) -> bool {
        self.buffering_enabled
    }

    /// Turns buffering on or off. Either way the queue is cleared.
    pub fn set_buffering_enabled(&mut self, enabled: bool) {
        self.buffering_enabled = enabled;
        self.clear_buffer();
    }

    /// Forgets all queued edits, making the current text the base text.
    pub fn clear_buffer(&mut self) {
        self.change_queue.clear();
    }

    /// Number of edits between the base text and the current text.
    pub fn change_count(&self) -> usize {
        self.change_queue.len()
    }

    /// Forgets the oldest queued edit, advancing the base text by one edit.
    ///
    /// Panics if buffering is disabled or nothing is queued.
    pub fn apply_next_change(&mut self) {
        self.assert_buffering("apply_next_change");

        let Some(change) = self.change_queue.pop_back() else {
            panic!("apply_next_change with no queued changes");
        };

        trace!(range = %change.range(), remaining = self.change_queue.len(), "applied queued change");
    }

    /// Length of the base text.
    pub fn buffered_length(&self) -> usize {
        self.assert_buffering("buffered_length");

        let sum: isize = self.change_queue.iter().map(Mutation::delta).sum();
        let total = self.storage.length() as isize + sum;

        assert!(total >= 0, "buffered length {} is negative", total);

        total as usize
    }

    /// Reads `range` from the base text.
    ///
    /// Only the smallest window of current text that the queued edits touch
    /// is copied and rewound. Panics if buffering is disabled or `range` lies
    /// outside the base text.
    pub fn buffered_substring(&self, range: Span) -> String {
        self.assert_buffering("buffered_substring");

        let window = self.minimum_substring_range(range);
        let offset = -(window.location as isize);

        let Some(text) = self.storage.substring(window) else {
            panic!("unable to read buffered window {}", window);
        };
        let mut scratch: Vec<u16> = text.encode_utf16().collect();

        for change in &self.change_queue {
            let shifted = shift_within(change.range(), offset, scratch.len());

            scratch.splice(shifted.range(), change.content().encode_utf16());
        }

        let requested = shift_within(range, offset, scratch.len());

        String::from_utf16(&scratch[requested.range()])
            .unwrap_or_else(|err| panic!("buffered range {} splits a character: {}", range, err))
    }

    /// The span of current text that must be read to rebuild `range` of the
    /// base text.
    fn minimum_substring_range(&self, range: Span) -> Span {
        let length = self.storage.length() as isize;
        let mut start = length;
        let mut end: isize = 0;
        let mut delta: isize = 0;

        for change in &self.change_queue {
            let change_range = change.range();

            start = start.min(change_range.location as isize);
            end = end.max(change_range.max() as isize + delta);

            delta += change.inverse_delta();
        }

        start = start.min(range.location as isize);
        end = end.max(range.max() as isize + delta);

        assert!(start >= 0, "buffered window starts at {}", start);
        assert!(
            end <= length,
            "buffered window end {} is past the storage length {}",
            end,
            length
        );
        assert!(end >= start, "buffered window end {} precedes start {}", end, start);

        Span::from_bounds(start as usize, end as usize)
    }

    /// Maps `range` from the base text into the current text.
    ///
    /// Returns `None` if any queued edit removed one of its endpoints.
    pub fn transform_base_range(&self, range: Span) -> Option<Span> {
        self.assert_buffering("transform_base_range");

        let mut transformed = range;

        // Oldest first: replay the forward edits the inverses undo.
        for change in self.change_queue.iter().rev() {
            let mutation = RangeMutation::new(change.inverse_range(), change.inverse_delta());

            let Some(next) = mutation.transform(transformed) else {
                debug!(range = %range, at = %transformed, "base range has no image");
                return None;
            };

            transformed = next;
        }

        Some(transformed)
    }

    fn assert_buffering(&self, operation: &str) {
        assert!(
            self.buffering_enabled,
            "{} requires buffering to be enabled",
            operation
        );
    }
}

/// Shifts `span` by `offset` and checks it fits in `len` units.
fn shift_within(span: Span, offset: isize, len: usize) -> Span {
    match span.shifted(offset) {
        Some(shifted) if shifted.max() <= len => shifted,
        _ => panic!(
            "range {} shifted by {} falls outside a buffer of length {}",
            span, offset, len
        ),
    }
}

impl<S: TextStoring> TextStoring for BufferingTextStorage<S> {
    fn length(&self) -> usize {
        self.storage.length()
    }

    fn substring(&self, range: Span) -> Option<String> {
        self.storage.substring(range)
    }

    fn apply_mutation(&mut self, mutation: &Mutation) {
        if self.buffering_enabled {
            let inverse = self.storage.inverse_mutation(mutation);

            trace!(range = %inverse.range(), queued = self.change_queue.len() + 1, "queued inverse");
            self.change_queue.push_front(inverse);
        }

        self.storage.apply_mutation(mutation);
    }
}
