// Chunk: docs/chunks/mutation_model - Text mutation record and storage contract

//! The minimal capability contract every backing text store satisfies.
//!
//! Implementors provide three operations: [`TextStoring::length`],
//! [`TextStoring::substring`] and [`TextStoring::apply_mutation`]. Everything
//! else (replacement helpers, inverse computation, batched application) is
//! built on top of those.

use crate::mutation::Mutation;
use crate::span::Span;
use crate::utf16::{byte_range, utf16_len};

/// A recoverable failure reading from or writing to a text store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoringError {
    #[error("range {range} exceeds storage length {length}")]
    OutOfBounds { range: Span, length: usize },
    #[error("range {range} splits a UTF-16 surrogate pair")]
    SplitCharacter { range: Span },
}

/// A mutable text store indexed by UTF-16 code units.
pub trait TextStoring {
    /// Returns the UTF-16 length of the stored text.
    fn length(&self) -> usize;

    /// Returns the text within `range`, or `None` if the range extends past
    /// the end of the storage or cannot be decoded.
    fn substring(&self, range: Span) -> Option<String>;

    /// Replaces `mutation.range()` with `mutation.content()`.
    fn apply_mutation(&mut self, mutation: &Mutation);

    fn replace_string(&mut self, range: Span, content: &str) {
        let mutation = Mutation::new(content, range, self.length());

        self.apply_mutation(&mutation);
    }

    fn insert_string(&mut self, content: &str, location: usize) {
        let mutation = Mutation::insert(content, location, self.length());

        self.apply_mutation(&mutation);
    }

    /// The span from 0 to the storage length.
    fn full_range(&self) -> Span {
        Span::new(0, self.length())
    }

    /// The entire stored text.
    fn string(&self) -> String {
        self.try_substring(self.full_range())
            .unwrap_or_else(|err| panic!("unable to read the full range: {}", err))
    }

    /// Checked form of [`TextStoring::substring`].
    fn try_substring(&self, range: Span) -> Result<String, StoringError> {
        let length = self.length();
        if range.max() > length {
            return Err(StoringError::OutOfBounds { range, length });
        }

        self.substring(range)
            .ok_or(StoringError::SplitCharacter { range })
    }

    /// Computes the mutation that undoes `mutation`.
    ///
    /// Must be called before `mutation` is applied: the replaced text is read
    /// from the current contents. Panics if `mutation.range()` cannot be read.
    fn inverse_mutation(&self, mutation: &Mutation) -> Mutation {
        let original = self
            .try_substring(mutation.range())
            .unwrap_or_else(|err| panic!("range invalid for inverse mutation: {}", err));

        let limit = (self.length() as isize - mutation.inverse_delta()) as usize;

        Mutation::new(original, mutation.inverse_range(), limit)
    }

    /// Applies a batch of mutations expressed against the same base text.
    ///
    /// The batch is sorted by location and applied back to front, so applying
    /// one never shifts the offsets of those still pending.
    fn apply_mutations(&mut self, mutations: &[Mutation]) {
        let mut sorted: Vec<&Mutation> = mutations.iter().collect();
        sorted.sort_by_key(|mutation| mutation.range().location);

        for mutation in sorted.into_iter().rev() {
            self.apply_mutation(mutation);
        }
    }
}

impl<T: TextStoring + ?Sized> TextStoring for Box<T> {
    fn length(&self) -> usize {
        (**self).length()
    }

    fn substring(&self, range: Span) -> Option<String> {
        (**self).substring(range)
    }

    fn apply_mutation(&mut self, mutation: &Mutation) {
        (**self).apply_mutation(mutation)
    }
}

/// Plain strings, indexed by UTF-16 offsets.
///
/// Every operation walks the string to translate offsets, so this is meant
/// for small texts and tests rather than as an editing buffer.
impl TextStoring for String {
    fn length(&self) -> usize {
        utf16_len(self)
    }

    fn substring(&self, range: Span) -> Option<String> {
        let bytes = byte_range(self, range)?;
        Some(self[bytes].to_string())
    }

    fn apply_mutation(&mut self, mutation: &Mutation) {
        let Some(bytes) = byte_range(self, mutation.range()) else {
            panic!(
                "mutation range {} is invalid for a string of length {}",
                mutation.range(),
                self.length()
            );
        };

        self.replace_range(bytes, mutation.content());
    }
}
