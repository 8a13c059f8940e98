// Chunk: docs/chunks/storage_adapter - Closure-backed storage

use std::fmt;

use crate::mutation::Mutation;
use crate::span::Span;
use crate::storing::TextStoring;

/// A [`TextStoring`] whose operations are supplied as closures.
///
/// Useful for exposing some other owner's text (a widget, a shared handle) to
/// the monitor machinery without writing a dedicated type.
pub struct TextStorageAdapter<L, S, A> {
    length_provider: L,
    substring_provider: S,
    mutation_applier: A,
}

impl<L, S, A> TextStorageAdapter<L, S, A>
where
    L: Fn() -> usize,
    S: Fn(Span) -> Option<String>,
    A: FnMut(&Mutation),
{
    pub fn new(length_provider: L, substring_provider: S, mutation_applier: A) -> Self {
        Self {
            length_provider,
            substring_provider,
            mutation_applier,
        }
    }
}

impl<L, S, A> fmt::Debug for TextStorageAdapter<L, S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextStorageAdapter").finish_non_exhaustive()
    }
}

impl<L, S, A> TextStoring for TextStorageAdapter<L, S, A>
where
    L: Fn() -> usize,
    S: Fn(Span) -> Option<String>,
    A: FnMut(&Mutation),
{
    fn length(&self) -> usize {
        (self.length_provider)()
    }

    fn substring(&self, range: Span) -> Option<String> {
        (self.substring_provider)(range)
    }

    fn apply_mutation(&mut self, mutation: &Mutation) {
        (self.mutation_applier)(mutation)
    }
}
