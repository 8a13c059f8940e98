// Chunk: docs/chunks/monitor_protocol - Four-phase mutation notification

//! The observer side of a text storage.
//!
//! Every change reaches a monitor in four phases, always in this order:
//!
//! 1. [`TextStoringMonitor::will_apply_mutation`], before the storage changes
//! 2. [`TextStoringMonitor::did_apply_mutation`], after the storage changes
//! 3. [`TextStoringMonitor::will_complete_change_processing`]
//! 4. [`TextStoringMonitor::did_complete_change_processing`]
//!
//! The completion phases may also arrive with `None`, marking the end of a
//! batch of edits without any particular mutation attached.

use crate::mutation::Mutation;
use crate::storing::TextStoring;

pub trait TextStoringMonitor {
    fn will_apply_mutation(&mut self, mutation: &Mutation, storage: &dyn TextStoring);

    fn did_apply_mutation(&mut self, mutation: &Mutation, storage: &dyn TextStoring);

    fn will_complete_change_processing(
        &mut self,
        mutation: Option<&Mutation>,
        storage: &dyn TextStoring,
    );

    fn did_complete_change_processing(
        &mut self,
        mutation: Option<&Mutation>,
        storage: &dyn TextStoring,
    );

    /// Delivers all four phases for a mutation the storage already reflects,
    /// without touching the storage.
    fn process_mutation(&mut self, mutation: &Mutation, storage: &dyn TextStoring) {
        self.will_apply_mutation(mutation, storage);
        self.did_apply_mutation(mutation, storage);
        self.will_complete_change_processing(Some(mutation), storage);
        self.did_complete_change_processing(Some(mutation), storage);
    }

    /// Applies `mutation` to `storage`, notifying this monitor around it.
    fn apply_mutation(&mut self, mutation: &Mutation, storage: &mut dyn TextStoring) {
        self.will_apply_mutation(mutation, storage);
        storage.apply_mutation(mutation);
        self.did_apply_mutation(mutation, storage);
        self.will_complete_change_processing(Some(mutation), storage);
        self.did_complete_change_processing(Some(mutation), storage);
    }

    /// Applies each mutation in order, each one fully processed before the next.
    fn apply_mutations(&mut self, mutations: &[Mutation], storage: &mut dyn TextStoring) {
        for mutation in mutations {
            self.apply_mutation(mutation, storage);
        }
    }
}

impl<M: TextStoringMonitor + ?Sized> TextStoringMonitor for Box<M> {
    fn will_apply_mutation(&mut self, mutation: &Mutation, storage: &dyn TextStoring) {
        (**self).will_apply_mutation(mutation, storage)
    }

    fn did_apply_mutation(&mut self, mutation: &Mutation, storage: &dyn TextStoring) {
        (**self).did_apply_mutation(mutation, storage)
    }

    fn will_complete_change_processing(
        &mut self,
        mutation: Option<&Mutation>,
        storage: &dyn TextStoring,
    ) {
        (**self).will_complete_change_processing(mutation, storage)
    }

    fn did_complete_change_processing(
        &mut self,
        mutation: Option<&Mutation>,
        storage: &dyn TextStoring,
    ) {
        (**self).did_complete_change_processing(mutation, storage)
    }
}
