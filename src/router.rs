// Chunk: docs/chunks/event_router - Storage callbacks packaged as mutations

//! Bridges raw replace callbacks from a storage into the monitor protocol.
//!
//! A storage that reports "will replace `range` with `content`" and "did
//! replace" around each edit, followed by end-of-edit notifications, can drive
//! any number of [`TextStoringMonitor`]s through a [`MutationEventRouter`].
//! [`MonitoredTextStorage`] wires a storage and a router together so that every
//! applied mutation emits those callbacks.

use tracing::trace;

use crate::composite::CompositeTextStoringMonitor;
use crate::monitor::TextStoringMonitor;
use crate::mutation::Mutation;
use crate::span::Span;
use crate::storing::TextStoring;

#[derive(Debug, Default)]
pub struct MutationEventRouter {
    monitor: CompositeTextStoringMonitor,
    pending_mutation: Option<Mutation>,
}

impl MutationEventRouter {
    /// A router with no monitors.
    pub fn new() -> Self {
        Self::default()
    }

    /// A router notifying `monitors` in the given order.
    pub fn with_monitors(monitors: Vec<Box<dyn TextStoringMonitor>>) -> Self {
        Self {
            monitor: CompositeTextStoringMonitor::with_monitors(monitors),
            pending_mutation: None,
        }
    }

    /// The monitors every phase is delivered to.
    pub fn monitors(&self) -> &CompositeTextStoringMonitor {
        &self.monitor
    }

    pub fn monitors_mut(&mut self) -> &mut CompositeTextStoringMonitor {
        &mut self.monitor
    }

    /// True between `will_replace_characters` and `did_complete_processing_edit`.
    pub fn processing_text_change(&self) -> bool {
        self.pending_mutation.is_some()
    }

    /// The edit currently being processed, if any.
    pub fn pending_mutation(&self) -> Option<&Mutation> {
        self.pending_mutation.as_ref()
    }

    /// Called before `storage` replaces `range` with `content`.
    ///
    /// Panics if another change is still being processed.
    pub fn will_replace_characters(&mut self, storage: &dyn TextStoring, range: Span, content: &str) {
        assert!(
            !self.processing_text_change(),
            "must not be processing a text change when another is begun"
        );

        let mutation = Mutation::new(content, range, storage.length());
        trace!(range = %range, "will replace characters");

        self.monitor.will_apply_mutation(&mutation, storage);
        self.pending_mutation = Some(mutation);
    }

    /// Called after `storage` replaced `range` with `content`.
    ///
    /// Panics unless this matches the pending change.
    pub fn did_replace_characters(&mut self, storage: &dyn TextStoring, range: Span, content: &str) {
        // The storage length already includes this edit.
        let probe = Mutation::new(content, range, 0);
        let limit = storage.length() as isize - probe.delta();
        let mutation = probe.with_limit(limit as usize);

        assert!(
            self.pending_mutation.as_ref() == Some(&mutation),
            "did replace {:?} does not match pending {:?}",
            mutation,
            self.pending_mutation
        );
        trace!(range = %range, "did replace characters");

        self.monitor.did_apply_mutation(&mutation, storage);
    }

    /// Delivers `will_complete` for the pending edit, or a barrier if none is
    /// pending.
    pub fn will_complete_processing_edit(&mut self, storage: &dyn TextStoring) {
        self.monitor
            .will_complete_change_processing(self.pending_mutation.as_ref(), storage);
    }

    /// Delivers `did_complete` and clears the pending edit.
    pub fn did_complete_processing_edit(&mut self, storage: &dyn TextStoring) {
        self.monitor
            .did_complete_change_processing(self.pending_mutation.as_ref(), storage);

        self.pending_mutation = None;
    }
}

/// A storage that notifies a router around every applied mutation.
#[derive(Debug, Default)]
pub struct MonitoredTextStorage<S> {
    storage: S,
    router: MutationEventRouter,
}

impl<S: TextStoring> MonitoredTextStorage<S> {
    /// Wraps `storage` with a router that has no monitors yet.
    pub fn new(storage: S) -> Self {
        Self::with_router(storage, MutationEventRouter::new())
    }

    /// Wraps `storage`, routing its edits through `router`.
    pub fn with_router(storage: S, router: MutationEventRouter) -> Self {
        Self { storage, router }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn router(&self) -> &MutationEventRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut MutationEventRouter {
        &mut self.router
    }

    /// Unwraps the storage. No barrier is sent.
    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Sends both completion phases with no mutation attached, marking the
    /// end of a batch of edits.
    pub fn end_editing(&mut self) {
        self.router.will_complete_processing_edit(&self.storage);
        self.router.did_complete_processing_edit(&self.storage);
    }
}

impl<S: TextStoring> TextStoring for MonitoredTextStorage<S> {
    fn length(&self) -> usize {
        self.storage.length()
    }

    fn substring(&self, range: Span) -> Option<String> {
        self.storage.substring(range)
    }

    fn apply_mutation(&mut self, mutation: &Mutation) {
        let range = mutation.range();
        let content = mutation.content();

        self.router.will_replace_characters(&self.storage, range, content);
        self.storage.apply_mutation(mutation);
        self.router.did_replace_characters(&self.storage, range, content);
        self.router.will_complete_processing_edit(&self.storage);
        self.router.did_complete_processing_edit(&self.storage);
    }
}
