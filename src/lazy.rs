// Chunk: docs/chunks/lazy_monitor - Progressive reveal of storage contents

//! A monitor wrapper that reveals storage contents progressively.
//!
//! The wrapped monitor starts out believing the storage is empty. Content is
//! revealed to it as synthetic insertions at the *watermark* (the maximum
//! processed location), either on demand through the `ensure_*` pumps or
//! because a real edit touched text past the watermark.
//!
//! Real edits are forwarded with their `limit` clamped to the watermark, so the
//! wrapped monitor never sees a mutation claiming knowledge of text it has not
//! been shown.

use tracing::{debug, trace};

use crate::monitor::TextStoringMonitor;
use crate::mutation::Mutation;
use crate::span::Span;
use crate::storing::TextStoring;

/// Default number of UTF-16 units revealed per catch-up.
pub const DEFAULT_MINIMUM_DELTA: usize = 1024;

/// Tuning for [`LazyTextStoringMonitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LazyMonitorConfig {
    /// The smallest chunk revealed by a catch-up, in UTF-16 units.
    pub minimum_delta: usize,
    /// When set, edits starting past the watermark are not forwarded at all.
    pub ignore_unprocessed_mutations: bool,
}

impl Default for LazyMonitorConfig {
    fn default() -> Self {
        Self {
            minimum_delta: DEFAULT_MINIMUM_DELTA,
            ignore_unprocessed_mutations: false,
        }
    }
}

/// Where the wrapper is within the four phases of a real edit.
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    /// The edit lies past the watermark and is being swallowed.
    Ignored,
    Applying { actual: Mutation, effective: Mutation },
    Applied { actual: Mutation, effective: Mutation },
}

/// Forwards edits to a wrapped monitor as though the storage only held the
/// text before its watermark.
///
/// Text past the watermark is revealed in chunks of at least `minimum_delta`
/// units, each delivered as an insertion at the watermark. An edit reaching
/// past the watermark first reveals everything it touches.
#[derive(Debug)]
pub struct LazyTextStoringMonitor<M> {
    monitor: M,
    maximum_processed_location: usize,
    config: LazyMonitorConfig,
    state: State,
}

impl<M: TextStoringMonitor> LazyTextStoringMonitor<M> {
    /// Wraps `monitor` with the default config. Nothing is revealed yet.
    pub fn new(monitor: M) -> Self {
        Self::with_config(monitor, LazyMonitorConfig::default())
    }

    /// Wraps `monitor` with the watermark at 0.
    pub fn with_config(monitor: M, config: LazyMonitorConfig) -> Self {
        Self {
            monitor,
            maximum_processed_location: 0,
            config,
            state: State::Idle,
        }
    }

    /// The wrapped monitor.
    pub fn monitor(&self) -> &M {
        &self.monitor
    }

    pub fn monitor_mut(&mut self) -> &mut M {
        &mut self.monitor
    }

    /// Unwraps the monitor, dropping the watermark.
    pub fn into_inner(self) -> M {
        self.monitor
    }

    /// The watermark: everything before it has been revealed.
    pub fn maximum_processed_location(&self) -> usize {
        self.maximum_processed_location
    }

    /// The current tuning.
    pub fn config(&self) -> LazyMonitorConfig {
        self.config
    }

    /// The smallest number of units a catch-up reveals.
    pub fn minimum_delta(&self) -> usize {
        self.config.minimum_delta
    }

    /// Takes effect on the next catch-up.
    pub fn set_minimum_delta(&mut self, minimum_delta: usize) {
        self.config.minimum_delta = minimum_delta;
    }

    /// Whether edits starting past the watermark are swallowed instead of
    /// revealing text up to them.
    pub fn ignore_unprocessed_mutations(&self) -> bool {
        self.config.ignore_unprocessed_mutations
    }

    pub fn set_ignore_unprocessed_mutations(&mut self, ignore: bool) {
        self.config.ignore_unprocessed_mutations = ignore;
    }

    /// Returns false only for edits that would be swallowed: those starting
    /// past the watermark while `ignore_unprocessed_mutations` is set.
    pub fn needs_to_process_mutation(&self, range: Span) -> bool {
        if !self.config.ignore_unprocessed_mutations {
            return true;
        }

        range.location <= self.maximum_processed_location
    }

    /// Reveals content until the watermark reaches at least `location`.
    ///
    /// At least `minimum_delta` units are revealed at once, capped at the
    /// storage length. Panics if `location` is past the end of the storage or
    /// if called while an edit is in flight.
    pub fn ensure_text_processed_up_to(&mut self, location: usize, storage: &dyn TextStoring) {
        self.assert_idle();

        let length = storage.length();
        let start = self.maximum_processed_location;

        assert!(
            location <= length,
            "location {} is past the storage length {}",
            location,
            length
        );
        assert!(
            start <= length,
            "watermark {} is past the storage length {}",
            start,
            length
        );

        if location <= start {
            return;
        }

        let usable = (location - start).max(self.config.minimum_delta);
        let end = (start + usable).min(length);
        let (range, content) = read_catch_up(storage, start, end);

        debug!(range = %range, "revealing unprocessed text");

        // The limit is what had been revealed before this insertion.
        let mutation = Mutation::insert(content, start, start);

        self.monitor.will_apply_mutation(&mutation, storage);
        self.monitor.did_apply_mutation(&mutation, storage);
        self.adjust_maximum(&mutation, storage);
        self.monitor.will_complete_change_processing(Some(&mutation), storage);
        self.monitor.did_complete_change_processing(Some(&mutation), storage);
    }

    /// Reveals content through the unit at `location`.
    pub fn ensure_text_processed_including(&mut self, location: usize, storage: &dyn TextStoring) {
        let length = storage.length();
        assert!(
            location <= length,
            "location {} is past the storage length {}",
            location,
            length
        );

        self.ensure_text_processed_up_to((location + 1).min(length), storage);
    }

    /// Reveals everything up to the end of `storage`.
    pub fn ensure_all_text_processed(&mut self, storage: &dyn TextStoring) {
        self.ensure_text_processed_up_to(storage.length(), storage);
    }

    /// Reveals the next chunk, returning false if everything is revealed.
    pub fn process_next_delta_if_needed(&mut self, storage: &dyn TextStoring) -> bool {
        if self.maximum_processed_location >= storage.length() {
            return false;
        }

        // Including the watermark itself falls back to minimum_delta.
        self.ensure_text_processed_including(self.maximum_processed_location, storage);

        true
    }

    fn effective_mutation(&self, mutation: &Mutation) -> Mutation {
        mutation.with_limit(mutation.limit().min(self.maximum_processed_location))
    }

    fn adjust_maximum(&mut self, mutation: &Mutation, storage: &dyn TextStoring) {
        assert!(
            self.maximum_processed_location <= mutation.limit(),
            "watermark {} is past the mutation limit {}",
            self.maximum_processed_location,
            mutation.limit()
        );

        let Some(watermark) = self
            .maximum_processed_location
            .checked_add_signed(mutation.delta())
        else {
            panic!(
                "mutation {:?} moves the watermark {} below zero",
                mutation, self.maximum_processed_location
            );
        };

        assert!(
            watermark <= storage.length(),
            "watermark {} is past the storage length {}",
            watermark,
            storage.length()
        );

        trace!(from = self.maximum_processed_location, to = watermark, "watermark moved");
        self.maximum_processed_location = watermark;
    }

    fn assert_idle(&self) {
        assert!(
            matches!(self.state, State::Idle),
            "lazy monitor is mid-change: {:?}",
            self.state
        );
    }
}

/// Reads `start..end`, growing the range by one unit if `end` would split a
/// surrogate pair.
fn read_catch_up(storage: &dyn TextStoring, start: usize, end: usize) -> (Span, String) {
    let range = Span::from_bounds(start, end);
    if let Some(content) = storage.substring(range) {
        return (range, content);
    }

    let extended = Span::from_bounds(start, end + 1);
    if end < storage.length() {
        if let Some(content) = storage.substring(extended) {
            return (extended, content);
        }
    }

    panic!("unable to read unprocessed text in {}", range);
}

impl<M: TextStoringMonitor> TextStoringMonitor for LazyTextStoringMonitor<M> {
    fn will_apply_mutation(&mut self, mutation: &Mutation, storage: &dyn TextStoring) {
        self.assert_idle();

        if !self.needs_to_process_mutation(mutation.range()) {
            trace!(range = %mutation.range(), "ignoring mutation past the watermark");
            self.state = State::Ignored;
            return;
        }

        self.ensure_text_processed_up_to(mutation.range().max(), storage);

        let effective = self.effective_mutation(mutation);
        self.monitor.will_apply_mutation(&effective, storage);

        self.state = State::Applying {
            actual: mutation.clone(),
            effective,
        };
    }

    fn did_apply_mutation(&mut self, mutation: &Mutation, storage: &dyn TextStoring) {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Ignored => {
                self.state = State::Ignored;
            }
            State::Applying { actual, effective } => {
                debug_assert_eq!(&actual, mutation, "did_apply for a different mutation");

                self.monitor.did_apply_mutation(&effective, storage);
                self.adjust_maximum(&actual, storage);

                self.state = State::Applied { actual, effective };
            }
            state => panic!("did_apply_mutation without will_apply_mutation: {:?}", state),
        }
    }

    fn will_complete_change_processing(
        &mut self,
        mutation: Option<&Mutation>,
        storage: &dyn TextStoring,
    ) {
        match (&self.state, mutation) {
            (State::Ignored, _) => {}
            (State::Idle, None) => {
                self.monitor.will_complete_change_processing(None, storage);
            }
            (State::Idle, Some(mutation)) => {
                panic!("completion of {:?} without an active change", mutation)
            }
            (State::Applying { .. }, _) => {
                panic!("completion before did_apply_mutation: {:?}", self.state)
            }
            (State::Applied { actual, effective }, mutation) => {
                assert_completes(actual, mutation);
                self.monitor
                    .will_complete_change_processing(Some(effective), storage);
            }
        }
    }

    fn did_complete_change_processing(
        &mut self,
        mutation: Option<&Mutation>,
        storage: &dyn TextStoring,
    ) {
        match (std::mem::replace(&mut self.state, State::Idle), mutation) {
            (State::Ignored, _) => {}
            (State::Idle, None) => {
                self.monitor.did_complete_change_processing(None, storage);
            }
            (State::Idle, Some(mutation)) => {
                panic!("completion of {:?} without an active change", mutation)
            }
            (state @ State::Applying { .. }, _) => {
                panic!("completion before did_apply_mutation: {:?}", state)
            }
            (State::Applied { actual, effective }, mutation) => {
                assert_completes(&actual, mutation);
                self.monitor
                    .did_complete_change_processing(Some(&effective), storage);
            }
        }
    }
}

/// Checks that a completion names the edit that was applied.
fn assert_completes(actual: &Mutation, mutation: Option<&Mutation>) {
    if let Some(mutation) = mutation {
        assert_eq!(
            actual, mutation,
            "completion does not match the applied mutation"
        );
    }
}
