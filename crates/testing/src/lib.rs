// Chunk: docs/chunks/recording_monitor - Monitor doubles for notification tests

//! text-story-testing: monitors that record what they are told.
//!
//! A [`RecordingMonitor`] appends one [`MonitorEvent`] per phase to an
//! [`EventLog`]. Several recorders can share one log, so the interleaving of
//! phases across the monitors of a composite is visible in a single list.
//!
//! ```
//! use text_story::{Mutation, TextStoringMonitor};
//! use text_story_testing::{EventLog, Phase, RecordingMonitor};
//!
//! let log = EventLog::new();
//! let mut monitor = RecordingMonitor::new("a", &log);
//! let mut storage = String::from("abc");
//!
//! monitor.apply_mutation(&Mutation::insert("d", 3, 3), &mut storage);
//!
//! assert_eq!(
//!     log.phases(),
//!     vec![Phase::WillApply, Phase::DidApply, Phase::WillComplete, Phase::DidComplete]
//! );
//! assert_eq!(log.events()[1].storage_content, "abcd");
//! ```

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use text_story::{Mutation, TextStoring, TextStoringMonitor};

/// One of the four notification phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    WillApply,
    DidApply,
    WillComplete,
    DidComplete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::WillApply => "will_apply",
            Phase::DidApply => "did_apply",
            Phase::WillComplete => "will_complete",
            Phase::DidComplete => "did_complete",
        };
        f.write_str(name)
    }
}

/// A single observed phase, with a snapshot of the storage at that moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorEvent {
    pub label: String,
    pub phase: Phase,
    /// `None` for completion barriers.
    pub mutation: Option<Mutation>,
    pub storage_length: usize,
    pub storage_content: String,
}

/// A shared, ordered list of events. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<MonitorEvent>>>,
}

impl EventLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: MonitorEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Borrows every recorded event, oldest first.
    ///
    /// Drop the borrow before driving more edits; recording panics otherwise.
    pub fn events(&self) -> Ref<'_, Vec<MonitorEvent>> {
        self.events.borrow()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// The phase of each event, oldest first.
    pub fn phases(&self) -> Vec<Phase> {
        self.events.borrow().iter().map(|event| event.phase).collect()
    }

    /// `(label, phase)` pairs, in order.
    pub fn labeled_phases(&self) -> Vec<(String, Phase)> {
        self.events
            .borrow()
            .iter()
            .map(|event| (event.label.clone(), event.phase))
            .collect()
    }

    /// Every event of the given phase.
    pub fn with_phase(&self, phase: Phase) -> Vec<MonitorEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.phase == phase)
            .cloned()
            .collect()
    }

    /// The mutations delivered in `phase`, skipping barriers.
    pub fn mutations(&self, phase: Phase) -> Vec<Mutation> {
        self.with_phase(phase)
            .into_iter()
            .filter_map(|event| event.mutation)
            .collect()
    }
}

/// A monitor that records every phase into an [`EventLog`].
#[derive(Debug, Clone)]
pub struct RecordingMonitor {
    label: String,
    log: EventLog,
}

impl RecordingMonitor {
    /// A monitor recording into `log` under `label`.
    pub fn new(label: impl Into<String>, log: &EventLog) -> Self {
        Self {
            label: label.into(),
            log: log.clone(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    fn record(&self, phase: Phase, mutation: Option<&Mutation>, storage: &dyn TextStoring) {
        self.log.push(MonitorEvent {
            label: self.label.clone(),
            phase,
            mutation: mutation.cloned(),
            storage_length: storage.length(),
            storage_content: storage.string(),
        });
    }
}

impl TextStoringMonitor for RecordingMonitor {
    fn will_apply_mutation(&mut self, mutation: &Mutation, storage: &dyn TextStoring) {
        self.record(Phase::WillApply, Some(mutation), storage);
    }

    fn did_apply_mutation(&mut self, mutation: &Mutation, storage: &dyn TextStoring) {
        self.record(Phase::DidApply, Some(mutation), storage);
    }

    fn will_complete_change_processing(
        &mut self,
        mutation: Option<&Mutation>,
        storage: &dyn TextStoring,
    ) {
        self.record(Phase::WillComplete, mutation, storage);
    }

    fn did_complete_change_processing(
        &mut self,
        mutation: Option<&Mutation>,
        storage: &dyn TextStoring,
    ) {
        self.record(Phase::DidComplete, mutation, storage);
    }
}
