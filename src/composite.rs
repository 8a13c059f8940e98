// Chunk: docs/chunks/monitor_protocol - Four-phase mutation notification

use std::fmt;

use crate::monitor::TextStoringMonitor;
use crate::mutation::Mutation;
use crate::storing::TextStoring;

/// Fans every phase out to a list of monitors, in registration order.
///
/// Monitors are not deduplicated, reordered, or filtered.
#[derive(Default)]
pub struct CompositeTextStoringMonitor {
    monitors: Vec<Box<dyn TextStoringMonitor>>,
}

impl CompositeTextStoringMonitor {
    /// A composite with no monitors. Every phase is a no-op until one is
    /// added.
    pub fn new() -> Self {
        Self::default()
    }

    /// A composite notifying `monitors` in the given order.
    pub fn with_monitors(monitors: Vec<Box<dyn TextStoringMonitor>>) -> Self {
        Self { monitors }
    }

    /// Adds a monitor that is notified after all current ones.
    pub fn push(&mut self, monitor: Box<dyn TextStoringMonitor>) {
        self.monitors.push(monitor);
    }

    /// Adds a monitor at position `index` in the notification order.
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, monitor: Box<dyn TextStoringMonitor>) {
        self.monitors.insert(index, monitor);
    }

    /// Removes and returns the monitor at `index`.
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Box<dyn TextStoringMonitor> {
        self.monitors.remove(index)
    }

    /// Removes every monitor.
    pub fn clear(&mut self) {
        self.monitors.clear();
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// The monitors in notification order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn TextStoringMonitor> {
        self.monitors.iter().map(|monitor| monitor.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn TextStoringMonitor>> {
        self.monitors.iter_mut()
    }
}

impl fmt::Debug for CompositeTextStoringMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeTextStoringMonitor")
            .field("monitors", &self.monitors.len())
            .finish()
    }
}

impl TextStoringMonitor for CompositeTextStoringMonitor {
    fn will_apply_mutation(&mut self, mutation: &Mutation, storage: &dyn TextStoring) {
        for monitor in &mut self.monitors {
            monitor.will_apply_mutation(mutation, storage);
        }
    }

    fn did_apply_mutation(&mut self, mutation: &Mutation, storage: &dyn TextStoring) {
        for monitor in &mut self.monitors {
            monitor.did_apply_mutation(mutation, storage);
        }
    }

    fn will_complete_change_processing(
        &mut self,
        mutation: Option<&Mutation>,
        storage: &dyn TextStoring,
    ) {
        for monitor in &mut self.monitors {
            monitor.will_complete_change_processing(mutation, storage);
        }
    }

    fn did_complete_change_processing(
        &mut self,
        mutation: Option<&Mutation>,
        storage: &dyn TextStoring,
    ) {
        for monitor in &mut self.monitors {
            monitor.did_complete_change_processing(mutation, storage);
        }
    }
}
