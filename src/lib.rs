// Chunk: docs/chunks/mutation_model - Text mutation record and storage contract

//! text-story: ordered edit notification for text storages.
//!
//! This crate describes edits to a UTF-16 indexed text store as [`Mutation`]s
//! and delivers them to observers in a strict four-phase protocol. Observers
//! that cannot afford to see the whole text up front can be wrapped in a
//! [`LazyTextStoringMonitor`], and consumers that lag behind the storage can
//! use a [`BufferingTextStorage`] to read older text and map ranges forward.
//!
//! # Overview
//!
//! - [`TextStoring`] - the three-operation storage contract, implemented for
//!   `String` and by the decorators in this crate
//! - [`TextStoringMonitor`] - the observer protocol
//! - [`CompositeTextStoringMonitor`] - fan-out to many observers
//! - [`LazyTextStoringMonitor`] - progressive reveal of storage contents
//! - [`BufferingTextStorage`] - history of pending edits and range remapping
//! - [`MutationEventRouter`] / [`MonitoredTextStorage`] - turning raw replace
//!   callbacks into monitor phases
//!
//! # Example
//!
//! ```
//! use text_story::{Mutation, Span, TextStoring, TextStoringMonitor, LazyTextStoringMonitor};
//! # use text_story::CompositeTextStoringMonitor;
//!
//! let mut storage = String::from("hello");
//! let mut monitor = LazyTextStoringMonitor::new(CompositeTextStoringMonitor::new());
//!
//! monitor.apply_mutation(&Mutation::insert(", world", 5, 5), &mut storage);
//!
//! assert_eq!(storage, "hello, world");
//! assert_eq!(monitor.maximum_processed_location(), 12);
//! assert_eq!(storage.substring(Span::new(7, 5)).as_deref(), Some("world"));
//! ```

mod adapter;
mod buffering;
mod composite;
mod lazy;
mod monitor;
mod mutation;
mod range_mutation;
mod ranges;
mod router;
mod span;
mod storing;
pub mod utf16;

pub use adapter::TextStorageAdapter;
pub use buffering::BufferingTextStorage;
pub use composite::CompositeTextStoringMonitor;
pub use lazy::{LazyMonitorConfig, LazyTextStoringMonitor, DEFAULT_MINIMUM_DELTA};
pub use monitor::TextStoringMonitor;
pub use mutation::Mutation;
pub use range_mutation::{Affinity, RangeMutation};
pub use ranges::{is_newline, is_whitespace_or_newline, TextStoringRanges};
pub use router::{MonitoredTextStorage, MutationEventRouter};
pub use span::Span;
pub use storing::{StoringError, TextStoring};
