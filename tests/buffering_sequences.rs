// Chunk: docs/chunks/buffering_storage - Pending-edit history over a storage

//! Integration tests for a consumer that lags behind the storage: edits are
//! buffered while the consumer is busy, then read back and remapped.

use text_story::{
    BufferingTextStorage, MonitoredTextStorage, Mutation, MutationEventRouter, Span, TextStoring,
};
use text_story_buffer::TextBuffer;
use text_story_testing::{EventLog, Phase, RecordingMonitor};

fn buffering(content: &str) -> BufferingTextStorage<TextBuffer> {
    let mut storage = BufferingTextStorage::new(TextBuffer::from_str(content));
    storage.set_buffering_enabled(true);
    storage
}

#[test]
fn test_multiple_changes_on_text_buffer() {
    let mut storage = buffering("hello");

    storage.insert_string(", goodbye", 5);
    storage.replace_string(Span::new(7, 4), "");
    storage.insert_string("well, ", 0);

    assert_eq!(storage.string(), "well, hello, bye");
    assert_eq!(storage.change_count(), 3);
    assert_eq!(storage.buffered_length(), 5);
    assert_eq!(storage.buffered_substring(Span::new(0, 5)), "hello");
    assert_eq!(storage.transform_base_range(Span::new(0, 5)), Some(Span::new(6, 5)));
}

#[test]
fn test_catching_up_one_edit_at_a_time() {
    let mut storage = buffering("fn a() {}\n");

    storage.insert_string("fn b() {}\n", 10);
    storage.replace_string(Span::new(3, 1), "alpha");
    storage.insert_string("// header\n", 0);

    assert_eq!(storage.string(), "// header\nfn alpha() {}\nfn b() {}\n");

    // The renamed identifier maps onto its replacement.
    assert_eq!(storage.transform_base_range(Span::new(0, 2)), Some(Span::new(10, 2)));
    assert_eq!(storage.transform_base_range(Span::new(3, 1)), Some(Span::new(13, 5)));

    storage.apply_next_change();
    assert_eq!(
        storage.buffered_substring(Span::from(0..storage.buffered_length())),
        "fn a() {}\nfn b() {}\n"
    );

    storage.apply_next_change();
    assert_eq!(
        storage.buffered_substring(Span::from(0..storage.buffered_length())),
        "fn alpha() {}\nfn b() {}\n"
    );
    assert_eq!(storage.transform_base_range(Span::new(3, 5)), Some(Span::new(13, 5)));

    storage.apply_next_change();
    assert_eq!(storage.change_count(), 0);
    assert_eq!(storage.buffered_length(), storage.length());
}

#[test]
fn test_monitors_observe_buffered_storage() {
    let log = EventLog::new();
    let mut storage = MonitoredTextStorage::with_router(
        buffering("abc"),
        MutationEventRouter::with_monitors(vec![Box::new(RecordingMonitor::new("m", &log))]),
    );

    storage.insert_string("XY", 1);

    assert_eq!(
        log.mutations(Phase::DidApply),
        vec![Mutation::insert("XY", 1, 3)]
    );
    assert_eq!(storage.storage().buffered_substring(Span::new(0, 3)), "abc");
    assert_eq!(
        storage.storage().transform_base_range(Span::new(1, 2)),
        Some(Span::new(3, 2))
    );
}

#[test]
fn test_unbuffered_storage_keeps_no_history() {
    let mut storage = BufferingTextStorage::new(TextBuffer::from_str("abc"));

    storage.insert_string("d", 3);

    assert!(!storage.buffering_enabled());
    assert_eq!(storage.change_count(), 0);
    assert_eq!(storage.into_inner().content(), "abcd");
}
