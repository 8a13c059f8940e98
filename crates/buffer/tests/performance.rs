// Chunk: docs/chunks/text_buffer - UTF-16 gap buffer storage

//! Performance sanity checks for the text buffer.
//!
//! Not formal benchmarks; these guard against accidentally quadratic edits.
//! Bounds are loose enough for unoptimized builds.

use std::time::{Duration, Instant};
use text_story::{Span, TextStoring};
use text_story_buffer::TextBuffer;

#[test]
fn sequential_typing_is_linear() {
    let mut buffer = TextBuffer::new();
    let start = Instant::now();

    for i in 0..20_000 {
        let text = if i % 80 == 79 { "\n" } else { "x" };
        buffer.replace(Span::empty(i), text).unwrap();
    }

    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_millis(500),
        "Typing 20K units took {:?}, expected < 500ms",
        elapsed
    );
    assert_eq!(buffer.len(), 20_000);
    assert_eq!(buffer.line_count(), 251);
}

#[test]
fn line_access_performance() {
    let content: String = (0..1000)
        .map(|i| format!("Line number {}", i))
        .collect::<Vec<_>>()
        .join("\n");

    let buffer = TextBuffer::from_str(&content);
    let start = Instant::now();

    for _ in 0..20 {
        for line in 0..buffer.line_count() {
            let _ = buffer.line_content(line);
        }
    }

    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_millis(500),
        "Accessing {} lines 20 times took {:?}, expected < 500ms",
        buffer.line_count(),
        elapsed
    );
}

#[test]
fn backspacing_everything() {
    let mut buffer = TextBuffer::from_str(&"x".repeat(10_000));
    let start = Instant::now();

    while !buffer.is_empty() {
        let end = buffer.len();
        buffer.apply_mutation(&text_story::Mutation::delete(Span::from(end - 1..end), end));
    }

    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_millis(500),
        "Deleting 10K units took {:?}, expected < 500ms",
        elapsed
    );
}
