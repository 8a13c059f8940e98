// Chunk: docs/chunks/text_buffer - UTF-16 gap buffer storage

//! text-story-buffer: a gap-buffer text store for text-story.
//!
//! [`TextBuffer`] keeps its content as UTF-16 code units, so the offsets used
//! by [`text_story::Mutation`] and [`text_story::Span`] index it directly. It
//! implements [`text_story::TextStoring`] and can sit under any of the
//! text-story decorators and monitors.
//!
//! # Example
//!
//! ```
//! use text_story::{Span, TextStoring};
//! use text_story_buffer::TextBuffer;
//!
//! let mut buffer = TextBuffer::from_str("Hello, world!");
//!
//! buffer.replace(Span::new(6, 0), "\n").unwrap();
//! assert_eq!(buffer.line_count(), 2);
//! assert_eq!(buffer.line_content(1), " world!");
//!
//! buffer.insert_string("!!", buffer.length());
//! assert_eq!(buffer.string(), "Hello,\n world!!!");
//! ```

mod gap_buffer;
mod line_index;
mod segmentation;
mod text_buffer;
mod types;

pub use text_buffer::TextBuffer;
pub use types::Position;
