// Chunk: docs/chunks/grapheme_cluster_awareness - Grapheme and word boundaries in UTF-16 units

//! Grapheme cluster and word boundaries over a line of text.
//!
//! Offsets are UTF-16 units relative to the start of `text`. A grapheme
//! cluster is what a user perceives as one character: a ZWJ emoji sequence,
//! a base letter with combining marks, a regional indicator pair.

use unicode_segmentation::UnicodeSegmentation;

/// Yields `(start, end)` UTF-16 bounds of each segment in order.
fn utf16_bounds<'a, I>(segments: I) -> impl Iterator<Item = (usize, usize)> + 'a
where
    I: Iterator<Item = &'a str> + 'a,
{
    segments.scan(0usize, |offset, segment| {
        let start = *offset;
        *offset += segment.encode_utf16().count();
        Some((start, *offset))
    })
}

/// The grapheme cluster containing the unit at `offset`.
///
/// Returns `None` if `offset` is at or past the end of `text`.
pub fn grapheme_range(text: &str, offset: usize) -> Option<(usize, usize)> {
    utf16_bounds(text.graphemes(true)).find(|&(_, end)| offset < end)
}

/// The word-boundary segment containing the unit at `offset`.
///
/// Segments follow UAX #29 word boundaries, so a run of whitespace or a
/// punctuation mark is its own segment.
pub fn word_range(text: &str, offset: usize) -> Option<(usize, usize)> {
    utf16_bounds(text.split_word_bounds()).find(|&(_, end)| offset < end)
}
