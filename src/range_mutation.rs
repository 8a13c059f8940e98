// Chunk: docs/chunks/range_transform - Mapping ranges across a replacement

//! Positional effect of a replacement, used to carry locations and spans
//! from the coordinates before an edit into the coordinates after it.

use crate::span::Span;

/// Which side of text inserted exactly at a location a point ends up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    /// The point stays in front of the inserted text.
    Before,
    /// The point moves past the inserted text.
    After,
}

/// A replacement of `range` that changes the storage length by `delta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeMutation {
    range: Span,
    delta: isize,
    limit: Option<usize>,
}

impl RangeMutation {
    /// A replacement with no bound on the spans it can map.
    pub fn new(range: Span, delta: isize) -> Self {
        Self {
            range,
            delta,
            limit: None,
        }
    }

    /// Like `new`, but spans ending past `limit` have no image.
    pub fn with_limit(range: Span, delta: isize, limit: usize) -> Self {
        Self {
            range,
            delta,
            limit: Some(limit),
        }
    }

    /// The replaced span, in pre-edit coordinates.
    pub fn range(&self) -> Span {
        self.range
    }

    pub fn delta(&self) -> isize {
        self.delta
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Maps a single location.
    ///
    /// Locations strictly inside the replaced span have no image.
    pub fn transform_location(&self, location: usize, affinity: Affinity) -> Option<usize> {
        let start = self.range.location;
        let end = self.range.max();

        if location < start {
            return Some(location);
        }

        if location == start {
            if self.range.is_empty() && affinity == Affinity::After {
                return location.checked_add_signed(self.delta);
            }
            return Some(location);
        }

        if location < end {
            return None;
        }

        location.checked_add_signed(self.delta)
    }

    /// Maps a span, failing if either endpoint has no image.
    ///
    /// Text inserted exactly at either end of a non-empty span stays outside
    /// it. An empty span stays in front of text inserted at its location.
    pub fn transform(&self, span: Span) -> Option<Span> {
        if let Some(limit) = self.limit {
            if span.max() > limit {
                return None;
            }
        }

        if span.is_empty() {
            let location = self.transform_location(span.location, Affinity::Before)?;
            return Some(Span::empty(location));
        }

        let start = self.transform_location(span.location, Affinity::After)?;
        let end = self.transform_location(span.max(), Affinity::Before)?;

        Some(Span::from_bounds(start, end))
    }
}
