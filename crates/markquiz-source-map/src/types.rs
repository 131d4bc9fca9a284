//! Positions inside quiz sources.
//!
//! Everything is 0-based. Offsets are bytes, columns are characters.

use serde::{Deserialize, Serialize};

/// Index of a file registered in a [`crate::SourceContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub offset: usize,
    pub row: usize,
    /// Counted in characters.
    pub column: usize,
}

/// Half-open span `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Location,
    pub end: Location,
}

impl Range {
    /// Byte length.
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
