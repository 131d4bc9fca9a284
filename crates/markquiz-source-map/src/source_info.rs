//! Source information for parsed quiz elements

use crate::types::{FileId, Location, Range};
use serde::{Deserialize, Serialize};

/// A span inside one registered source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub file_id: FileId,
    pub range: Range,
}

impl SourceInfo {
    pub fn from_range(file_id: FileId, range: Range) -> Self {
        SourceInfo { file_id, range }
    }

    /// Span covering one raw line of the source.
    ///
    /// `line_start` is the byte offset of the first character of the line and
    /// `line` is its text without the terminating newline.
    pub fn for_line(file_id: FileId, row: usize, line_start: usize, line: &str) -> Self {
        SourceInfo {
            file_id,
            range: Range {
                start: Location {
                    offset: line_start,
                    row,
                    column: 0,
                },
                end: Location {
                    offset: line_start + line.len(),
                    row,
                    column: line.chars().count(),
                },
            },
        }
    }

    pub fn start_offset(&self) -> usize {
        self.range.start.offset
    }

    pub fn end_offset(&self) -> usize {
        self.range.end.offset
    }

    /// 1-based line number, as shown to users.
    pub fn line_number(&self) -> usize {
        self.range.start.row + 1
    }
}
