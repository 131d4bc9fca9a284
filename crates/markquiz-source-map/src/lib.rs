//! Source locations for quiz markup.
//!
//! Quiz markup is line oriented, so every location the parser records is the
//! span of one raw source line. This crate provides:
//! - [`SourceContext`]: registry of the files (or in-memory buffers) being parsed
//! - [`SourceInfo`]: a file id plus a [`Range`] inside that file
//!
//! # Example
//!
//! ```rust
//! use markquiz_source_map::*;
//!
//! let mut ctx = SourceContext::new();
//! let file_id = ctx.add_file("intro.quiz", Some("#1 Pick one\n[x] A\n".into()));
//!
//! let info = SourceInfo::for_line(file_id, 1, 12, "[x] A");
//! assert_eq!(info.start_offset(), 12);
//! assert_eq!(info.range.end.column, 5);
//! ```

pub mod context;
pub mod source_info;
pub mod types;

pub use context::{SourceContext, SourceFile};
pub use source_info::SourceInfo;
pub use types::{FileId, Location, Range};
