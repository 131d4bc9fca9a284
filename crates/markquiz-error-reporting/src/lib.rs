//! Error reporting and diagnostic messages for quiz markup.
//!
//! Diagnostics follow a tidyverse-like structure: a short title, an optional
//! problem statement, bulleted details and hints. Each diagnostic may carry a
//! [`markquiz_source_map::SourceInfo`]; when the source text is available the
//! text renderer shows the offending line with [ariadne].
//!
//! ```ignore
//! use markquiz_error_reporting::DiagnosticMessageBuilder;
//!
//! let warning = DiagnosticMessageBuilder::warning("Malformed answer")
//!     .with_code("MQ-1-2")
//!     .problem("Answer lines must start with `[x]` or `[ ]`")
//!     .with_location(location)
//!     .build();
//!
//! eprintln!("{}", warning.to_text(Some(&source_context)));
//! ```

pub mod builder;
pub mod catalog;
pub mod diagnostic;

pub use builder::DiagnosticMessageBuilder;
pub use catalog::{ErrorCodeInfo, get_docs_url, get_error_info, get_subsystem};
pub use diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
