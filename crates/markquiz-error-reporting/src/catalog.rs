//! Error code catalog.
//!
//! Codes read `MQ-<subsystem>-<number>`: `0` is internal, `1` is quiz markup
//! and `2` is grading. The catalog itself is `error_catalog.json`, embedded
//! at build time.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorCodeInfo {
    /// `internal`, `markup` or `grading`
    pub subsystem: String,
    pub title: String,
    /// Longer explanation shown in documentation
    pub message_template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,
    pub since_version: String,
}

/// # Panics
///
/// On first access, if `error_catalog.json` is not valid.
static ERROR_CATALOG: Lazy<HashMap<String, ErrorCodeInfo>> = Lazy::new(|| {
    let json_data = include_str!("../error_catalog.json");
    serde_json::from_str(json_data).expect("Invalid error catalog JSON - this is a bug in markquiz")
});

pub fn get_error_info(code: &str) -> Option<&ErrorCodeInfo> {
    ERROR_CATALOG.get(code)
}

pub fn get_docs_url(code: &str) -> Option<&str> {
    get_error_info(code).and_then(|info| info.docs_url.as_deref())
}

pub fn get_subsystem(code: &str) -> Option<&str> {
    get_error_info(code).map(|info| info.subsystem.as_str())
}
