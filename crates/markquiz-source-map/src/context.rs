//! Registry of the quiz sources diagnostics point into.

use crate::types::FileId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceContext {
    files: Vec<SourceFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    /// Display name: a path, or a placeholder such as `<stdin>`.
    pub path: String,
    /// In-memory text; `None` means read `path` from disk on demand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl SourceContext {
    pub fn new() -> Self {
        SourceContext { files: Vec::new() }
    }

    /// Register a source and return its id. Ids are handed out in order.
    pub fn add_file(&mut self, path: impl Into<String>, content: Option<String>) -> FileId {
        let id = FileId(self.files.len());
        self.files.push(SourceFile {
            path: path.into(),
            content,
        });
        id
    }

    pub fn get_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0)
    }

    /// Content of a file, reading it from disk when it was registered without
    /// an in-memory copy.
    pub fn file_content(&self, id: FileId) -> Option<String> {
        let file = self.get_file(id)?;
        match &file.content {
            Some(content) => Some(content.clone()),
            None => std::fs::read_to_string(&file.path).ok(),
        }
    }
}
