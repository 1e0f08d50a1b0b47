//! The content a user shares.

use serde::{Deserialize, Serialize};

/// A code snippet attached to a shared note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: String,
    pub code: String,
    pub language: String,
}

/// Title, body and ordered snippets of a shared note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub snippets: Vec<Snippet>,
}

impl SharePayload {
    /// A payload with no snippets.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            snippets: Vec::new(),
        }
    }

    /// Append a snippet, keeping insertion order.
    pub fn with_snippet(
        mut self,
        id: impl Into<String>,
        code: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        self.snippets.push(Snippet {
            id: id.into(),
            code: code.into(),
            language: language.into(),
        });
        self
    }
}
