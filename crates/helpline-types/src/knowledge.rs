use serde::{Deserialize, Serialize};

/// One document of the knowledge corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    /// Source name, usually the file name (`password_reset.txt`).
    pub name: String,
    pub text: String,
}

impl KnowledgeDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A scored retrieval hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeMatch {
    pub name: String,
    pub text: String,
    /// Cosine similarity in `0.0..=1.0`.
    pub score: f64,
}
