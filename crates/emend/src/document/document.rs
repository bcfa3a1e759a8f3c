//! Ingested documents.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::source::DocumentSource;

/// Identifier of an ingested document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        DocumentId(id.into())
    }

    /// Id for the `n`th document of a session, e.g. `doc_001`.
    pub fn sequential(n: u64) -> Self {
        DocumentId(format!("doc_{:03}", n))
    }

    /// The counter a [`sequential`](Self::sequential) id was built from.
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix("doc_")?.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Original text captured at ingestion. Never modified afterwards; a new
/// ingestion produces a new document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    text: String,
    source: DocumentSource,
}

impl Document {
    pub fn new(id: DocumentId, text: impl Into<String>, source: DocumentSource) -> Self {
        Self {
            id,
            text: text.into(),
            source,
        }
    }

    /// Document from pasted text with no backing file.
    pub fn from_text(id: DocumentId, text: impl Into<String>) -> Self {
        let text = text.into();
        let source = DocumentSource::inline(&text);
        Self::new(id, text, source)
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// The immutable original text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
