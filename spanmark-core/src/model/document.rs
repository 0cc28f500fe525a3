use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Annotation, Span};
use crate::error::{Result, SpanmarkError};

/// Annotation workflow status. Owned by the external store; the core only
/// reads it for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Unannotated,
    InProgress,
    Annotated,
    Verified,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Unannotated => "unannotated",
            DocumentStatus::InProgress => "in progress",
            DocumentStatus::Annotated => "annotated",
            DocumentStatus::Verified => "verified",
        }
    }
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Unannotated
    }
}

/// A document with annotations. The core holds a working copy during an
/// editing session; loading and saving belong to the external store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub status: DocumentStatus,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), content)
    }

    pub fn with_id(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            annotations: Vec::new(),
            status: DocumentStatus::default(),
        }
    }

    /// The substring a span addresses, validated against this document
    pub fn capture(&self, span: Span) -> Result<&str> {
        span.validate(self.content.len())?;
        self.content
            .get(span.start..span.end)
            .ok_or(SpanmarkError::InvalidSpan {
                start: span.start,
                end: span.end,
                len: self.content.len(),
            })
    }

    /// Append an annotation. Insertion order is preserved and nothing is
    /// deduplicated against existing spans.
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Replace the annotation list with freshly fetched state. No merging
    /// against whatever was in memory.
    pub fn hydrate(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
    }

    /// Annotations ordered by start offset, ties keeping insertion order
    pub fn annotations_sorted(&self) -> Vec<&Annotation> {
        let mut sorted: Vec<_> = self.annotations.iter().collect();
        sorted.sort_by_key(|a| a.span.start);
        sorted
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}
