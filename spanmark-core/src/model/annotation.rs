use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Span;

/// A labeled span with the text it covered when it was created.
///
/// `text` is captured once and never recomputed, so an annotation stays
/// displayable even if the document is edited out from under it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub label: String,
    /// Certainty of the label assignment, in `[0, 1]`. Always `1.0` for
    /// human-made annotations; model-reported for suggested ones.
    pub confidence: f64,
    #[serde(flatten)]
    pub span: Span,

    // Server-assigned fields, absent until the annotation has been
    // round-tripped through the persistence service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl Annotation {
    /// A human-made annotation. Manual annotations always carry full
    /// confidence.
    pub fn manual(span: Span, text: impl Into<String>, label: impl Into<String>) -> Self {
        Self::suggested(span, text, label, 1.0)
    }

    /// A machine-suggested annotation with a model-reported confidence.
    pub fn suggested(
        span: Span,
        text: impl Into<String>,
        label: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            confidence,
            span,
            id: None,
            document_id: None,
            created_at: None,
            verified: None,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_annotations_have_full_confidence() {
        let ann = Annotation::manual(Span::new(16, 19), "fox", "ANIMAL");
        assert_eq!(ann.confidence, 1.0);
        assert!(ann.id.is_none());
        assert!(ann.verified.is_none());
    }

    #[test]
    fn test_wire_shape_inlines_span() {
        let ann = Annotation::suggested(Span::new(4, 9), "quick", "SPEED", 0.72);
        let json = serde_json::to_value(&ann).unwrap();
        assert_eq!(json["text"], "quick");
        assert_eq!(json["label"], "SPEED");
        assert_eq!(json["start"], 4);
        assert_eq!(json["end"], 9);
        // Server fields stay off the wire until assigned
        assert!(json.get("id").is_none());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_round_trip_with_server_fields() {
        let json = r#"{
            "text": "fox",
            "label": "ANIMAL",
            "confidence": 0.9,
            "start": 16,
            "end": 19,
            "id": "a1",
            "document_id": "d1",
            "created_at": "2024-03-01T12:00:00Z",
            "verified": false
        }"#;
        let ann: Annotation = serde_json::from_str(json).unwrap();
        assert_eq!(ann.span, Span::new(16, 19));
        assert_eq!(ann.id.as_deref(), Some("a1"));
        assert_eq!(ann.verified, Some(false));
    }
}
