//! Binding labels to selection actions.

use crate::error::Result;
use crate::model::{Annotation, Document, ProjectSchema};
use crate::selection::Selection;

/// Pairs the pending selection with a chosen label to finalize annotations.
///
/// Holds the only copy of the in-progress selection: setting a new one
/// silently discards the old, and `None` clears it.
pub struct Labeler {
    schema: ProjectSchema,
    pending: Option<Selection>,
    shortcuts_enabled: bool,
}

impl Labeler {
    pub fn new(schema: ProjectSchema) -> Self {
        Self {
            schema,
            pending: None,
            shortcuts_enabled: true,
        }
    }

    /// Enable or disable digit shortcuts for the whole annotation session
    pub fn with_shortcuts(mut self, enabled: bool) -> Self {
        self.shortcuts_enabled = enabled;
        self
    }

    pub fn schema(&self) -> &ProjectSchema {
        &self.schema
    }

    pub fn pending(&self) -> Option<&Selection> {
        self.pending.as_ref()
    }

    /// Retain only the most recent resolved selection; `None` clears it
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.pending = selection;
    }

    /// Finalize the pending selection under `label` as a manual annotation.
    ///
    /// Returns `Ok(false)` without touching the document when nothing is
    /// pending. A pending span that does not address the document text is
    /// an `InvalidSpan` error and the selection is kept, so the caller can
    /// surface the message and let the user reselect.
    pub fn assign(&mut self, doc: &mut Document, label: &str) -> Result<bool> {
        let selection = match self.pending.as_ref() {
            Some(s) => s,
            None => return Ok(false),
        };

        let span = selection.span();
        let text = doc.capture(span)?.to_string();
        doc.add_annotation(Annotation::manual(span, text, label));
        self.pending = None;
        Ok(true)
    }

    /// Digit shortcut activation: `1`-`9` map to the first nine labels.
    ///
    /// Unbound digits are ignored, as is everything while shortcuts are
    /// disabled for the session.
    pub fn assign_shortcut(&mut self, doc: &mut Document, digit: char) -> Result<bool> {
        if !self.shortcuts_enabled {
            return Ok(false);
        }

        let label = match self.schema.shortcut_label(digit) {
            Some(l) => l.to_string(),
            None => return Ok(false),
        };

        self.assign(doc, &label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Span;
    use crate::selection::{resolve, SelectionEvent};

    fn labeler() -> Labeler {
        Labeler::new(ProjectSchema::new(
            vec!["ANIMAL".to_string(), "COLOR".to_string()],
            "ner",
        ))
    }

    fn doc() -> Document {
        Document::with_id("d1", "The quick brown fox")
    }

    #[test]
    fn test_assign_without_selection_is_a_noop() {
        let mut labeler = labeler();
        let mut doc = doc();
        assert!(!labeler.assign(&mut doc, "ANIMAL").unwrap());
        assert!(doc.annotations.is_empty());
    }

    #[test]
    fn test_assign_finalizes_and_clears_selection() {
        let mut labeler = labeler();
        let mut doc = doc();
        labeler.set_selection(resolve(SelectionEvent::new("fox", 16, 19)));

        assert!(labeler.assign(&mut doc, "ANIMAL").unwrap());
        assert!(labeler.pending().is_none());

        let ann = &doc.annotations[0];
        assert_eq!(ann.text, "fox");
        assert_eq!(ann.label, "ANIMAL");
        assert_eq!(ann.confidence, 1.0);
        assert_eq!(ann.span, Span::new(16, 19));
    }

    #[test]
    fn test_newer_selection_replaces_older() {
        let mut labeler = labeler();
        let mut doc = doc();
        labeler.set_selection(resolve(SelectionEvent::new("quick", 4, 9)));
        labeler.set_selection(resolve(SelectionEvent::new("fox", 16, 19)));

        labeler.assign(&mut doc, "ANIMAL").unwrap();
        assert_eq!(doc.annotations[0].text, "fox");
    }

    #[test]
    fn test_collapsed_event_clears_pending_selection() {
        let mut labeler = labeler();
        let mut doc = doc();
        labeler.set_selection(resolve(SelectionEvent::new("fox", 16, 19)));
        labeler.set_selection(resolve(SelectionEvent::new("", 5, 5)));

        assert!(!labeler.assign(&mut doc, "ANIMAL").unwrap());
    }

    #[test]
    fn test_shortcut_appends_mapped_label() {
        let mut labeler = labeler();
        let mut doc = doc();
        labeler.set_selection(resolve(SelectionEvent::new("fox", 16, 19)));

        assert!(labeler.assign_shortcut(&mut doc, '1').unwrap());
        assert_eq!(doc.annotations[0].label, "ANIMAL");
    }

    #[test]
    fn test_out_of_range_digit_is_ignored() {
        let mut labeler = labeler();
        let mut doc = doc();
        labeler.set_selection(resolve(SelectionEvent::new("fox", 16, 19)));

        assert!(!labeler.assign_shortcut(&mut doc, '7').unwrap());
        assert!(doc.annotations.is_empty());
        // The selection survives an unbound digit
        assert!(labeler.pending().is_some());
    }

    #[test]
    fn test_disabled_shortcuts_do_nothing() {
        let mut labeler = labeler().with_shortcuts(false);
        let mut doc = doc();
        labeler.set_selection(resolve(SelectionEvent::new("fox", 16, 19)));

        assert!(!labeler.assign_shortcut(&mut doc, '1').unwrap());
        assert!(doc.annotations.is_empty());
    }

    #[test]
    fn test_invalid_pending_span_is_an_error() {
        let mut labeler = labeler();
        let mut doc = doc();
        labeler.set_selection(resolve(SelectionEvent::new("???", 16, 99)));

        assert!(labeler.assign(&mut doc, "ANIMAL").is_err());
        assert!(doc.annotations.is_empty());
    }

    #[test]
    fn test_annotations_append_in_action_order() {
        let mut labeler = labeler();
        let mut doc = doc();

        labeler.set_selection(resolve(SelectionEvent::new("fox", 16, 19)));
        labeler.assign(&mut doc, "ANIMAL").unwrap();
        labeler.set_selection(resolve(SelectionEvent::new("brown", 10, 15)));
        labeler.assign(&mut doc, "COLOR").unwrap();

        let labels: Vec<_> = doc.annotations.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["ANIMAL", "COLOR"]);
    }
}
