//! End-to-end flows through the annotation session.

use spanmark_core::{
    segments, Annotation, AnnotationSession, Document, ModelChoice, ProjectSchema, Segment,
    SelectionEvent, Span, SpanmarkError,
};
use spanmark_core::service::MockService;

fn schema() -> ProjectSchema {
    ProjectSchema::new(vec!["ANIMAL".to_string(), "COLOR".to_string()], "ner")
}

#[test]
fn select_then_shortcut_appends_and_renders() {
    let doc = Document::with_id("d1", "The quick brown fox");
    let mut session = AnnotationSession::new(doc, schema());

    // User drags over "fox" and presses shortcut 1
    session.select(SelectionEvent::new("fox", 16, 19));
    assert!(session.assign_shortcut('1').unwrap());

    let ann = &session.document.annotations[0];
    assert_eq!(ann.text, "fox");
    assert_eq!(ann.label, "ANIMAL");
    assert_eq!(ann.confidence, 1.0);
    assert_eq!(ann.span, Span::new(16, 19));
    assert!(session.pending_selection().is_none());

    let segs = segments(&session.document.content, &session.document.annotations);
    assert_eq!(
        segs,
        vec![
            Segment::Plain {
                text: "The quick brown "
            },
            Segment::Highlight {
                text: "fox",
                label: "ANIMAL",
                confidence: 1.0
            },
        ]
    );
}

#[test]
fn label_click_finalizes_like_a_shortcut() {
    let doc = Document::with_id("d1", "The quick brown fox");
    let mut session = AnnotationSession::new(doc, schema());

    // Clicking a label with nothing selected must not do anything
    assert!(!session.assign("COLOR").unwrap());
    assert!(session.document.annotations.is_empty());

    session.select(SelectionEvent::new("brown", 10, 15));
    assert!(session.assign("COLOR").unwrap());

    let ann = &session.document.annotations[0];
    assert_eq!(ann.label, "COLOR");
    assert_eq!(ann.confidence, 1.0);
    assert!(session.pending_selection().is_none());
}

#[test]
fn batch_submit_success_clears_selection_and_completes_once() {
    let doc = Document::with_id("d0", "irrelevant");
    let mut session = AnnotationSession::new(doc, schema());
    let service = MockService::new();

    session.toggle_batch("d1");
    session.toggle_batch("d2");
    assert_eq!(session.batch.len(), 2);

    let mut completions = 0;
    session
        .submit_batch("p1", ModelChoice::Gpt4, &service, |_| {
            completions += 1;
        })
        .unwrap();

    assert!(session.batch.is_empty());
    assert_eq!(completions, 1);

    let request = service.last_batch_request().unwrap();
    assert_eq!(request.model, ModelChoice::Gpt4);
    assert_eq!(
        request.document_ids,
        vec!["d1".to_string(), "d2".to_string()]
    );
}

#[test]
fn empty_batch_submit_never_reaches_the_service() {
    let doc = Document::with_id("d0", "irrelevant");
    let mut session = AnnotationSession::new(doc, schema());
    let service = MockService::new();

    let result = session.submit_batch("p1", ModelChoice::Gpt35Turbo, &service, |_| {
        panic!("completion must not fire for a rejected submit");
    });

    assert!(matches!(result, Err(SpanmarkError::EmptyBatch)));
    assert_eq!(service.batch_calls(), 0);
    assert!(session.batch.is_empty());
    assert!(session.coordinator().user_error().is_some());
}

#[test]
fn suggested_annotations_flow_back_through_hydration() {
    // A batch run produced suggestions server-side; reopening the document
    // pulls them in as the initial state.
    let suggestions = vec![
        Annotation::suggested(Span::new(10, 15), "brown", "COLOR", 0.64),
        Annotation::suggested(Span::new(16, 19), "fox", "ANIMAL", 0.92),
    ];
    let service = MockService::with_annotations(suggestions);

    let doc = Document::with_id("d1", "The quick brown fox");
    let session = AnnotationSession::open(doc, schema(), &service).unwrap();

    let segs = segments(&session.document.content, &session.document.annotations);
    let confidences: Vec<f64> = segs
        .iter()
        .filter_map(|s| match s {
            Segment::Highlight { confidence, .. } => Some(*confidence),
            _ => None,
        })
        .collect();
    assert_eq!(confidences, vec![0.64, 0.92]);

    let rebuilt: String = segs.iter().map(|s| s.text()).collect();
    assert_eq!(rebuilt, "The quick brown fox");
}

#[test]
fn wire_shapes_match_the_service_contract() {
    let request = spanmark_core::BatchRequest {
        document_ids: vec!["d1".to_string(), "d2".to_string()],
        model: ModelChoice::Gpt4,
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "documentIds": ["d1", "d2"],
            "model": "gpt-4",
        })
    );
}
