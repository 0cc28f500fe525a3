//! Spanmark Core - span-based text annotation engine
//!
//! This crate provides the data model and logic for annotating spans of
//! text with categorical labels, reviewing model-suggested spans with
//! confidence scores, and submitting batches of documents to an external
//! annotation service. It is designed to be driven by any host that can
//! capture text selections and forward them as explicit events.

pub mod batch;
pub mod error;
pub mod highlight;
pub mod labeler;
pub mod model;
pub mod selection;
pub mod service;
pub mod session;
pub mod submit;

pub use batch::BatchSelectionSet;
pub use error::{Result, SpanmarkError};
pub use highlight::{segments, Segment};
pub use labeler::Labeler;
pub use model::{Annotation, Document, DocumentStatus, ProjectSchema, Span};
pub use selection::{resolve, Selection, SelectionEvent};
pub use service::{
    AnnotationService, BatchAnnotationResult, HttpAnnotationService, MockService, ServiceConfig,
};
pub use session::AnnotationSession;
pub use submit::{BatchCoordinator, BatchRequest, ModelChoice};
