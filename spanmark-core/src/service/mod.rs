//! External annotation-service boundary.
//!
//! Everything past this trait is an opaque collaborator: the core sends
//! exactly one request per batch submit, replaces in-memory annotations
//! with whatever a fetch returns, and saves the full annotation list
//! rather than a diff.

mod http;
mod mock;

pub use http::{HttpAnnotationService, ServiceConfig};
pub use mock::{Failure, MockService};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Annotation;
use crate::submit::BatchRequest;

/// Response to a batch annotation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnnotationResult {
    pub message: String,
    pub annotations: Vec<Annotation>,
}

/// Boundary to the remote annotation and persistence service.
pub trait AnnotationService {
    /// Dispatch one batch annotation request for a project.
    fn batch_annotate(
        &self,
        project_id: &str,
        request: &BatchRequest,
    ) -> Result<BatchAnnotationResult>;

    /// Fetch the stored annotations for a document. Callers treat the
    /// result as initial state, not something to merge.
    fn get_annotations(&self, document_id: &str) -> Result<Vec<Annotation>>;

    /// Save the full current annotation list for a document.
    fn save_annotations(&self, document_id: &str, annotations: &[Annotation]) -> Result<()>;
}
