//! Mock annotation service for testing.

use std::cell::{Cell, RefCell};

use crate::error::{Result, SpanmarkError};
use crate::model::Annotation;
use crate::submit::BatchRequest;

use super::{AnnotationService, BatchAnnotationResult};

/// How the mock should fail its next calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Transport,
    AuthExpired,
}

/// Scripted in-memory service that records every call it receives.
#[derive(Default)]
pub struct MockService {
    annotations: Vec<Annotation>,
    failure: Cell<Option<Failure>>,
    batch_requests: RefCell<Vec<BatchRequest>>,
    fetch_calls: Cell<usize>,
    save_calls: Cell<usize>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that answers fetches and batch requests with these annotations
    pub fn with_annotations(annotations: Vec<Annotation>) -> Self {
        Self {
            annotations,
            ..Self::default()
        }
    }

    /// Fail every subsequent call until `succeed` is called
    pub fn fail_with(&self, failure: Failure) {
        self.failure.set(Some(failure));
    }

    pub fn succeed(&self) {
        self.failure.set(None);
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_requests.borrow().len()
    }

    pub fn last_batch_request(&self) -> Option<BatchRequest> {
        self.batch_requests.borrow().last().cloned()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.get()
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.get()
    }

    fn check(&self) -> Result<()> {
        match self.failure.get() {
            Some(Failure::Transport) => {
                Err(SpanmarkError::Transport("mock transport failure".to_string()))
            }
            Some(Failure::AuthExpired) => Err(SpanmarkError::AuthExpired),
            None => Ok(()),
        }
    }
}

impl AnnotationService for MockService {
    fn batch_annotate(
        &self,
        _project_id: &str,
        request: &BatchRequest,
    ) -> Result<BatchAnnotationResult> {
        self.batch_requests.borrow_mut().push(request.clone());
        self.check()?;
        Ok(BatchAnnotationResult {
            message: format!("annotated {} documents", request.document_ids.len()),
            annotations: self.annotations.clone(),
        })
    }

    fn get_annotations(&self, _document_id: &str) -> Result<Vec<Annotation>> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        self.check()?;
        Ok(self.annotations.clone())
    }

    fn save_annotations(&self, _document_id: &str, _annotations: &[Annotation]) -> Result<()> {
        self.save_calls.set(self.save_calls.get() + 1);
        self.check()
    }
}
