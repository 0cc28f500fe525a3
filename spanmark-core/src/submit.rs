//! Batch submission state machine.

use serde::{Deserialize, Serialize};

use crate::batch::BatchSelectionSet;
use crate::error::{Result, SpanmarkError};
use crate::service::{AnnotationService, BatchAnnotationResult};

/// Model passed through to the annotation service unchanged. The
/// coordinator never interprets it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ModelChoice {
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-4")]
    Gpt4,
}

impl ModelChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelChoice::Gpt35Turbo => "gpt-3.5-turbo",
            ModelChoice::Gpt4 => "gpt-4",
        }
    }

    /// Cycle to the other choice (model picker in the UI)
    pub fn next(&self) -> Self {
        match self {
            ModelChoice::Gpt35Turbo => ModelChoice::Gpt4,
            ModelChoice::Gpt4 => ModelChoice::Gpt35Turbo,
        }
    }
}

impl Default for ModelChoice {
    fn default() -> Self {
        ModelChoice::Gpt35Turbo
    }
}

/// Request body for one batch dispatch: exactly `{documentIds, model}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub document_ids: Vec<String>,
    pub model: ModelChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Submitting,
}

/// Message recorded for any transport failure; the cause is not shown.
pub const GENERIC_SUBMIT_ERROR: &str = "Failed to annotate documents. Please try again.";

/// Message recorded when submit is attempted with nothing selected.
pub const EMPTY_BATCH_ERROR: &str = "Please select documents to annotate";

/// Coordinates batch dispatch to the annotation service.
///
/// At most one submission is outstanding at a time; the selection set is
/// cleared only on success so a failed batch can be retried without
/// re-selecting. Both outcomes return the coordinator to idle; an error
/// can never strand the UI in a submitting state.
#[derive(Default)]
pub struct BatchCoordinator {
    phase: Phase,
    user_error: Option<String>,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}

impl BatchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// The inline message for the last validation or transport failure
    pub fn user_error(&self) -> Option<&str> {
        self.user_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.user_error = None;
    }

    /// Validate the selection and enter the submitting state, returning
    /// the request snapshot to dispatch.
    ///
    /// An empty selection fails fast with a user-facing message and no
    /// state change; a submission already in flight is rejected rather
    /// than queued, so the same batch is never dispatched twice.
    pub fn begin(
        &mut self,
        selection: &BatchSelectionSet,
        model: ModelChoice,
    ) -> Result<BatchRequest> {
        if self.phase == Phase::Submitting {
            return Err(SpanmarkError::SubmitInProgress);
        }
        if selection.is_empty() {
            self.user_error = Some(EMPTY_BATCH_ERROR.to_string());
            return Err(SpanmarkError::EmptyBatch);
        }

        self.user_error = None;
        self.phase = Phase::Submitting;
        Ok(BatchRequest {
            document_ids: selection.ids(),
            model,
        })
    }

    /// Reconcile the service outcome and leave the submitting state.
    ///
    /// Success clears the selection. Transport failures record the generic
    /// message and keep the selection for retry. An expired-auth failure
    /// records nothing and propagates for the authentication collaborator
    /// to handle.
    pub fn finish(
        &mut self,
        selection: &mut BatchSelectionSet,
        outcome: Result<BatchAnnotationResult>,
    ) -> Result<BatchAnnotationResult> {
        self.phase = Phase::Idle;

        match outcome {
            Ok(result) => {
                selection.clear();
                Ok(result)
            }
            Err(SpanmarkError::AuthExpired) => Err(SpanmarkError::AuthExpired),
            Err(err) => {
                tracing::warn!("batch annotation failed: {}", err);
                self.user_error = Some(GENERIC_SUBMIT_ERROR.to_string());
                Err(err)
            }
        }
    }

    /// One-call surface: validate, dispatch exactly once, reconcile, and
    /// fire `on_complete` once on success.
    pub fn submit<S, F>(
        &mut self,
        project_id: &str,
        selection: &mut BatchSelectionSet,
        model: ModelChoice,
        service: &S,
        on_complete: F,
    ) -> Result<BatchAnnotationResult>
    where
        S: AnnotationService + ?Sized,
        F: FnOnce(&BatchAnnotationResult),
    {
        let request = self.begin(selection, model)?;
        tracing::debug!(
            "dispatching batch of {} documents as {}",
            request.document_ids.len(),
            request.model.as_str()
        );

        let outcome = service.batch_annotate(project_id, &request);
        let result = self.finish(selection, outcome)?;
        on_complete(&result);
        Ok(result)
    }
}
