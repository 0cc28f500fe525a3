//! Per-session editing state.

use crate::batch::BatchSelectionSet;
use crate::error::Result;
use crate::labeler::Labeler;
use crate::model::{Document, ProjectSchema};
use crate::selection::{self, Selection, SelectionEvent};
use crate::service::{AnnotationService, BatchAnnotationResult};
use crate::submit::{BatchCoordinator, ModelChoice};

/// State owned by one annotation session: the working copy of the active
/// document, the pending selection, the batch selection, and the
/// submission coordinator.
///
/// A session runs on a single logical thread of control: selection
/// events, label actions, saves, and batch submissions are discrete events
/// with no overlapping execution. The coordinator's submitting flag is the
/// only concurrency guard anything here needs.
pub struct AnnotationSession {
    pub document: Document,
    labeler: Labeler,
    pub batch: BatchSelectionSet,
    coordinator: BatchCoordinator,
    saving: bool,
}

impl AnnotationSession {
    pub fn new(document: Document, schema: ProjectSchema) -> Self {
        Self {
            document,
            labeler: Labeler::new(schema),
            batch: BatchSelectionSet::new(),
            coordinator: BatchCoordinator::new(),
            saving: false,
        }
    }

    /// Open a session with the document's stored annotations. The fetched
    /// list replaces whatever the document carried in; anything whose span
    /// does not address this document's text is dropped here, before it
    /// can reach the renderer.
    pub fn open<S>(document: Document, schema: ProjectSchema, service: &S) -> Result<Self>
    where
        S: AnnotationService + ?Sized,
    {
        let mut session = Self::new(document, schema);
        let annotations = service
            .get_annotations(&session.document.id)?
            .into_iter()
            .filter(|ann| {
                let ok = session.document.capture(ann.span).is_ok();
                if !ok {
                    tracing::warn!(
                        "dropping annotation with bad span [{}, {}) for document {}",
                        ann.span.start,
                        ann.span.end,
                        session.document.id
                    );
                }
                ok
            })
            .collect();
        session.document.hydrate(annotations);
        Ok(session)
    }

    pub fn schema(&self) -> &ProjectSchema {
        self.labeler.schema()
    }

    pub fn pending_selection(&self) -> Option<&Selection> {
        self.labeler.pending()
    }

    /// Feed a raw selection gesture through the resolver. Only the most
    /// recent selection is retained; a collapsed gesture clears it.
    pub fn select(&mut self, event: SelectionEvent) {
        self.labeler.set_selection(selection::resolve(event));
    }

    pub fn clear_selection(&mut self) {
        self.labeler.set_selection(None);
    }

    /// Finalize the pending selection under `label`
    pub fn assign(&mut self, label: &str) -> Result<bool> {
        self.labeler.assign(&mut self.document, label)
    }

    /// Finalize the pending selection via a digit shortcut
    pub fn assign_shortcut(&mut self, digit: char) -> Result<bool> {
        self.labeler.assign_shortcut(&mut self.document, digit)
    }

    /// Swap in a different working document, handing back the old one.
    /// The pending selection refers to the old text and is dropped.
    pub fn replace_document(&mut self, mut document: Document) -> Document {
        self.labeler.set_selection(None);
        std::mem::swap(&mut self.document, &mut document);
        document
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Persist the full annotation list through the save collaborator.
    /// The busy flag resets whether the save succeeds or fails.
    pub fn save<S>(&mut self, service: &S) -> Result<()>
    where
        S: AnnotationService + ?Sized,
    {
        self.saving = true;
        let outcome = service.save_annotations(&self.document.id, &self.document.annotations);
        self.saving = false;
        outcome
    }

    pub fn coordinator(&self) -> &BatchCoordinator {
        &self.coordinator
    }

    pub fn clear_submit_error(&mut self) {
        self.coordinator.clear_error();
    }

    pub fn toggle_batch(&mut self, id: &str) {
        self.batch.toggle(id);
    }

    /// Submit the batch selection for model-assisted annotation
    pub fn submit_batch<S, F>(
        &mut self,
        project_id: &str,
        model: ModelChoice,
        service: &S,
        on_complete: F,
    ) -> Result<BatchAnnotationResult>
    where
        S: AnnotationService + ?Sized,
        F: FnOnce(&BatchAnnotationResult),
    {
        self.coordinator
            .submit(project_id, &mut self.batch, model, service, on_complete)
    }
}
