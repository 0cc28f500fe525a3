//! Application state for the terminal host.

use spanmark_core::{
    Annotation, AnnotationService, AnnotationSession, Document, DocumentStatus, ModelChoice,
    ProjectSchema, SpanmarkError,
};

use crate::editor::EditorCursor;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Visual,
    Help,
}

/// Focus area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    Sidebar,
}

/// Terminal application state wrapping one annotation session.
///
/// `documents` holds a snapshot of every project document; the entry at
/// `active` is stale while the session owns the working copy.
pub struct App {
    pub project_id: String,
    pub session: AnnotationSession,
    pub documents: Vec<Document>,
    pub active: usize,
    pub editor: EditorCursor,
    pub mode: Mode,
    pub focus: Focus,
    pub sidebar_selected: usize,
    pub annotation_cursor: usize,
    pub model: ModelChoice,
    pub running: bool,
    pub status_message: Option<String>,

    service: Box<dyn AnnotationService>,
}

impl App {
    pub fn new(
        project_id: impl Into<String>,
        schema: ProjectSchema,
        mut documents: Vec<Document>,
        service: Box<dyn AnnotationService>,
    ) -> Self {
        if documents.is_empty() {
            documents.push(Document::new(""));
        }

        let working = documents[0].clone();
        let mut editor = EditorCursor::new();
        editor.set_content(&working.content);

        Self {
            project_id: project_id.into(),
            session: AnnotationSession::new(working, schema),
            documents,
            active: 0,
            editor,
            mode: Mode::Normal,
            focus: Focus::Editor,
            sidebar_selected: 0,
            annotation_cursor: 0,
            model: ModelChoice::default(),
            running: true,
            status_message: None,
            service,
        }
    }

    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.session.clear_submit_error();
    }

    /// Swap the working copy over to another document, stashing the old
    /// one back into the snapshot list.
    pub fn open_document(&mut self, index: usize) {
        if index >= self.documents.len() || index == self.active {
            return;
        }

        let incoming = self.documents[index].clone();
        let outgoing = self.session.replace_document(incoming);
        self.documents[self.active] = outgoing;
        self.active = index;
        self.annotation_cursor = 0;
        self.editor.set_content(&self.session.document.content);
        self.mode = Mode::Normal;
    }

    pub fn enter_visual_mode(&mut self) {
        if self.focus == Focus::Editor {
            self.mode = Mode::Visual;
            self.editor.begin_selection();
        }
    }

    /// Exit visual mode, feeding the gesture through the core resolver.
    /// The resolved selection becomes the pending one; a collapsed gesture
    /// clears it.
    pub fn commit_selection(&mut self) {
        let content = self.session.document.content.clone();
        if let Some(event) = self.editor.take_selection_event(&content) {
            let collapsed = event.is_collapsed();
            self.session.select(event);
            if collapsed {
                self.set_status("Selection cleared");
            } else if let Some(sel) = self.session.pending_selection() {
                let preview: String = sel.text.chars().take(24).collect();
                self.set_status(&format!("Selected \"{}\" - press a label key", preview));
            }
        }
        self.mode = Mode::Normal;
    }

    pub fn cancel_visual_mode(&mut self) {
        self.editor.cancel_selection();
        self.session.clear_selection();
        self.mode = Mode::Normal;
    }

    /// Label the pending selection via a digit shortcut. In visual mode
    /// the gesture is committed first, so selecting and labeling can be a
    /// single motion.
    pub fn assign_digit(&mut self, digit: char) {
        if self.mode == Mode::Visual {
            self.commit_selection();
        }

        match self.session.assign_shortcut(digit) {
            Ok(true) => {
                let label = self
                    .session
                    .document
                    .annotations
                    .last()
                    .map(|a| a.label.clone())
                    .unwrap_or_default();
                self.set_status(&format!("Labeled as {}", label));
            }
            Ok(false) => {}
            Err(err) => self.set_status(&format!("Cannot annotate: {}", err)),
        }
    }

    /// Jump the cursor to the next annotation in start order
    pub fn next_annotation(&mut self) {
        let count = self.session.document.annotations.len();
        if count == 0 {
            return;
        }
        self.annotation_cursor = (self.annotation_cursor + 1) % count;
        self.jump_to_annotation();
    }

    pub fn prev_annotation(&mut self) {
        let count = self.session.document.annotations.len();
        if count == 0 {
            return;
        }
        self.annotation_cursor = if self.annotation_cursor == 0 {
            count - 1
        } else {
            self.annotation_cursor - 1
        };
        self.jump_to_annotation();
    }

    fn jump_to_annotation(&mut self) {
        let offset = self
            .session
            .document
            .annotations_sorted()
            .get(self.annotation_cursor)
            .map(|a| a.span.start);
        if let Some(offset) = offset {
            self.editor.set_offset(offset);
        }
    }

    /// Persist the active document's annotations through the service
    pub fn save(&mut self) {
        match self.session.save(self.service.as_ref()) {
            Ok(()) => self.set_status("Annotations saved"),
            Err(SpanmarkError::AuthExpired) => {
                self.set_status("Session expired - sign in again and restart")
            }
            Err(_) => self.set_status("Failed to save annotations"),
        }
    }

    /// Toggle the sidebar-selected document in the batch set
    pub fn toggle_batch_mark(&mut self) {
        let id = match self.documents.get(self.sidebar_selected) {
            Some(doc) => doc.id.clone(),
            None => return,
        };
        self.session.toggle_batch(&id);
        let marked = self.session.batch.contains(&id);
        self.set_status(if marked {
            "Marked for batch annotation"
        } else {
            "Unmarked"
        });
    }

    /// Submit the batch selection for model-assisted annotation
    pub fn submit_batch(&mut self) {
        let project_id = self.project_id.clone();
        let model = self.model;

        let mut message = None;
        let outcome = self.session.submit_batch(
            &project_id,
            model,
            self.service.as_ref(),
            |result| {
                message = Some(result.message.clone());
            },
        );

        match outcome {
            Ok(result) => {
                self.apply_batch_result(result.annotations);
                self.set_status(&message.unwrap_or_else(|| "Batch annotated".to_string()));
            }
            Err(SpanmarkError::AuthExpired) => {
                self.set_status("Session expired - sign in again and restart");
            }
            Err(_) => {
                if let Some(err) = self.session.coordinator().user_error() {
                    let err = err.to_string();
                    self.set_status(&err);
                }
            }
        }
    }

    /// Fold the suggestions returned by the service back into the
    /// document snapshots they belong to. Spans that do not address their
    /// document's text are dropped before they can reach the renderer.
    fn apply_batch_result(&mut self, annotations: Vec<Annotation>) {
        for annotation in annotations {
            let target = match annotation.document_id.as_deref() {
                Some(id) => id.to_string(),
                None => continue,
            };

            let doc = if self.session.document.id == target {
                &mut self.session.document
            } else if let Some(doc) = self.documents.iter_mut().find(|d| d.id == target) {
                doc
            } else {
                continue;
            };

            if doc.capture(annotation.span).is_err() {
                tracing::warn!(
                    "dropping suggestion with bad span [{}, {}) for document {}",
                    annotation.span.start,
                    annotation.span.end,
                    target
                );
                continue;
            }

            doc.add_annotation(annotation);
            doc.status = DocumentStatus::Annotated;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Editor => Focus::Sidebar,
            Focus::Sidebar => Focus::Editor,
        };
    }

    pub fn toggle_model(&mut self) {
        self.model = self.model.next();
        let model = self.model.as_str().to_string();
        self.set_status(&format!("Batch model: {}", model));
    }

    pub fn sidebar_up(&mut self) {
        if self.sidebar_selected > 0 {
            self.sidebar_selected -= 1;
        }
    }

    pub fn sidebar_down(&mut self) {
        if self.sidebar_selected + 1 < self.documents.len() {
            self.sidebar_selected += 1;
        }
    }
}
