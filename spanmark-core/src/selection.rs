//! Resolving raw selection gestures into normalized selections.
//!
//! The host captures the raw selection at the end of a gesture (pointer-up,
//! visual-mode exit) and passes the payload in explicitly; the resolver
//! never reads ambient selection state.

use crate::model::Span;

/// Raw selection payload as captured by the host. Offsets are relative to
/// the rendered container and may arrive in either order.
#[derive(Debug, Clone)]
pub struct SelectionEvent {
    pub text: String,
    pub anchor: usize,
    pub focus: usize,
}

impl SelectionEvent {
    pub fn new(text: impl Into<String>, anchor: usize, focus: usize) -> Self {
        Self {
            text: text.into(),
            anchor,
            focus,
        }
    }

    /// A click with no drag
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

/// The user's in-progress selection. Lives only between a gesture and
/// either being committed as an annotation or cleared; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// Resolve a raw gesture into a selection.
///
/// A collapsed gesture yields `None`, which cancels any in-progress
/// annotation. Backward drags are normalized so that
/// `start <= end` holds; nothing downstream re-checks this.
pub fn resolve(event: SelectionEvent) -> Option<Selection> {
    if event.is_collapsed() {
        return None;
    }

    let span = Span::ordered(event.anchor, event.focus);
    Some(Selection {
        text: event.text,
        start: span.start,
        end: span.end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_selection_resolves_to_none() {
        assert_eq!(resolve(SelectionEvent::new("", 4, 4)), None);
    }

    #[test]
    fn test_forward_drag_passes_through() {
        let selection = resolve(SelectionEvent::new("fox", 16, 19)).unwrap();
        assert_eq!(selection.start, 16);
        assert_eq!(selection.end, 19);
        assert_eq!(selection.text, "fox");
    }

    #[test]
    fn test_backward_drag_is_normalized() {
        let selection = resolve(SelectionEvent::new("fox", 19, 16)).unwrap();
        assert_eq!(selection.start, 16);
        assert_eq!(selection.end, 19);
    }
}
