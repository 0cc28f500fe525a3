mod annotation;
mod document;
mod schema;
mod span;

pub use annotation::Annotation;
pub use document::{Document, DocumentStatus};
pub use schema::{ProjectSchema, MAX_SHORTCUTS};
pub use span::Span;
