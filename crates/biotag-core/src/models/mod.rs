//! Domain types for annotated documents and entity spans.

mod document;

pub use document::{AnnotatedDocument, DocumentError, EntityLabel, EntitySpan};
