//! The entity-model seam.
//!
//! The recognition capability is a collaborator, not part of this crate:
//! anything that can turn raw text into an [`AnnotatedDocument`] plugs in
//! behind [`EntityModel`]. Loading a real model is expensive and happens
//! once; handles are shared and must be safe for concurrent read-only
//! inference, hence the `Send + Sync` bound.

use std::sync::Arc;

use thiserror::Error;

use crate::models::{AnnotatedDocument, DocumentError};

/// Entity-model errors.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("model unavailable: {0}")]
    Unavailable(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("model produced invalid spans: {0}")]
    InvalidOutput(#[from] DocumentError),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// A pre-trained entity-recognition capability.
pub trait EntityModel: Send + Sync {
    /// Run recognition over the full text, returning the annotated document.
    ///
    /// Implementations must produce spans in left-to-right document order
    /// with offsets inside the text; [`AnnotatedDocument::new`] enforces
    /// this at the boundary.
    fn annotate(&self, text: &str) -> ModelResult<AnnotatedDocument>;
}

/// Shared handle to a loaded model.
pub type ModelHandle = Arc<dyn EntityModel>;

impl<M: EntityModel + ?Sized> EntityModel for Arc<M> {
    fn annotate(&self, text: &str) -> ModelResult<AnnotatedDocument> {
        (**self).annotate(text)
    }
}
