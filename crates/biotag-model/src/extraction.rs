//! Parsing of external tagger output.
//!
//! A pretrained tagger run out of process emits one JSON object per
//! document: the text and its entity list. The object may be surrounded by
//! prose (progress lines, banners), so parsing scans to the outermost
//! braces before deserializing. Parsed entities go through the validating
//! document constructor, so malformed spans never enter circulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use biotag_core::models::{AnnotatedDocument, DocumentError, EntityLabel, EntitySpan};

/// Extraction errors.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid tagger output: {0}")]
    InvalidFormat(String),

    #[error("Tagger produced invalid spans: {0}")]
    Document(#[from] DocumentError),
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Raw tagger output for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggerOutput {
    pub text: String,
    pub entities: Vec<RawEntity>,
}

/// One entity as emitted by the tagger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEntity {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub label: String,
}

impl TaggerOutput {
    /// Convert to a validated document.
    pub fn into_document(self) -> ExtractionResult<AnnotatedDocument> {
        let spans = self
            .entities
            .into_iter()
            .map(|e| EntitySpan::new(e.start, e.end, e.text, EntityLabel::from(e.label)))
            .collect();
        Ok(AnnotatedDocument::new(self.text, spans)?)
    }
}

/// Parse one document's worth of tagger output into a validated
/// [`AnnotatedDocument`].
pub fn parse_tagger_output(raw: &str) -> ExtractionResult<AnnotatedDocument> {
    // Scan for the JSON object in case the tagger wrote extra text around it
    let json_start = raw
        .find('{')
        .ok_or_else(|| ExtractionError::InvalidFormat("no JSON object found in output".into()))?;
    let json_end = raw
        .rfind('}')
        .ok_or_else(|| ExtractionError::InvalidFormat("no closing brace found in output".into()))?;

    let output: TaggerOutput = serde_json::from_str(&raw[json_start..=json_end])?;
    output.into_document()
}
