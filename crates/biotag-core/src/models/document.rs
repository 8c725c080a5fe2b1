//! Annotated document model.
//!
//! An [`AnnotatedDocument`] is the output of running an entity model over
//! raw text: the text itself plus an ordered sequence of [`EntitySpan`]s.
//! Documents are only built through the validating constructor, so every
//! document in circulation satisfies the span invariants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Document construction errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DocumentError {
    #[error("span [{start}, {end}) out of bounds for text of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("span at index {index} starts before the previous span")]
    OutOfOrder { index: usize },

    #[error("span [{start}, {end}) surface text does not match the document slice")]
    SurfaceMismatch { start: usize, end: usize },
}

/// Entity-type label, per the BC5CDR label set of the reference model.
///
/// Labels from other model label sets round-trip through [`EntityLabel::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityLabel {
    Chemical,
    Disease,
    Other(String),
}

impl EntityLabel {
    /// Wire name as emitted by the tagger (SCREAMING_CASE).
    pub fn as_str(&self) -> &str {
        match self {
            EntityLabel::Chemical => "CHEMICAL",
            EntityLabel::Disease => "DISEASE",
            EntityLabel::Other(name) => name,
        }
    }

    /// The built-in labels.
    pub fn known() -> &'static [EntityLabel] {
        &[EntityLabel::Chemical, EntityLabel::Disease]
    }
}

impl From<String> for EntityLabel {
    fn from(wire: String) -> Self {
        match wire.to_ascii_uppercase().as_str() {
            "CHEMICAL" => EntityLabel::Chemical,
            "DISEASE" => EntityLabel::Disease,
            _ => EntityLabel::Other(wire),
        }
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        label.as_str().to_string()
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recognized mention within a document.
///
/// Offsets are byte offsets into the document text, half-open `[start, end)`.
/// Spans are produced by an entity model, never constructed by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Start byte offset in the document text
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Surface text of the mention
    pub text: String,
    /// Entity-type label
    pub label: EntityLabel,
}

impl EntitySpan {
    pub fn new(start: usize, end: usize, text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            label,
        }
    }

    /// Span length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Raw wire form of a document, validated on deserialization.
#[derive(Deserialize)]
struct RawDocument {
    text: String,
    entities: Vec<EntitySpan>,
}

/// The text plus its recognized entity spans, immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct AnnotatedDocument {
    text: String,
    entities: Vec<EntitySpan>,
}

impl AnnotatedDocument {
    /// Build a document, enforcing the span invariants:
    ///
    /// - every span's `[start, end)` lies within the text and on char
    ///   boundaries, with `start <= end`
    /// - spans are in non-decreasing start order
    /// - each span's surface text equals the slice it covers
    pub fn new(text: String, entities: Vec<EntitySpan>) -> Result<Self, DocumentError> {
        let mut prev_start = 0usize;
        for (index, span) in entities.iter().enumerate() {
            let slice = if span.start <= span.end {
                text.get(span.start..span.end)
            } else {
                None
            };
            let slice = slice.ok_or(DocumentError::OutOfBounds {
                start: span.start,
                end: span.end,
                len: text.len(),
            })?;
            if slice != span.text {
                return Err(DocumentError::SurfaceMismatch {
                    start: span.start,
                    end: span.end,
                });
            }
            if index > 0 && span.start < prev_start {
                return Err(DocumentError::OutOfOrder { index });
            }
            prev_start = span.start;
        }
        Ok(Self { text, entities })
    }

    /// A document with no entities.
    pub fn empty(text: String) -> Self {
        Self {
            text,
            entities: Vec::new(),
        }
    }

    /// The original text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The recognized spans, in document order.
    pub fn entities(&self) -> &[EntitySpan] {
        &self.entities
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl TryFrom<RawDocument> for AnnotatedDocument {
    type Error = DocumentError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        AnnotatedDocument::new(raw.text, raw.entities)
    }
}
