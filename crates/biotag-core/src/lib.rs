//! Biotag Core Library
//!
//! Biomedical entity tagging over local text files.
//!
//! # Architecture
//!
//! ```text
//! File read → UTF-8 decode → EntityModel::annotate → AnnotatedDocument
//!                                                          │
//!                                          ┌───────────────┼───────────────┐
//!                                          │               │               │
//!                                          ▼               ▼               ▼
//!                                    get_entities()   HtmlRenderer    AnsiRenderer
//!                                                          │               │
//!                                                          └───── RenderSink ─────▶ display
//! ```
//!
//! # Core Principle
//!
//! **The recognition capability is injected, never ambient.** The analyzer
//! takes an [`EntityModel`] handle and a [`render::RenderSink`] explicitly;
//! there is no hidden global model and no implicit interactive front end.
//!
//! # Modules
//!
//! - [`models`]: Domain types ([`AnnotatedDocument`], [`EntitySpan`], [`EntityLabel`])
//! - [`model`]: The injectable entity-model seam
//! - [`analyzer`]: [`TextAnalyzer`] and the [`DataRoot`] configuration
//! - [`render`]: HTML and ANSI entity highlighting with pluggable sinks

pub mod analyzer;
pub mod model;
pub mod models;
pub mod render;

// Re-export commonly used types
pub use analyzer::{AnalyzerError, AnalyzerResult, DataRoot, TextAnalyzer};
pub use model::{EntityModel, ModelError, ModelHandle, ModelResult};
pub use models::{AnnotatedDocument, DocumentError, EntityLabel, EntitySpan};
pub use render::{AnsiRenderer, BufferSink, HtmlRenderer, RenderError, Renderer, RenderSink, WriterSink};
