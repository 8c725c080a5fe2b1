//! Text analysis entry point.
//!
//! [`TextAnalyzer`] ties the pipeline together: resolve a filename under
//! the configured [`DataRoot`], read the whole file as UTF-8, run the
//! injected entity model once, and hold the resulting
//! [`AnnotatedDocument`] for listing or visualization.
//!
//! Failures are propagated, never swallowed: a missing file is an error,
//! not an empty document.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{EntityModel, ModelError};
use crate::models::{AnnotatedDocument, EntitySpan};
use crate::render::{RenderError, RenderSink, Renderer};

/// Default data directory, relative to the working directory.
const DEFAULT_DATA_DIR: &str = "data";

/// Analyzer errors.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not valid UTF-8 text")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("no render sink attached; attach a display surface before calling entity_viz")]
    RenderTarget,

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// The directory input files are resolved against.
///
/// Explicit configuration value; nothing is derived from the installation
/// location. Defaults to `./data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRoot {
    path: PathBuf,
}

impl DataRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Join a filename onto the root. No traversal validation is performed;
    /// callers own the filenames they pass in.
    pub fn resolve(&self, filename: &str) -> PathBuf {
        self.path.join(filename)
    }
}

impl Default for DataRoot {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

/// Reads a text file, runs entity recognition over it, and exposes the
/// recognized spans.
pub struct TextAnalyzer {
    doc: AnnotatedDocument,
    sink: Option<Box<dyn RenderSink>>,
}

impl std::fmt::Debug for TextAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextAnalyzer")
            .field("doc", &self.doc)
            .field("sink", &self.sink.as_ref().map(|_| "dyn RenderSink"))
            .finish()
    }
}

impl TextAnalyzer {
    /// Analyze `<root>/<filename>`.
    ///
    /// Whole-file blocking read, UTF-8 decode, then one model invocation.
    /// Every failure propagates: `Io` for filesystem errors, `Decode` for
    /// non-UTF-8 content, `Model` for recognition failures.
    pub fn from_file(
        root: &DataRoot,
        filename: &str,
        model: &dyn EntityModel,
    ) -> AnalyzerResult<Self> {
        let path = root.resolve(filename);
        let bytes = std::fs::read(&path).map_err(|source| AnalyzerError::Io {
            path: path.clone(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|source| AnalyzerError::Decode {
            path: path.clone(),
            source,
        })?;
        Self::from_text(&text, model)
    }

    /// Analyze text directly, bypassing the filesystem.
    pub fn from_text(text: &str, model: &dyn EntityModel) -> AnalyzerResult<Self> {
        let doc = model.annotate(text)?;
        Ok(Self { doc, sink: None })
    }

    /// Attach the display surface `entity_viz` delivers to.
    pub fn attach_sink(&mut self, sink: Box<dyn RenderSink>) {
        self.sink = Some(sink);
    }

    /// The annotated document.
    pub fn document(&self) -> &AnnotatedDocument {
        &self.doc
    }

    /// The source text, exactly as read.
    pub fn text(&self) -> &str {
        self.doc.text()
    }

    /// The recognized entities, in document order. No filtering, no
    /// re-sorting; repeated calls return the same spans.
    pub fn get_entities(&self) -> &[EntitySpan] {
        self.doc.entities()
    }

    /// Render the document's entities through `renderer` and deliver the
    /// artifact to the attached sink.
    ///
    /// Fails with [`AnalyzerError::RenderTarget`] if no sink is attached;
    /// a display surface is a configuration requirement, not an ambient
    /// assumption.
    pub fn entity_viz(&mut self, renderer: &dyn Renderer) -> AnalyzerResult<()> {
        let sink = self.sink.as_mut().ok_or(AnalyzerError::RenderTarget)?;
        let artifact = renderer.render(&self.doc);
        sink.accept(&artifact)?;
        Ok(())
    }
}
