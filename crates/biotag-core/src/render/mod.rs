//! Entity visualization.
//!
//! Rendering is split into two seams:
//! - a [`Renderer`] turns an [`AnnotatedDocument`] into a display artifact
//!   (HTML for notebook-style surfaces, ANSI for terminals)
//! - a [`RenderSink`] is the attached display surface the artifact is
//!   delivered to
//!
//! The analyzer requires a sink to be attached before visualizing; there is
//! no implicit interactive front end.

mod html;
mod term;

use std::io;

use thiserror::Error;

use crate::models::AnnotatedDocument;

pub use html::HtmlRenderer;
pub use term::AnsiRenderer;

/// Rendering/delivery errors.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("render sink write failed: {0}")]
    Sink(#[from] io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Turns an annotated document into a display artifact.
pub trait Renderer {
    fn render(&self, doc: &AnnotatedDocument) -> String;
}

/// An attached display surface.
pub trait RenderSink {
    /// Deliver one rendered artifact to the surface.
    fn accept(&mut self, artifact: &str) -> RenderResult<()>;
}

/// Sink over any `io::Write` (stdout, a file, a socket).
pub struct WriterSink<W: io::Write> {
    writer: W,
}

impl<W: io::Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: io::Write> RenderSink for WriterSink<W> {
    fn accept(&mut self, artifact: &str) -> RenderResult<()> {
        self.writer.write_all(artifact.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// In-memory sink, mainly for tests and embedding callers.
#[derive(Debug, Default)]
pub struct BufferSink {
    contents: String,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn into_string(self) -> String {
        self.contents
    }
}

impl RenderSink for BufferSink {
    fn accept(&mut self, artifact: &str) -> RenderResult<()> {
        self.contents.push_str(artifact);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sink_accumulates() {
        let mut sink = BufferSink::new();
        sink.accept("one").unwrap();
        sink.accept("two").unwrap();
        assert_eq!(sink.contents(), "onetwo");
        assert_eq!(sink.into_string(), "onetwo");
    }

    #[test]
    fn test_writer_sink_appends_newline() {
        let mut out: Vec<u8> = Vec::new();
        {
            let mut sink = WriterSink::new(&mut out);
            sink.accept("artifact").unwrap();
        }
        assert_eq!(out, b"artifact\n");
    }
}
