//! HTML entity highlighting.
//!
//! Produces the notebook-style highlighted view: document text with each
//! entity wrapped in a colored `<mark>` carrying a small label chip.

use crate::models::{AnnotatedDocument, EntityLabel};

use super::Renderer;

/// Background color per label, defaults matching the usual entity palette.
fn label_color(label: &EntityLabel) -> &'static str {
    match label {
        EntityLabel::Chemical => "#feca74",
        EntityLabel::Disease => "#aa9cfc",
        EntityLabel::Other(_) => "#dddddd",
    }
}

/// Renders an annotated document as a self-contained HTML fragment.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    /// Skip the wrapping `<div>` with generation metadata.
    bare: bool,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit only the marked-up text, without the wrapping `<div>`.
    pub fn bare(mut self) -> Self {
        self.bare = true;
        self
    }

    fn render_body(&self, doc: &AnnotatedDocument) -> String {
        let text = doc.text();
        let mut out = String::with_capacity(text.len() * 2);
        let mut cursor = 0usize;

        for span in doc.entities() {
            // Overlapping spans render from the end of the previous one
            if span.start < cursor {
                continue;
            }
            push_escaped(&mut out, &text[cursor..span.start]);
            out.push_str(&format!(
                "<mark class=\"entity\" style=\"background: {}\">{}<span class=\"entity-label\">{}</span></mark>",
                label_color(&span.label),
                escape_html(&text[span.start..span.end]),
                escape_html(span.label.as_str()),
            ));
            cursor = span.end;
        }
        push_escaped(&mut out, &text[cursor..]);
        out
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, doc: &AnnotatedDocument) -> String {
        let body = self.render_body(doc);
        if self.bare {
            return body;
        }
        format!(
            "<div class=\"entities\" data-generated-at=\"{}\">{}</div>",
            chrono::Utc::now().to_rfc3339(),
            body
        )
    }
}

/// Escape a string for HTML text content.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    push_escaped(&mut out, s);
    out
}

fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
