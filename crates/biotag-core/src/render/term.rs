//! ANSI terminal entity highlighting.

use crate::models::{AnnotatedDocument, EntityLabel};

use super::Renderer;

const RESET: &str = "\x1b[0m";

fn label_style(label: &EntityLabel) -> &'static str {
    match label {
        // black on yellow / black on magenta
        EntityLabel::Chemical => "\x1b[30;43m",
        EntityLabel::Disease => "\x1b[30;45m",
        EntityLabel::Other(_) => "\x1b[30;47m",
    }
}

/// Renders an annotated document as colored terminal text.
///
/// Each entity is highlighted and suffixed with its label in brackets, so
/// the output stays readable when colors are stripped.
#[derive(Debug, Clone, Default)]
pub struct AnsiRenderer {
    /// Emit label suffixes only, no escape codes.
    plain: bool,
}

impl AnsiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable escape codes for non-tty surfaces.
    pub fn plain(mut self) -> Self {
        self.plain = true;
        self
    }
}

impl Renderer for AnsiRenderer {
    fn render(&self, doc: &AnnotatedDocument) -> String {
        let text = doc.text();
        let mut out = String::with_capacity(text.len() * 2);
        let mut cursor = 0usize;

        for span in doc.entities() {
            if span.start < cursor {
                continue;
            }
            out.push_str(&text[cursor..span.start]);
            if self.plain {
                out.push_str(&format!("{} [{}]", &text[span.start..span.end], span.label));
            } else {
                out.push_str(&format!(
                    "{}{}{} [{}]",
                    label_style(&span.label),
                    &text[span.start..span.end],
                    RESET,
                    span.label
                ));
            }
            cursor = span.end;
        }
        out.push_str(&text[cursor..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntitySpan;

    fn doc() -> AnnotatedDocument {
        AnnotatedDocument::new(
            "Aspirin is used to treat fever.".to_string(),
            vec![
                EntitySpan::new(0, 7, "Aspirin", EntityLabel::Chemical),
                EntitySpan::new(25, 30, "fever", EntityLabel::Disease),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_plain_labels() {
        let out = AnsiRenderer::new().plain().render(&doc());
        assert_eq!(out, "Aspirin [CHEMICAL] is used to treat fever [DISEASE].");
    }

    #[test]
    fn test_colored_output_resets() {
        let out = AnsiRenderer::new().render(&doc());
        assert!(out.contains("\x1b[30;43mAspirin\x1b[0m [CHEMICAL]"));
        assert!(out.contains("\x1b[30;45mfever\x1b[0m [DISEASE]"));
    }

    #[test]
    fn test_no_entities() {
        let doc = AnnotatedDocument::empty("plain text".to_string());
        assert_eq!(AnsiRenderer::new().render(&doc), "plain text");
    }
}
