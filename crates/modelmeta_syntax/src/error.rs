//! Parse errors and their diagnostic rendering.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error as ThisError;

/// Byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A lex or parse failure with its source location.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Attach the file name and source text for rich terminal rendering.
    pub fn into_diagnostic(self, file_name: &str, source: &str) -> ParseDiagnostic {
        ParseDiagnostic {
            message: self.message,
            src: NamedSource::new(file_name, source.to_string()),
            at: (self.span.start, self.span.end.saturating_sub(self.span.start)).into(),
        }
    }
}

/// A [`ParseError`] wired up with source context for miette.
#[derive(Debug, ThisError, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(modelmeta::parse))]
pub struct ParseDiagnostic {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("here")]
    at: SourceSpan,
}
