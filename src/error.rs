use std::ops::Range;

use thiserror::Error;

/// Errors produced while parsing a style object literal.
///
/// These never escape [`crate::parse_inline_styles`]; they surface only
/// through [`crate::Extraction::Malformed`] so callers can explain why a
/// declaration was ignored.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}{}", span_suffix(.span))]
pub struct StyleError {
    pub kind: ErrorKind,
    pub span: Option<Range<usize>>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    /// Lexer encountered an unrecognized character/sequence.
    #[error("unrecognized token: {0}")]
    UnrecognizedToken(String),
    /// Parser expected one thing, got another.
    #[error("expected {expected}, got {got}")]
    UnexpectedToken { expected: String, got: String },
    /// Parser reached end of input unexpectedly.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
    /// Something followed the closing brace of the object.
    #[error("unexpected {0} after the style object")]
    TrailingInput(String),
}

fn span_suffix(span: &Option<Range<usize>>) -> String {
    match span {
        Some(span) => format!(" (at byte {}..{})", span.start, span.end),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, StyleError>;

/// Shorthand constructors.
impl StyleError {
    pub fn unrecognized_token(fragment: &str, span: Range<usize>) -> Self {
        Self {
            kind: ErrorKind::UnrecognizedToken(fragment.to_string()),
            span: Some(span),
        }
    }

    pub fn unexpected_token(expected: &str, got: &str, span: Range<usize>) -> Self {
        Self {
            kind: ErrorKind::UnexpectedToken {
                expected: expected.to_string(),
                got: got.to_string(),
            },
            span: Some(span),
        }
    }

    pub fn unexpected_eof(expected: &str) -> Self {
        Self {
            kind: ErrorKind::UnexpectedEof {
                expected: expected.to_string(),
            },
            span: None,
        }
    }

    pub fn trailing_input(got: &str, span: Range<usize>) -> Self {
        Self {
            kind: ErrorKind::TrailingInput(got.to_string()),
            span: Some(span),
        }
    }
}

/// Failures reported by the rewrite layer and its collaborators.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("clipboard write failed: {0}")]
    Clipboard(String),
    #[error("span {0} is outside the document")]
    SpanOutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_span() {
        let err = StyleError::unexpected_token("':'", "','", 4..5);
        assert_eq!(err.to_string(), "expected ':', got ',' (at byte 4..5)");
    }

    #[test]
    fn display_without_span() {
        let err = StyleError::unexpected_eof("'}'");
        assert_eq!(err.to_string(), "unexpected end of input, expected '}'");
    }
}
