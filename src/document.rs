use std::fmt;

use crate::error::RewriteError;

/// A zero-based line/column location. Columns count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A range of text between two positions, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

/// Read access to a line-oriented document.
pub trait TextSource {
    fn line_count(&self) -> usize;

    fn line(&self, index: usize) -> Option<&str>;

    /// Text covered by `span`, lines joined with `\n`.
    fn text_in(&self, span: Span) -> Option<String> {
        if span.start > span.end {
            return None;
        }
        let mut out = String::new();
        for index in span.start.line..=span.end.line {
            let line = self.line(index)?;
            let from = if index == span.start.line {
                byte_offset(line, span.start.column)?
            } else {
                0
            };
            let to = if index == span.end.line {
                byte_offset(line, span.end.column)?
            } else {
                line.len()
            };
            if index > span.start.line {
                out.push('\n');
            }
            out.push_str(line.get(from..to)?);
        }
        Some(out)
    }
}

/// Applies one text replacement per call.
pub trait EditApplier {
    fn replace(&mut self, span: Span, text: &str) -> Result<(), RewriteError>;
}

/// In-memory document, split on `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl TextSource for Document {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }
}

impl EditApplier for Document {
    fn replace(&mut self, span: Span, text: &str) -> Result<(), RewriteError> {
        let out_of_range = || RewriteError::SpanOutOfRange(span.to_string());
        if span.start > span.end {
            return Err(out_of_range());
        }

        let start_line = self.line(span.start.line).ok_or_else(out_of_range)?;
        let end_line = self.line(span.end.line).ok_or_else(out_of_range)?;
        let from = byte_offset(start_line, span.start.column).ok_or_else(out_of_range)?;
        let to = byte_offset(end_line, span.end.column).ok_or_else(out_of_range)?;

        let replaced = format!("{}{text}{}", &start_line[..from], &end_line[to..]);
        let new_lines: Vec<String> = replaced.split('\n').map(str::to_string).collect();
        self.lines.splice(span.start.line..=span.end.line, new_lines);
        Ok(())
    }
}

/// Byte offset of character `column` in `line`; the line length is valid.
fn byte_offset(line: &str, column: usize) -> Option<usize> {
    line.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()))
        .nth(column)
}
