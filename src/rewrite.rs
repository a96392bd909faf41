//! Rewrite strategies: relocate a tag's inline style and edit the tag.
//!
//! The engine never touches editor state directly. Documents, the clipboard
//! and the class-name prompt are passed in as trait objects so an editor
//! integration, the CLI and the tests can each supply their own.

use crate::config::Config;
use crate::css::{convert_to_css, css_rule};
use crate::document::{EditApplier, Position, Span, TextSource};
use crate::error::{RewriteError, StyleError};
use crate::extract::Extraction;
use crate::tag;

/// Destination for extracted CSS text.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), RewriteError>;
}

/// Asks the user for a string. `None` means the prompt was cancelled.
pub trait Prompt {
    fn input(&mut self, message: &str, default: &str) -> Option<String>;
}

/// Which rewrite the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteMode {
    /// Copy the selection's styles as CSS; the document is left alone.
    Copy,
    /// Remove the style attribute and copy it as an anonymous rule.
    Remove,
    /// Remove the style attribute, set a class, copy it as a class rule.
    Class,
}

impl RewriteMode {
    pub fn title(self) -> &'static str {
        match self {
            RewriteMode::Copy => "Copy Selected Styles as CSS",
            RewriteMode::Remove => "Copy Inline Styles as CSS",
            RewriteMode::Class => "Copy Inline Styles as CSS Class",
        }
    }
}

/// Code actions offered for a tag: both tag rewrites when it has a style.
pub fn available_actions(tag_text: &str) -> Vec<RewriteMode> {
    if tag::has_inline_style(tag_text) {
        vec![RewriteMode::Remove, RewriteMode::Class]
    } else {
        Vec::new()
    }
}

/// Cursor or selection in a document. `active` is the cursor end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub fn cursor(at: Position) -> Self {
        Self {
            anchor: at,
            active: at,
        }
    }

    pub fn span(&self) -> Span {
        let (start, end) = if self.anchor <= self.active {
            (self.anchor, self.active)
        } else {
            (self.active, self.anchor)
        };
        Span { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `Copy` needs a non-empty selection.
    NoSelection,
    /// No `<`…`>` tag encloses the cursor.
    NoTag,
    /// The text holds no usable inline style.
    NoStyle,
    /// A style was found but its object literal did not parse.
    Malformed(StyleError),
    /// The class-name prompt was dismissed; nothing was changed.
    Cancelled,
    /// CSS went to the clipboard; the document was not edited.
    Copied { clipboard: String },
    /// The tag was rewritten and CSS went to the clipboard.
    Rewritten {
        clipboard: String,
        class_name: Option<String>,
    },
}

pub struct Rewriter<'a> {
    config: &'a Config,
    clipboard: &'a mut dyn Clipboard,
    prompt: &'a mut dyn Prompt,
}

impl<'a> Rewriter<'a> {
    pub fn new(
        config: &'a Config,
        clipboard: &'a mut dyn Clipboard,
        prompt: &'a mut dyn Prompt,
    ) -> Self {
        Self {
            config,
            clipboard,
            prompt,
        }
    }

    pub fn run<D>(
        &mut self,
        mode: RewriteMode,
        doc: &mut D,
        selection: Selection,
    ) -> Result<Outcome, RewriteError>
    where
        D: TextSource + EditApplier + ?Sized,
    {
        tracing::debug!(?mode, line = selection.active.line, "running rewrite");
        match mode {
            RewriteMode::Copy => self.copy_selection(&*doc, selection),
            RewriteMode::Remove | RewriteMode::Class => self.rewrite_tag(mode, doc, selection),
        }
    }

    fn copy_selection<D>(&mut self, doc: &D, selection: Selection) -> Result<Outcome, RewriteError>
    where
        D: TextSource + ?Sized,
    {
        if selection.is_empty() {
            return Ok(Outcome::NoSelection);
        }
        let span = selection.span();
        let text = doc
            .text_in(span)
            .ok_or_else(|| RewriteError::SpanOutOfRange(span.to_string()))?;

        let mapping = match crate::extract(&text) {
            Extraction::Parsed(mapping) if !mapping.is_empty() => mapping,
            Extraction::Malformed(err) => return Ok(Outcome::Malformed(err)),
            _ => return Ok(Outcome::NoStyle),
        };

        let css = convert_to_css(&mapping);
        self.clipboard.write_text(&css)?;
        Ok(Outcome::Copied { clipboard: css })
    }

    fn rewrite_tag<D>(
        &mut self,
        mode: RewriteMode,
        doc: &mut D,
        selection: Selection,
    ) -> Result<Outcome, RewriteError>
    where
        D: TextSource + EditApplier + ?Sized,
    {
        let Some(span) = tag::find_tag_range(&*doc, selection.active.line) else {
            return Ok(Outcome::NoTag);
        };
        let tag_text = doc
            .text_in(span)
            .ok_or_else(|| RewriteError::SpanOutOfRange(span.to_string()))?;

        let Some(declaration) = tag::find_style_declaration(&tag_text) else {
            tracing::warn!(%span, "no inline style found in this tag");
            return Ok(Outcome::NoStyle);
        };
        let mapping = match declaration.source.parse() {
            Extraction::Parsed(mapping) if !mapping.is_empty() => mapping,
            Extraction::Malformed(err) => {
                tracing::warn!(%span, error = %err, "inline style could not be parsed");
                return Ok(Outcome::Malformed(err));
            }
            _ => {
                tracing::warn!(%span, "no inline style found in this tag");
                return Ok(Outcome::NoStyle);
            }
        };

        let css = convert_to_css(&mapping);
        let stripped = tag::remove_declaration(
            &tag_text,
            declaration.matched,
            self.config.collapse_whitespace,
        );

        let class_name = match mode {
            RewriteMode::Class => {
                let default = tag::existing_class_name(&stripped).unwrap_or("");
                let entered = self
                    .prompt
                    .input(&self.config.class_prompt, default)
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty());
                match entered {
                    Some(name) => Some(name),
                    None => return Ok(Outcome::Cancelled),
                }
            }
            _ => None,
        };

        let updated = match &class_name {
            Some(name) => tag::apply_class_name(&stripped, name, self.config.class_attribute),
            None => stripped,
        };
        doc.replace(span, &updated)?;
        tracing::debug!(%span, properties = mapping.len(), "rewrote tag");

        let clipboard = css_rule(class_name.as_deref(), &css);
        self.clipboard.write_text(&clipboard)?;
        Ok(Outcome::Rewritten {
            clipboard,
            class_name,
        })
    }
}
