use logos::Logos;

use crate::error::{Result, StyleError};
use crate::token::{Spanned, Token};

/// Tokenize a style object literal into a vector of spanned tokens.
pub fn lex(source: &str) -> Result<Vec<Spanned>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => {
                tokens.push(Spanned { token, span });
            }
            Err(()) => {
                let fragment = &source[span.clone()];
                return Err(StyleError::unrecognized_token(fragment, span));
            }
        }
    }

    tracing::trace!(count = tokens.len(), "lexed style object");
    Ok(tokens)
}
