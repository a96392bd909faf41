use crate::error::{Result, StyleError};
use crate::lexer;
use crate::mapping::StyleMapping;
use crate::token::{Spanned, Token};

/// Parse a JSX style object literal into a [`StyleMapping`].
///
/// Accepts `{ color: 'red' }`, `{ "color": "red", }` and the brace-less
/// `color: 'red'` that results from selecting only the inside of an object.
pub fn parse_object_literal(candidate: &str) -> Result<StyleMapping> {
    let tokens = lexer::lex(candidate)?;
    Parser::new(tokens).parse()
}

/// Recursive descent parser for style object literals.
///
/// Grammar (LL(1)):
///
/// ```text
/// object  := '{' members '}' | members
/// members := (member (',' member)* ','?)?
/// member  := key ':' value
/// key     := identifier | string | number | 'true' | 'false' | 'null'
/// value   := string | number | 'true' | 'false' | 'null' | array | '{' members '}'
/// array   := '[' (value (',' value)* ','?)? ']'
/// ```
pub struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Spanned>) -> Self {
        Self { tokens, pos: 0 }
    }

    // ── Helpers ────────────────────────────────────────────────────────

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn peek_spanned(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Spanned> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token) -> Result<()> {
        match self.peek_spanned() {
            Some(s) if &s.token == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(s) => Err(StyleError::unexpected_token(
                expected.describe(),
                s.token.describe(),
                s.span.clone(),
            )),
            None => Err(StyleError::unexpected_eof(expected.describe())),
        }
    }

    fn at(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.at(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    // ── Top-level ──────────────────────────────────────────────────────

    /// Parse the whole token stream as one style object.
    pub fn parse(&mut self) -> Result<StyleMapping> {
        let braced = self.eat(&Token::LBrace);
        let mapping = self.parse_members(braced)?;

        if let Some(s) = self.peek_spanned() {
            return Err(StyleError::trailing_input(
                s.token.describe(),
                s.span.clone(),
            ));
        }

        Ok(mapping)
    }

    /// Members up to the closing brace (consumed) or the end of input.
    fn parse_members(&mut self, braced: bool) -> Result<StyleMapping> {
        let mut mapping = StyleMapping::new();

        while !self.at_close(braced) {
            let key = self.parse_key()?;
            self.expect(&Token::Colon)?;
            let value = self.parse_value()?;
            mapping.insert(key, value);

            if !self.eat(&Token::Comma) {
                break;
            }
        }

        if braced {
            self.expect(&Token::RBrace)?;
        }

        Ok(mapping)
    }

    fn at_close(&self, braced: bool) -> bool {
        if braced {
            self.at(&Token::RBrace)
        } else {
            self.peek().is_none()
        }
    }

    // ── Members ────────────────────────────────────────────────────────

    fn parse_key(&mut self) -> Result<String> {
        let Some(s) = self.advance() else {
            return Err(StyleError::unexpected_eof("property name"));
        };
        match &s.token {
            Token::Ident(name) | Token::String(name) => Ok(name.clone()),
            Token::Number(n) => Ok(format_number(*n)),
            Token::True => Ok("true".to_string()),
            Token::False => Ok("false".to_string()),
            Token::Null => Ok("null".to_string()),
            other => Err(StyleError::unexpected_token(
                "property name",
                other.describe(),
                s.span.clone(),
            )),
        }
    }

    fn parse_value(&mut self) -> Result<String> {
        let Some(Spanned { token, span }) = self.advance().cloned() else {
            return Err(StyleError::unexpected_eof("value"));
        };
        match token {
            Token::String(value) => Ok(value),
            Token::Number(n) => Ok(format_number(n)),
            Token::True => Ok("true".to_string()),
            Token::False => Ok("false".to_string()),
            Token::Null => Ok("null".to_string()),
            Token::LBracket => self.parse_array(),
            // A nested object is well-formed but has no CSS rendering, so it
            // stringifies the way JavaScript would.
            Token::LBrace => {
                self.parse_members(true)?;
                Ok(OBJECT_STRING.to_string())
            }
            other => Err(StyleError::unexpected_token("value", other.describe(), span)),
        }
    }

    /// Arrays render the way a JavaScript array stringifies: elements
    /// joined by commas, `null` as the empty string.
    fn parse_array(&mut self) -> Result<String> {
        let mut items = Vec::new();

        while !self.at(&Token::RBracket) {
            if self.eat(&Token::Null) {
                items.push(String::new());
            } else {
                items.push(self.parse_value()?);
            }
            if !self.eat(&Token::Comma) {
                break;
            }
        }

        self.expect(&Token::RBracket)?;
        Ok(items.join(","))
    }
}

const OBJECT_STRING: &str = "[object Object]";

/// Render a number literal the way JavaScript stringifies it: shortest
/// round-trip digits, exponent form outside `1e-6..1e21`.
fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}
