use logos::Logos;

/// Tokens produced by lexing a JSX style object literal.
///
/// The grammar is a JSON superset: keys may be bare identifiers, strings may
/// use either quote style, and trailing commas are tolerated by the parser.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // ── Keywords ───────────────────────────────────────────────────────
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // ── Literals ───────────────────────────────────────────────────────
    #[regex(r"-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| unescape(lex.slice()))]
    String(String),

    // ── Identifiers (bare property keys) ───────────────────────────────
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice().to_string())]
    Ident(String),

    // ── Punctuation ────────────────────────────────────────────────────
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
}

impl Token {
    /// Human-readable name for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::True => "'true'",
            Token::False => "'false'",
            Token::Null => "'null'",
            Token::Number(_) => "number",
            Token::String(_) => "string",
            Token::Ident(_) => "identifier",
            Token::Colon => "':'",
            Token::Comma => "','",
            Token::LBrace => "'{'",
            Token::RBrace => "'}'",
            Token::LBracket => "'['",
            Token::RBracket => "']'",
        }
    }
}

/// A token with its source location (byte offset span).
#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Strip the quotes from a string literal and resolve its escapes.
///
/// Unknown escapes keep the escaped character, the way JavaScript does.
fn unescape(literal: &str) -> Option<String> {
    let body = &literal[1..literal.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    let mut in_break = false;

    while let Some(c) = chars.next() {
        // Raw line breaks inside a literal collapse to a single space.
        if c == '\r' || c == '\n' {
            if !in_break {
                out.push(' ');
                in_break = true;
            }
            continue;
        }
        in_break = false;
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'u' => {
                let code = read_hex4(&mut chars)?;
                out.push(match code {
                    0xD800..=0xDBFF => {
                        // High surrogate: pair it with a following `\uDC00`-`\uDFFF`.
                        let mut ahead = chars.clone();
                        let low = match (ahead.next(), ahead.next()) {
                            (Some('\\'), Some('u')) => read_hex4(&mut ahead),
                            _ => None,
                        };
                        match low {
                            Some(low @ 0xDC00..=0xDFFF) => {
                                chars = ahead;
                                char::from_u32(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00))?
                            }
                            _ => char::REPLACEMENT_CHARACTER,
                        }
                    }
                    0xDC00..=0xDFFF => char::REPLACEMENT_CHARACTER,
                    _ => char::from_u32(code)?,
                });
            }
            other => out.push(other),
        }
    }

    Some(out)
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok()
}
