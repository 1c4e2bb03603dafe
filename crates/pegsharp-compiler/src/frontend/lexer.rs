//! Grammar tokenizer.

use logos::{Lexer, Logos};

use crate::diagnostics::{Diagnostics, Span};
use crate::model::ClassPart;

/// A lexed character class, before it becomes an expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassToken {
    pub parts: Vec<ClassPart>,
    pub inverted: bool,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip(r"//[^\n]*", allow_greedy = true))]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum Token {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r#""([^"\\\n]|\\.)*""#, unescape_string)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#, unescape_string)]
    Str(String),

    #[regex(r"\[([^\]\\]|\\.)*\]", parse_class)]
    Class(ClassToken),

    /// `{ ... }` semantic action; the payload is the balanced code block.
    #[token("{", action_block)]
    Action(String),

    #[token("=")]
    Equals,
    #[token("/")]
    Slash,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("&")]
    Amp,
    #[token("!")]
    Bang,
    #[token("$")]
    Dollar,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token(",")]
    Comma,
    #[token("|")]
    Pipe,
    #[token(".")]
    Dot,
    #[token(";")]
    Semi,
}

fn unescape_char(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}

fn unescape_string(lex: &mut Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                value.push(unescape_char(escaped));
            }
        } else {
            value.push(c);
        }
    }
    value
}

fn parse_class(lex: &mut Lexer<Token>) -> ClassToken {
    let slice = lex.slice();
    let mut inner = &slice[1..slice.len() - 1];
    let inverted = inner.starts_with('^');
    if inverted {
        inner = &inner[1..];
    }

    // Decode escapes first, then pair up `a-z` ranges. A dash at either end
    // of the class is a plain character.
    let mut chars: Vec<char> = Vec::new();
    let mut escaped: Vec<bool> = Vec::new();
    let mut iter = inner.chars();
    while let Some(c) = iter.next() {
        if c == '\\' {
            if let Some(e) = iter.next() {
                chars.push(unescape_char(e));
                escaped.push(true);
            }
        } else {
            chars.push(c);
            escaped.push(false);
        }
    }

    let mut parts = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let is_range = i + 2 < chars.len() && chars[i + 1] == '-' && !escaped[i + 1];
        if is_range {
            parts.push(ClassPart::Range(chars[i], chars[i + 2]));
            i += 3;
        } else {
            parts.push(ClassPart::Single(chars[i]));
            i += 1;
        }
    }

    ClassToken { parts, inverted }
}

/// Consume a balanced `{ ... }` block; the opening brace is already matched.
fn action_block(lex: &mut Lexer<Token>) -> Option<String> {
    let remainder = lex.remainder();
    let mut depth = 1usize;
    for (i, c) in remainder.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    lex.bump(i + 1);
                    return Some(remainder[..i].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Tokenize the whole source, reporting unrecognized input as diagnostics.
pub fn lex(source: &str, diagnostics: &mut Diagnostics) -> Vec<(Token, Span)> {
    let mut tokens = Vec::new();
    for (result, range) in Token::lexer(source).spanned() {
        let span = Span::new(range.start, range.end);
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => diagnostics.error(
                span,
                format!("unexpected input `{}`", &source[range.start..range.end]),
            ),
        }
    }
    tokens
}
