//! Grammar front end: lexer and recursive-descent parser.

pub mod ast;
mod grammar;
mod lexer;

use crate::diagnostics::Diagnostics;
use crate::{Error, PassResult};

/// Parse grammar source text into the raw expression tree.
///
/// Malformed input produces [`Error::GrammarParseError`] carrying every
/// collected diagnostic; the parser recovers at rule boundaries so one bad
/// rule does not hide errors in later ones.
pub fn parse(source: &str) -> PassResult<ast::Grammar> {
    let mut diagnostics = Diagnostics::new();
    let tokens = lexer::lex(source, &mut diagnostics);
    if diagnostics.has_errors() {
        return Err(Error::GrammarParseError(diagnostics));
    }

    let mut parser = grammar::Parser::new(&tokens, source.len());
    let parsed = parser.parse_grammar();
    diagnostics.extend(parser.diagnostics);
    if diagnostics.has_errors() {
        return Err(Error::GrammarParseError(diagnostics));
    }
    Ok((parsed, diagnostics))
}
