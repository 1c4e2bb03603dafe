//! Pegsharp compiler: grammar front end, lowering passes, and F# code generation.
//!
//! This crate provides the compilation pipeline for pegsharp grammars:
//! - `frontend` - lexer and grammar parser producing the raw expression tree
//! - `model` - the normalized expression model shared by all passes
//! - `lower` - normalization, discard marking, flattening, case naming, verification
//! - `emit` - F# type and parser-function generation, output assembly
//! - `diagnostics` - error reporting
//!
//! The pipeline is single-threaded and synchronous: one grammar compiles to
//! one output document in one call.

pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod frontend;
pub mod lower;
pub mod model;

pub use config::Config;
pub use diagnostics::{Diagnostic, Diagnostics, DiagnosticsPrinter, Severity, Span};

/// Result type for pipeline stages that produce both output and diagnostics.
///
/// Each stage returns its typed output alongside any non-fatal diagnostics it
/// collected. Fatal failures use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

/// Errors that can occur while compiling a grammar.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Malformed grammar source text. The pipeline stops here.
    #[error("grammar parsing failed with {} errors", .0.error_count())]
    GrammarParseError(Diagnostics),

    /// The grammar parsed but is not compilable (undefined references,
    /// colliding rule names, no rules at all).
    #[error("grammar analysis failed with {} errors", .0.error_count())]
    GrammarAnalyzeError(Diagnostics),

    /// A programming-invariant violation: an expression reached a generator
    /// in a shape the lowering passes guarantee cannot occur.
    #[error("internal compiler error: {0}")]
    Internal(String),
}

impl Error {
    /// The diagnostics attached to a user-facing error, if any.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::GrammarParseError(d) | Error::GrammarAnalyzeError(d) => Some(d),
            Error::Internal(_) => None,
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Compile a grammar to one F# source document.
///
/// Runs the full pipeline: parse, normalize, mark discards, flatten, assign
/// case names, verify, then render types and parsers between the preamble
/// and postamble. Returns the output text and any warnings collected along
/// the way.
pub fn compile(source: &str, config: &Config) -> PassResult<String> {
    let (grammar, mut diagnostics) = frontend::parse(source)?;
    let (rules, lower_diagnostics) = lower::lower(grammar, config)?;
    diagnostics.extend(lower_diagnostics);
    let output = emit::emit(&rules, config)?;
    Ok((output, diagnostics))
}
