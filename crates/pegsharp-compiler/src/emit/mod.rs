//! F# code generation from the flattened rule set.
//!
//! Two structurally different generators read the same rules: `types`
//! renders the parse-tree shape as one mutually-recursive type group, and
//! `parsers` renders one backtracking recursive-descent function per rule.
//! This module owns the emitter context and assembles the final document.

mod naming;
mod parsers;
mod types;

#[cfg(test)]
mod emit_tests;

pub use naming::{pascal_case, snake_case};

use crate::config::Config;
use crate::model::{Expr, Rule};
use crate::{Error, Result};

/// The shared marker type every recognized literal collapses to. The
/// emitted types record *that* a literal matched, never which text.
pub(crate) const LITERAL_MARKER: &str = "MatchedLiteral";

const PREAMBLE: &str = include_str!("../assets/preamble.fs");
const POSTAMBLE: &str = include_str!("../assets/postamble.fs");

/// F# emitter over a flattened, verified rule set.
pub struct Emitter<'a> {
    rules: &'a [Rule],
    config: &'a Config,
    /// Counter for defensive fallback names; caller-owned, not global.
    missing_names: u32,
}

impl<'a> Emitter<'a> {
    pub fn new(rules: &'a [Rule], config: &'a Config) -> Self {
        Self {
            rules,
            config,
            missing_names: 0,
        }
    }

    /// Preamble, type block, parser block, root binding, postamble.
    pub fn emit(mut self) -> Result<String> {
        let first = self
            .rules
            .first()
            .ok_or_else(|| Error::Internal("emitter invoked with no rules".to_string()))?;

        let types = self.render_types()?;
        let parsers = self.render_parsers()?;

        let preamble = self.config.preamble.as_deref().unwrap_or(PREAMBLE);
        let postamble = self.config.postamble.as_deref().unwrap_or(POSTAMBLE);

        let mut output = String::new();
        output.push_str(preamble.trim_end());
        output.push_str("\n\n");
        output.push_str(&types);
        output.push_str("\n\n");
        output.push_str(&parsers);
        // The fixed postamble drives the grammar through this binding.
        output.push_str(&format!("\n\nlet root = {}\n\n", snake_case(&first.name)));
        output.push_str(postamble.trim_end());
        output.push('\n');
        Ok(output)
    }

    /// Name for a node that should have been named by earlier passes.
    /// Labels the defective spot without colliding with real rules.
    pub(crate) fn fallback_name(&mut self) -> String {
        self.missing_names += 1;
        format!("MissingName{}", self.missing_names)
    }

    pub(crate) fn case_constructor(&mut self, case: &Expr) -> String {
        match &case.name {
            Some(name) => pascal_case(name),
            None => self.fallback_name(),
        }
    }
}

/// Emit the full F# document for a flattened rule set.
pub fn emit(rules: &[Rule], config: &Config) -> Result<String> {
    Emitter::new(rules, config).emit()
}
