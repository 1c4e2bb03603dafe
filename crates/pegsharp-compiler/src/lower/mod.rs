//! Lowering: raw expression tree to a flat, verified rule set.
//!
//! The passes run in a fixed order:
//! - `normalize` - raw tree to the expression model, dropping actions
//! - `discard` - mark silent nodes per the configuration
//! - `flatten` - extract anonymous composites into synthesized rules
//! - `case_names` - give every union case a definite name
//! - `verify` - resolve aliases, reject collisions

mod case_names;
mod discard;
mod flatten;
mod normalize;
mod verify;

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::frontend::ast::Grammar;
use crate::model::Rule;
use crate::{Error, PassResult};

/// Lower a parsed grammar into the flat rule list the generators consume.
pub fn lower(grammar: Grammar, config: &Config) -> PassResult<Vec<Rule>> {
    let mut rules: Vec<Rule> = grammar
        .rules
        .into_iter()
        .map(normalize::normalize_rule)
        .collect();

    for rule in &mut rules {
        discard::mark_discards(rule, config);
    }

    let mut rules = flatten::flatten(rules);

    for rule in &mut rules {
        case_names::assign_case_names(rule);
    }

    let mut diagnostics = Diagnostics::new();
    verify::verify(&rules, &mut diagnostics);
    if diagnostics.has_errors() {
        return Err(Error::GrammarAnalyzeError(diagnostics));
    }
    Ok((rules, diagnostics))
}
