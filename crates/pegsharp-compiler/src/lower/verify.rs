//! Post-flattening verification.
//!
//! Checks the invariants the generators rely on: every alias target resolves
//! within the flattened set, and rule names are unique. Both failures are
//! user-facing (a dangling reference comes from the grammar text; a collision
//! comes from a rule name matching the synthesis pattern of another rule).
//! Rules that nothing references are reported as warnings; the first rule is
//! the entry point and exempt.

use indexmap::IndexSet;

use crate::diagnostics::Diagnostics;
use crate::model::{ExprKind, Rule};

pub fn verify(rules: &[Rule], diagnostics: &mut Diagnostics) {
    if rules.is_empty() {
        diagnostics.error(None, "grammar defines no rules");
        return;
    }

    let mut names: IndexSet<&str> = IndexSet::new();
    for rule in rules {
        if !names.insert(rule.name.as_str()) {
            diagnostics.error(
                rule.span,
                format!(
                    "rule name `{}` collides with another (possibly synthesized) rule",
                    rule.name
                ),
            );
        }
    }

    let mut referenced: IndexSet<String> = IndexSet::new();
    for rule in rules {
        // Post-flattening, aliases only occur as the rule body or as direct
        // children of it; a full walk keeps this robust anyway.
        rule.expr.walk(&mut |expr| {
            if let ExprKind::Alias { to } = &expr.kind {
                if names.contains(to.as_str()) {
                    referenced.insert(to.clone());
                } else {
                    diagnostics.error(
                        rule.span,
                        format!("rule `{}` references undefined rule `{to}`", rule.name),
                    );
                }
            }
        });
    }

    for rule in &rules[1..] {
        if !referenced.contains(rule.name.as_str()) {
            diagnostics.warning(
                rule.span,
                format!("rule `{}` is never referenced", rule.name),
            );
        }
    }
}
