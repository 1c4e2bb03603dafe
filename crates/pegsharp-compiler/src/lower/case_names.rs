//! Case naming: gives every union case a definite name before emission.
//!
//! Runs after flattening, so union cases are leaves. An unnamed Alias case
//! borrows its target's name; anything else falls back to a positional
//! `<RuleName>Case<i>` with `i` counted 1-based across the whole case list.
//! Pure and idempotent given stable input order.

use crate::model::{ExprKind, Rule};

pub fn assign_case_names(rule: &mut Rule) {
    let ExprKind::Union { cases } = &mut rule.expr.kind else {
        return;
    };
    for (i, case) in cases.iter_mut().enumerate() {
        if case.name.is_some() {
            continue;
        }
        case.name = Some(match &case.kind {
            ExprKind::Alias { to } => to.clone(),
            _ => format!("{}Case{}", rule.name, i + 1),
        });
    }
}
