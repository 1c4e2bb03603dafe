//! Rule flattening: extracts anonymous composite sub-expressions into new
//! named top-level rules, leaving only Literal/Class/Alias leaves inside
//! Tuples, Unions, Lists, and Options.
//!
//! Extraction replaces the composite in place with an Alias to the new rule
//! and recursively flattens the extracted rule. Each extraction reduces the
//! synthesized rule's shape by one level, so the recursion terminates.

use crate::model::{Expr, ExprKind, Rule};

/// Flatten a whole rule set into one global rule list, in discovery order:
/// each original rule followed by its synthesized rules, depth first.
pub fn flatten(rules: Vec<Rule>) -> Vec<Rule> {
    let mut out = Vec::new();
    for rule in rules {
        flatten_into(rule, &mut out);
    }
    out
}

fn flatten_into(mut rule: Rule, out: &mut Vec<Rule>) {
    let span = rule.span;
    let parent = rule.name.clone();
    let mut synthesized: Vec<Rule> = Vec::new();

    match &mut rule.expr.kind {
        ExprKind::List { of, .. } | ExprKind::Option { of } => {
            if !of.is_leaf() {
                let name = of
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("{parent}_expression"));
                let mut extracted = std::mem::replace(
                    of.as_mut(),
                    Expr::new(ExprKind::Alias { to: name.clone() }),
                );
                extracted.name = Some(name.clone());
                synthesized.push(Rule {
                    name,
                    expr: extracted,
                    span,
                });
            }
        }
        ExprKind::Union { cases } => {
            for (i, case) in cases.iter_mut().enumerate() {
                if case.is_leaf() {
                    continue;
                }
                let name = match &case.name {
                    Some(case_name) => format!("{parent}_{case_name}"),
                    None => format!("{parent}_case{}", i + 1),
                };
                synthesized.push(extract(case, name, span));
            }
        }
        ExprKind::Tuple { elements } => {
            for (i, element) in elements.iter_mut().enumerate() {
                if element.is_leaf() {
                    continue;
                }
                let name = match &element.name {
                    Some(element_name) => format!("{parent}_{element_name}"),
                    None => format!("{parent}_element{}", i + 1),
                };
                synthesized.push(extract(element, name, span));
            }
        }
        ExprKind::Literal { .. } | ExprKind::Class { .. } | ExprKind::Alias { .. } => {}
    }

    out.push(rule);
    for new_rule in synthesized {
        flatten_into(new_rule, out);
    }
}

/// Move `node`'s shape into a new rule named `name`, turning the node itself
/// into an Alias to it. The node keeps its name and discard flag; the
/// extracted copy keeps the discard flag too.
fn extract(node: &mut Expr, name: String, span: crate::diagnostics::Span) -> Rule {
    let kind = std::mem::replace(&mut node.kind, ExprKind::Alias { to: name.clone() });
    Rule {
        name: name.clone(),
        expr: Expr {
            name: Some(name),
            discard: node.discard,
            kind,
        },
        span,
    }
}
