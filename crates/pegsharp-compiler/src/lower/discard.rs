//! Discard marking: flags values that are matched but never constructed.
//!
//! Marking is local per node, so traversal order does not matter. A discarded
//! node is still consumed during parsing; it just never appears in the
//! emitted type or constructed value.

use crate::config::Config;
use crate::model::{Expr, ExprKind, Rule};

pub fn mark_discards(rule: &mut Rule, config: &Config) {
    rule.expr.walk_mut(&mut |expr| {
        if should_discard(expr, config) {
            expr.discard = true;
        }
    });
}

fn should_discard(expr: &Expr, config: &Config) -> bool {
    if config.discard_literals && is_literal_shaped(expr) {
        return true;
    }
    if let Some(name) = &expr.name {
        if config.discard_named.contains(name) || name.starts_with(&config.discard_prefix) {
            return true;
        }
    }
    if let ExprKind::Alias { to } = &expr.kind {
        if config.discard_named.contains(to) || to.starts_with(&config.discard_prefix) {
            return true;
        }
    }
    false
}

/// A Literal, or an Option/List directly over one.
fn is_literal_shaped(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Literal { .. } => true,
        ExprKind::Option { of } | ExprKind::List { of, .. } => {
            matches!(of.kind, ExprKind::Literal { .. })
        }
        _ => false,
    }
}

#[cfg(test)]
mod discard_tests {
    use super::*;
    use crate::diagnostics::Span;
    use crate::model::ExprKind;

    fn lit(value: &str) -> Expr {
        Expr::new(ExprKind::Literal {
            value: value.to_string(),
        })
    }

    fn alias(to: &str) -> Expr {
        Expr::new(ExprKind::Alias { to: to.to_string() })
    }

    fn rule_of(expr: Expr) -> Rule {
        Rule {
            name: "r".to_string(),
            expr,
            span: Span::new(0, 0),
        }
    }

    fn elements(rule: &Rule) -> &[Expr] {
        let ExprKind::Tuple { elements } = &rule.expr.kind else {
            panic!("expected tuple");
        };
        elements
    }

    #[test]
    fn literals_discarded_by_default() {
        let mut rule = rule_of(Expr::new(ExprKind::Tuple {
            elements: vec![lit("("), alias("value"), lit(")")],
        }));
        mark_discards(&mut rule, &Config::default());
        let elements = elements(&rule);
        assert!(elements[0].discard);
        assert!(!elements[1].discard);
        assert!(elements[2].discard);
    }

    #[test]
    fn literal_discard_can_be_disabled() {
        let mut rule = rule_of(Expr::new(ExprKind::Tuple {
            elements: vec![lit("(")],
        }));
        mark_discards(&mut rule, &Config::default().discard_literals(false));
        assert!(!elements(&rule)[0].discard);
    }

    #[test]
    fn option_and_list_of_literal_are_literal_shaped() {
        let mut rule = rule_of(Expr::new(ExprKind::Tuple {
            elements: vec![
                Expr::new(ExprKind::Option {
                    of: Box::new(lit(";")),
                }),
                Expr::new(ExprKind::List {
                    of: Box::new(lit(" ")),
                    minimum: 0,
                }),
                Expr::new(ExprKind::Option {
                    of: Box::new(alias("x")),
                }),
            ],
        }));
        mark_discards(&mut rule, &Config::default());
        let elements = elements(&rule);
        assert!(elements[0].discard);
        assert!(elements[1].discard);
        assert!(!elements[2].discard);
    }

    #[test]
    fn named_set_and_prefix_match_node_names() {
        let config = Config::default()
            .discard_literals(false)
            .discard_named("comment");
        let mut rule = rule_of(Expr::new(ExprKind::Tuple {
            elements: vec![
                Expr::named("comment", ExprKind::Class {
                    parts: Vec::new(),
                    inverted: true,
                }),
                Expr::named("_ws", ExprKind::Class {
                    parts: Vec::new(),
                    inverted: true,
                }),
                Expr::named("kept", ExprKind::Class {
                    parts: Vec::new(),
                    inverted: true,
                }),
            ],
        }));
        mark_discards(&mut rule, &config);
        let elements = elements(&rule);
        assert!(elements[0].discard);
        assert!(elements[1].discard);
        assert!(!elements[2].discard);
    }

    #[test]
    fn alias_target_matches_too() {
        let mut rule = rule_of(Expr::new(ExprKind::Tuple {
            elements: vec![alias("_ws"), alias("word")],
        }));
        mark_discards(&mut rule, &Config::default());
        let elements = elements(&rule);
        assert!(elements[0].discard, "reference to silent rule is silent");
        assert!(!elements[1].discard);
    }

    #[test]
    fn rule_top_node_named_with_prefix_is_marked() {
        let mut rule = Rule {
            name: "_ws".to_string(),
            expr: Expr::named("_ws", ExprKind::List {
                of: Box::new(lit(" ")),
                minimum: 0,
            }),
            span: Span::new(0, 0),
        };
        mark_discards(&mut rule, &Config::default());
        assert!(rule.expr.discard);
    }
}
