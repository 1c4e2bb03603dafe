//! Normalization: raw expression tree to the expression model.
//!
//! Semantic-action payloads are dropped here, grouping and text captures
//! pass through, lookahead predicates collapse to their inner shape, and the
//! quantifier/sequence/choice vocabulary maps onto Tuple/Union/List/Option.

use crate::frontend::ast::{RawExpr, RawRule};
use crate::model::{Expr, ExprKind, Rule};

pub fn normalize_rule(raw: RawRule) -> Rule {
    let mut expr = normalize(raw.expr);
    // The defining name wins over any name the body carried.
    expr.name = Some(raw.name.clone());
    Rule {
        name: raw.name,
        expr,
        span: raw.span,
    }
}

fn normalize(raw: RawExpr) -> Expr {
    match raw {
        RawExpr::Literal { value } => Expr::new(ExprKind::Literal { value }),
        RawExpr::Class { parts, inverted } => Expr::new(ExprKind::Class { parts, inverted }),
        // Any character: an inverted empty class.
        RawExpr::Any => Expr::new(ExprKind::Class {
            parts: Vec::new(),
            inverted: true,
        }),
        RawExpr::RuleRef { name } => Expr::new(ExprKind::Alias { to: name }),
        // Transparent wrappers.
        RawExpr::Group { expr } | RawExpr::Text { expr } => normalize(*expr),
        // Lookahead reduces to its inner shape; zero-width match semantics
        // are not modeled (see DESIGN.md).
        RawExpr::PredicateAnd { expr } | RawExpr::PredicateNot { expr } => normalize(*expr),
        // The action payload is never executed or preserved.
        RawExpr::Action { expr, .. } => normalize(*expr),
        RawExpr::Named { name, expr } => {
            let mut inner = normalize(*expr);
            inner.name = Some(name);
            inner
        }
        RawExpr::Labeled { label, expr } => {
            let mut inner = normalize(*expr);
            inner.name = Some(label);
            inner
        }
        RawExpr::Optional { expr } => Expr::new(ExprKind::Option {
            of: Box::new(normalize(*expr)),
        }),
        RawExpr::ZeroOrMore { expr } => Expr::new(ExprKind::List {
            of: Box::new(normalize(*expr)),
            minimum: 0,
        }),
        RawExpr::OneOrMore { expr } => Expr::new(ExprKind::List {
            of: Box::new(normalize(*expr)),
            minimum: 1,
        }),
        RawExpr::Sequence { elements } | RawExpr::Tuple { elements } => Expr::new(ExprKind::Tuple {
            elements: elements.into_iter().map(normalize).collect(),
        }),
        RawExpr::Choice { alternatives } => Expr::new(ExprKind::Union {
            cases: alternatives.into_iter().map(normalize).collect(),
        }),
        RawExpr::Union { cases } => Expr::new(ExprKind::Union {
            cases: cases.into_iter().map(normalize).collect(),
        }),
    }
}
