//! The normalized expression model.
//!
//! Every grammar rule lowers to a tree of [`Expr`] nodes. The pipeline
//! mutates these trees in place (discard marking) or restructures them
//! (flattening, case naming); the generators in `emit` are pure readers.

use crate::diagnostics::Span;
use std::fmt;

/// One character-class member: a single character or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassPart {
    Single(char),
    Range(char, char),
}

/// The shape of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Matches exactly this text.
    Literal { value: String },
    /// Matches one character in (or, inverted, not in) the set. An inverted
    /// empty set matches any single character.
    Class {
        parts: Vec<ClassPart>,
        inverted: bool,
    },
    /// Delegates to another rule and wraps its result.
    Alias { to: String },
    /// All elements must match in order.
    Tuple { elements: Vec<Expr> },
    /// Ordered choice: the first matching case wins.
    Union { cases: Vec<Expr> },
    /// Repetition of the inner expression, at least `minimum` times (0 or 1).
    List { of: Box<Expr>, minimum: u32 },
    /// The inner expression may be absent; an Option never fails to match.
    Option { of: Box<Expr> },
}

/// A node in the normalized expression tree.
///
/// `name` comes from an explicit grammar label or stays unset until the
/// flattener or case namer synthesizes one. `discard` marks values that are
/// consumed during parsing but excluded from the constructed result.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub name: Option<String>,
    pub discard: bool,
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self {
            name: None,
            discard: false,
            kind,
        }
    }

    pub fn named(name: impl Into<String>, kind: ExprKind) -> Self {
        Self {
            name: Some(name.into()),
            discard: false,
            kind,
        }
    }

    /// True for the shapes allowed as flattened leaves: Literal, Class, Alias.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Literal { .. } | ExprKind::Class { .. } | ExprKind::Alias { .. }
        )
    }

    /// Apply `f` to this node and every descendant, children first.
    pub fn walk(&self, f: &mut impl FnMut(&Expr)) {
        match &self.kind {
            ExprKind::Literal { .. } | ExprKind::Class { .. } | ExprKind::Alias { .. } => {}
            ExprKind::Tuple { elements } => {
                for element in elements {
                    element.walk(f);
                }
            }
            ExprKind::Union { cases } => {
                for case in cases {
                    case.walk(f);
                }
            }
            ExprKind::List { of, .. } | ExprKind::Option { of } => of.walk(f),
        }
        f(self);
    }

    /// Mutable variant of [`Expr::walk`], children first.
    ///
    /// These two are the only traversals over the expression variant set;
    /// passes that need a whole-tree transform go through here rather than
    /// recursing on their own.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Expr)) {
        match &mut self.kind {
            ExprKind::Literal { .. } | ExprKind::Class { .. } | ExprKind::Alias { .. } => {}
            ExprKind::Tuple { elements } => {
                for element in elements {
                    element.walk_mut(f);
                }
            }
            ExprKind::Union { cases } => {
                for case in cases {
                    case.walk_mut(f);
                }
            }
            ExprKind::List { of, .. } | ExprKind::Option { of } => of.walk_mut(f),
        }
        f(self);
    }
}

/// A named, top-level rule. The span points at the defining grammar text
/// (synthesized rules inherit their parent's span).
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub name: String,
    pub expr: Expr,
    pub span: Span,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.expr)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}:")?;
        }
        if self.discard {
            write!(f, "~")?;
        }
        match &self.kind {
            ExprKind::Literal { value } => write!(f, "{value:?}"),
            ExprKind::Class { parts, inverted } => {
                write!(f, "[{}", if *inverted { "^" } else { "" })?;
                for part in parts {
                    match part {
                        ClassPart::Single(c) => write!(f, "{c}")?,
                        ClassPart::Range(a, b) => write!(f, "{a}-{b}")?,
                    }
                }
                write!(f, "]")
            }
            ExprKind::Alias { to } => write!(f, "{to}"),
            ExprKind::Tuple { elements } => {
                write!(f, "tuple(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, ")")
            }
            ExprKind::Union { cases } => {
                write!(f, "union(")?;
                for (i, case) in cases.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{case}")?;
                }
                write!(f, ")")
            }
            ExprKind::List { of, minimum } => {
                write!(f, "{of}{}", if *minimum == 0 { "*" } else { "+" })
            }
            ExprKind::Option { of } => write!(f, "{of}?"),
        }
    }
}

#[cfg(test)]
mod model_tests {
    use super::*;

    fn lit(value: &str) -> Expr {
        Expr::new(ExprKind::Literal {
            value: value.to_string(),
        })
    }

    #[test]
    fn walk_visits_every_node_children_first() {
        let mut expr = Expr::new(ExprKind::Tuple {
            elements: vec![
                lit("a"),
                Expr::new(ExprKind::List {
                    of: Box::new(lit("b")),
                    minimum: 0,
                }),
            ],
        });

        let mut seen = Vec::new();
        expr.walk_mut(&mut |e| {
            seen.push(match &e.kind {
                ExprKind::Literal { value } => value.clone(),
                ExprKind::List { .. } => "list".to_string(),
                ExprKind::Tuple { .. } => "tuple".to_string(),
                _ => "other".to_string(),
            });
        });

        assert_eq!(seen, ["a", "b", "list", "tuple"]);
    }

    #[test]
    fn walk_can_mutate_in_place() {
        let mut expr = Expr::new(ExprKind::Union {
            cases: vec![lit("x"), lit("y")],
        });
        expr.walk_mut(&mut |e| {
            if matches!(e.kind, ExprKind::Literal { .. }) {
                e.discard = true;
            }
        });
        let ExprKind::Union { cases } = &expr.kind else {
            panic!("expected union");
        };
        assert!(cases.iter().all(|c| c.discard));
        assert!(!expr.discard);
    }

    #[test]
    fn display_is_compact() {
        let rule = Rule {
            name: "pair".to_string(),
            expr: Expr::new(ExprKind::Tuple {
                elements: vec![
                    Expr::named("a", ExprKind::Alias {
                        to: "digit".to_string(),
                    }),
                    lit(","),
                ],
            }),
            span: Span::new(0, 0),
        };
        assert_eq!(rule.to_string(), r#"pair = tuple(a:digit, ",")"#);
    }
}
