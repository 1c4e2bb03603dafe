//! Raw expression tree produced by the grammar parser.
//!
//! This is the front end's vocabulary, before normalization: it still carries
//! grouping, text captures, lookahead predicates, and semantic actions. The
//! normalizer in `lower` turns it into the expression model.

use crate::diagnostics::Span;
use crate::model::ClassPart;

/// One raw expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum RawExpr {
    /// `"text"` or `'text'`
    Literal { value: String },
    /// `[a-z0-9]` / `[^...]`
    Class {
        parts: Vec<ClassPart>,
        inverted: bool,
    },
    /// `.` - any single character
    Any,
    /// A reference to another rule by name.
    RuleRef { name: String },
    /// `( expr )`
    Group { expr: Box<RawExpr> },
    /// `$ expr` - text capture
    Text { expr: Box<RawExpr> },
    /// `Rule "display name" = expr` attaches a name to the inner expression.
    Named { name: String, expr: Box<RawExpr> },
    /// `label: expr`
    Labeled { label: String, expr: Box<RawExpr> },
    /// `expr ?`
    Optional { expr: Box<RawExpr> },
    /// `expr *`
    ZeroOrMore { expr: Box<RawExpr> },
    /// `expr +`
    OneOrMore { expr: Box<RawExpr> },
    /// `a b c`
    Sequence { elements: Vec<RawExpr> },
    /// `a / b / c`
    Choice { alternatives: Vec<RawExpr> },
    /// `& expr` - positive lookahead
    PredicateAnd { expr: Box<RawExpr> },
    /// `! expr` - negative lookahead
    PredicateNot { expr: Box<RawExpr> },
    /// `expr { code }` - the code payload is never executed.
    Action { expr: Box<RawExpr>, code: String },
    /// `tuple(a: x, b: y)` - explicit record construct.
    Tuple { elements: Vec<RawExpr> },
    /// `union(a: x | b: y)` - explicit tagged-union construct.
    Union { cases: Vec<RawExpr> },
}

/// One top-level rule definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRule {
    pub name: String,
    pub expr: RawExpr,
    pub span: Span,
}

/// An ordered set of top-level rule definitions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grammar {
    pub rules: Vec<RawRule>,
}
