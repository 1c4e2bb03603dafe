//! Type-declaration generation.
//!
//! One declaration per flattened rule, emitted as a single `type ... and ...`
//! group because the rule reference graph may be cyclic.

use super::{Emitter, LITERAL_MARKER, naming::pascal_case, naming::snake_case};
use crate::model::{Expr, ExprKind, Rule};
use crate::{Error, Result};

impl Emitter<'_> {
    pub(super) fn render_types(&mut self) -> Result<String> {
        let mut decls = Vec::with_capacity(self.rules.len());
        for rule in self.rules {
            decls.push(self.type_decl(rule)?);
        }
        Ok(format!("type {}", decls.join("\nand ")))
    }

    fn type_decl(&mut self, rule: &Rule) -> Result<String> {
        let name = pascal_case(&rule.name);
        match &rule.expr.kind {
            ExprKind::Alias { to } => Ok(format!("{name} = {name} of {}", pascal_case(to))),
            ExprKind::Literal { .. } => Ok(format!("{name} = {LITERAL_MARKER}")),
            ExprKind::Class { .. } => Ok(format!("{name} = {name} of char")),
            ExprKind::Union { cases } => {
                let mut lines = vec![format!("{name} =")];
                for case in cases {
                    let constructor = self.case_constructor(case);
                    let payload = leaf_type(case, &rule.name)?;
                    lines.push(format!("| {constructor} of {payload}"));
                }
                Ok(lines.join("\n"))
            }
            ExprKind::List { of, .. } => {
                // Character repetition reads better as text than as a list
                // of char wrappers.
                if matches!(of.kind, ExprKind::Class { .. }) {
                    return Ok(format!("{name} = string"));
                }
                Ok(format!("{name} = {} list", leaf_type(of, &rule.name)?))
            }
            ExprKind::Option { of } => Ok(format!(
                "{name} = {name} of {} option",
                leaf_type(of, &rule.name)?
            )),
            ExprKind::Tuple { elements } => {
                let kept: Vec<&Expr> = elements.iter().filter(|e| !e.discard).collect();
                if kept.is_empty() {
                    // Everything is silent: a zero-field marker type.
                    return Ok(format!("{name} = {name}"));
                }
                let mut fields = Vec::with_capacity(kept.len());
                for element in kept {
                    let field_type = leaf_type(element, &rule.name)?;
                    fields.push(match &element.name {
                        Some(label) => format!("{}: {field_type}", snake_case(label)),
                        None => field_type,
                    });
                }
                Ok(format!("{name} = {name} of {}", fields.join(" * ")))
            }
        }
    }
}

/// Type of a flattened leaf. Anything else escaped the flattener, which is a
/// bug in the pipeline, not in the grammar.
pub(super) fn leaf_type(expr: &Expr, owner: &str) -> Result<String> {
    match &expr.kind {
        ExprKind::Literal { .. } => Ok(LITERAL_MARKER.to_string()),
        ExprKind::Class { .. } => Ok("char".to_string()),
        ExprKind::Alias { to } => Ok(pascal_case(to)),
        other => Err(Error::Internal(format!(
            "expression in rule `{owner}` escaped flattening: {other:?}"
        ))),
    }
}
