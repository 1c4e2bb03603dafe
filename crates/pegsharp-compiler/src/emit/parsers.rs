//! Parser-function generation.
//!
//! One function per flattened rule, all in a single `let rec ... and` group.
//! Every function takes the shared `SourceReader`, returns `<Type> option`,
//! and restores the entry position before reporting absence. Grammar
//! mismatch is the `None` outcome, never an exception.

use super::{Emitter, LITERAL_MARKER, naming::pascal_case, naming::snake_case};
use crate::model::{ClassPart, Expr, ExprKind, Rule};
use crate::{Error, Result};

impl Emitter<'_> {
    pub(super) fn render_parsers(&mut self) -> Result<String> {
        let mut functions = Vec::with_capacity(self.rules.len());
        for rule in self.rules {
            functions.push(self.parser_fn(rule)?);
        }
        Ok(format!("let rec {}", functions.join("\nand ")))
    }

    fn parser_fn(&mut self, rule: &Rule) -> Result<String> {
        let name = pascal_case(&rule.name);
        let mut lines = vec![
            format!(
                "{} (sr: SourceReader) : {name} option =",
                snake_case(&rule.name)
            ),
            "let p = position sr".to_string(),
        ];

        match &rule.expr.kind {
            ExprKind::Alias { to } => {
                lines.push(format!("match {} sr with", snake_case(to)));
                lines.push(format!("| Some v -> Some ({name} v)"));
                lines.push("| None ->".to_string());
                lines.push("reset sr p".to_string());
                lines.push("None".to_string());
            }
            ExprKind::Literal { value } => {
                lines.push(format!(
                    "match expectLiteral sr \"{}\" with",
                    escape_fsharp(value)
                ));
                lines.push(format!("| Some _ -> Some {LITERAL_MARKER}"));
                lines.push("| None ->".to_string());
                lines.push("reset sr p".to_string());
                lines.push("None".to_string());
            }
            ExprKind::Class { parts, inverted } => {
                lines.push(format!(
                    "match expectMatch (Regex \"{}\") sr with",
                    escape_fsharp(&regex_string(parts, *inverted))
                ));
                lines.push(format!("| Some c -> Some ({name} c)"));
                lines.push("| None ->".to_string());
                lines.push("reset sr p".to_string());
                lines.push("None".to_string());
            }
            ExprKind::List { of, minimum } => {
                if let ExprKind::Class { parts, inverted } = &of.kind {
                    // Character-class lists accumulate into a string.
                    lines.push(format!(
                        "let pattern = Regex \"{}\"",
                        escape_fsharp(&regex_string(parts, *inverted))
                    ));
                    lines.push("let rec readString s =".to_string());
                    lines.push("  match expectMatch pattern sr with".to_string());
                    lines.push("  | Some c -> readString (s + string c)".to_string());
                    lines.push("  | None -> s".to_string());
                    lines.push("match readString \"\" with".to_string());
                    lines.push(format!("| s when s.Length >= {minimum} -> Some s"));
                } else {
                    lines.push("let rec readList items =".to_string());
                    lines.push(format!("  match {} with", leaf_matcher(of, &rule.name)?));
                    lines.push("  | Some next -> readList (List.append items [next])".to_string());
                    lines.push("  | None -> items".to_string());
                    lines.push("match readList [] with".to_string());
                    lines.push(format!(
                        "| items when List.length items >= {minimum} -> Some items"
                    ));
                }
                lines.push("| _ ->".to_string());
                lines.push("reset sr p".to_string());
                lines.push("None".to_string());
            }
            ExprKind::Option { of } => {
                // An option never fails, so the entry position never needs
                // restoring here; the inner matcher restores its own.
                lines.push(format!("match {} with", leaf_matcher(of, &rule.name)?));
                lines.push(format!("| Some v -> Some ({name} (Some v))"));
                lines.push(format!("| None -> Some ({name} None)"));
            }
            ExprKind::Tuple { elements } => {
                let mut kept = Vec::new();
                for (i, element) in elements.iter().enumerate() {
                    let var = format!("var{i}");
                    lines.push(format!(
                        "let {var} = {}",
                        leaf_matcher(element, &rule.name)?
                    ));
                    lines.push(format!("if Option.isNone {var} then"));
                    lines.push("  reset sr p; None".to_string());
                    lines.push("else".to_string());
                    if !element.discard {
                        kept.push(format!("Option.get {var}"));
                    }
                }
                let args = if kept.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", kept.join(", "))
                };
                lines.push(format!("  Some ({name}.{name}{args})"));
            }
            ExprKind::Union { cases } => {
                for case in cases {
                    let constructor = self.case_constructor(case);
                    lines.push(format!("match {} with", leaf_matcher(case, &rule.name)?));
                    lines.push(format!("| Some x -> Some ({name}.{constructor} x)"));
                    lines.push("| None ->".to_string());
                    lines.push("reset sr p".to_string());
                }
                lines.push("None".to_string());
            }
        }

        Ok(lines.join("\n  "))
    }
}

/// Matcher expression for a flattened leaf; anything else is a pipeline bug.
fn leaf_matcher(expr: &Expr, owner: &str) -> Result<String> {
    match &expr.kind {
        ExprKind::Literal { value } => {
            Ok(format!("expectLiteral sr \"{}\"", escape_fsharp(value)))
        }
        ExprKind::Class { parts, inverted } => Ok(format!(
            "expectMatch (Regex \"{}\") sr",
            escape_fsharp(&regex_string(parts, *inverted))
        )),
        ExprKind::Alias { to } => Ok(format!("{} sr", snake_case(to))),
        other => Err(Error::Internal(format!(
            "expression in rule `{owner}` escaped flattening: {other:?}"
        ))),
    }
}

/// Render a character class as a .NET regex character set.
///
/// An inverted empty set is the wildcard and becomes `[\s\S]` (`.` would
/// miss newlines and `[^]` is not valid .NET regex); an empty set proper can
/// never match.
pub(super) fn regex_string(parts: &[ClassPart], inverted: bool) -> String {
    if parts.is_empty() {
        return if inverted { r"[\s\S]" } else { r"[^\s\S]" }.to_string();
    }
    let mut out = String::from("[");
    if inverted {
        out.push('^');
    }
    for part in parts {
        match part {
            ClassPart::Single(c) => out.push_str(&escape_regex_char(*c)),
            ClassPart::Range(a, b) => {
                out.push_str(&escape_regex_char(*a));
                out.push('-');
                out.push_str(&escape_regex_char(*b));
            }
        }
    }
    out.push(']');
    out
}

fn escape_regex_char(c: char) -> String {
    match c {
        '\n' => r"\n".to_string(),
        '\t' => r"\t".to_string(),
        '\r' => r"\r".to_string(),
        '-' | '/' | '\\' | '^' | '$' | '*' | '+' | '?' | '.' | '(' | ')' | '|' | '[' | ']'
        | '{' | '}' => format!("\\{c}"),
        other => other.to_string(),
    }
}

/// Escape text for embedding in an F# string literal.
pub(super) fn escape_fsharp(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}
