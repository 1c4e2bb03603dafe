//! Recursive-descent parser for the grammar dialect.
//!
//! The dialect is PEG-style: rules are `name = expression`, expressions are
//! ordered choices of sequences with `?`/`*`/`+` quantifiers, `&`/`!`
//! lookahead, `$` text capture, `label:` fields, literals, character
//! classes, `.`, grouping, and trailing `{ ... }` semantic actions. Two
//! extensions declare output shape directly: `tuple(a: x, b: y)` and
//! `union(a: x | b: y)`.

use crate::diagnostics::{Diagnostics, Span};
use crate::frontend::ast::{Grammar, RawExpr, RawRule};
use crate::frontend::lexer::Token;

pub(crate) struct Parser<'a> {
    tokens: &'a [(Token, Span)],
    pos: usize,
    end_of_input: usize,
    pub(crate) diagnostics: Diagnostics,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [(Token, Span)], source_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end_of_input: source_len,
            diagnostics: Diagnostics::new(),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.peek_ahead(0)
    }

    fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|(t, _)| t)
    }

    fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|&(_, s)| s)
            .unwrap_or(Span::at(self.end_of_input))
    }

    fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|&(_, s)| s)
            .unwrap_or(Span::at(0))
    }

    fn bump(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn error_here(&mut self, message: impl Into<String>) {
        let span = self.current_span();
        self.diagnostics.error(span, message);
    }

    /// True at `name =` or `name "display" =`, the start of a rule definition.
    fn at_rule_start(&self) -> bool {
        matches!(self.peek(), Some(Token::Ident(_)))
            && (self.peek_ahead(1) == Some(&Token::Equals)
                || (matches!(self.peek_ahead(1), Some(Token::Str(_)))
                    && self.peek_ahead(2) == Some(&Token::Equals)))
    }

    fn starts_expr(&self) -> bool {
        match self.peek() {
            Some(Token::Ident(_)) => !self.at_rule_start(),
            Some(
                Token::Str(_)
                | Token::Class(_)
                | Token::Dot
                | Token::ParenOpen
                | Token::Amp
                | Token::Bang
                | Token::Dollar,
            ) => true,
            _ => false,
        }
    }

    pub(crate) fn parse_grammar(&mut self) -> Grammar {
        let mut grammar = Grammar::default();
        while self.peek().is_some() {
            if let Some(rule) = self.parse_rule() {
                grammar.rules.push(rule);
            } else {
                self.recover_to_rule_start();
            }
        }
        grammar
    }

    /// Skip past the problem, stopping at the next `name =` boundary.
    fn recover_to_rule_start(&mut self) {
        while self.peek().is_some() && !self.at_rule_start() {
            self.bump();
        }
    }

    fn parse_rule(&mut self) -> Option<RawRule> {
        let start = self.current_span();

        let name = match self.peek() {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.bump();
                name
            }
            _ => {
                self.error_here("expected a rule definition (`name = expression`)");
                return None;
            }
        };

        let display = match self.peek() {
            Some(Token::Str(display)) => {
                let display = display.clone();
                self.bump();
                Some(display)
            }
            _ => None,
        };

        if !self.eat(&Token::Equals) {
            self.error_here(format!("expected `=` after rule name `{name}`"));
            return None;
        }

        let mut expr = self.parse_choice()?;
        if let Some(display) = display {
            expr = RawExpr::Named {
                name: display,
                expr: Box::new(expr),
            };
        }
        self.eat(&Token::Semi);

        let span = Span::new(start.start, self.previous_span().end);
        Some(RawRule { name, expr, span })
    }

    fn parse_choice(&mut self) -> Option<RawExpr> {
        let mut alternatives = vec![self.parse_sequence()?];
        while self.eat(&Token::Slash) {
            alternatives.push(self.parse_sequence()?);
        }
        if alternatives.len() == 1 {
            return alternatives.pop();
        }
        Some(RawExpr::Choice { alternatives })
    }

    fn parse_sequence(&mut self) -> Option<RawExpr> {
        let mut elements = Vec::new();
        while self.starts_expr() {
            elements.push(self.parse_labeled()?);
        }

        if elements.is_empty() {
            self.error_here("expected an expression");
            return None;
        }

        let expr = if elements.len() == 1 {
            elements.pop().unwrap()
        } else {
            RawExpr::Sequence { elements }
        };

        // A trailing `{ ... }` is a semantic action on the whole sequence.
        if let Some(Token::Action(code)) = self.peek() {
            let code = code.clone();
            self.bump();
            return Some(RawExpr::Action {
                expr: Box::new(expr),
                code,
            });
        }
        Some(expr)
    }

    fn parse_labeled(&mut self) -> Option<RawExpr> {
        if let Some(Token::Ident(label)) = self.peek() {
            if self.peek_ahead(1) == Some(&Token::Colon) {
                let label = label.clone();
                self.bump();
                self.bump();
                let expr = self.parse_prefixed()?;
                return Some(RawExpr::Labeled {
                    label,
                    expr: Box::new(expr),
                });
            }
        }
        self.parse_prefixed()
    }

    fn parse_prefixed(&mut self) -> Option<RawExpr> {
        if self.eat(&Token::Amp) {
            let expr = self.parse_prefixed()?;
            return Some(RawExpr::PredicateAnd {
                expr: Box::new(expr),
            });
        }
        if self.eat(&Token::Bang) {
            let expr = self.parse_prefixed()?;
            return Some(RawExpr::PredicateNot {
                expr: Box::new(expr),
            });
        }
        if self.eat(&Token::Dollar) {
            let expr = self.parse_prefixed()?;
            return Some(RawExpr::Text {
                expr: Box::new(expr),
            });
        }
        self.parse_suffixed()
    }

    fn parse_suffixed(&mut self) -> Option<RawExpr> {
        let expr = self.parse_primary()?;
        if self.eat(&Token::Question) {
            return Some(RawExpr::Optional {
                expr: Box::new(expr),
            });
        }
        if self.eat(&Token::Star) {
            return Some(RawExpr::ZeroOrMore {
                expr: Box::new(expr),
            });
        }
        if self.eat(&Token::Plus) {
            return Some(RawExpr::OneOrMore {
                expr: Box::new(expr),
            });
        }
        Some(expr)
    }

    fn parse_primary(&mut self) -> Option<RawExpr> {
        match self.peek() {
            Some(Token::Str(value)) => {
                let value = value.clone();
                self.bump();
                Some(RawExpr::Literal { value })
            }
            Some(Token::Class(class)) => {
                let class = class.clone();
                self.bump();
                Some(RawExpr::Class {
                    parts: class.parts,
                    inverted: class.inverted,
                })
            }
            Some(Token::Dot) => {
                self.bump();
                Some(RawExpr::Any)
            }
            Some(Token::ParenOpen) => {
                self.bump();
                let expr = self.parse_choice()?;
                if !self.eat(&Token::ParenClose) {
                    self.error_here("expected `)`");
                    return None;
                }
                Some(RawExpr::Group {
                    expr: Box::new(expr),
                })
            }
            Some(Token::Ident(name)) => {
                let name = name.clone();
                if self.peek_ahead(1) == Some(&Token::ParenOpen) && name == "tuple" {
                    return self.parse_tuple_construct();
                }
                if self.peek_ahead(1) == Some(&Token::ParenOpen) && name == "union" {
                    return self.parse_union_construct();
                }
                self.bump();
                Some(RawExpr::RuleRef { name })
            }
            _ => {
                self.error_here("expected an expression");
                self.bump();
                None
            }
        }
    }

    /// `tuple(` already peeked; elements separated by `,`, each with an
    /// optional `label:` prefix applying to the whole element.
    fn parse_tuple_construct(&mut self) -> Option<RawExpr> {
        self.bump(); // tuple
        self.bump(); // (
        let mut elements = Vec::new();
        loop {
            elements.push(self.parse_construct_item()?);
            if self.eat(&Token::Comma) {
                continue;
            }
            break;
        }
        if !self.eat(&Token::ParenClose) {
            self.error_here("expected `,` or `)` in tuple(...)");
            return None;
        }
        Some(RawExpr::Tuple { elements })
    }

    /// `union(` already peeked; cases separated by `|`.
    fn parse_union_construct(&mut self) -> Option<RawExpr> {
        self.bump(); // union
        self.bump(); // (
        let mut cases = Vec::new();
        loop {
            cases.push(self.parse_construct_item()?);
            if self.eat(&Token::Pipe) {
                continue;
            }
            break;
        }
        if !self.eat(&Token::ParenClose) {
            self.error_here("expected `|` or `)` in union(...)");
            return None;
        }
        Some(RawExpr::Union { cases })
    }

    fn parse_construct_item(&mut self) -> Option<RawExpr> {
        if let Some(Token::Ident(label)) = self.peek() {
            if self.peek_ahead(1) == Some(&Token::Colon) {
                let label = label.clone();
                self.bump();
                self.bump();
                let expr = self.parse_choice()?;
                return Some(RawExpr::Labeled {
                    label,
                    expr: Box::new(expr),
                });
            }
        }
        self.parse_choice()
    }
}

#[cfg(test)]
mod grammar_tests {
    use indoc::indoc;

    use crate::frontend::ast::{Grammar, RawExpr};
    use crate::frontend::parse;
    use crate::model::ClassPart;

    fn parse_ok(source: &str) -> Grammar {
        let (grammar, diagnostics) = parse(source).expect("grammar should parse");
        assert!(!diagnostics.has_errors());
        grammar
    }

    #[test]
    fn single_rule_with_literal() {
        let grammar = parse_ok(r#"greeting = "hello""#);
        assert_eq!(grammar.rules.len(), 1);
        assert_eq!(grammar.rules[0].name, "greeting");
        assert_eq!(grammar.rules[0].expr, RawExpr::Literal {
            value: "hello".to_string(),
        });
    }

    #[test]
    fn sequence_and_choice_nesting() {
        let grammar = parse_ok(r#"x = "a" "b" / "c""#);
        let RawExpr::Choice { alternatives } = &grammar.rules[0].expr else {
            panic!("expected choice");
        };
        assert_eq!(alternatives.len(), 2);
        assert!(matches!(&alternatives[0], RawExpr::Sequence { elements } if elements.len() == 2));
    }

    #[test]
    fn quantifiers_bind_to_primary() {
        let grammar = parse_ok("x = y* z+ w?");
        let RawExpr::Sequence { elements } = &grammar.rules[0].expr else {
            panic!("expected sequence");
        };
        assert!(matches!(elements[0], RawExpr::ZeroOrMore { .. }));
        assert!(matches!(elements[1], RawExpr::OneOrMore { .. }));
        assert!(matches!(elements[2], RawExpr::Optional { .. }));
    }

    #[test]
    fn labels_and_references() {
        let grammar = parse_ok("pair = a:digit b:digit");
        let RawExpr::Sequence { elements } = &grammar.rules[0].expr else {
            panic!("expected sequence");
        };
        let RawExpr::Labeled { label, expr } = &elements[0] else {
            panic!("expected label");
        };
        assert_eq!(label, "a");
        assert_eq!(**expr, RawExpr::RuleRef {
            name: "digit".to_string(),
        });
    }

    #[test]
    fn predicates_text_capture_and_any() {
        let grammar = parse_ok("x = !nl $word &end .");
        let RawExpr::Sequence { elements } = &grammar.rules[0].expr else {
            panic!("expected sequence");
        };
        assert!(matches!(elements[0], RawExpr::PredicateNot { .. }));
        assert!(matches!(elements[1], RawExpr::Text { .. }));
        assert!(matches!(elements[2], RawExpr::PredicateAnd { .. }));
        assert_eq!(elements[3], RawExpr::Any);
    }

    #[test]
    fn action_attaches_to_sequence() {
        let grammar = parse_ok(r#"x = a b { makeX(a, b) }"#);
        let RawExpr::Action { expr, code } = &grammar.rules[0].expr else {
            panic!("expected action");
        };
        assert!(matches!(**expr, RawExpr::Sequence { .. }));
        assert_eq!(code.trim(), "makeX(a, b)");
    }

    #[test]
    fn display_name_wraps_rule_body() {
        let grammar = parse_ok(r#"ws "whitespace" = [ \t]*"#);
        assert_eq!(grammar.rules[0].name, "ws");
        let RawExpr::Named { name, .. } = &grammar.rules[0].expr else {
            panic!("expected named");
        };
        assert_eq!(name, "whitespace");
    }

    #[test]
    fn tuple_construct_with_labels() {
        let grammar = parse_ok("point = tuple(x: number, y: number)");
        let RawExpr::Tuple { elements } = &grammar.rules[0].expr else {
            panic!("expected tuple");
        };
        assert_eq!(elements.len(), 2);
        assert!(matches!(&elements[0], RawExpr::Labeled { label, .. } if label == "x"));
    }

    #[test]
    fn union_construct_with_cases() {
        let grammar = parse_ok(r#"value = union(num: number | str: string | "null")"#);
        let RawExpr::Union { cases } = &grammar.rules[0].expr else {
            panic!("expected union");
        };
        assert_eq!(cases.len(), 3);
        assert!(matches!(&cases[2], RawExpr::Literal { value } if value == "null"));
    }

    #[test]
    fn tuple_as_plain_reference_still_works() {
        // `tuple` and `union` are only special before `(`.
        let grammar = parse_ok("x = tuple union");
        let RawExpr::Sequence { elements } = &grammar.rules[0].expr else {
            panic!("expected sequence");
        };
        assert_eq!(elements[0], RawExpr::RuleRef {
            name: "tuple".to_string(),
        });
    }

    #[test]
    fn multiple_rules_split_on_boundaries() {
        let grammar = parse_ok(indoc! {r#"
            pair = a:digit b:digit
            digit = [0-9]
        "#});
        assert_eq!(grammar.rules.len(), 2);
        assert_eq!(grammar.rules[1].name, "digit");
        assert_eq!(grammar.rules[1].expr, RawExpr::Class {
            parts: vec![ClassPart::Range('0', '9')],
            inverted: false,
        });
    }

    #[test]
    fn semicolons_may_terminate_rules() {
        let grammar = parse_ok("a = b; c = d;");
        assert_eq!(grammar.rules.len(), 2);
    }

    #[test]
    fn malformed_input_is_an_error_result() {
        let err = parse("x = / y").expect_err("should fail");
        let diagnostics = err.diagnostics().expect("user-facing");
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn missing_equals_is_reported_with_rule_name() {
        let err = parse("x y z").expect_err("should fail");
        let rendered = format!("{err}");
        assert!(rendered.contains("errors"));
    }

    #[test]
    fn recovery_continues_after_bad_rule() {
        let err = parse(indoc! {r#"
            bad = /
            good = "ok"
        "#})
        .expect_err("first rule is malformed");
        assert!(err.diagnostics().is_some());
    }
}
