//! Parser state - expressions.
//!
//! Only the shapes decorators use are modelled: identifiers, member access,
//! calls, object literals, simple literals and parentheses. Everything else
//! (arrow functions, operators, templates, `new`) is skipped to the next
//! delimiter and kept as `Expression::Other`.

use super::state::{ParserState, is_delimiter};
use crate::ast::{
    CallExpression, Expression, Identifier, Literal, LiteralKind, ObjectLiteral, ObjectProperty,
    ParenthesizedExpression, PropertyAccessExpression, PropertyAssignment, PropertyNameKind,
};
use nestlint_common::TextRange;
use nestlint_scanner::{SyntaxKind, string_literal_value, token_is_identifier_or_keyword};

impl<'a> ParserState<'a> {
    /// Parse an expression up to the next delimiter.
    pub(crate) fn parse_expression(&mut self) -> Expression {
        self.parse_expression_with(false)
    }

    /// Property initializer: an expression that may also end at an
    /// automatic semicolon.
    pub(crate) fn parse_initializer(&mut self) -> Expression {
        self.parse_expression_with(true)
    }

    fn parse_expression_with(&mut self, asi: bool) -> Expression {
        let start_mark = self.mark();
        let start = self.token_pos();
        if let Some(expression) = self.parse_left_hand_side() {
            if self.at_expression_end(asi) {
                return expression;
            }
        }
        self.reset(start_mark);
        self.skip_to_delimiter(asi);
        let end = if self.mark() == start_mark {
            start
        } else {
            self.last_end()
        };
        Expression::Other(TextRange::new(start, end))
    }

    fn at_expression_end(&self, asi: bool) -> bool {
        let kind = self.token();
        kind == SyntaxKind::EndOfFileToken
            || is_delimiter(kind)
            || (asi && self.at_automatic_semicolon(false))
    }

    /// Expression following `@`: `name`, `a.b`, `name(...)` or `(expr)`.
    pub(crate) fn parse_decorator_expression(&mut self) -> Option<Expression> {
        if self.is_token(SyntaxKind::OpenParenToken) {
            let parenthesized = self.parse_parenthesized()?;
            return Some(self.parse_postfix(parenthesized));
        }
        if !token_is_identifier_or_keyword(self.token()) {
            return None;
        }
        let identifier = self.parse_identifier();
        Some(self.parse_postfix(Expression::Identifier(identifier)))
    }

    fn parse_left_hand_side(&mut self) -> Option<Expression> {
        let primary = self.parse_primary()?;
        Some(self.parse_postfix(primary))
    }

    fn parse_primary(&mut self) -> Option<Expression> {
        let range = TextRange::new(self.token_pos(), self.token_end());
        let literal = |kind| Some(Expression::Literal(Literal { range, kind }));
        let expression = match self.token() {
            SyntaxKind::TrueKeyword => literal(LiteralKind::True),
            SyntaxKind::FalseKeyword => literal(LiteralKind::False),
            SyntaxKind::NullKeyword => literal(LiteralKind::Null),
            SyntaxKind::StringLiteral => {
                literal(LiteralKind::String(string_literal_value(self.token_text())))
            }
            SyntaxKind::NumericLiteral => {
                literal(LiteralKind::Number(self.token_text().to_string()))
            }
            SyntaxKind::OpenBraceToken => {
                return Some(Expression::Object(self.parse_object_literal()));
            }
            SyntaxKind::OpenParenToken => return self.parse_parenthesized(),
            SyntaxKind::Identifier | SyntaxKind::UndefinedKeyword => {
                return Some(Expression::Identifier(self.parse_identifier()));
            }
            kind if kind >= SyntaxKind::FIRST_CONTEXTUAL_KEYWORD => {
                return Some(Expression::Identifier(self.parse_identifier()));
            }
            _ => None,
        };
        if expression.is_some() {
            self.next_token();
        }
        expression
    }

    fn parse_identifier(&mut self) -> Identifier {
        let identifier = Identifier {
            range: TextRange::new(self.token_pos(), self.token_end()),
            text: self.token_text().to_string(),
        };
        self.next_token();
        identifier
    }

    fn parse_parenthesized(&mut self) -> Option<Expression> {
        let mark = self.mark();
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_expression();
        if self.parse_optional(SyntaxKind::CloseParenToken).is_none() {
            self.reset(mark);
            return None;
        }
        Some(Expression::Parenthesized(ParenthesizedExpression {
            range: TextRange::new(start, self.last_end()),
            expression: Box::new(expression),
        }))
    }

    /// Member accesses and calls following `expression`.
    fn parse_postfix(&mut self, mut expression: Expression) -> Expression {
        loop {
            match self.token() {
                SyntaxKind::DotToken | SyntaxKind::QuestionDotToken
                    if token_is_identifier_or_keyword(self.nth(1))
                        || self.nth(1) == SyntaxKind::PrivateIdentifier =>
                {
                    self.next_token();
                    let name = self.parse_identifier();
                    expression = Expression::PropertyAccess(PropertyAccessExpression {
                        range: TextRange::new(expression.range().pos, name.range.end),
                        expression: Box::new(expression),
                        name,
                    });
                }
                SyntaxKind::QuestionDotToken if self.nth(1) == SyntaxKind::OpenParenToken => {
                    self.next_token();
                }
                SyntaxKind::OpenParenToken => {
                    expression = Expression::Call(self.parse_call_arguments(expression));
                }
                _ => return expression,
            }
        }
    }

    fn parse_call_arguments(&mut self, callee: Expression) -> CallExpression {
        let open = self.token_pos();
        self.next_token();
        let mut arguments = Vec::new();
        let mut trailing_comma = false;

        loop {
            match self.token() {
                SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken => break,
                _ => {}
            }
            arguments.push(self.parse_expression());
            trailing_comma = false;
            if self.parse_optional(SyntaxKind::CommaToken).is_some() {
                trailing_comma = self.is_token(SyntaxKind::CloseParenToken);
            } else {
                break;
            }
        }

        self.parse_optional(SyntaxKind::CloseParenToken);
        let parens = TextRange::new(open, self.last_end());
        CallExpression {
            range: TextRange::new(callee.range().pos, parens.end),
            callee: Box::new(callee),
            arguments,
            parens,
            trailing_comma,
        }
    }

    pub(crate) fn parse_object_literal(&mut self) -> ObjectLiteral {
        let start = self.token_pos();
        self.next_token();
        let mut properties = Vec::new();
        let mut trailing_comma = false;

        loop {
            match self.token() {
                SyntaxKind::CloseBraceToken => {
                    self.next_token();
                    break;
                }
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CommaToken => {
                    self.next_token();
                    continue;
                }
                _ => {}
            }

            properties.push(self.parse_object_property());
            trailing_comma = false;
            if self.parse_optional(SyntaxKind::CommaToken).is_some() {
                trailing_comma = self.is_token(SyntaxKind::CloseBraceToken);
            } else if !self.is_token(SyntaxKind::CloseBraceToken) {
                // `)` `]` or `;` inside an unterminated literal
                break;
            }
        }

        ObjectLiteral {
            range: TextRange::new(start, self.last_end()),
            properties,
            trailing_comma,
        }
    }

    fn parse_object_property(&mut self) -> ObjectProperty {
        let start = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken).is_some() {
            let expression = self.parse_expression();
            return ObjectProperty::Spread {
                range: TextRange::new(start, self.last_end()),
                expression,
            };
        }

        let before = self.mark();
        let name = match self.token() {
            SyntaxKind::PrivateIdentifier => None,
            _ => self.parse_property_name(),
        };

        match (name, self.token()) {
            (Some(key), SyntaxKind::ColonToken) => {
                self.next_token();
                let value = self.parse_expression();
                ObjectProperty::Property(PropertyAssignment {
                    range: TextRange::new(start, value.range().end.max(key.range.end)),
                    key,
                    value,
                })
            }
            (Some(key), SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken)
                if key.kind == PropertyNameKind::Identifier =>
            {
                ObjectProperty::Shorthand(Identifier {
                    range: key.range,
                    text: key.text,
                })
            }
            (name, _) => {
                // Methods, accessors, generators, `a = b` defaults
                self.skip_to_delimiter(false);
                if self.mark() == before {
                    self.next_token();
                }
                ObjectProperty::Method {
                    range: TextRange::new(start, self.last_end()),
                    name,
                }
            }
        }
    }
}
