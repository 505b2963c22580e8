//! Parser state - class declarations and class member parsing.

use super::state::{ParserState, is_delimiter, starts_class_member};
use crate::ast::{
    ClassDeclaration, ClassMember, Decorator, Expression, MethodDeclaration, Modifier,
    PropertyDeclaration, PropertyName, PropertyNameKind,
};
use nestlint_common::TextRange;
use nestlint_scanner::{SyntaxKind, string_literal_value, token_is_identifier_or_keyword};
use tracing::trace;

impl<'a> ParserState<'a> {
    /// Parse `class Name ... { members }` at the current `class` keyword and
    /// push it to `classes`. Returns the token index of the body's `{`.
    pub(crate) fn parse_class_declaration(
        &mut self,
        decorators: Vec<Decorator>,
        classes: &mut Vec<ClassDeclaration>,
    ) -> Option<usize> {
        let class_pos = self.token_pos();
        let start = decorators.first().map_or(class_pos, |d| d.range.pos);
        self.next_token();

        let mut name = None;
        if token_is_identifier_or_keyword(self.token())
            && !matches!(
                self.token(),
                SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
            )
        {
            name = Some(self.token_text().to_string());
            self.next_token();
        }

        // Type parameters and heritage clauses up to the body
        let mut angle_depth = 0usize;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return None,
                SyntaxKind::OpenBraceToken if angle_depth == 0 => break,
                SyntaxKind::LessThanToken => angle_depth += 1,
                SyntaxKind::GreaterThanToken => angle_depth = angle_depth.saturating_sub(1),
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken => {
                    self.skip_balanced();
                    continue;
                }
                _ => {}
            }
            self.next_token();
        }

        let body_start = self.mark();
        self.next_token();
        let members = self.parse_class_members();
        self.parse_optional(SyntaxKind::CloseBraceToken);

        trace!(
            name = name.as_deref().unwrap_or("<anonymous>"),
            members = members.len(),
            "parsed class"
        );
        classes.push(ClassDeclaration {
            range: TextRange::new(start, self.last_end()),
            name,
            decorators,
            members,
        });
        Some(body_start)
    }

    /// Members up to (not including) the closing brace of the body.
    pub(crate) fn parse_class_members(&mut self) -> Vec<ClassMember> {
        let mut members = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken => break,
                SyntaxKind::SemicolonToken => {
                    members.push(ClassMember::Other(TextRange::new(
                        self.token_pos(),
                        self.token_end(),
                    )));
                    self.next_token();
                }
                _ => {
                    let before = self.mark();
                    let member = self.parse_class_member();
                    if self.mark() == before {
                        // No progress: drop the token as an unknown member
                        let range = TextRange::new(self.token_pos(), self.token_end());
                        self.skip_balanced();
                        members.push(ClassMember::Other(range));
                    } else {
                        members.push(member);
                    }
                }
            }
        }
        members
    }

    pub(crate) fn parse_class_member(&mut self) -> ClassMember {
        let start = self.token_pos();
        let decorators = self.parse_decorators();
        let modifiers = self.parse_class_member_modifiers();

        // `static { ... }`
        if self.is_token(SyntaxKind::OpenBraceToken)
            && modifiers.iter().any(|m| m.kind == SyntaxKind::StaticKeyword)
        {
            self.skip_balanced();
            return ClassMember::Other(TextRange::new(start, self.last_end()));
        }

        if self.look_ahead_is_index_signature() {
            self.skip_balanced();
            if self.parse_optional(SyntaxKind::ColonToken).is_some() {
                self.parse_type_annotation();
            }
            self.parse_optional(SyntaxKind::SemicolonToken);
            return ClassMember::Other(TextRange::new(start, self.last_end()));
        }

        // Accessors and generators are always methods
        let mut is_method = false;
        if matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && can_start_property_name(self.nth(1))
            && !self.nth_token(1).preceding_line_break
        {
            self.next_token();
            is_method = true;
        }
        if self.parse_optional(SyntaxKind::AsteriskToken).is_some() {
            is_method = true;
        }

        let Some(name) = self.parse_property_name() else {
            return ClassMember::Other(TextRange::new(start, self.last_end().max(start)));
        };

        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
        if is_method
            || matches!(
                self.token(),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            self.skip_method_rest();
            return ClassMember::Method(MethodDeclaration {
                range: TextRange::new(start, self.last_end()),
                decorators,
                modifiers,
                name,
            });
        }

        let exclamation_token = if question_token.is_none() {
            self.parse_optional(SyntaxKind::ExclamationToken)
        } else {
            None
        };

        let type_annotation = if self.parse_optional(SyntaxKind::ColonToken).is_some() {
            self.parse_type_annotation()
        } else {
            None
        };

        let initializer = if self.parse_optional(SyntaxKind::EqualsToken).is_some() {
            Some(self.parse_initializer())
        } else {
            None
        };

        if self.parse_optional(SyntaxKind::SemicolonToken).is_none()
            && !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
            && !self.has_preceding_line_break()
        {
            // Garbage after the declaration on the same line
            trace!(pos = self.token_pos(), "skipping unexpected tokens after property");
            self.skip_to_delimiter(true);
            self.parse_optional(SyntaxKind::SemicolonToken);
        }

        ClassMember::Property(PropertyDeclaration {
            range: TextRange::new(start, self.last_end()),
            decorators,
            modifiers,
            name,
            question_token,
            exclamation_token,
            type_annotation,
            initializer,
        })
    }

    /// `@expr` decorators, in source order.
    pub(crate) fn parse_decorators(&mut self) -> Vec<Decorator> {
        let mut decorators = Vec::new();
        while self.is_token(SyntaxKind::AtToken) {
            let start = self.token_pos();
            self.next_token();
            let expression = self
                .parse_decorator_expression()
                .unwrap_or_else(|| Expression::Other(TextRange::empty(self.last_end())));
            decorators.push(Decorator {
                range: TextRange::new(start, self.last_end()),
                expression,
            });
        }
        decorators
    }

    /// Parse class member modifiers (public, private, protected, static,
    /// readonly, declare, abstract, override, accessor, async). A modifier
    /// keyword only counts when a name can follow it; otherwise it is the
    /// member's name.
    pub(crate) fn parse_class_member_modifiers(&mut self) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        while is_class_member_modifier(self.token()) && self.next_can_follow_modifier() {
            modifiers.push(Modifier {
                kind: self.token(),
                range: TextRange::new(self.token_pos(), self.token_end()),
            });
            self.next_token();
        }
        modifiers
    }

    fn next_can_follow_modifier(&self) -> bool {
        let next = self.nth_token(1);
        if self.token() == SyntaxKind::AsyncKeyword && next.preceding_line_break {
            return false;
        }
        can_start_property_name(next.kind)
            || matches!(
                next.kind,
                SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken
            )
    }

    fn look_ahead_is_index_signature(&self) -> bool {
        self.is_token(SyntaxKind::OpenBracketToken)
            && token_is_identifier_or_keyword(self.nth(1))
            && self.nth(2) == SyntaxKind::ColonToken
    }

    /// Identifier, keyword, private name, string, number or `[computed]`.
    pub(crate) fn parse_property_name(&mut self) -> Option<PropertyName> {
        let pos = self.token_pos();
        let (text, kind) = match self.token() {
            SyntaxKind::PrivateIdentifier => {
                (self.token_text().to_string(), PropertyNameKind::PrivateIdentifier)
            }
            SyntaxKind::StringLiteral => (
                string_literal_value(self.token_text()),
                PropertyNameKind::StringLiteral,
            ),
            SyntaxKind::NumericLiteral => {
                (self.token_text().to_string(), PropertyNameKind::NumericLiteral)
            }
            SyntaxKind::OpenBracketToken => {
                self.skip_balanced();
                let range = TextRange::new(pos, self.last_end());
                return Some(PropertyName {
                    text: range.slice(self.text).to_string(),
                    range,
                    kind: PropertyNameKind::Computed,
                });
            }
            kind if token_is_identifier_or_keyword(kind) => {
                (self.token_text().to_string(), PropertyNameKind::Identifier)
            }
            _ => return None,
        };
        let range = TextRange::new(pos, self.token_end());
        self.next_token();
        Some(PropertyName { text, range, kind })
    }

    /// Type parameters, parameters, return type and body of a method.
    fn skip_method_rest(&mut self) {
        if self.is_token(SyntaxKind::LessThanToken) {
            let mut depth = 0usize;
            loop {
                match self.token() {
                    SyntaxKind::EndOfFileToken => return,
                    SyntaxKind::LessThanToken => depth += 1,
                    SyntaxKind::GreaterThanToken => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            self.next_token();
                            break;
                        }
                    }
                    SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::OpenBraceToken => {
                        self.skip_balanced();
                        continue;
                    }
                    _ => {}
                }
                self.next_token();
            }
        }
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.skip_balanced();
        }
        if self.parse_optional(SyntaxKind::ColonToken).is_some() {
            self.skip_return_type();
        }
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.skip_balanced();
        } else {
            self.parse_optional(SyntaxKind::SemicolonToken);
        }
    }

    /// Skip a method's return type, stopping at the body's `{`.
    fn skip_return_type(&mut self) {
        let mut angle_depth = 0usize;
        loop {
            let kind = self.token();
            if kind == SyntaxKind::EndOfFileToken {
                return;
            }
            match kind {
                SyntaxKind::LessThanToken => angle_depth += 1,
                SyntaxKind::GreaterThanToken => angle_depth = angle_depth.saturating_sub(1),
                _ => {}
            }
            if angle_depth > 0 {
                self.skip_balanced();
                continue;
            }
            if is_delimiter(kind)
                || kind == SyntaxKind::EqualsToken
                || self.at_automatic_semicolon(true)
            {
                return;
            }
            if kind == SyntaxKind::OpenBraceToken
                && !self.previous().is_some_and(|previous| {
                    matches!(
                        previous.kind,
                        SyntaxKind::ColonToken
                            | SyntaxKind::BarToken
                            | SyntaxKind::AmpersandToken
                            | SyntaxKind::EqualsGreaterThanToken
                            | SyntaxKind::LessThanToken
                            | SyntaxKind::CommaToken
                            | SyntaxKind::OpenBracketToken
                            | SyntaxKind::OpenParenToken
                    )
                })
            {
                return;
            }
            self.skip_balanced();
        }
    }
}

fn is_class_member_modifier(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::OverrideKeyword
            | SyntaxKind::AccessorKeyword
            | SyntaxKind::AsyncKeyword
    )
}

fn can_start_property_name(kind: SyntaxKind) -> bool {
    starts_class_member(kind) && kind != SyntaxKind::AtToken && kind != SyntaxKind::AsteriskToken
}
