//! Parser state - type annotations.
//!
//! A type annotation is delimited first (brackets and angle brackets
//! balanced, ending at `;` `=` `,` a closing bracket or an automatic
//! semicolon), then split into union members at depth zero.

use super::state::{ParserState, is_close_bracket, is_open_bracket};
use crate::ast::{KeywordType, TypeNode};
use nestlint_common::TextRange;
use nestlint_scanner::{SyntaxKind, Token};

impl<'a> ParserState<'a> {
    /// Parse the type after a `:`. Returns `None` when no type tokens
    /// follow.
    pub(crate) fn parse_type_annotation(&mut self) -> Option<TypeNode> {
        let first = self.mark();
        let mut depth = 0usize;
        let mut tokens = Vec::new();

        loop {
            let token = self.current();
            match token.kind {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::SemicolonToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::CommaToken
                    if depth == 0 =>
                {
                    break;
                }
                kind if is_close_bracket(kind) && depth == 0 => break,
                _ if depth == 0 && self.mark() != first && self.at_automatic_semicolon(true) => {
                    break;
                }
                kind if is_open_bracket(kind) || kind == SyntaxKind::LessThanToken => depth += 1,
                kind if is_close_bracket(kind) || kind == SyntaxKind::GreaterThanToken => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            tokens.push(token);
            self.next_token();
        }

        if tokens.is_empty() {
            return None;
        }
        Some(type_from_tokens(&tokens))
    }
}

/// Build a type node from a non-empty token run.
fn type_from_tokens(tokens: &[Token]) -> TypeNode {
    let range = TextRange::new(tokens[0].pos, tokens[tokens.len() - 1].end);

    // Split on `|` at depth zero; a leading `|` yields an empty first part
    let mut members = Vec::new();
    let mut depth = 0usize;
    let mut part_start = 0usize;
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            kind if is_open_bracket(kind) || kind == SyntaxKind::LessThanToken => depth += 1,
            kind if is_close_bracket(kind) || kind == SyntaxKind::GreaterThanToken => {
                depth = depth.saturating_sub(1);
            }
            SyntaxKind::BarToken if depth == 0 => {
                if index > part_start {
                    members.push(&tokens[part_start..index]);
                }
                part_start = index + 1;
            }
            _ => {}
        }
    }
    if part_start < tokens.len() {
        members.push(&tokens[part_start..]);
    }

    // `() => A | B` is a function type returning the union
    if has_top_level_arrow(tokens) {
        return TypeNode::Other(range);
    }

    let leading_bar = tokens[0].kind == SyntaxKind::BarToken;
    match members.as_slice() {
        [] => TypeNode::Other(range),
        [single] if !leading_bar => type_member(single),
        _ => TypeNode::Union {
            range,
            types: members.into_iter().map(type_member).collect(),
        },
    }
}

fn type_member(tokens: &[Token]) -> TypeNode {
    let first = tokens[0];
    let last = tokens[tokens.len() - 1];
    let range = TextRange::new(first.pos, last.end);

    if tokens.len() == 1 {
        let keyword = match first.kind {
            SyntaxKind::UndefinedKeyword => Some(KeywordType::Undefined),
            SyntaxKind::NullKeyword => Some(KeywordType::Null),
            SyntaxKind::VoidKeyword => Some(KeywordType::Void),
            _ => None,
        };
        return match keyword {
            Some(keyword) => TypeNode::Keyword { range, keyword },
            None => TypeNode::Other(range),
        };
    }

    if first.kind == SyntaxKind::OpenParenToken
        && last.kind == SyntaxKind::CloseParenToken
        && closing_paren_index(tokens) == Some(tokens.len() - 1)
        && tokens.len() > 2
    {
        return TypeNode::Parenthesized {
            range,
            inner: Box::new(type_from_tokens(&tokens[1..tokens.len() - 1])),
        };
    }

    TypeNode::Other(range)
}

fn has_top_level_arrow(tokens: &[Token]) -> bool {
    let mut depth = 0usize;
    for token in tokens {
        match token.kind {
            kind if is_open_bracket(kind) || kind == SyntaxKind::LessThanToken => depth += 1,
            kind if is_close_bracket(kind) || kind == SyntaxKind::GreaterThanToken => {
                depth = depth.saturating_sub(1);
            }
            SyntaxKind::EqualsGreaterThanToken if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

/// Index of the token closing the bracket opened by `tokens[0]`.
fn closing_paren_index(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate() {
        if is_open_bracket(token.kind) {
            depth += 1;
        } else if is_close_bracket(token.kind) {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(index);
            }
        }
    }
    None
}
