//! Token and line queries on a parsed `SourceFile`.
//!
//! Fix builders work on byte offsets; these helpers answer "what token is
//! next to this offset" and "what does this line start with" without
//! re-scanning the text.

use crate::ast::SourceFile;
use nestlint_scanner::{SyntaxKind, Token};

impl SourceFile {
    /// First token ending after `offset`: the token containing it, or the
    /// next one. `EndOfFileToken` when nothing follows.
    pub fn token_at_or_after(&self, offset: u32) -> Option<&Token> {
        let index = self.tokens.partition_point(|token| token.end <= offset);
        self.tokens.get(index)
    }

    /// Last token ending at or before `offset`.
    pub fn token_before(&self, offset: u32) -> Option<&Token> {
        let index = self.tokens.partition_point(|token| token.end <= offset);
        index
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .filter(|token| token.kind != SyntaxKind::EndOfFileToken)
    }

    /// First token starting at or after `offset`.
    pub fn token_after(&self, offset: u32) -> Option<&Token> {
        let index = self.tokens.partition_point(|token| token.pos < offset);
        self.tokens.get(index)
    }

    pub fn token_text(&self, token: &Token) -> &str {
        self.text
            .get(token.pos as usize..token.end as usize)
            .unwrap_or("")
    }

    /// Offset of the first character of the line containing `offset`.
    pub fn line_start(&self, offset: u32) -> u32 {
        let line = self.line_map.line_of(offset);
        self.line_map.line_start(line).unwrap_or(0)
    }

    /// Leading whitespace of the line containing `offset`.
    pub fn line_indentation(&self, offset: u32) -> &str {
        let start = self.line_start(offset) as usize;
        let rest = self.text.get(start..).unwrap_or("");
        let len = rest
            .find(|c: char| !matches!(c, ' ' | '\t'))
            .unwrap_or(rest.len());
        &rest[..len]
    }

    /// True when only whitespace precedes `offset` on its line.
    pub fn starts_line(&self, offset: u32) -> bool {
        let start = self.line_start(offset) as usize;
        self.text
            .get(start..offset as usize)
            .is_some_and(|prefix| prefix.trim().is_empty())
    }

    /// True when `a` and `b` are on the same line.
    pub fn same_line(&self, a: u32, b: u32) -> bool {
        self.line_map.line_of(a) == self.line_map.line_of(b)
    }
}
