//! Parser state - token cursor, top-level walk and import declarations.
//!
//! The parser works over the significant-token vector produced by
//! `nestlint_scanner::tokenize`. It never fails: unrecognized constructs are
//! skipped token by token (balancing brackets) and the walk resumes.

use crate::ast::{
    ClassDeclaration, Decorator, ImportDeclaration, ImportSpecifier, NamedImports, SourceFile,
};
use nestlint_common::{LineMap, TextRange};
use nestlint_scanner::{
    SyntaxKind, Token, string_literal_value, token_is_identifier_or_keyword, tokenize,
};
use tracing::debug;

/// Parse `text` into a `SourceFile`. Never fails.
#[tracing::instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn parse_source_file(file_name: &str, text: &str) -> SourceFile {
    let tokens = tokenize(text);
    let (imports, classes) = {
        let mut state = ParserState::new(text, &tokens);
        state.parse_top_level()
    };
    debug!(
        tokens = tokens.len(),
        imports = imports.len(),
        classes = classes.len(),
        "parsed source file"
    );
    SourceFile {
        file_name: file_name.to_string(),
        text: text.to_string(),
        line_map: LineMap::build(text),
        tokens,
        imports,
        classes,
    }
}

pub(crate) struct ParserState<'a> {
    pub(crate) text: &'a str,
    tokens: &'a [Token],
    index: usize,
}

impl<'a> ParserState<'a> {
    pub(crate) fn new(text: &'a str, tokens: &'a [Token]) -> Self {
        ParserState {
            text,
            tokens,
            index: 0,
        }
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    fn eof_token(&self) -> Token {
        Token {
            kind: SyntaxKind::EndOfFileToken,
            pos: self.text.len() as u32,
            end: self.text.len() as u32,
            preceding_line_break: false,
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> Token {
        self.tokens
            .get(self.index)
            .copied()
            .unwrap_or_else(|| self.eof_token())
    }

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current().kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.current().pos
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.current().end
    }

    pub(crate) fn token_text(&self) -> &'a str {
        let token = self.current();
        self.text
            .get(token.pos as usize..token.end as usize)
            .unwrap_or("")
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.current().preceding_line_break
    }

    /// Kind of the token `n` positions ahead of the current one.
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.index + n)
            .map_or(SyntaxKind::EndOfFileToken, |token| token.kind)
    }

    pub(crate) fn nth_token(&self, n: usize) -> Token {
        self.tokens
            .get(self.index + n)
            .copied()
            .unwrap_or_else(|| self.eof_token())
    }

    pub(crate) fn previous(&self) -> Option<Token> {
        self.index
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index).copied())
    }

    /// End of the last consumed token.
    pub(crate) fn last_end(&self) -> u32 {
        self.previous().map_or(0, |token| token.end)
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.token() == kind
    }

    pub(crate) fn next_token(&mut self) {
        if self.token() != SyntaxKind::EndOfFileToken {
            self.index += 1;
        }
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> Option<TextRange> {
        if self.is_token(kind) {
            let range = TextRange::new(self.token_pos(), self.token_end());
            self.next_token();
            Some(range)
        } else {
            None
        }
    }

    pub(crate) fn mark(&self) -> usize {
        self.index
    }

    pub(crate) fn reset(&mut self, mark: usize) {
        self.index = mark;
    }

    /// Skip one token, or a whole bracketed group when the current token
    /// opens one. Mismatched closers inside the group are tolerated.
    pub(crate) fn skip_balanced(&mut self) {
        if !is_open_bracket(self.token()) {
            self.next_token();
            return;
        }
        let mut depth = 0usize;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return,
                kind if is_open_bracket(kind) => depth += 1,
                kind if is_close_bracket(kind) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        return;
                    }
                }
                _ => {}
            }
            self.next_token();
        }
    }

    /// Skip to the next `,` `;` or closing bracket at depth zero. With
    /// `asi`, also stop before a token on a new line that starts a class
    /// member when the previous token cannot continue an expression.
    pub(crate) fn skip_to_delimiter(&mut self, asi: bool) {
        loop {
            let kind = self.token();
            if kind == SyntaxKind::EndOfFileToken || is_delimiter(kind) {
                return;
            }
            if asi && self.at_automatic_semicolon(false) {
                return;
            }
            if let Some(end) = self.type_arguments_end() {
                self.reset(end);
                continue;
            }
            self.skip_balanced();
        }
    }

    /// At a `<` following a name, the index past its matching `>` when the
    /// group reads as type arguments (`Map<string, number>`): brackets
    /// inside are balanced and the token after it cannot continue a
    /// comparison.
    fn type_arguments_end(&self) -> Option<usize> {
        if !self.is_token(SyntaxKind::LessThanToken)
            || !self
                .previous()
                .is_some_and(|token| token_is_identifier_or_keyword(token.kind))
        {
            return None;
        }
        let mut angles = 0usize;
        let mut brackets = 0usize;
        for (index, token) in self.tokens.iter().enumerate().skip(self.index) {
            match token.kind {
                SyntaxKind::LessThanToken => angles += 1,
                SyntaxKind::GreaterThanToken => {
                    angles -= 1;
                    if angles == 0 {
                        let next = self
                            .tokens
                            .get(index + 1)
                            .map_or(SyntaxKind::EndOfFileToken, |token| token.kind);
                        return follows_type_arguments(next).then_some(index + 1);
                    }
                }
                kind if is_open_bracket(kind) => brackets += 1,
                kind if is_close_bracket(kind) => brackets = brackets.checked_sub(1)?,
                SyntaxKind::SemicolonToken | SyntaxKind::EndOfFileToken => return None,
                _ => {}
            }
        }
        None
    }

    /// A line break before the current token ends the construct: the token
    /// can start a class member and the previous one does not continue.
    pub(crate) fn at_automatic_semicolon(&self, in_type: bool) -> bool {
        let current = self.current();
        if !current.preceding_line_break || !starts_class_member(current.kind) {
            return false;
        }
        match self.previous() {
            Some(previous) => !continues_expression(previous.kind, in_type),
            None => true,
        }
    }

    // =========================================================================
    // Top level
    // =========================================================================

    pub(crate) fn parse_top_level(&mut self) -> (Vec<ImportDeclaration>, Vec<ClassDeclaration>) {
        let mut imports = Vec::new();
        let mut classes = Vec::new();
        let mut pending_decorators: Vec<Decorator> = Vec::new();

        while !self.is_token(SyntaxKind::EndOfFileToken) {
            match self.token() {
                SyntaxKind::ImportKeyword
                    if self.at_statement_start()
                        && !matches!(
                            self.nth(1),
                            SyntaxKind::OpenParenToken | SyntaxKind::DotToken
                        ) =>
                {
                    pending_decorators.clear();
                    if let Some(import) = self.parse_import_declaration() {
                        imports.push(import);
                    }
                }
                SyntaxKind::AtToken => {
                    pending_decorators = self.parse_decorators();
                    while matches!(
                        self.token(),
                        SyntaxKind::ExportKeyword
                            | SyntaxKind::DefaultKeyword
                            | SyntaxKind::DeclareKeyword
                            | SyntaxKind::AbstractKeyword
                    ) {
                        self.next_token();
                    }
                    if !self.at_class_keyword() {
                        pending_decorators.clear();
                    }
                }
                SyntaxKind::ClassKeyword if self.at_class_keyword() => {
                    let decorators = std::mem::take(&mut pending_decorators);
                    let body_start = self.parse_class_declaration(decorators, &mut classes);
                    // Resume inside the body so nested classes are found
                    if let Some(body_start) = body_start {
                        self.reset(body_start + 1);
                    }
                }
                _ => {
                    pending_decorators.clear();
                    self.next_token();
                }
            }
        }

        classes.sort_by_key(|class: &ClassDeclaration| class.range.pos);
        (imports, classes)
    }

    fn at_statement_start(&self) -> bool {
        match self.previous() {
            None => true,
            Some(previous) => {
                self.has_preceding_line_break()
                    || matches!(
                        previous.kind,
                        SyntaxKind::SemicolonToken
                            | SyntaxKind::CloseBraceToken
                            | SyntaxKind::OpenBraceToken
                    )
            }
        }
    }

    pub(crate) fn at_class_keyword(&self) -> bool {
        if !self.is_token(SyntaxKind::ClassKeyword) {
            return false;
        }
        if self
            .previous()
            .is_some_and(|previous| previous.kind == SyntaxKind::DotToken)
        {
            return false;
        }
        let next = self.nth(1);
        matches!(
            next,
            SyntaxKind::OpenBraceToken
                | SyntaxKind::ExtendsKeyword
                | SyntaxKind::ImplementsKeyword
                | SyntaxKind::LessThanToken
        ) || next == SyntaxKind::Identifier
            || next >= SyntaxKind::FIRST_CONTEXTUAL_KEYWORD
    }

    // =========================================================================
    // Imports
    // =========================================================================

    fn parse_import_declaration(&mut self) -> Option<ImportDeclaration> {
        let start = self.token_pos();
        let starts_line = self.only_whitespace_before(start);
        self.next_token();

        let mut is_type_only = false;
        if self.is_token(SyntaxKind::TypeKeyword)
            && !(self.nth(1) == SyntaxKind::FromKeyword && self.nth(2) == SyntaxKind::StringLiteral)
            && (token_is_identifier_or_keyword(self.nth(1))
                || matches!(
                    self.nth(1),
                    SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken
                ))
        {
            is_type_only = true;
            self.next_token();
        }

        let mut named_imports = None;
        if !self.is_token(SyntaxKind::StringLiteral) {
            if token_is_identifier_or_keyword(self.token())
                && !(self.is_token(SyntaxKind::FromKeyword)
                    && self.nth(1) == SyntaxKind::StringLiteral)
            {
                // Default import
                self.next_token();
                if self.is_token(SyntaxKind::EqualsToken) {
                    // `import x = require(...)`
                    return None;
                }
                self.parse_optional(SyntaxKind::CommaToken);
            }
            if self.is_token(SyntaxKind::AsteriskToken) {
                self.next_token();
                self.parse_optional(SyntaxKind::AsKeyword)?;
                self.next_token();
            } else if self.is_token(SyntaxKind::OpenBraceToken) {
                named_imports = Some(self.parse_named_imports());
            }
            self.parse_optional(SyntaxKind::FromKeyword)?;
        }

        if !self.is_token(SyntaxKind::StringLiteral) {
            return None;
        }
        let module_specifier = string_literal_value(self.token_text());
        self.next_token();

        // Import attributes: `with { type: 'json' }`
        if (self.is_token(SyntaxKind::WithKeyword) || self.token_text() == "assert")
            && !self.has_preceding_line_break()
            && self.nth(1) == SyntaxKind::OpenBraceToken
        {
            self.next_token();
            self.skip_balanced();
        }
        self.parse_optional(SyntaxKind::SemicolonToken);

        Some(ImportDeclaration {
            range: TextRange::new(start, self.last_end()),
            module_specifier,
            named_imports,
            is_type_only,
            starts_line,
        })
    }

    fn parse_named_imports(&mut self) -> NamedImports {
        let start = self.token_pos();
        self.next_token();
        let mut elements = Vec::new();
        let mut trailing_comma = false;

        loop {
            match self.token() {
                SyntaxKind::CloseBraceToken => {
                    self.next_token();
                    break;
                }
                SyntaxKind::EndOfFileToken => break,
                _ => {}
            }
            let Some(specifier) = self.parse_import_specifier() else {
                self.skip_to_delimiter(false);
                if !self.is_token(SyntaxKind::CommaToken) {
                    break;
                }
                self.next_token();
                continue;
            };
            elements.push(specifier);
            trailing_comma = false;
            if self.parse_optional(SyntaxKind::CommaToken).is_some() {
                trailing_comma = self.is_token(SyntaxKind::CloseBraceToken);
            } else if !self.is_token(SyntaxKind::CloseBraceToken) {
                break;
            }
        }

        NamedImports {
            range: TextRange::new(start, self.last_end()),
            elements,
            trailing_comma,
        }
    }

    fn parse_import_specifier(&mut self) -> Option<ImportSpecifier> {
        let start = self.token_pos();
        let mut is_type_only = false;
        if self.is_token(SyntaxKind::TypeKeyword)
            && (token_is_identifier_or_keyword(self.nth(1))
                || self.nth(1) == SyntaxKind::StringLiteral)
            && !(self.nth(1) == SyntaxKind::AsKeyword
                && !token_is_identifier_or_keyword(self.nth(2)))
        {
            is_type_only = true;
            self.next_token();
        }

        let imported = self.parse_module_export_name()?;
        let mut local = imported.clone();
        if self.is_token(SyntaxKind::AsKeyword) && token_is_identifier_or_keyword(self.nth(1)) {
            self.next_token();
            local = self.token_text().to_string();
            self.next_token();
        }

        Some(ImportSpecifier {
            range: TextRange::new(start, self.last_end()),
            imported,
            local,
            is_type_only,
        })
    }

    fn parse_module_export_name(&mut self) -> Option<String> {
        let name = match self.token() {
            SyntaxKind::StringLiteral => string_literal_value(self.token_text()),
            kind if token_is_identifier_or_keyword(kind) => self.token_text().to_string(),
            _ => return None,
        };
        self.next_token();
        Some(name)
    }

    pub(crate) fn only_whitespace_before(&self, offset: u32) -> bool {
        let before = self.text.get(..offset as usize).unwrap_or("");
        let line_start = before.rfind(['\n', '\r']).map_or(0, |index| index + 1);
        before[line_start..].trim().is_empty()
    }
}

pub(crate) fn is_open_bracket(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken
    )
}

pub(crate) fn is_close_bracket(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken | SyntaxKind::CloseBraceToken
    )
}

pub(crate) fn is_delimiter(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::CommaToken | SyntaxKind::SemicolonToken
    ) || is_close_bracket(kind)
}

/// Tokens that may follow `Name<...>` in an expression.
fn follows_type_arguments(kind: SyntaxKind) -> bool {
    is_delimiter(kind)
        || matches!(
            kind,
            SyntaxKind::EndOfFileToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::DotToken
                | SyntaxKind::QuestionDotToken
                | SyntaxKind::OpenBracketToken
        )
}

/// Tokens that may begin a class member (after a line break).
pub(crate) fn starts_class_member(kind: SyntaxKind) -> bool {
    token_is_identifier_or_keyword(kind)
        || matches!(
            kind,
            SyntaxKind::AtToken
                | SyntaxKind::PrivateIdentifier
                | SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::AsteriskToken
        )
}

/// Whether `previous` leaves an expression (or type) unfinished, so a
/// following line continues it.
fn continues_expression(previous: SyntaxKind, in_type: bool) -> bool {
    match previous {
        SyntaxKind::CloseParenToken
        | SyntaxKind::CloseBracketToken
        | SyntaxKind::CloseBraceToken
        | SyntaxKind::PlusPlusToken
        | SyntaxKind::MinusMinusToken => false,
        SyntaxKind::GreaterThanToken => !in_type,
        SyntaxKind::TypeOfKeyword
        | SyntaxKind::NewKeyword
        | SyntaxKind::InKeyword
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::ExtendsKeyword
        | SyntaxKind::AsKeyword
        | SyntaxKind::AwaitKeyword
        | SyntaxKind::VoidKeyword
        | SyntaxKind::DeleteKeyword => true,
        kind => kind >= SyntaxKind::OpenBraceToken && kind <= SyntaxKind::QuestionQuestionEqualsToken,
    }
}
