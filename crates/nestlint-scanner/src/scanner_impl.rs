//! Scanner state machine.
//!
//! `ScannerState` walks the source text one token at a time. The parser does
//! not drive it directly: `tokenize` collects the significant tokens into a
//! vector so the parser can look ahead and backtrack by index.

use crate::syntax_kind::{PUNCTUATION, SyntaxKind, text_to_keyword, token_is_keyword};
use serde::Serialize;

/// A significant (non-trivia) token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: SyntaxKind,
    pub pos: u32,
    pub end: u32,
    /// A newline appeared between the previous token and this one.
    pub preceding_line_break: bool,
}

pub struct ScannerState {
    source: String,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    skip_trivia: bool,
    preceding_line_break: bool,
    /// Last non-trivia token, used to tell a regex from a division.
    last_significant: SyntaxKind,
}

impl ScannerState {
    pub fn new(source: String, skip_trivia: bool) -> Self {
        ScannerState {
            source,
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_value: String::new(),
            skip_trivia,
            preceding_line_break: false,
            last_significant: SyntaxKind::Unknown,
        }
    }

    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    pub fn get_token_pos(&self) -> u32 {
        self.token_start as u32
    }

    pub fn get_token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Cooked value of the current token: unescaped text for string
    /// literals, raw text for everything else.
    pub fn get_token_value(&self) -> &str {
        &self.token_value
    }

    pub fn get_token_text(&self) -> &str {
        &self.source[self.token_start..self.pos]
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(offset)
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + offset).copied()
    }

    pub fn scan(&mut self) -> SyntaxKind {
        let kind = self.scan_inner();
        self.token = kind;
        if !matches!(
            kind,
            SyntaxKind::WhitespaceTrivia
                | SyntaxKind::NewLineTrivia
                | SyntaxKind::SingleLineCommentTrivia
                | SyntaxKind::MultiLineCommentTrivia
        ) {
            self.last_significant = kind;
        }
        kind
    }

    fn scan_inner(&mut self) -> SyntaxKind {
        self.preceding_line_break = false;
        loop {
            self.token_start = self.pos;
            self.token_value.clear();
            let Some(ch) = self.peek(0) else {
                return SyntaxKind::EndOfFileToken;
            };

            match ch {
                '\n' | '\r' => {
                    self.pos += 1;
                    if ch == '\r' && self.peek_byte(0) == Some(b'\n') {
                        self.pos += 1;
                    }
                    self.preceding_line_break = true;
                    if self.skip_trivia {
                        continue;
                    }
                    return SyntaxKind::NewLineTrivia;
                }
                c if is_whitespace_single_line(c) => {
                    while let Some(c) = self.peek(0) {
                        if !is_whitespace_single_line(c) {
                            break;
                        }
                        self.pos += c.len_utf8();
                    }
                    if self.skip_trivia {
                        continue;
                    }
                    return SyntaxKind::WhitespaceTrivia;
                }
                '/' if self.peek_byte(1) == Some(b'/') => {
                    let rest = &self.source.as_bytes()[self.pos..];
                    let len = memchr::memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
                    self.pos += len;
                    if self.skip_trivia {
                        continue;
                    }
                    return SyntaxKind::SingleLineCommentTrivia;
                }
                '/' if self.peek_byte(1) == Some(b'*') => {
                    let body = &self.source.as_bytes()[self.pos + 2..];
                    let len = memchr::memmem::find(body, b"*/")
                        .map(|i| i + 4)
                        .unwrap_or(body.len() + 2);
                    let comment = &self.source.as_bytes()[self.pos..self.pos + len];
                    if memchr::memchr2(b'\n', b'\r', comment).is_some() {
                        self.preceding_line_break = true;
                    }
                    self.pos += len;
                    if self.skip_trivia {
                        continue;
                    }
                    return SyntaxKind::MultiLineCommentTrivia;
                }
                '/' if self.regex_allowed() => return self.scan_regular_expression(),
                '"' | '\'' => return self.scan_string(ch),
                '`' => return self.scan_template(),
                '0'..='9' => return self.scan_number(),
                '.' if self.peek(1).is_some_and(|c| c.is_ascii_digit()) => {
                    return self.scan_number();
                }
                '#' if self.peek(1).is_some_and(is_identifier_start) => {
                    self.pos += 1;
                    self.scan_identifier_part();
                    self.token_value = self.get_token_text().to_string();
                    return SyntaxKind::PrivateIdentifier;
                }
                c if is_identifier_start(c) => {
                    self.scan_identifier_part();
                    self.token_value = self.get_token_text().to_string();
                    return text_to_keyword(&self.token_value).unwrap_or(SyntaxKind::Identifier);
                }
                _ => return self.scan_punctuation(ch),
            }
        }
    }

    fn scan_identifier_part(&mut self) {
        while let Some(c) = self.peek(0) {
            if !is_identifier_part(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn scan_punctuation(&mut self, ch: char) -> SyntaxKind {
        let rest = &self.source[self.pos..];
        for (text, kind) in PUNCTUATION {
            if !rest.starts_with(text) {
                continue;
            }
            // `a?.5:b` is a conditional, not optional chaining
            if *kind == SyntaxKind::QuestionDotToken
                && rest[2..].chars().next().is_some_and(|c| c.is_ascii_digit())
            {
                continue;
            }
            self.pos += text.len();
            self.token_value = (*text).to_string();
            return *kind;
        }
        self.pos += ch.len_utf8();
        SyntaxKind::Unknown
    }

    /// Decide whether a `/` starts a regular expression from the previous
    /// significant token.
    fn regex_allowed(&self) -> bool {
        match self.last_significant {
            SyntaxKind::Identifier
            | SyntaxKind::PrivateIdentifier
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::RegularExpressionLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateLiteral
            | SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::UndefinedKeyword => false,
            kind if token_is_keyword(kind) => matches!(
                kind,
                SyntaxKind::ReturnKeyword
                    | SyntaxKind::TypeOfKeyword
                    | SyntaxKind::InstanceOfKeyword
                    | SyntaxKind::InKeyword
                    | SyntaxKind::OfKeyword
                    | SyntaxKind::NewKeyword
                    | SyntaxKind::DeleteKeyword
                    | SyntaxKind::VoidKeyword
                    | SyntaxKind::ThrowKeyword
                    | SyntaxKind::CaseKeyword
                    | SyntaxKind::DoKeyword
                    | SyntaxKind::ElseKeyword
                    | SyntaxKind::YieldKeyword
                    | SyntaxKind::AwaitKeyword
            ),
            _ => true,
        }
    }

    fn scan_regular_expression(&mut self) -> SyntaxKind {
        self.pos += 1;
        let mut in_class = false;
        while let Some(c) = self.peek(0) {
            match c {
                '\n' | '\r' => break,
                '\\' => {
                    self.pos += 1;
                    if let Some(escaped) = self.peek(0) {
                        self.pos += escaped.len_utf8();
                    }
                    continue;
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => {
                    self.pos += 1;
                    self.scan_identifier_part();
                    break;
                }
                _ => {}
            }
            self.pos += c.len_utf8();
        }
        self.token_value = self.get_token_text().to_string();
        SyntaxKind::RegularExpressionLiteral
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        while let Some(c) = self.peek(0) {
            if c == quote {
                self.pos += 1;
                break;
            }
            if c == '\n' || c == '\r' {
                // Unterminated; leave the newline for the next token
                break;
            }
            if c == '\\' {
                self.pos += 1;
                if let Some(escaped) = self.peek(0) {
                    self.pos += escaped.len_utf8();
                }
                continue;
            }
            self.pos += c.len_utf8();
        }
        self.token_value = string_literal_value(self.get_token_text());
        SyntaxKind::StringLiteral
    }

    fn scan_template(&mut self) -> SyntaxKind {
        self.pos += 1;
        let mut has_substitutions = false;
        while let Some(c) = self.peek(0) {
            match c {
                '`' => {
                    self.pos += 1;
                    break;
                }
                '\\' => {
                    self.pos += 1;
                    if let Some(escaped) = self.peek(0) {
                        self.pos += escaped.len_utf8();
                    }
                }
                '$' if self.peek_byte(1) == Some(b'{') => {
                    has_substitutions = true;
                    self.pos += 2;
                    self.skip_template_substitution();
                }
                _ => self.pos += c.len_utf8(),
            }
        }
        let text = self.get_token_text();
        if has_substitutions {
            self.token_value = text.to_string();
            SyntaxKind::TemplateLiteral
        } else {
            let inner = text.strip_prefix('`').unwrap_or(text);
            let inner = inner.strip_suffix('`').unwrap_or(inner);
            self.token_value = unescape(inner);
            SyntaxKind::NoSubstitutionTemplateLiteral
        }
    }

    /// Skip the body of a `${ ... }` substitution, including nested
    /// strings, templates and braces.
    fn skip_template_substitution(&mut self) {
        let mut depth = 1usize;
        while let Some(c) = self.peek(0) {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return;
                    }
                }
                '"' | '\'' => {
                    let start = self.token_start;
                    self.token_start = self.pos;
                    self.scan_string(c);
                    self.token_start = start;
                    continue;
                }
                '`' => {
                    let start = self.token_start;
                    self.token_start = self.pos;
                    self.scan_template();
                    self.token_start = start;
                    continue;
                }
                _ => {}
            }
            self.pos += c.len_utf8();
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let is_hex_like = self.peek(0) == Some('0')
            && matches!(self.peek(1), Some('x' | 'X' | 'o' | 'O' | 'b' | 'B'));
        while let Some(c) = self.peek(0) {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                self.pos += 1;
                if !is_hex_like
                    && matches!(c, 'e' | 'E')
                    && matches!(self.peek(0), Some('+' | '-'))
                {
                    self.pos += 1;
                }
                continue;
            }
            break;
        }
        self.token_value = self.get_token_text().to_string();
        if self.token_value.ends_with('n') {
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        }
    }
}

/// Tokenize `source`, dropping trivia. The last token is always
/// `EndOfFileToken`.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut scanner = ScannerState::new(source.to_string(), true);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        tokens.push(Token {
            kind,
            pos: scanner.get_token_pos(),
            end: scanner.get_token_end(),
            preceding_line_break: scanner.has_preceding_line_break(),
        });
        if kind == SyntaxKind::EndOfFileToken {
            return tokens;
        }
    }
}

/// Cooked value of a quoted string literal's raw text (quotes included).
pub fn string_literal_value(raw: &str) -> String {
    let mut chars = raw.chars();
    let Some(quote) = chars.next() else {
        return String::new();
    };
    let inner = &raw[quote.len_utf8()..];
    let inner = inner.strip_suffix(quote).unwrap_or(inner);
    unescape(inner)
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(ch) => out.push(ch),
                    None => out.push_str(&hex),
                }
            }
            'u' => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|&c| c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(ch) => out.push(ch),
                    None => out.push_str(&hex),
                }
            }
            // Line continuation
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn is_whitespace_single_line(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\u{b}' | '\u{c}' | '\u{a0}' | '\u{feff}' | '\u{2028}' | '\u{2029}'
    ) || (c > '\u{7f}' && c.is_whitespace())
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$' || (c > '\u{7f}' && c.is_alphabetic())
}

fn is_identifier_part(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || c == '$'
        || c == '\u{200c}'
        || c == '\u{200d}'
        || (c > '\u{7f}' && c.is_alphanumeric())
}
