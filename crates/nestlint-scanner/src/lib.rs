//! TypeScript scanner/tokenizer for nestlint.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `tokenize` - Significant-token stream consumed by the parser

pub mod syntax_kind;
pub use syntax_kind::{
    SyntaxKind, keyword_to_text, punctuation_to_text, text_to_keyword, token_is_keyword,
    token_is_identifier_or_keyword, token_is_literal, token_is_trivia,
};

pub mod scanner_impl;
pub use scanner_impl::{ScannerState, Token, string_literal_value, tokenize};

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
#[cfg(test)]
#[path = "tests/scanner_impl_tests.rs"]
mod scanner_impl_tests;
