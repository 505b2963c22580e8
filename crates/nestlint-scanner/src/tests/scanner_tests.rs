//! Tests for syntax_kind.rs

use super::*;

#[test]
fn test_token_is_keyword() {
    assert!(token_is_keyword(SyntaxKind::BreakKeyword));
    assert!(token_is_keyword(SyntaxKind::ClassKeyword));
    assert!(token_is_keyword(SyntaxKind::UndefinedKeyword));
    assert!(!token_is_keyword(SyntaxKind::Identifier));
    assert!(!token_is_keyword(SyntaxKind::OpenBraceToken));
}

#[test]
fn test_token_is_identifier_or_keyword() {
    assert!(token_is_identifier_or_keyword(SyntaxKind::Identifier));
    assert!(token_is_identifier_or_keyword(SyntaxKind::ReadonlyKeyword));
    assert!(!token_is_identifier_or_keyword(SyntaxKind::PrivateIdentifier));
    assert!(!token_is_identifier_or_keyword(SyntaxKind::AtToken));
}

#[test]
fn test_token_is_literal() {
    assert!(token_is_literal(SyntaxKind::StringLiteral));
    assert!(token_is_literal(SyntaxKind::NoSubstitutionTemplateLiteral));
    assert!(!token_is_literal(SyntaxKind::TrueKeyword));
}

#[test]
fn test_token_is_trivia() {
    assert!(token_is_trivia(SyntaxKind::WhitespaceTrivia));
    assert!(token_is_trivia(SyntaxKind::MultiLineCommentTrivia));
    assert!(!token_is_trivia(SyntaxKind::EndOfFileToken));
}

#[test]
fn test_keyword_round_trip() {
    assert_eq!(text_to_keyword("class"), Some(SyntaxKind::ClassKeyword));
    assert_eq!(text_to_keyword("undefined"), Some(SyntaxKind::UndefinedKeyword));
    assert_eq!(text_to_keyword("ApiProperty"), None);
    assert_eq!(keyword_to_text(SyntaxKind::InstanceOfKeyword), Some("instanceof"));
    assert_eq!(keyword_to_text(SyntaxKind::Identifier), None);
}

#[test]
fn test_keyword_table_is_sorted() {
    // text_to_keyword relies on binary search
    let mut kinds = Vec::new();
    for kind in [
        SyntaxKind::AbstractKeyword,
        SyntaxKind::AwaitKeyword,
        SyntaxKind::ConstructorKeyword,
        SyntaxKind::DeclareKeyword,
        SyntaxKind::ImportKeyword,
        SyntaxKind::ReadonlyKeyword,
        SyntaxKind::YieldKeyword,
    ] {
        let text = keyword_to_text(kind).expect("keyword text");
        kinds.push(text_to_keyword(text));
    }
    assert!(kinds.iter().all(Option::is_some));
}

#[test]
fn test_punctuation_to_text() {
    assert_eq!(punctuation_to_text(SyntaxKind::QuestionDotToken), Some("?."));
    assert_eq!(punctuation_to_text(SyntaxKind::AtToken), Some("@"));
    assert_eq!(punctuation_to_text(SyntaxKind::Identifier), None);
}
