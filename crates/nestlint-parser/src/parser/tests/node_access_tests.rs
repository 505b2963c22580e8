use super::*;
use nestlint_scanner::SyntaxKind;

const SOURCE: &str = "class C {\n    @IsString()\n    x: string;\n}\n";

#[test]
fn test_token_before_and_after() {
    let file = parse_source_file("test.ts", SOURCE);
    let decorator_end = SOURCE.find("()").unwrap() as u32 + 2;

    let before = file.token_before(decorator_end).expect("token before");
    assert_eq!(before.kind, SyntaxKind::CloseParenToken);

    let after = file.token_after(decorator_end).expect("token after");
    assert_eq!(file.token_text(after), "x");
    assert!(after.preceding_line_break);

    // Offset inside `IsString`
    let inside = SOURCE.find("String").unwrap() as u32;
    let at = file.token_at_or_after(inside).expect("token at");
    assert_eq!(file.token_text(at), "IsString");
    assert_eq!(file.token_text(file.token_after(inside).expect("after")), "(");
}

#[test]
fn test_token_before_start_of_file() {
    let file = parse_source_file("test.ts", SOURCE);
    assert!(file.token_before(0).is_none());
}

#[test]
fn test_token_after_end_is_eof() {
    let file = parse_source_file("test.ts", "x");
    let eof = file.token_after(1).expect("eof");
    assert_eq!(eof.kind, SyntaxKind::EndOfFileToken);
}

#[test]
fn test_line_queries() {
    let file = parse_source_file("test.ts", SOURCE);
    let x = SOURCE.find("x:").unwrap() as u32;

    assert_eq!(file.line_start(x), SOURCE.find("    x").unwrap() as u32);
    assert_eq!(file.line_indentation(x), "    ");
    assert!(file.starts_line(x));
    assert!(!file.starts_line(x + 1));
    assert!(file.same_line(x, x + 3));
    assert!(!file.same_line(0, x));
}

#[test]
fn test_line_indentation_with_tabs() {
    let source = "class C {\n\t\t@Field() y?: number;\n}";
    let file = parse_source_file("test.ts", source);
    let y = source.find("y?").unwrap() as u32;
    assert_eq!(file.line_indentation(y), "\t\t");
    assert!(!file.starts_line(y));
}
