use super::edits::*;
use super::fixer::{TextEdit, apply_edits};
use nestlint_parser::{Decorator, PropertyDeclaration, SourceFile, parse_source_file};

fn parse(source: &str) -> SourceFile {
    parse_source_file("test.ts", source)
}

fn property(file: &SourceFile) -> &PropertyDeclaration {
    file.properties().next().expect("a property")
}

fn decorator<'a>(file: &'a SourceFile, name: &str) -> &'a Decorator {
    property(file)
        .decorators
        .iter()
        .find(|d| d.name().is_some_and(|id| id.text == name))
        .expect("decorator")
}

fn apply(file: &SourceFile, edit: TextEdit) -> String {
    apply_edits(&file.text, &[edit])
}

#[test]
fn test_remove_decorator_followed_on_same_line() {
    let file = parse("class C { @IsOptional() x: string; }");
    let edit = remove_decorator(&file, decorator(&file, "IsOptional"));
    assert_eq!(apply(&file, edit), "class C { x: string; }");
}

#[test]
fn test_remove_decorator_alone_on_its_line() {
    let file = parse("class C {\n    @Field()\n    @IsOptional()\n    x: string;\n}\n");
    let edit = remove_decorator(&file, decorator(&file, "IsOptional"));
    assert_eq!(
        apply(&file, edit),
        "class C {\n    @Field()\n    x: string;\n}\n"
    );
}

#[test]
fn test_remove_decorator_alone_on_crlf_line() {
    let file = parse("class C {\r\n  @IsOptional()\r\n  x: string;\r\n}");
    let edit = remove_decorator(&file, decorator(&file, "IsOptional"));
    assert_eq!(apply(&file, edit), "class C {\r\n  x: string;\r\n}");
}

#[test]
fn test_remove_decorator_keeps_trailing_comment() {
    let file = parse("class C {\n  @IsOptional() // note\n  x: string;\n}");
    let edit = remove_decorator(&file, decorator(&file, "IsOptional"));
    assert_eq!(apply(&file, edit), "class C {\n  // note\n  x: string;\n}");

    let file = parse("class C {\r\n  @IsOptional()  /* a */\r\n  x: string;\r\n}");
    let edit = remove_decorator(&file, decorator(&file, "IsOptional"));
    assert_eq!(
        apply(&file, edit),
        "class C {\r\n  /* a */\r\n  x: string;\r\n}"
    );
}

#[test]
fn test_remove_decorator_ending_a_line() {
    let file = parse("class C { @Field() @IsOptional()\n    x: string; }");
    let edit = remove_decorator(&file, decorator(&file, "IsOptional"));
    assert_eq!(apply(&file, edit), "class C { @Field()\n    x: string; }");
}

#[test]
fn test_rename_decorator_keeps_arguments() {
    let file = parse("class C { @ApiPropertyOptional({ type: String }) x: string; }");
    let edit = rename_decorator(decorator(&file, "ApiPropertyOptional"), "ApiProperty")
        .expect("rename");
    assert_eq!(
        apply(&file, edit),
        "class C { @ApiProperty({ type: String }) x: string; }"
    );
}

#[test]
fn test_strip_sole_key_removes_argument() {
    let file = parse("class C { @ApiProperty({ required: false }) x?: string; }");
    let call = decorator(&file, "ApiProperty").call().expect("call");
    let edit = strip_object_key(&file, call, 0, "required").expect("edit");
    assert_eq!(apply(&file, edit), "class C { @ApiProperty() x?: string; }");
}

#[test]
fn test_strip_sole_key_of_parenthesized_argument() {
    let file = parse("class C { @ApiProperty(({ required: false })) x?: string; }");
    let call = decorator(&file, "ApiProperty").call().expect("call");
    let edit = strip_object_key(&file, call, 0, "required").expect("edit");
    assert_eq!(apply(&file, edit), "class C { @ApiProperty() x?: string; }");
}

#[test]
fn test_strip_sole_key_of_second_argument_removes_comma() {
    let file = parse("class C { @Field(() => String, { nullable: true }) x: string; }");
    let call = decorator(&file, "Field").call().expect("call");
    let edit = strip_object_key(&file, call, 1, "nullable").expect("edit");
    assert_eq!(apply(&file, edit), "class C { @Field(() => String) x: string; }");
}

#[test]
fn test_strip_sole_key_of_first_argument_before_another() {
    let file = parse("class C { @Field({ nullable: true }, extra) x: string; }");
    let call = decorator(&file, "Field").call().expect("call");
    let edit = strip_object_key(&file, call, 0, "nullable").expect("edit");
    assert_eq!(apply(&file, edit), "class C { @Field(extra) x: string; }");
}

#[test]
fn test_strip_first_of_several_keys() {
    let file = parse("class C { @ApiProperty({ required: false, type: String }) x?: string; }");
    let call = decorator(&file, "ApiProperty").call().expect("call");
    let edit = strip_object_key(&file, call, 0, "required").expect("edit");
    assert_eq!(
        apply(&file, edit),
        "class C { @ApiProperty({ type: String }) x?: string; }"
    );
}

#[test]
fn test_strip_later_key_takes_preceding_comma() {
    let file = parse("class C { @Field({ name: 'a', nullable: true, description: 'd' }) x: string; }");
    let call = decorator(&file, "Field").call().expect("call");
    let edit = strip_object_key(&file, call, 0, "nullable").expect("edit");
    assert_eq!(
        apply(&file, edit),
        "class C { @Field({ name: 'a', description: 'd' }) x: string; }"
    );
}

#[test]
fn test_strip_missing_key_is_none() {
    let file = parse("class C { @Field({ name: 'a' }) x: string; }");
    let call = decorator(&file, "Field").call().expect("call");
    assert!(strip_object_key(&file, call, 0, "nullable").is_none());
    assert!(strip_object_key(&file, call, 3, "nullable").is_none());
}

#[test]
fn test_append_argument() {
    let cases = [
        ("class C { @Field() x?: string; }", "class C { @Field({ nullable: true }) x?: string; }"),
        (
            "class C { @Field(() => String) x?: string; }",
            "class C { @Field(() => String, { nullable: true }) x?: string; }",
        ),
        (
            "class C { @Field(() => String,) x?: string; }",
            "class C { @Field(() => String, { nullable: true },) x?: string; }",
        ),
    ];
    for (source, expected) in cases {
        let file = parse(source);
        let call = decorator(&file, "Field").call().expect("call");
        let edit = append_argument(&file, call, "{ nullable: true }").expect("edit");
        assert_eq!(apply(&file, edit), expected);
    }
}

#[test]
fn test_append_call_arguments_to_bare_decorator() {
    let file = parse("class C { @Field x?: string; }");
    let edit = append_call_arguments(decorator(&file, "Field"), "({ nullable: true })");
    assert_eq!(
        apply(&file, edit),
        "class C { @Field({ nullable: true }) x?: string; }"
    );
}

#[test]
fn test_merge_into_object_argument() {
    let file = parse("class C { @Field(() => Int, {\n    name: 'a',\n    description: 'b  c',\n  }) x?: number; }");
    let call = decorator(&file, "Field").call().expect("call");
    let edit = merge_into_object_argument(&file, call, 1, "nullable: true").expect("edit");
    assert_eq!(
        apply(&file, edit),
        "class C { @Field(() => Int, { name: 'a', description: 'b  c', nullable: true }) x?: number; }"
    );
}

#[test]
fn test_merge_into_empty_object() {
    let file = parse("class C { @Field({}) x?: string; }");
    let call = decorator(&file, "Field").call().expect("call");
    let edit = merge_into_object_argument(&file, call, 0, "nullable: true").expect("edit");
    assert_eq!(
        apply(&file, edit),
        "class C { @Field({ nullable: true }) x?: string; }"
    );
}

#[test]
fn test_merge_refuses_objects_with_comments() {
    let file = parse("class C { @Field({ name: 'a' /* keep */ }) x?: string; }");
    let call = decorator(&file, "Field").call().expect("call");
    assert!(merge_into_object_argument(&file, call, 0, "nullable: true").is_none());
}

#[test]
fn test_append_import() {
    let cases = [
        (
            "import { IsString } from 'class-validator';\n",
            "import { IsString, IsOptional } from 'class-validator';\n",
        ),
        (
            "import {\n  IsString,\n} from 'class-validator';\n",
            "import {\n  IsString, IsOptional,\n} from 'class-validator';\n",
        ),
        (
            "import {} from 'class-validator';\n",
            "import { IsOptional } from 'class-validator';\n",
        ),
    ];
    for (source, expected) in cases {
        let file = parse(source);
        let edit = append_import(&file, &file.imports[0], "IsOptional").expect("edit");
        assert_eq!(apply(&file, edit), expected);
    }
}

#[test]
fn test_append_import_without_named_imports() {
    let file = parse("import * as validator from 'class-validator';\n");
    assert!(append_import(&file, &file.imports[0], "IsOptional").is_none());
}

#[test]
fn test_append_decorator_on_own_line() {
    let file = parse("class C {\n    @IsString()\n    public readonly x?: string;\n}");
    let edit = append_decorator(&file, property(&file), "@IsOptional()");
    assert_eq!(
        apply(&file, edit),
        "class C {\n    @IsString()\n    @IsOptional()\n    public readonly x?: string;\n}"
    );
}

#[test]
fn test_append_decorator_keeps_crlf() {
    let file = parse("class C {\r\n  @IsString()\r\n  x?: string;\r\n}");
    let edit = append_decorator(&file, property(&file), "@IsOptional()");
    assert_eq!(
        apply(&file, edit),
        "class C {\r\n  @IsString()\r\n  @IsOptional()\r\n  x?: string;\r\n}"
    );
}

#[test]
fn test_append_decorator_inline() {
    let file = parse("class C { @IsString() x?: string; }");
    let edit = append_decorator(&file, property(&file), "@IsOptional()");
    assert_eq!(
        apply(&file, edit),
        "class C { @IsString() @IsOptional() x?: string; }"
    );
}

#[test]
fn test_object_inner_text() {
    let file = parse("class C { @Field({ name:   'a  b',\n  nullable: false, }) x?: string; }");
    let call = decorator(&file, "Field").call().expect("call");
    let object = call.arguments[0].as_object().expect("object");
    assert_eq!(
        object_inner_text(&file, object).as_deref(),
        Some("name: 'a  b', nullable: false")
    );
}
