use super::inspect::*;
use nestlint_parser::{PropertyDeclaration, SourceFile, parse_source_file};

fn parse(source: &str) -> SourceFile {
    parse_source_file("test.ts", source)
}

fn first_property(file: &SourceFile) -> &PropertyDeclaration {
    file.properties().next().expect("a property")
}

#[test]
fn test_decorators_named_ordered() {
    let file = parse("class C { @IsString() @Field() @ApiProperty() x: string; }");
    let property = first_property(&file);

    let [api, missing, field] =
        decorators_named_ordered(property, ["ApiProperty", "IsOptional", "Field"]);
    assert_eq!(api.and_then(|d| d.name()).map(|n| n.text.as_str()), Some("ApiProperty"));
    assert!(missing.is_none());
    assert_eq!(field.and_then(|d| d.name()).map(|n| n.text.as_str()), Some("Field"));
}

#[test]
fn test_decorators_named_ordered_first_occurrence_wins() {
    let source = "class C { @Field({ a: 1 }) @Field() x: string; }";
    let file = parse(source);
    let [field] = decorators_named_ordered(first_property(&file), ["Field"]);
    assert_eq!(field.map(|d| d.range.pos), Some(source.find("@Field").unwrap() as u32));
}

#[test]
fn test_decorators_matched_by_bare_name_only() {
    let file = parse("class C { @graphql.Field() @Field x: string; }");
    let [field] = decorators_named_ordered(first_property(&file), ["Field"]);
    let field = field.expect("bare @Field");
    assert!(field.call().is_none());
}

#[test]
fn test_is_optional_property() {
    let cases = [
        ("class C { x?: string; }", true),
        ("class C { x: string | undefined; }", true),
        ("class C { x: null | string; }", true),
        ("class C { x: (string | (undefined)); }", true),
        ("class C { x: string; }", false),
        ("class C { x!: string; }", false),
        ("class C { x: Array<string | undefined>; }", false),
        ("class C { x: () => string | undefined; }", false),
        ("class C { x = 1; }", false),
    ];
    for (source, expected) in cases {
        let file = parse(source);
        assert_eq!(
            is_optional_property(first_property(&file)),
            expected,
            "{source}"
        );
    }
}

#[test]
fn test_property_value_equals() {
    let file = parse("class C { @Field({ nullable: true, required: (false), name: 'x' }) x: string; }");
    let property = first_property(&file);
    let call = property.decorators[0].call().expect("call");
    let object = first_argument_object(call).expect("object argument");

    assert!(property_value_equals(object, "nullable", true));
    assert!(!property_value_equals(object, "nullable", false));
    assert!(property_value_equals(object, "required", false));
    assert!(!property_value_equals(object, "name", true));
    assert!(!property_value_equals(object, "missing", true));
}

#[test]
fn test_entry_not_true() {
    let file = parse("class C { @Field(() => String, { nullable: false }) @Field({ nullable: true }) x: string; }");
    let property = first_property(&file);

    let first = property.decorators[0].call().expect("call");
    assert!(first_argument_object(first).is_none());
    let (index, object) = object_arguments(first).next().expect("options");
    assert_eq!(index, 1);
    assert!(entry_not_true(object, "nullable").is_some());

    let second = property.decorators[1].call().expect("call");
    let (_, object) = object_arguments(second).next().expect("options");
    assert!(entry_not_true(object, "nullable").is_none());
}

#[test]
fn test_is_validation_decorator() {
    let file = parse("class C { @IsString() @IsOptional() @IsInt @Expose() @Length(1, 2) x: string; }");
    let flags: Vec<bool> = first_property(&file)
        .decorators
        .iter()
        .map(is_validation_decorator)
        .collect();
    assert_eq!(flags, vec![true, false, false, false, true]);
}
