//! Fix convergence tests for `api-property-matches-property-optionality`.

use nestlint_rules::{
    DEFAULT_MAX_PASSES, FixResult, Linter, OptionalityOptions, OptionalityRule, RuleSet, Severity,
};

fn linter() -> Linter {
    Linter::new(RuleSet::recommended())
}

fn fix(source: &str) -> FixResult {
    linter().fix_source("test.ts", source, DEFAULT_MAX_PASSES)
}

fn message_ids(source: &str) -> Vec<&'static str> {
    linter()
        .lint_source("test.ts", source)
        .diagnostics
        .iter()
        .map(|d| d.message_id)
        .collect()
}

/// Fix `source`, check the output and that the output is clean.
fn assert_fixes_to(source: &str, expected: &str) {
    let result = fix(source);
    assert_eq!(result.output, expected);
    assert!(
        result.diagnostics.is_empty(),
        "remaining diagnostics: {:?}",
        result.diagnostics
    );
    // Idempotent
    let again = fix(&result.output);
    assert_eq!(again.output, expected);
    assert_eq!(again.passes, 0);
}

#[test]
fn test_required_property_drops_optional_decorator() {
    let source = "class C { @Expose() @ApiPropertyOptional() x: string; }";
    assert_eq!(message_ids(source), vec!["shouldUseRequiredDecorator"]);
    assert_fixes_to(source, "class C { @Expose() @ApiProperty() x: string; }");
}

#[test]
fn test_optional_property_gets_optional_decorator() {
    let source = "class C { @Expose() @ApiProperty() x?: string; }";
    assert_eq!(message_ids(source), vec!["shouldUseOptionalDecorator"]);
    assert_fixes_to(source, "class C { @Expose() @ApiPropertyOptional() x?: string; }");
}

#[test]
fn test_optional_field_becomes_nullable_and_gains_is_optional() {
    let source = "class C { @Field() @IsString() x?: string; }";
    assert_eq!(
        message_ids(source),
        vec!["shouldSetFieldAsNullable", "shouldAddIsOptional"]
    );
    assert_fixes_to(
        source,
        "class C { @Field({ nullable: true }) @IsString() @IsOptional() x?: string; }",
    );
}

#[test]
fn test_crlf_line_endings_are_kept() {
    assert_fixes_to(
        "class C {\r\n  @IsString()\r\n  x?: string;\r\n}\r\n",
        "class C {\r\n  @IsString()\r\n  @IsOptional()\r\n  x?: string;\r\n}\r\n",
    );
}

#[test]
fn test_required_field_loses_nullable_and_is_optional() {
    let source = "class C { @Field({ nullable: true }) @IsOptional() x: string; }";
    assert_eq!(
        message_ids(source),
        vec!["shouldRemoveNullableFromField", "shouldUseRequiredDecorator"]
    );
    assert_fixes_to(source, "class C { @Field() x: string; }");
}

#[test]
fn test_field_options_are_merged() {
    let source = "class C { @Field({ name: 'a' }) x?: string; }";
    assert_eq!(message_ids(source), vec!["shouldSetFieldAsNullable"]);
    assert_fixes_to(source, "class C { @Field({ name: 'a', nullable: true }) x?: string; }");
}

#[test]
fn test_is_optional_removed_from_required_property() {
    let source = "class C { @IsOptional() x: string; }";
    assert_eq!(message_ids(source), vec!["shouldUseRequiredDecorator"]);
    assert_fixes_to(source, "class C { x: string; }");
}

#[test]
fn test_multiline_dto() {
    let source = r#"import { Field, ObjectType } from '@nestjs/graphql';
import { ApiProperty, ApiPropertyOptional } from '@nestjs/swagger';
import { IsString, MaxLength } from 'class-validator';

@ObjectType()
export class UserDto {
    @Field(() => String)
    @ApiProperty()
    @IsString()
    nickname?: string;

    @Field({ nullable: true, description: 'Login' })
    @ApiPropertyOptional({ example: 'jo' })
    @IsOptional()
    @MaxLength(20)
    login: string;

    @Field(() => Int, { nullable: false })
    age: number | null;
}
"#;
    let expected = r#"import { Field, ObjectType } from '@nestjs/graphql';
import { ApiProperty, ApiPropertyOptional } from '@nestjs/swagger';
import { IsString, MaxLength, IsOptional } from 'class-validator';

@ObjectType()
export class UserDto {
    @Field(() => String, { nullable: true })
    @ApiPropertyOptional()
    @IsString()
    @IsOptional()
    nickname?: string;

    @Field({ description: 'Login' })
    @ApiProperty({ example: 'jo' })
    @MaxLength(20)
    login: string;

    @Field(() => Int, { nullable: true })
    age: number | null;
}
"#;
    let result = fix(source);
    assert_eq!(result.output, expected);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.passes, 1);
    assert_eq!(result.applied_fixes, 6);
}

#[test]
fn test_import_added_once_for_two_properties() {
    let source = "import { IsString } from 'class-validator';\n\nclass C {\n  @IsString()\n  a?: string;\n\n  @IsString()\n  b?: string;\n}\n";
    let result = fix(source);
    assert_eq!(
        result.output,
        "import { IsString, IsOptional } from 'class-validator';\n\nclass C {\n  @IsString()\n  @IsOptional()\n  a?: string;\n\n  @IsString()\n  @IsOptional()\n  b?: string;\n}\n"
    );
    // The second import insertion conflicts with the first and waits a pass
    assert_eq!(result.passes, 2);
    assert_eq!(result.applied_fixes, 2);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_import_not_duplicated() {
    let source = "import { IsOptional, IsString } from 'class-validator';\nclass C { @IsString() a?: string; }\n";
    assert_fixes_to(
        source,
        "import { IsOptional, IsString } from 'class-validator';\nclass C { @IsString() @IsOptional() a?: string; }\n",
    );
}

#[test]
fn test_required_false_is_stripped_then_renamed() {
    assert_fixes_to(
        "class C { @ApiProperty({ required: false, type: String }) x?: string; }",
        "class C { @ApiPropertyOptional({ type: String }) x?: string; }",
    );
    assert_fixes_to(
        "class C { @ApiProperty({ required: false }) x: string; }",
        "class C { @ApiProperty() x: string; }",
    );
    // Rename first, then the renamed decorator's `required: false` goes
    assert_fixes_to(
        "class C { @ApiPropertyOptional({ required: false }) x: string; }",
        "class C { @ApiProperty() x: string; }",
    );
}

#[test]
fn test_unfixable_field_is_reported_after_fixing() {
    let source = "class C { @Field(() => String, options) x?: string; }";
    let result = fix(source);
    assert_eq!(result.output, source);
    assert_eq!(result.passes, 0);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].message_id, "shouldSetFieldAsNullable");
    assert!(!result.diagnostics[0].fixable);
}

#[test]
fn test_generic_type_thunk_gets_nullable() {
    assert_fixes_to(
        "class C { @Field(() => Map<string, Array<number>>) x?: any; }",
        "class C { @Field(() => Map<string, Array<number>>, { nullable: true }) x?: any; }",
    );
}

#[test]
fn test_commented_field_options_are_not_fixable() {
    let source = "class C {\n  @Field({\n    name: 'a', // c\n  })\n  x?: string;\n}";
    let lint = linter().lint_source("c.ts", source);
    let ids: Vec<(&str, bool)> = lint
        .diagnostics
        .iter()
        .map(|d| (d.message_id, d.fixable))
        .collect();
    assert_eq!(ids, vec![("shouldSetFieldAsNullable", false)]);
    assert_eq!(lint.fixable_count(), 0);

    let result = fix(source);
    assert_eq!(result.output, source);
    assert_eq!(result.passes, 0);
    assert!(!result.diagnostics[0].fixable);
}

#[test]
fn test_conflicting_decorators_are_left_alone() {
    let source = "class C { @ApiProperty() @ApiPropertyOptional() @IsOptional() x: string; }";
    let result = fix(source);
    assert_eq!(
        result.output,
        "class C { @ApiProperty() @ApiPropertyOptional() x: string; }"
    );
    let ids: Vec<&str> = result.diagnostics.iter().map(|d| d.message_id).collect();
    assert_eq!(ids, vec!["conflictingApiPropertyDecorators"]);
    assert_eq!(
        result.diagnostics[0].message_text,
        "Property should not use both @ApiProperty and @ApiPropertyOptional"
    );
}

#[test]
fn test_disable_field_leaves_field_untouched() {
    let rules = RuleSet::new().with_rule(
        OptionalityRule::new(OptionalityOptions {
            disable_field: true,
        }),
        Severity::Warn,
    );
    let linter = Linter::new(rules);
    let source = "class C { @Field() @IsString() x?: string; }";
    let result = linter.fix_source("test.ts", source, DEFAULT_MAX_PASSES);
    assert_eq!(
        result.output,
        "class C { @Field() @IsString() @IsOptional() x?: string; }"
    );
    assert!(result.diagnostics.is_empty());

    let lint = linter.lint_source("test.ts", source);
    assert_eq!(lint.warning_count(), 1);
    assert_eq!(lint.error_count(), 0);
}

#[test]
fn test_max_passes_bounds_the_loop() {
    let source = "import { IsString } from 'class-validator';\nclass C {\n  @IsString() a?: string;\n  @IsString() b?: string;\n}\n";
    let result = linter().fix_source("test.ts", source, 1);
    assert_eq!(result.passes, 1);
    assert_eq!(result.applied_fixes, 1);
    let ids: Vec<&str> = result.diagnostics.iter().map(|d| d.message_id).collect();
    assert_eq!(ids, vec!["shouldAddIsOptional"]);
}

#[test]
fn test_diagnostic_positions() {
    let source = "class C {\n  @Field()\n  x?: string;\n}";
    let result = linter().lint_source("dto.ts", source);
    assert_eq!(result.diagnostics.len(), 1);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.file, "dto.ts");
    assert_eq!(diagnostic.rule, "api-property-matches-property-optionality");
    assert_eq!(diagnostic.start, 12);
    assert_eq!(diagnostic.length, 8);
    assert_eq!(diagnostic.range.start.line, 1);
    assert_eq!(diagnostic.range.start.character, 2);
    assert!(diagnostic.is_error());
    assert!(diagnostic.fixable);
    assert_eq!(result.fixable_count(), 1);
}

#[test]
fn test_files_without_classes() {
    let result = fix("export const x = 1;\nfunction f(a?: string) { return a; }\n");
    assert_eq!(result.passes, 0);
    assert!(result.diagnostics.is_empty());
}
