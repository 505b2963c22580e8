use std::path::PathBuf;

use crate::driver::{FileReport, RunSummary};
use crate::reporter::Reporter;
use nestlint_common::Diagnostic;
use nestlint_rules::{Linter, RuleSet};

const SOURCE: &str = "class C {\n  @Field()\n  x?: string;\n}";

fn lint(name: &str, source: &str) -> Vec<Diagnostic> {
    Linter::new(RuleSet::recommended())
        .lint_source(name, source)
        .diagnostics
}

fn summary_of(diagnostics: Vec<Diagnostic>, applied_fixes: usize) -> RunSummary {
    RunSummary {
        reports: vec![FileReport {
            path: PathBuf::from("dto.ts"),
            source: SOURCE.to_string(),
            diagnostics,
            passes: 0,
            applied_fixes,
        }],
        failures: Vec::new(),
    }
}

#[test]
fn renders_location_rule_and_snippet() {
    let diagnostics = lint("dto.ts", SOURCE);
    let mut reporter = Reporter::new(false);
    reporter.add_source("dto.ts", SOURCE);

    let output = reporter.render(&diagnostics);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3, "{output}");
    assert!(
        lines[0].starts_with(
            "dto.ts:2:3 - error api-property-matches-property-optionality(shouldSetFieldAsNullable): "
        ),
        "{output}"
    );
    assert_eq!(lines[1], "    2     @Field()");
    assert_eq!(lines[2], "          ~~~~~~~~");
}

#[test]
fn renders_without_snippet_when_source_is_unknown() {
    let diagnostics = lint("dto.ts", SOURCE);
    let reporter = Reporter::new(false);
    let output = reporter.render(&diagnostics);
    assert_eq!(output.lines().count(), 1);
}

#[test]
fn separates_diagnostics_with_a_blank_line() {
    let source = "class C {\n  @Field()\n  a?: string;\n  @Field()\n  b?: string;\n}";
    let diagnostics = lint("dto.ts", source);
    assert_eq!(diagnostics.len(), 2);
    let mut reporter = Reporter::new(false);
    reporter.add_source("dto.ts", source);

    let output = reporter.render(&diagnostics);
    assert!(output.contains("~~~~~~~~\n\ndto.ts:4:3"), "{output}");
}

#[test]
fn warnings_are_labelled() {
    let source = "class C { @Field() x?: string; }";
    let config = nestlint_rules::LintConfig::from_json(
        r#"{ "rules": { "api-property-matches-property-optionality": "warn" } }"#,
    )
    .expect("config");
    let rules = config
        .resolve(std::path::Path::new("dto.ts"))
        .expect("resolve");
    let diagnostics = Linter::new(rules).lint_source("dto.ts", source).diagnostics;
    let output = Reporter::new(false).render(&diagnostics);
    assert!(output.starts_with("dto.ts:1:11 - warning "), "{output}");
}

#[test]
fn summary_lines() {
    let reporter = Reporter::new(false);

    assert_eq!(
        reporter.summary(&summary_of(Vec::new(), 0), 1),
        "No problems found in 1 file."
    );
    assert_eq!(
        reporter.summary(&summary_of(lint("dto.ts", SOURCE), 0), 3),
        "Found 1 problem (1 error, 0 warnings) in 3 files. 1 problem potentially fixable with --fix."
    );
    assert_eq!(
        reporter.summary(&summary_of(Vec::new(), 2), 2),
        "No problems found in 2 files. Applied 2 fixes."
    );
}

#[test]
fn summary_counts_failed_files() {
    let reporter = Reporter::new(false);
    let summary = RunSummary {
        reports: Vec::new(),
        failures: vec![(
            PathBuf::from("src/bad.ts"),
            anyhow::anyhow!("stream did not contain valid UTF-8"),
        )],
    };
    assert_eq!(
        reporter.summary(&summary, 1),
        "No problems found in 1 file. 1 file failed."
    );

    let mut summary = summary_of(lint("dto.ts", SOURCE), 0);
    summary
        .failures
        .push((PathBuf::from("a.ts"), anyhow::anyhow!("denied")));
    summary
        .failures
        .push((PathBuf::from("b.ts"), anyhow::anyhow!("denied")));
    assert!(
        reporter
            .summary(&summary, 3)
            .ends_with("potentially fixable with --fix. 2 files failed."),
        "{}",
        reporter.summary(&summary, 3)
    );
}

#[test]
fn failure_line() {
    let reporter = Reporter::new(false);
    let err = anyhow::anyhow!("permission denied").context("failed to read a.ts");
    assert_eq!(
        reporter.failure(std::path::Path::new("a.ts"), &err),
        "a.ts - error: failed to read a.ts: permission denied"
    );
}
