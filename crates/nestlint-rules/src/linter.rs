//! Lint host: walks property declarations, collects findings as
//! diagnostics and drives the fix-apply-reparse loop.

use crate::config::RuleSet;
use crate::fixer::{TextEdit, apply_edits, conflicts_with_any};
use crate::rule::{Finding, LintContext, Severity};
use nestlint_common::diagnostics::format_message;
use nestlint_common::{Diagnostic, DiagnosticCategory, TextRange};
use nestlint_parser::{SourceFile, parse_source_file};
use serde::Serialize;
use tracing::{debug, instrument, trace};

/// Upper bound on fix passes per file unless configured otherwise.
pub const DEFAULT_MAX_PASSES: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintResult {
    pub file: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }

    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.fixable).count()
    }
}

#[derive(Debug, Clone)]
pub struct FixResult {
    /// Text after the last pass.
    pub output: String,
    /// Passes that changed the text.
    pub passes: usize,
    /// Findings whose fix was applied, over all passes.
    pub applied_fixes: usize,
    /// Diagnostics still reported for `output`.
    pub diagnostics: Vec<Diagnostic>,
}

impl FixResult {
    pub fn changed(&self) -> bool {
        self.passes > 0
    }
}

/// A finding of one rule, with the rule's name and configured severity.
struct Report<'a> {
    rule: &'static str,
    severity: Severity,
    finding: Finding<'a>,
}

pub struct Linter {
    rules: RuleSet,
}

impl Linter {
    pub fn new(rules: RuleSet) -> Self {
        Linter { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[instrument(level = "debug", skip(self, text), fields(len = text.len()))]
    pub fn lint_source(&self, file_name: &str, text: &str) -> LintResult {
        let file = parse_source_file(file_name, text);
        LintResult {
            file: file_name.to_string(),
            diagnostics: self.lint_file(&file),
        }
    }

    /// Diagnostics for an already parsed file, ordered by position.
    pub fn lint_file(&self, file: &SourceFile) -> Vec<Diagnostic> {
        let mut diagnostics: Vec<Diagnostic> = self
            .check(file)
            .iter()
            .filter_map(|report| to_diagnostic(file, report))
            .collect();
        diagnostics.sort_by_key(|diagnostic| diagnostic.start);
        diagnostics
    }

    /// Apply fixes until nothing changes or `max_passes` is reached.
    ///
    /// Each pass re-parses the current text, assembles every available fix
    /// and applies those not conflicting with a fix accepted earlier in the
    /// same pass. Deferred fixes are re-evaluated on the next pass.
    #[instrument(level = "debug", skip(self, text), fields(len = text.len()))]
    pub fn fix_source(&self, file_name: &str, text: &str, max_passes: usize) -> FixResult {
        let mut output = text.to_string();
        let mut passes = 0;
        let mut applied_fixes = 0;

        for pass in 0..max_passes {
            let file = parse_source_file(file_name, &output);
            let reports = self.check(&file);

            let mut accepted: Vec<TextEdit> = Vec::new();
            let mut fixes = 0;
            for report in &reports {
                let Some(plan) = &report.finding.fix else {
                    continue;
                };
                let Some(edits) = plan.assemble(&file) else {
                    continue;
                };
                if conflicts_with_any(&edits, &accepted) {
                    trace!(
                        pass,
                        message_id = report.finding.message_id.as_str(),
                        "fix deferred to next pass"
                    );
                    continue;
                }
                accepted.extend(edits);
                fixes += 1;
            }
            if accepted.is_empty() {
                break;
            }

            let next = apply_edits(&file.text, &accepted);
            if next == output {
                break;
            }
            debug!(pass, fixes, edits = accepted.len(), "applied fixes");
            output = next;
            passes += 1;
            applied_fixes += fixes;
        }

        let diagnostics = self.lint_source(file_name, &output).diagnostics;
        FixResult {
            output,
            passes,
            applied_fixes,
            diagnostics,
        }
    }

    fn check<'a>(&self, file: &'a SourceFile) -> Vec<Report<'a>> {
        let ctx = LintContext { file };
        let mut reports = Vec::new();
        for property in file.properties() {
            for (rule, severity) in self.rules.iter() {
                let rule_name = rule.meta().name;
                reports.extend(
                    rule.check_property(property, &ctx)
                        .into_iter()
                        .map(|finding| Report {
                            rule: rule_name,
                            severity,
                            finding,
                        }),
                );
            }
        }
        reports
    }
}

fn to_diagnostic(file: &SourceFile, report: &Report<'_>) -> Option<Diagnostic> {
    let category: DiagnosticCategory = report.severity.category()?;
    let finding = &report.finding;
    let TextRange { pos, end } = finding.anchor;
    Some(Diagnostic {
        category,
        rule: report.rule,
        message_id: finding.message_id.as_str(),
        file: file.file_name.clone(),
        start: pos,
        length: end - pos,
        range: file.line_map.range_of(pos, end, &file.text),
        message_text: format_message(finding.message_id.message(), &finding.message_args),
        fixable: finding
            .fix
            .as_ref()
            .is_some_and(|plan| plan.assemble(file).is_some()),
    })
}
