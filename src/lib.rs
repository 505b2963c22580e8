//! nestlint: checks that NestJS DTO decorators agree with TypeScript
//! property optionality and fixes them when they do not.
//!
//! The work is split across the workspace crates, re-exported here:
//!
//! - [`common`]: text ranges, line maps and diagnostics
//! - [`scanner`]: TypeScript tokenizer
//! - [`parser`]: tolerant class/decorator parser
//! - [`rules`]: the optionality rule, fix assembly, configuration and the
//!   lint/fix host

pub use nestlint_common as common;
pub use nestlint_parser as parser;
pub use nestlint_rules as rules;
pub use nestlint_scanner as scanner;

pub use nestlint_common::{Diagnostic, DiagnosticCategory};
pub use nestlint_rules::{
    DEFAULT_MAX_PASSES, FixResult, LintConfig, LintResult, Linter, Preset, RuleSet, Severity,
};

pub mod tracing_config;

/// Lint `text` with the recommended rule set.
pub fn lint_source(file_name: &str, text: &str) -> LintResult {
    Linter::new(RuleSet::recommended()).lint_source(file_name, text)
}

/// Fix `text` with the recommended rule set.
pub fn fix_source(file_name: &str, text: &str) -> FixResult {
    Linter::new(RuleSet::recommended()).fix_source(file_name, text, DEFAULT_MAX_PASSES)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod lib_tests;
