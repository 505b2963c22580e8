//! Decorator optionality rules for NestJS DTO classes.
//!
//! This crate provides:
//! - `rule` - The `LintRule` trait, findings and message ids
//! - `rules` - The rule registry (`api-property-matches-property-optionality`)
//! - `inspect` - Read-only queries over properties and decorators
//! - `patch` / `edits` / `fixer` - Fix plans, fix builders and text edits
//! - `config` - Presets, rule entries and per-file overrides
//! - `linter` - Lint host and fix-apply-reparse loop

pub mod edits;
pub mod fixer;
pub mod inspect;
pub mod patch;
pub mod vocabulary;

pub mod rule;
pub use rule::{Finding, LintContext, LintRule, MessageId, RuleMeta, Severity};

pub mod rules;
pub use rules::optionality::{OptionalityOptions, OptionalityRule};

pub mod config;
pub use config::{ConfigError, LintConfig, Preset, RuleSet};

pub mod linter;
pub use linter::{DEFAULT_MAX_PASSES, FixResult, LintResult, Linter};

#[cfg(test)]
#[path = "tests/fixer_tests.rs"]
mod fixer_tests;
#[cfg(test)]
#[path = "tests/inspect_tests.rs"]
mod inspect_tests;
#[cfg(test)]
#[path = "tests/edits_tests.rs"]
mod edits_tests;
#[cfg(test)]
#[path = "tests/optionality_tests.rs"]
mod optionality_tests;
