//! Rule registry.

pub mod optionality;

use crate::rule::LintRule;
use optionality::OptionalityRule;

/// Names of every rule this crate provides.
pub const RULE_NAMES: &[&str] = &[optionality::RULE_NAME];

/// Instantiate a rule by name with its JSON options.
///
/// Returns `None` for an unknown rule name.
pub fn create_rule(
    name: &str,
    options: Option<&serde_json::Value>,
) -> Option<Result<Box<dyn LintRule>, serde_json::Error>> {
    match name {
        optionality::RULE_NAME => Some(
            OptionalityRule::from_options(options).map(|rule| Box::new(rule) as Box<dyn LintRule>),
        ),
        _ => None,
    }
}
