//! Lint configuration: presets, rule entries and per-file overrides.
//!
//! The file format is `.nestlintrc.json`:
//!
//! ```json
//! {
//!   "extends": "recommended",
//!   "rules": {
//!     "api-property-matches-property-optionality": ["warn", { "disableField": true }]
//!   },
//!   "overrides": [
//!     { "files": ["**/legacy/**"], "extends": ["noSwagger"] }
//!   ]
//! }
//! ```
//!
//! Resolution order for a file: presets of `extends`, then `rules`, then
//! every matching override in order (its presets, then its rules).

use crate::rule::{LintRule, Severity};
use crate::rules::{RULE_NAMES, create_rule};
use globset::{Glob, GlobSet, GlobSetBuilder};
use rustc_hash::FxHashMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Configuration file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".nestlintrc.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
    #[error("invalid options for rule `{rule}`: {source}")]
    InvalidOptions {
        rule: String,
        source: serde_json::Error,
    },
    #[error("invalid file pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Level(u64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Name(name) => name.parse().map_err(D::Error::custom),
            Raw::Level(0) => Ok(Severity::Off),
            Raw::Level(1) => Ok(Severity::Warn),
            Raw::Level(2) => Ok(Severity::Error),
            Raw::Level(level) => Err(D::Error::custom(format!(
                "invalid severity level {level}, expected 0, 1 or 2"
            ))),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Severity::Off),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            other => Err(format!(
                "unknown severity `{other}`, expected off, warn or error"
            )),
        }
    }
}

/// Named rule bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    /// Every rule at its default severity.
    Recommended,
    /// For projects without Swagger documentation decorators.
    NoSwagger,
}

impl Preset {
    pub fn rules(self) -> Vec<(&'static str, Severity)> {
        RULE_NAMES
            .iter()
            .filter_map(|&name| {
                let severity = match self {
                    Preset::Recommended => create_rule(name, None)?.ok()?.meta().default_severity,
                    Preset::NoSwagger => Severity::Off,
                };
                Some((name, severity))
            })
            .collect()
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Recommended => "recommended",
            Preset::NoSwagger => "noSwagger",
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(Preset::Recommended),
            "noSwagger" => Ok(Preset::NoSwagger),
            other => Err(format!(
                "unknown preset `{other}`, expected recommended or noSwagger"
            )),
        }
    }
}

/// `"error"`, `2` or `["error", { ...options }]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RuleEntry {
    Severity(Severity),
    WithOptions(Severity, serde_json::Value),
}

impl RuleEntry {
    pub fn severity(&self) -> Severity {
        match self {
            RuleEntry::Severity(severity) | RuleEntry::WithOptions(severity, _) => *severity,
        }
    }

    pub fn options(&self) -> Option<&serde_json::Value> {
        match self {
            RuleEntry::Severity(_) => None,
            RuleEntry::WithOptions(_, options) => Some(options),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Override {
    #[serde(deserialize_with = "one_or_many")]
    pub files: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub extends: Vec<Preset>,
    pub rules: FxHashMap<String, RuleEntry>,
}

impl Override {
    fn matcher(&self) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.files {
            let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|source| ConfigError::InvalidPattern {
            pattern: self.files.join(", "),
            source,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LintConfig {
    #[serde(deserialize_with = "one_or_many")]
    pub extends: Vec<Preset>,
    pub rules: FxHashMap<String, RuleEntry>,
    pub overrides: Vec<Override>,
}

impl LintConfig {
    /// A configuration that only extends `preset`.
    pub fn from_preset(preset: Preset) -> Self {
        LintConfig {
            extends: vec![preset],
            ..LintConfig::default()
        }
    }

    /// Parse and validate a configuration file's contents.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: LintConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check rule names, rule options and override patterns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tables = std::iter::once(&self.rules).chain(self.overrides.iter().map(|o| &o.rules));
        for rules in tables {
            for (name, entry) in rules {
                instantiate(name, entry.options())?;
            }
        }
        for override_ in &self.overrides {
            override_.matcher()?;
        }
        Ok(())
    }

    /// The rules enabled for `path`, with their severities and options.
    pub fn resolve(&self, path: &Path) -> Result<RuleSet, ConfigError> {
        let mut entries: FxHashMap<String, RuleEntry> = FxHashMap::default();
        apply(&mut entries, &self.extends, &self.rules);
        for override_ in &self.overrides {
            if override_.matcher()?.is_match(path) {
                debug!(path = %path.display(), files = ?override_.files, "override applies");
                apply(&mut entries, &override_.extends, &override_.rules);
            }
        }

        let mut rules = RuleSet::default();
        for &name in RULE_NAMES {
            let Some(entry) = entries.get(name) else {
                continue;
            };
            let severity = entry.severity();
            if severity == Severity::Off {
                continue;
            }
            rules.push(instantiate(name, entry.options())?, severity);
        }
        Ok(rules)
    }
}

/// Layer presets then explicit rules. An explicit severity without options
/// keeps options set by an earlier layer.
fn apply(
    entries: &mut FxHashMap<String, RuleEntry>,
    presets: &[Preset],
    rules: &FxHashMap<String, RuleEntry>,
) {
    for preset in presets {
        for (name, severity) in preset.rules() {
            set_severity(entries, name, severity);
        }
    }
    for (name, entry) in rules {
        match entry {
            RuleEntry::Severity(severity) => set_severity(entries, name, *severity),
            RuleEntry::WithOptions(..) => {
                entries.insert(name.clone(), entry.clone());
            }
        }
    }
}

fn set_severity(entries: &mut FxHashMap<String, RuleEntry>, name: &str, severity: Severity) {
    let entry = match entries.remove(name) {
        Some(RuleEntry::WithOptions(_, options)) => RuleEntry::WithOptions(severity, options),
        _ => RuleEntry::Severity(severity),
    };
    entries.insert(name.to_string(), entry);
}

fn instantiate(
    name: &str,
    options: Option<&serde_json::Value>,
) -> Result<Box<dyn LintRule>, ConfigError> {
    match create_rule(name, options) {
        None => Err(ConfigError::UnknownRule(name.to_string())),
        Some(rule) => rule.map_err(|source| ConfigError::InvalidOptions {
            rule: name.to_string(),
            source,
        }),
    }
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        One(T),
        Many(Vec<T>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

/// Instantiated rules with their severities.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<(Box<dyn LintRule>, Severity)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every rule at its default severity.
    pub fn recommended() -> Self {
        let mut rules = RuleSet::new();
        for (name, severity) in Preset::Recommended.rules() {
            if let Ok(rule) = instantiate(name, None) {
                rules.push(rule, severity);
            }
        }
        rules
    }

    pub fn push(&mut self, rule: Box<dyn LintRule>, severity: Severity) {
        self.rules.push((rule, severity));
    }

    pub fn with_rule(mut self, rule: impl LintRule + 'static, severity: Severity) -> Self {
        self.push(Box::new(rule), severity);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&dyn LintRule, Severity)> {
        self.rules
            .iter()
            .filter(|(_, severity)| *severity != Severity::Off)
            .map(|(rule, severity)| (rule.as_ref(), *severity))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Severity of the rule named `name`, if it is part of the set.
    pub fn severity_of(&self, name: &str) -> Option<Severity> {
        self.rules
            .iter()
            .find(|(rule, _)| rule.meta().name == name)
            .map(|(_, severity)| *severity)
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|(rule, severity)| (rule.meta().name, severity)))
            .finish()
    }
}
