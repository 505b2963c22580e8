//! Configuration parsing and per-file resolution.

use nestlint_rules::{ConfigError, LintConfig, Linter, Preset, Severity};
use std::path::Path;

const RULE: &str = "api-property-matches-property-optionality";

#[test]
fn test_default_config_enables_nothing() {
    let config = LintConfig::from_json("{}").expect("config");
    let rules = config.resolve(Path::new("a.ts")).expect("resolve");
    assert!(rules.is_empty());
}

#[test]
fn test_recommended_preset() {
    let config = LintConfig::from_json(r#"{ "extends": "recommended" }"#).expect("config");
    let rules = config.resolve(Path::new("src/a.ts")).expect("resolve");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules.severity_of(RULE), Some(Severity::Error));

    let config = LintConfig::from_preset(Preset::Recommended);
    assert_eq!(
        config.resolve(Path::new("a.ts")).expect("resolve").severity_of(RULE),
        Some(Severity::Error)
    );
}

#[test]
fn test_no_swagger_preset_turns_rule_off() {
    let config =
        LintConfig::from_json(r#"{ "extends": ["recommended", "noSwagger"] }"#).expect("config");
    let rules = config.resolve(Path::new("a.ts")).expect("resolve");
    assert!(rules.is_empty());
}

#[test]
fn test_severity_forms() {
    for (value, expected) in [
        (r#""off""#, None),
        (r#""warn""#, Some(Severity::Warn)),
        (r#""error""#, Some(Severity::Error)),
        ("0", None),
        ("1", Some(Severity::Warn)),
        ("2", Some(Severity::Error)),
        (r#"["warn", { "disableField": true }]"#, Some(Severity::Warn)),
    ] {
        let text = format!(r#"{{ "rules": {{ "{RULE}": {value} }} }}"#);
        let config = LintConfig::from_json(&text).expect("config");
        let rules = config.resolve(Path::new("a.ts")).expect("resolve");
        assert_eq!(rules.severity_of(RULE), expected, "{value}");
    }
}

#[test]
fn test_invalid_severity() {
    for value in [r#""fatal""#, "3", "true"] {
        let text = format!(r#"{{ "rules": {{ "{RULE}": {value} }} }}"#);
        assert!(
            matches!(LintConfig::from_json(&text), Err(ConfigError::Parse(_))),
            "{value}"
        );
    }
}

#[test]
fn test_unknown_rule() {
    let err = LintConfig::from_json(r#"{ "rules": { "no-such-rule": "error" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownRule(ref name) if name == "no-such-rule"));
    assert_eq!(err.to_string(), "unknown rule `no-such-rule`");
}

#[test]
fn test_invalid_rule_options() {
    let text = format!(r#"{{ "rules": {{ "{RULE}": ["error", {{ "disableField": 1 }}] }} }}"#);
    let err = LintConfig::from_json(&text).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidOptions { .. }));
}

#[test]
fn test_invalid_override_pattern() {
    let text = r#"{ "overrides": [ { "files": "src/[a.ts", "extends": "noSwagger" } ] }"#;
    let err = LintConfig::from_json(text).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "src/[a.ts"));
}

#[test]
fn test_overrides_apply_to_matching_files_in_order() {
    let text = format!(
        r#"{{
            "extends": "recommended",
            "overrides": [
                {{ "files": ["**/legacy/**"], "extends": "noSwagger" }},
                {{ "files": "**/legacy/keep/*.ts", "rules": {{ "{RULE}": "warn" }} }},
                {{ "files": ["*.dto.ts"], "rules": {{ "{RULE}": ["error", {{ "shouldDisableField": true }}] }} }}
            ]
        }}"#
    );
    let config = LintConfig::from_json(&text).expect("config");

    let severity = |path: &str| {
        config
            .resolve(Path::new(path))
            .expect("resolve")
            .severity_of(RULE)
    };
    assert_eq!(severity("src/user.ts"), Some(Severity::Error));
    assert_eq!(severity("src/legacy/user.ts"), None);
    assert_eq!(severity("src/legacy/keep/user.ts"), Some(Severity::Warn));
    assert_eq!(severity("src/user.dto.ts"), Some(Severity::Error));
}

#[test]
fn test_severity_override_keeps_options() {
    let text = format!(
        r#"{{
            "rules": {{ "{RULE}": ["error", {{ "disableField": true }}] }},
            "overrides": [ {{ "files": "**/*.ts", "rules": {{ "{RULE}": "warn" }} }} ]
        }}"#
    );
    let config = LintConfig::from_json(&text).expect("config");
    let rules = config.resolve(Path::new("src/a.ts")).expect("resolve");
    assert_eq!(rules.severity_of(RULE), Some(Severity::Warn));

    // `disableField` survived: the @Field check is skipped
    let linter = Linter::new(rules);
    let result = linter.lint_source("src/a.ts", "class C { @Field() x?: string; }");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_preset_names() {
    assert_eq!("recommended".parse::<Preset>(), Ok(Preset::Recommended));
    assert_eq!("noSwagger".parse::<Preset>(), Ok(Preset::NoSwagger));
    assert!("strict".parse::<Preset>().is_err());
    assert_eq!(Preset::NoSwagger.name(), "noSwagger");
    assert_eq!(
        Preset::Recommended.rules(),
        vec![(RULE, Severity::Error)]
    );
}
