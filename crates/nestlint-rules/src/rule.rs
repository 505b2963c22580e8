//! Lint rule trait and supporting types.
//!
//! Each rule implements `LintRule`: static metadata (`RuleMeta`) plus a
//! `check_property` method that inspects one property declaration and
//! returns findings. Findings carry a `PatchPlan`, which the linter turns
//! into text edits only when fixing.

use crate::patch::PatchPlan;
use nestlint_common::{DiagnosticCategory, TextRange};
use nestlint_parser::{PropertyDeclaration, SourceFile};
use serde::Serialize;

/// Severity level for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rule is disabled.
    Off,
    /// Reported, does not fail the run.
    Warn,
    /// Reported, fails the run.
    Error,
}

impl Severity {
    /// Diagnostic category for an enabled severity.
    pub fn category(self) -> Option<DiagnosticCategory> {
        match self {
            Severity::Off => None,
            Severity::Warn => Some(DiagnosticCategory::Warning),
            Severity::Error => Some(DiagnosticCategory::Error),
        }
    }
}

/// Every message a rule of this crate can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageId {
    ShouldUseOptionalDecorator,
    ShouldSetFieldAsNullable,
    ShouldAddIsOptional,
    ShouldUseRequiredDecorator,
    ShouldRemoveNullableFromField,
    ConflictingApiPropertyDecorators,
}

impl MessageId {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageId::ShouldUseOptionalDecorator => "shouldUseOptionalDecorator",
            MessageId::ShouldSetFieldAsNullable => "shouldSetFieldAsNullable",
            MessageId::ShouldAddIsOptional => "shouldAddIsOptional",
            MessageId::ShouldUseRequiredDecorator => "shouldUseRequiredDecorator",
            MessageId::ShouldRemoveNullableFromField => "shouldRemoveNullableFromField",
            MessageId::ConflictingApiPropertyDecorators => "conflictingApiPropertyDecorators",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MessageId::ShouldUseOptionalDecorator => {
                "Property marked as optional should use @ApiPropertyOptional decorator"
            }
            MessageId::ShouldSetFieldAsNullable => {
                "Property marked as optional should use @Field as nullable true"
            }
            MessageId::ShouldAddIsOptional => {
                "Property marked as optional should add @IsOptional when there are other class validator decorators"
            }
            MessageId::ShouldUseRequiredDecorator => {
                "Property marked as required should not use nullable decorators"
            }
            MessageId::ShouldRemoveNullableFromField => {
                "Property marked as required should not use @Field with nullable true"
            }
            MessageId::ConflictingApiPropertyDecorators => {
                "Property should not use both @{0} and @{1}"
            }
        }
    }
}

/// Static metadata for a lint rule.
#[derive(Debug)]
pub struct RuleMeta {
    /// Rule name, e.g. "api-property-matches-property-optionality".
    pub name: &'static str,
    pub description: &'static str,
    /// Severity under the `recommended` preset.
    pub default_severity: Severity,
    /// Whether the rule can provide auto-fixes.
    pub fixable: bool,
    pub messages: &'static [MessageId],
}

/// One reported mismatch.
#[derive(Debug, Clone)]
pub struct Finding<'a> {
    pub message_id: MessageId,
    /// Arguments substituted into the `{n}` placeholders of the message.
    pub message_args: Vec<&'static str>,
    pub anchor: TextRange,
    /// `None` when no safe fix exists.
    pub fix: Option<PatchPlan<'a>>,
}

impl<'a> Finding<'a> {
    pub fn new(message_id: MessageId, anchor: TextRange) -> Self {
        Finding {
            message_id,
            message_args: Vec::new(),
            anchor,
            fix: None,
        }
    }

    pub fn with_fix(mut self, fix: Option<PatchPlan<'a>>) -> Self {
        self.fix = fix.filter(|plan| !plan.is_empty());
        self
    }

    pub fn with_args(mut self, args: &[&'static str]) -> Self {
        self.message_args = args.to_vec();
        self
    }
}

/// Context passed to each rule during lint checking.
pub struct LintContext<'a> {
    pub file: &'a SourceFile,
}

/// Trait that every lint rule must implement.
pub trait LintRule: Send + Sync {
    /// Static metadata for this rule.
    fn meta(&self) -> &RuleMeta;

    /// Check a class property declaration.
    fn check_property<'a>(
        &self,
        _property: &'a PropertyDeclaration,
        _ctx: &LintContext<'a>,
    ) -> Vec<Finding<'a>> {
        vec![]
    }
}
