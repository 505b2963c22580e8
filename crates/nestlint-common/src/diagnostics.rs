use serde::Serialize;

use crate::position::Range;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl DiagnosticCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
        }
    }
}

/// A single reported rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    /// Rule name, e.g. `api-property-matches-property-optionality`.
    pub rule: &'static str,
    /// Message identifier, e.g. `shouldUseRequiredDecorator`.
    pub message_id: &'static str,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub range: Range,
    pub message_text: String,
    /// Whether the rule offered an automatic fix for this report.
    pub fixable: bool,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Fill `{0}`, `{1}`, ... placeholders of a message template.
pub fn format_message(template: &str, args: &[&str]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_string(), |text, (index, arg)| {
            text.replace(&format!("{{{index}}}"), arg)
        })
}
