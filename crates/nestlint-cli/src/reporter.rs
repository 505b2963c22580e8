use crate::driver::RunSummary;
use colored::Colorize;
use nestlint_common::{Diagnostic, DiagnosticCategory, LineMap};
use rustc_hash::FxHashMap;
use std::path::Path;

pub struct Reporter {
    color: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Register the text diagnostics of `file` refer to.
    pub fn add_source(&mut self, file: &str, text: &str) {
        self.line_maps.insert(file.to_string(), LineMap::build(text));
        self.sources.insert(file.to_string(), text.to_string());
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push_str("\n\n");
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    /// `file:line:col - error rule(messageId): message` plus a snippet.
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let location = format!(
            "{}:{}:{}",
            diagnostic.file,
            diagnostic.range.start.line + 1,
            diagnostic.range.start.character + 1
        );
        let location = if self.color {
            location.cyan().to_string()
        } else {
            location
        };

        let rule = format!("{}({})", diagnostic.rule, diagnostic.message_id);
        let rule = if self.color {
            rule.bright_blue().to_string()
        } else {
            rule
        };

        let mut output = format!(
            "{location} - {} {rule}: {}",
            self.format_category(diagnostic.category),
            diagnostic.message_text
        );
        if let Some(snippet) = self.format_snippet(diagnostic) {
            output.push_str(&snippet);
        }
        output
    }

    /// Source line of the diagnostic start with a `~` underline, like tsc:
    ///
    /// ```text
    ///     3   @Field()
    ///         ~~~~~~~~
    /// ```
    ///
    /// Spans covering several lines are underlined up to the end of their
    /// first line.
    fn format_snippet(&self, diagnostic: &Diagnostic) -> Option<String> {
        if diagnostic.length == 0 {
            return None;
        }
        let source = self.sources.get(&diagnostic.file)?;
        let line_map = self.line_maps.get(&diagnostic.file)?;
        let line = diagnostic.range.start.line as usize;
        let line_text = line_map.line_text(line, source)?;
        let line_start = line_map.line_start(line)?;

        let start = diagnostic.start.saturating_sub(line_start) as usize;
        let end = (diagnostic.start + diagnostic.length).saturating_sub(line_start) as usize;

        let mut underline = String::new();
        for (offset, ch) in line_text.char_indices() {
            if offset >= end {
                break;
            }
            let mark = if offset < start { ' ' } else { '~' };
            if ch == '\t' {
                underline.extend(std::iter::repeat_n(mark, 4));
            } else {
                underline.push(mark);
            }
        }
        if underline.trim().is_empty() {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        let line_text = line_text.replace('\t', "    ");
        Some(format!("\n  {:>3}   {}\n        {}", line + 1, line_text, underline))
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
        }
    }

    /// Closing line, e.g. `Found 3 problems (2 errors, 1 warning) in 2 files.`
/// followed by fix counts and the number of files that failed.
    pub fn summary(&self, summary: &RunSummary, file_count: usize) -> String {
        let errors = summary.error_count();
        let warnings = summary.warning_count();
        let problems = errors + warnings;

        let mut line = if problems == 0 {
            format!("No problems found in {}.", plural(file_count, "file"))
        } else {
            format!(
                "Found {} ({}, {}) in {}.",
                plural(problems, "problem"),
                plural(errors, "error"),
                plural(warnings, "warning"),
                plural(file_count, "file")
            )
        };

        let applied = summary.applied_fixes();
        if applied > 0 {
            line.push_str(&format!(" Applied {}.", plural(applied, "fix")));
        }
        let fixable = summary.fixable_count();
        if fixable > 0 {
            line.push_str(&format!(
                " {} potentially fixable with --fix.",
                plural(fixable, "problem")
            ));
        }

        let failed = summary.failures.len();
        if failed > 0 {
            line.push_str(&format!(" {} failed.", plural(failed, "file")));
        }

        if !self.color {
            return line;
        }
        if errors > 0 || failed > 0 {
            line.red().bold().to_string()
        } else if warnings > 0 {
            line.yellow().bold().to_string()
        } else {
            line.green().to_string()
        }
    }

    pub fn failure(&self, path: &Path, err: &anyhow::Error) -> String {
        let label = if self.color {
            "error".red().bold().to_string()
        } else {
            "error".to_string()
        };
        format!("{} - {label}: {err:#}", path.display())
    }
}

fn plural(count: usize, noun: &str) -> String {
    match (count, noun) {
        (1, _) => format!("1 {noun}"),
        (_, "fix") => format!("{count} fixes"),
        _ => format!("{count} {noun}s"),
    }
}
