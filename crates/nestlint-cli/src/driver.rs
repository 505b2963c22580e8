//! File discovery, configuration loading and the per-file lint/fix run.

use crate::args::{CliArgs, OutputFormat};
use crate::reporter::Reporter;
use anyhow::{Context, Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use nestlint_common::Diagnostic;
use nestlint_rules::config::CONFIG_FILE_NAME;
use nestlint_rules::{LintConfig, Linter, Preset};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// No errors reported.
pub const EXIT_SUCCESS: i32 = 0;
/// At least one error-severity diagnostic remains, or a file failed.
pub const EXIT_LINT_ERRORS: i32 = 1;
/// Invalid arguments or configuration.
pub const EXIT_USAGE: i32 = 2;

const TS_EXTENSIONS: [&str; 4] = ["ts", "tsx", "mts", "cts"];
const DECLARATION_SUFFIXES: [&str; 3] = [".d.ts", ".d.mts", ".d.cts"];
const SKIPPED_DIRECTORIES: [&str; 3] = ["node_modules", ".git", "dist"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    Lint,
    Fix,
    FixDryRun,
}

impl RunMode {
    pub fn from_args(args: &CliArgs) -> Self {
        if args.fix_dry_run {
            RunMode::FixDryRun
        } else if args.fix {
            RunMode::Fix
        } else {
            RunMode::Lint
        }
    }
}

/// Result of linting (and possibly fixing) one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    /// Text the diagnostics refer to: the fixed text when fixing.
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
    pub passes: usize,
    pub applied_fixes: usize,
}

/// `--format json` document.
#[derive(Serialize)]
struct JsonOutput<'a> {
    diagnostics: Vec<&'a Diagnostic>,
    failures: Vec<JsonFailure>,
}

#[derive(Serialize)]
struct JsonFailure {
    file: String,
    message: String,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
    /// Files that could not be read, written or configured.
    pub failures: Vec<(PathBuf, anyhow::Error)>,
}

impl RunSummary {
    pub fn error_count(&self) -> usize {
        self.diagnostics().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics().filter(|d| !d.is_error()).count()
    }

    pub fn fixable_count(&self) -> usize {
        self.diagnostics().filter(|d| d.fixable).count()
    }

    pub fn applied_fixes(&self) -> usize {
        self.reports.iter().map(|report| report.applied_fixes).sum()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.reports.iter().flat_map(|report| &report.diagnostics)
    }

    pub fn exit_code(&self) -> i32 {
        if self.error_count() > 0 || !self.failures.is_empty() {
            EXIT_LINT_ERRORS
        } else {
            EXIT_SUCCESS
        }
    }
}

/// TypeScript source files, excluding declaration files.
pub fn is_lintable(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    if DECLARATION_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TS_EXTENSIONS.contains(&ext))
}

pub fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid --ignore-pattern `{pattern}`"))?;
        builder.add(glob);
    }
    builder.build().context("failed to build ignore patterns")
}

/// Expand files and directories into the sorted list of files to lint.
///
/// Explicit file arguments are linted whatever their extension; directories
/// contribute TypeScript sources outside `node_modules`, `.git` and `dist`.
pub fn collect_files(paths: &[PathBuf], cwd: &Path, ignore: &GlobSet) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let absolute = cwd.join(path);
        if absolute.is_file() {
            files.push(path.clone());
            continue;
        }
        if !absolute.is_dir() {
            bail!("no such file or directory: {}", path.display());
        }
        for entry in WalkDir::new(&absolute)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| SKIPPED_DIRECTORIES.contains(&name))
            })
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && is_lintable(entry.path()) {
                let relative = entry.path().strip_prefix(cwd).unwrap_or(entry.path());
                files.push(relative.to_path_buf());
            }
        }
    }

    files.retain(|file| !ignore.is_match(normalize(file)));
    files.sort();
    files.dedup();
    debug!(count = files.len(), "collected files");
    Ok(files)
}

/// Strip a leading `./` so globs match the way they are written.
fn normalize(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}

/// `--config`, else `.nestlintrc.json` in `cwd`, else the preset.
pub fn load_config(args: &CliArgs, cwd: &Path) -> Result<LintConfig> {
    let path = match &args.config {
        Some(path) => Some(cwd.join(path)),
        None => Some(cwd.join(CONFIG_FILE_NAME)).filter(|path| path.is_file()),
    };
    let Some(path) = path else {
        let preset: Preset = args.preset.map(Into::into).unwrap_or(Preset::Recommended);
        info!(preset = preset.name(), "no configuration file, using preset");
        return Ok(LintConfig::from_preset(preset));
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = LintConfig::from_json(&text)
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Lint or fix every file in parallel.
pub fn run(
    files: &[PathBuf],
    cwd: &Path,
    config: &LintConfig,
    mode: RunMode,
    max_passes: usize,
) -> RunSummary {
    let results: Vec<(PathBuf, Result<FileReport>)> = files
        .par_iter()
        .map(|file| (file.clone(), process_file(file, cwd, config, mode, max_passes)))
        .collect();

    let mut summary = RunSummary::default();
    for (path, result) in results {
        match result {
            Ok(report) => summary.reports.push(report),
            Err(err) => summary.failures.push((path, err)),
        }
    }
    summary
}

#[tracing::instrument(level = "debug", skip(file, cwd, config), fields(file = %file.display()))]
fn process_file(
    file: &Path,
    cwd: &Path,
    config: &LintConfig,
    mode: RunMode,
    max_passes: usize,
) -> Result<FileReport> {
    let absolute = cwd.join(file);
    let text = std::fs::read_to_string(&absolute)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let rules = config
        .resolve(normalize(file))
        .with_context(|| format!("failed to resolve rules for {}", file.display()))?;
    let linter = Linter::new(rules);
    let name = file.display().to_string();

    if mode == RunMode::Lint {
        let result = linter.lint_source(&name, &text);
        return Ok(FileReport {
            path: file.to_path_buf(),
            source: text,
            diagnostics: result.diagnostics,
            passes: 0,
            applied_fixes: 0,
        });
    }

    let result = linter.fix_source(&name, &text, max_passes);
    if mode == RunMode::Fix && result.changed() {
        std::fs::write(&absolute, &result.output)
            .with_context(|| format!("failed to write {}", file.display()))?;
        debug!(passes = result.passes, fixes = result.applied_fixes, "wrote fixes");
    }
    Ok(FileReport {
        path: file.to_path_buf(),
        source: result.output,
        diagnostics: result.diagnostics,
        passes: result.passes,
        applied_fixes: result.applied_fixes,
    })
}

/// Run the CLI against `cwd`, writing reports to `out`. Returns the exit
/// code; configuration and argument problems are errors.
pub fn execute(args: &CliArgs, cwd: &Path, color: bool, out: &mut dyn Write) -> Result<i32> {
    let mode = RunMode::from_args(args);
    if args.max_passes == 0 && mode != RunMode::Lint {
        bail!("--max-passes must be at least 1");
    }
    let config = load_config(args, cwd)?;
    let ignore = build_ignore_set(&args.ignore_patterns)?;
    let files = collect_files(&args.paths, cwd, &ignore)?;
    if mode == RunMode::FixDryRun && files.len() != 1 {
        bail!(
            "--fix-dry-run needs exactly one file, got {}",
            files.len()
        );
    }

    let mut summary = run(&files, cwd, &config, mode, args.max_passes);
    if args.quiet {
        for report in &mut summary.reports {
            report.diagnostics.retain(Diagnostic::is_error);
        }
    }

    let mut reporter = Reporter::new(color);
    for report in &summary.reports {
        reporter.add_source(&report.path.display().to_string(), &report.source);
    }

    for (path, err) in &summary.failures {
        warn!(path = %path.display(), error = %format!("{err:#}"), "file failed");
    }

    if mode == RunMode::FixDryRun {
        // The only file failed: there is no text to print.
        if let Some((_, err)) = summary.failures.pop() {
            return Err(err);
        }
        if let Some(report) = summary.reports.first() {
            out.write_all(report.source.as_bytes())?;
        }
    } else {
        match args.format {
            OutputFormat::Json => {
                let output = JsonOutput {
                    diagnostics: summary.diagnostics().collect(),
                    failures: summary
                        .failures
                        .iter()
                        .map(|(path, err)| JsonFailure {
                            file: path.display().to_string(),
                            message: format!("{err:#}"),
                        })
                        .collect(),
                };
                serde_json::to_writer_pretty(&mut *out, &output)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                let diagnostics: Vec<Diagnostic> = summary.diagnostics().cloned().collect();
                let rendered = reporter.render(&diagnostics);
                if !rendered.is_empty() {
                    writeln!(out, "{rendered}\n")?;
                }
                for (path, err) in &summary.failures {
                    writeln!(out, "{}", reporter.failure(path, err))?;
                }
                writeln!(out, "{}", reporter.summary(&summary, files.len()))?;
            }
        }
    }

    Ok(summary.exit_code())
}
