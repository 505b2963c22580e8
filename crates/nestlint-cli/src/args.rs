use clap::{Parser, ValueEnum};
use nestlint_rules::{DEFAULT_MAX_PASSES, Preset};
use std::path::PathBuf;

/// CLI arguments for the nestlint binary.
#[derive(Parser, Debug)]
#[command(
    name = "nestlint",
    version,
    about = "Checks that NestJS DTO decorators agree with property optionality"
)]
pub struct CliArgs {
    /// Files or directories to lint. Directories are searched recursively
    /// for .ts, .tsx, .mts and .cts files.
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Path to a .nestlintrc.json file. Defaults to .nestlintrc.json in the
    /// working directory when present.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Preset used when no configuration file is found.
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Apply fixes and write the results back.
    #[arg(long)]
    pub fix: bool,

    /// Print the fixed text of a single file to stdout without writing it.
    #[arg(long = "fix-dry-run", alias = "fixDryRun", conflicts_with = "fix")]
    pub fix_dry_run: bool,

    /// Output format for diagnostics.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Maximum number of fix passes per file.
    #[arg(long = "max-passes", default_value_t = DEFAULT_MAX_PASSES)]
    pub max_passes: usize,

    /// Glob of files to skip, matched against paths relative to the
    /// working directory. May be repeated.
    #[arg(long = "ignore-pattern", value_name = "GLOB")]
    pub ignore_patterns: Vec<String>,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Report errors only.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    Recommended,
    #[value(name = "noSwagger", alias = "no-swagger")]
    NoSwagger,
}

impl From<PresetArg> for Preset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Recommended => Preset::Recommended,
            PresetArg::NoSwagger => Preset::NoSwagger,
        }
    }
}
