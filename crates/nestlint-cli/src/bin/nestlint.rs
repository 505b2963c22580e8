#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use nestlint_cli::args::CliArgs;
use nestlint_cli::driver::{self, EXIT_USAGE};

fn main() -> Result<()> {
    // No-op unless NESTLINT_LOG or RUST_LOG is set.
    nestlint::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let stdout = std::io::stdout();
    let color = !args.no_color && stdout.is_terminal();

    let mut out = stdout.lock();
    let code = match driver::execute(&args, &cwd, color, &mut out) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            EXIT_USAGE
        }
    };
    out.flush().context("failed to flush stdout")?;
    drop(out);
    std::process::exit(code);
}
