#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;

use wsc_cli::args::CliArgs;
use wsc_cli::{driver, tracing_config};

/// No error-severity reports and every file was read.
const EXIT_SUCCESS: u8 = 0;
/// Error-severity reports were emitted, or a file could not be read.
const EXIT_REPORTED: u8 = 1;
/// Bad configuration or arguments; nothing was checked.
const EXIT_CONFIG_ERROR: u8 = 2;

fn main() -> ExitCode {
    // Zero cost unless WSC_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

fn run(args: &CliArgs) -> Result<u8> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let build_dir = std::env::var_os("BUILD_DIR");

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    let summary = driver::run(args, &cwd, build_dir.as_deref(), &mut out, &mut err)?;
    err.flush()?;

    Ok(if summary.is_clean() {
        EXIT_SUCCESS
    } else {
        EXIT_REPORTED
    })
}
