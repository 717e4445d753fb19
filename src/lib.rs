//! dirinfo - Directory Inventory
//!
//! Walks a directory tree, records metadata and optional MD5/SHA-1/SHA-256
//! digests for every regular file, optionally flags files with identical
//! content, and writes the result as JSON.
//!
//! The library is split into a collection pass ([`scanner`]) and a grouping
//! pass ([`duplicates`]), driven together by [`inventory::Inventory`].

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::config::{Config, RunConfig};
use crate::error::ExitCode;
use crate::inventory::Inventory;
use crate::output::{write_summary, JsonOutput};
use crate::progress::Progress;

/// Run the application for parsed command-line arguments.
///
/// # Errors
///
/// Returns an error if configuration cannot be resolved, the inventory fails
/// or the output file cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let color = !cli.no_color && std::io::stdout().is_terminal();
    if !color {
        yansi::disable();
    }
    logging::init_logging(cli.verbose, cli.quiet, !cli.no_color);

    let config = Config::load(cli.config.as_deref())?;
    let run_config = RunConfig::resolve(&cli, &config)?;
    log::debug!("Run configuration: {:?}", run_config);

    let mut inventory = Inventory::new(&run_config);
    if !cli.quiet && !cli.no_progress && std::io::stderr().is_terminal() {
        inventory = inventory.with_progress(Arc::new(Progress::new(false)));
    }
    let report = inventory.run()?;

    let output_path = JsonOutput::new(&report.records, run_config.format)
        .with_pretty(run_config.pretty)
        .write_file(&run_config.output_base)
        .context("Failed to write results")?;

    if !cli.quiet {
        let stdout = std::io::stdout();
        write_summary(&mut stdout.lock(), &report.summary, &output_path)
            .context("Failed to print summary")?;
    }

    Ok(ExitCode::Success)
}
