//! Command-line interface definitions for dirinfo.
//!
//! This module defines all CLI arguments using the clap derive API. There are
//! no subcommands: a single invocation inventories one directory tree.
//!
//! # Example
//!
//! ```bash
//! # Inventory the current directory with the default digest
//! dirinfo
//!
//! # SHA-256 digests plus duplicate detection, one JSON object per line
//! dirinfo -p ~/Downloads --sha256 -d --no-array
//!
//! # Tag every record and name the output file explicitly
//! dirinfo -p /srv/data -m -n "before migration" -o srv-data
//!
//! # Verbose mode prints every file as it is collected
//! dirinfo -v -p /etc
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::scanner::HashAlgorithm;

/// Directory inventory with content digests and duplicate detection.
///
/// dirinfo walks a directory tree, records metadata for every regular file,
/// optionally computes MD5/SHA-1/SHA-256 digests and flags files with
/// identical content. Results are written as JSON.
#[derive(Debug, Parser)]
#[command(name = "dirinfo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to inventory (default: current directory)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Compute MD5 digests
    #[arg(short, long)]
    pub md5: bool,

    /// Compute SHA-1 digests
    #[arg(short, long)]
    pub sha1: bool,

    /// Compute SHA-256 digests
    #[arg(long, visible_alias = "s2")]
    pub sha256: bool,

    /// Algorithm enabled when no digest flag is given
    #[arg(long, value_enum, value_name = "ALGORITHM")]
    pub default_algorithm: Option<AlgorithmArg>,

    /// Flag files with identical content
    #[arg(short, long)]
    pub duplicate: bool,

    /// Attach raw platform stat data to every record
    #[arg(short, long)]
    pub info: bool,

    /// Free-text note copied onto every record
    #[arg(short, long, value_name = "TEXT")]
    pub note: Option<String>,

    /// Output base name; results go to <NAME>.json (default: <machine>-results)
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<String>,

    /// Machine identifier recorded on every file (default: host name)
    #[arg(long, value_name = "NAME")]
    pub machine_name: Option<String>,

    /// Write one JSON object per line instead of a single array
    #[arg(long, visible_alias = "na")]
    pub no_array: bool,

    /// Pretty-print the JSON array
    #[arg(long, conflicts_with = "no_array")]
    pub pretty: bool,

    /// Configuration file (default: platform config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, short_alias = 't', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (any non-empty, non-falsey NO_COLOR also disables it)
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,

    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Digest algorithm choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    /// MD5
    Md5,
    /// SHA-1
    Sha1,
    /// SHA-256
    Sha256,
}

impl From<AlgorithmArg> for HashAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Md5 => Self::Md5,
            AlgorithmArg::Sha1 => Self::Sha1,
            AlgorithmArg::Sha256 => Self::Sha256,
        }
    }
}
