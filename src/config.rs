//! Application configuration management.
//!
//! Settings are layered with figment, lowest precedence first:
//! 1. built-in defaults ([`Config::default`])
//! 2. a TOML file (`--config <FILE>` or `config.toml` in the platform config
//!    directory)
//! 3. environment variables prefixed `DIRINFO_` (e.g. `DIRINFO_SHA256=true`)
//! 4. command-line flags
//!
//! The merged result is resolved once into an immutable [`RunConfig`] that
//! the rest of the program receives by reference.
//!
//! # Example config.toml
//!
//! ```toml
//! sha256 = true
//! duplicates = true
//! machine_name = "nas-01"
//! note = "quarterly audit"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::output::json::{output_file_name, OutputFormat};
use crate::scanner::{CollectorConfig, HashAlgorithm, HashOptions};

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "DIRINFO_";

/// File-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compute MD5 digests.
    pub md5: bool,
    /// Compute SHA-1 digests.
    pub sha1: bool,
    /// Compute SHA-256 digests.
    pub sha256: bool,
    /// Algorithm enabled when no digest is requested.
    pub default_algorithm: HashAlgorithm,
    /// Flag files with identical content.
    pub duplicates: bool,
    /// Attach raw platform stat data.
    pub system_info: bool,
    /// Write one JSON object per line.
    pub no_array: bool,
    /// Pretty-print the JSON array.
    pub pretty: bool,
    /// Note copied onto every record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Machine identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_name: Option<String>,
    /// Output base name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            md5: false,
            sha1: false,
            sha256: false,
            default_algorithm: HashAlgorithm::Sha1,
            duplicates: false,
            system_info: false,
            no_array: false,
            pretty: false,
            note: None,
            machine_name: None,
            output: None,
        }
    }
}

impl Config {
    /// Figment stack over defaults, an optional TOML file and the environment.
    ///
    /// A missing file contributes nothing.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the configuration.
    ///
    /// Uses `explicit` when given, otherwise the platform default path.
    ///
    /// # Errors
    ///
    /// Fails if an explicit file does not exist or any layer holds an invalid
    /// value.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Self::load_from(path)
            }
            None => {
                let path = Self::default_path();
                if let Some(ref p) = path {
                    log::debug!("Looking for config at {}", p.display());
                }
                Self::figment(path.as_deref())
                    .extract()
                    .context("Invalid configuration")
            }
        }
    }

    /// Load from a specific TOML file plus the environment.
    ///
    /// # Errors
    ///
    /// Fails if a layer holds an invalid value.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::figment(Some(path))
            .extract()
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dirinfo").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Root directory to inventory.
    pub root: PathBuf,
    /// Per-record settings for the collector.
    pub collector: CollectorConfig,
    /// Run the duplicate grouper.
    pub detect_duplicates: bool,
    /// Output base name; the file is `<output_base>.json`.
    pub output_base: String,
    /// Output layout.
    pub format: OutputFormat,
    /// Pretty-print the array layout.
    pub pretty: bool,
}

impl RunConfig {
    /// Plain settings for `root`: no digests, no grouping, array output.
    #[must_use]
    pub fn for_root(root: impl Into<PathBuf>, host_machine: impl Into<String>) -> Self {
        let host_machine = host_machine.into();
        Self {
            root: root.into(),
            output_base: default_output_base(&host_machine),
            collector: CollectorConfig::new(host_machine),
            detect_duplicates: false,
            format: OutputFormat::Array,
            pretty: false,
        }
    }

    /// Merge command-line flags over the loaded configuration.
    ///
    /// Boolean flags can only switch a setting on. When no digest is
    /// requested anywhere, the default algorithm is enabled.
    ///
    /// # Errors
    ///
    /// Fails if the working directory or the host name cannot be determined.
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let root = match cli.path {
            Some(ref path) => path.clone(),
            None => std::env::current_dir().context("Cannot determine current directory")?,
        };

        let host_machine = match cli.machine_name.clone().or_else(|| config.machine_name.clone()) {
            Some(name) => name,
            None => local_host_name()?,
        };

        let mut hash_options = HashOptions {
            md5: cli.md5 || config.md5,
            sha1: cli.sha1 || config.sha1,
            sha256: cli.sha256 || config.sha256,
        };
        if hash_options.is_empty() {
            let fallback = cli
                .default_algorithm
                .map_or(config.default_algorithm, HashAlgorithm::from);
            log::debug!("No digest requested, enabling {}", fallback);
            hash_options = HashOptions::only(fallback);
        }

        let collector = CollectorConfig::new(host_machine.clone())
            .with_hash_options(hash_options)
            .with_system_info(cli.info || config.system_info)
            .with_note(cli.note.clone().or_else(|| config.note.clone()));

        let output_base = cli
            .output
            .clone()
            .or_else(|| config.output.clone())
            .unwrap_or_else(|| default_output_base(&host_machine));

        let format = if cli.no_array || config.no_array {
            OutputFormat::Lines
        } else {
            OutputFormat::Array
        };

        Ok(Self {
            root,
            collector,
            detect_duplicates: cli.duplicate || config.duplicates,
            output_base,
            format,
            pretty: cli.pretty || config.pretty,
        })
    }

    /// Path of the output file.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        output_file_name(&self.output_base)
    }
}

fn default_output_base(host_machine: &str) -> String {
    format!("{host_machine}-results")
}

/// Host name of the local machine.
fn local_host_name() -> Result<String> {
    sysinfo::System::host_name()
        .filter(|name| !name.is_empty())
        .context("Cannot determine host name; pass --machine-name")
}
