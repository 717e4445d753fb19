//! Scanner module for directory traversal, metadata extraction and hashing.
//!
//! This module provides functionality for:
//! - Sorted, single-threaded directory walking using walkdir
//! - Streaming MD5 / SHA-1 / SHA-256 digests
//! - Building one [`FileRecord`] per regular file
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: lazy traversal yielding every filesystem entry
//! - [`hasher`]: fused streaming digests over a single read
//! - [`record`]: the per-file record and its JSON shape
//! - [`stat`]: raw platform metadata attached on request
//! - [`collector`]: consumes the walk and produces the record set
//!
//! # Example
//!
//! ```no_run
//! use dirinfo::scanner::{Collector, CollectorConfig, HashAlgorithm, HashOptions};
//! use std::path::Path;
//!
//! let config = CollectorConfig::new("build-host")
//!     .with_hash_options(HashOptions::only(HashAlgorithm::Sha256));
//!
//! let records = Collector::new(&config).collect(Path::new(".")).unwrap();
//! for record in &records {
//!     println!("{}: {} bytes", record.path.display(), record.size);
//! }
//! ```

pub mod collector;
pub mod hasher;
pub mod record;
pub mod stat;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use collector::{resolve_root, Collector};
pub use hasher::{Digests, HashAlgorithm, HashOptions, Hasher};
pub use record::FileRecord;
pub use stat::RawStat;
pub use walker::{WalkEntry, Walker};

/// Run-wide settings for the collector.
///
/// Built once per run and shared by reference; nothing in the scanner reads
/// global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Digest algorithms to compute for every file.
    pub hash_options: HashOptions,
    /// Attach raw platform stat data to each record.
    pub system_info: bool,
    /// Free-text note copied onto every record.
    pub note: Option<String>,
    /// Identifier of the machine performing the scan.
    pub host_machine: String,
}

impl CollectorConfig {
    /// Create a configuration with no digests, no system info and no note.
    #[must_use]
    pub fn new(host_machine: impl Into<String>) -> Self {
        Self {
            hash_options: HashOptions::default(),
            system_info: false,
            note: None,
            host_machine: host_machine.into(),
        }
    }

    /// Set the digest algorithms to compute.
    #[must_use]
    pub fn with_hash_options(mut self, options: HashOptions) -> Self {
        self.hash_options = options;
        self
    }

    /// Enable or disable raw system metadata.
    #[must_use]
    pub fn with_system_info(mut self, enabled: bool) -> Self {
        self.system_info = enabled;
        self
    }

    /// Set the note. An empty note is treated as no note.
    #[must_use]
    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note.filter(|n| !n.is_empty());
        self
    }
}

/// Errors that abort a scan.
///
/// Every variant is fatal: the records gathered so far are discarded.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The root could not be made absolute or does not exist.
    #[error("Cannot resolve root path {path}: {source}")]
    PathResolution {
        /// Path as given by the caller
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The root exists but is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Listing a directory entry failed.
    #[error("Failed to read {path}: {source}")]
    Traversal {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file could not be opened or read while hashing.
    #[error(transparent)]
    Hashing(#[from] HashError),
}

impl ScanError {
    /// Whether the error concerns the root path rather than the tree.
    #[must_use]
    pub fn is_root_error(&self) -> bool {
        matches!(self, Self::PathResolution { .. } | Self::NotADirectory(_))
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while hashing `path`.
    pub(crate) fn from_io(path: PathBuf, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io {
                path,
                source: error,
            },
        }
    }
}
