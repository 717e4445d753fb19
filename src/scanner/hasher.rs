//! Streaming file digests.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing MD5, SHA-1 and
//! SHA-256 digests of file contents with memory-efficient streaming. When
//! several algorithms are enabled the file is still read only once: every
//! chunk is fed to each active digest before the next read.
//!
//! # Example
//!
//! ```no_run
//! use dirinfo::scanner::{HashAlgorithm, HashOptions, Hasher};
//! use std::path::Path;
//!
//! let options = HashOptions::only(HashAlgorithm::Sha256).with(HashAlgorithm::Md5);
//! let digests = Hasher::new().hash_file(Path::new("Cargo.toml"), &options).unwrap();
//! println!("sha256 = {}", digests.get(HashAlgorithm::Sha256).unwrap());
//! ```

use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use super::HashError;

/// Read buffer size for streaming (64KB).
pub const BUFFER_SIZE: usize = 64 * 1024;

/// A supported digest algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5 (128-bit)
    Md5,
    /// SHA-1 (160-bit)
    Sha1,
    /// SHA-256 (256-bit)
    Sha256,
}

impl HashAlgorithm {
    /// All algorithms in canonical order.
    pub const ALL: [HashAlgorithm; 3] = [Self::Md5, Self::Sha1, Self::Sha256];

    /// Lowercase algorithm name as used in JSON output.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of algorithms enabled for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashOptions {
    /// Compute MD5 digests.
    pub md5: bool,
    /// Compute SHA-1 digests.
    pub sha1: bool,
    /// Compute SHA-256 digests.
    pub sha256: bool,
}

impl HashOptions {
    /// Options with a single algorithm enabled.
    #[must_use]
    pub fn only(algorithm: HashAlgorithm) -> Self {
        Self::default().with(algorithm)
    }

    /// Enable an additional algorithm.
    #[must_use]
    pub fn with(mut self, algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => self.md5 = true,
            HashAlgorithm::Sha1 => self.sha1 = true,
            HashAlgorithm::Sha256 => self.sha256 = true,
        }
        self
    }

    /// Whether `algorithm` is enabled.
    #[must_use]
    pub fn is_enabled(&self, algorithm: HashAlgorithm) -> bool {
        match algorithm {
            HashAlgorithm::Md5 => self.md5,
            HashAlgorithm::Sha1 => self.sha1,
            HashAlgorithm::Sha256 => self.sha256,
        }
    }

    /// Whether no algorithm is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.md5 || self.sha1 || self.sha256)
    }

    /// Enabled algorithms in canonical order.
    pub fn enabled(&self) -> impl Iterator<Item = HashAlgorithm> {
        let options = *self;
        HashAlgorithm::ALL
            .into_iter()
            .filter(move |algorithm| options.is_enabled(*algorithm))
    }
}

/// Lowercase hex digests keyed by algorithm.
///
/// Serializes as a JSON object holding only the algorithms that were computed,
/// e.g. `{"sha256": "e3b0..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digests {
    /// MD5 digest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    /// SHA-1 digest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    /// SHA-256 digest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl Digests {
    /// Digest for `algorithm`, if it was computed.
    #[must_use]
    pub fn get(&self, algorithm: HashAlgorithm) -> Option<&str> {
        match algorithm {
            HashAlgorithm::Md5 => self.md5.as_deref(),
            HashAlgorithm::Sha1 => self.sha1.as_deref(),
            HashAlgorithm::Sha256 => self.sha256.as_deref(),
        }
    }

    /// Store the digest for `algorithm`.
    pub fn set(&mut self, algorithm: HashAlgorithm, hex: String) {
        let slot = match algorithm {
            HashAlgorithm::Md5 => &mut self.md5,
            HashAlgorithm::Sha1 => &mut self.sha1,
            HashAlgorithm::Sha256 => &mut self.sha256,
        };
        *slot = Some(hex);
    }

    /// Whether no digest is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.md5.is_none() && self.sha1.is_none() && self.sha256.is_none()
    }
}

/// Incremental state for one algorithm.
enum DigestState {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
}

impl DigestState {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => Self::Md5(Md5::new()),
            HashAlgorithm::Sha1 => Self::Sha1(Sha1::new()),
            HashAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
        }
    }

    fn algorithm(&self) -> HashAlgorithm {
        match self {
            Self::Md5(_) => HashAlgorithm::Md5,
            Self::Sha1(_) => HashAlgorithm::Sha1,
            Self::Sha256(_) => HashAlgorithm::Sha256,
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(h) => h.update(data),
            Self::Sha1(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Self::Md5(h) => format!("{:x}", h.finalize()),
            Self::Sha1(h) => format!("{:x}", h.finalize()),
            Self::Sha256(h) => format!("{:x}", h.finalize()),
        }
    }
}

/// Streaming file hasher.
///
/// Holds no open handles between calls; each file is opened, read to the end
/// and closed inside [`Hasher::hash_file`].
#[derive(Debug, Clone)]
pub struct Hasher {
    buffer_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher with the default 64KB read buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer_size: BUFFER_SIZE,
        }
    }

    /// Create a hasher with a custom read buffer size (minimum 1 byte).
    #[must_use]
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }

    /// Compute every enabled digest of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or a read fails.
    pub fn hash_file(&self, path: &Path, options: &HashOptions) -> Result<Digests, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path.to_path_buf(), e))?;
        self.hash_reader(file, options)
            .map_err(|e| HashError::from_io(path.to_path_buf(), e))
    }

    /// Compute every enabled digest over the full contents of `reader`.
    ///
    /// # Errors
    ///
    /// Returns the first read error other than `Interrupted`.
    pub fn hash_reader<R: Read>(
        &self,
        mut reader: R,
        options: &HashOptions,
    ) -> std::io::Result<Digests> {
        let mut states: Vec<DigestState> = options.enabled().map(DigestState::new).collect();
        let mut digests = Digests::default();
        if states.is_empty() {
            return Ok(digests);
        }

        let mut buffer = vec![0u8; self.buffer_size];
        loop {
            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            for state in &mut states {
                state.update(&buffer[..read]);
            }
        }

        for state in states {
            let algorithm = state.algorithm();
            digests.set(algorithm, state.finalize_hex());
        }
        Ok(digests)
    }
}
