//! The per-file inventory record.

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hasher::{Digests, HashAlgorithm};
use super::stat::{self, RawStat};
use super::CollectorConfig;

/// Metadata and digests for one regular file.
///
/// Serialized with camelCase keys. Optional parts are left out of the JSON
/// when absent: `digests` when no algorithm ran, `note` and `systemInfo`
/// when not requested and `duplicatesOf` when the file has no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Absolute path to the file
    #[serde(with = "lossy_path")]
    pub path: PathBuf,
    /// Directory containing the file
    #[serde(with = "lossy_path")]
    pub directory: PathBuf,
    /// Final path component
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// Platform mode bits
    pub permissions: u32,
    /// Machine the scan ran on
    pub host_machine: String,
    /// Suffix including the leading dot, or empty
    pub extension: String,
    /// Last modification time
    pub modified_at: DateTime<Utc>,
    /// Content digests for the enabled algorithms
    #[serde(default, skip_serializing_if = "Digests::is_empty")]
    pub digests: Digests,
    /// Run-wide note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Raw platform stat data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_info: Option<RawStat>,
    /// Other files with the same key digest
    #[serde(
        default,
        with = "lossy_paths",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub duplicates_of: Vec<PathBuf>,
}

impl FileRecord {
    /// Create a record for `path` without touching the filesystem.
    ///
    /// Directory, name and extension are derived from the path; the
    /// modification time is the Unix epoch and the mode bits are zero.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, size: u64, host_machine: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            directory: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            extension: extension_of(&path),
            path,
            size,
            permissions: 0,
            host_machine: host_machine.into(),
            modified_at: DateTime::<Utc>::from(UNIX_EPOCH),
            digests: Digests::default(),
            note: None,
            system_info: None,
            duplicates_of: Vec::new(),
        }
    }

    /// Set the digest for `algorithm`.
    #[must_use]
    pub fn with_digest(mut self, algorithm: HashAlgorithm, hex: impl Into<String>) -> Self {
        self.digests.set(algorithm, hex.into());
        self
    }

    /// Build a record from an absolute path and its metadata.
    ///
    /// Digests are left empty; the collector fills them after reading the
    /// file contents.
    #[must_use]
    pub fn from_metadata(path: PathBuf, metadata: &Metadata, config: &CollectorConfig) -> Self {
        let mut record = Self::new(path, metadata.len(), config.host_machine.clone());
        record.permissions = stat::mode_bits(metadata);
        record.modified_at = modified_or_epoch(&record.path, metadata.modified());
        record.note = config.note.clone();
        if config.system_info {
            record.system_info = RawStat::from_metadata(metadata);
        }
        record
    }

    /// Digest for `algorithm`, if it was computed.
    #[must_use]
    pub fn digest(&self, algorithm: HashAlgorithm) -> Option<&str> {
        self.digests.get(algorithm)
    }
}

/// Modification time, or the Unix epoch when the platform cannot report one.
fn modified_or_epoch(path: &Path, modified: std::io::Result<SystemTime>) -> DateTime<Utc> {
    match modified {
        Ok(time) => DateTime::<Utc>::from(time),
        Err(e) => {
            log::debug!("No modification time for {} ({}), using epoch", path.display(), e);
            DateTime::<Utc>::from(UNIX_EPOCH)
        }
    }
}

/// `.ext` for `a/b.ext`, empty when there is no extension.
///
/// Dotfiles such as `.bashrc` have no extension.
pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

mod lossy_path {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::path::{Path, PathBuf};

    pub fn serialize<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&path.to_string_lossy())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PathBuf, D::Error> {
        String::deserialize(deserializer).map(PathBuf::from)
    }
}

mod lossy_paths {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::path::PathBuf;

    pub fn serialize<S: Serializer>(paths: &[PathBuf], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(paths.len()))?;
        for path in paths {
            seq.serialize_element(&path.to_string_lossy())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<PathBuf>, D::Error> {
        Vec::<String>::deserialize(deserializer)
            .map(|paths| paths.into_iter().map(PathBuf::from).collect())
    }
}
