//! Record collection over a directory tree.
//!
//! The [`Collector`] consumes a [`Walker`] and turns every regular file into a
//! [`FileRecord`]. Directories are descended without being recorded and every
//! other kind of entry (symlinks, sockets, devices, fifos) is skipped.
//!
//! Any error is fatal: the first traversal or hashing failure aborts the
//! whole collection and nothing is returned.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::hasher::Hasher;
use super::record::FileRecord;
use super::walker::Walker;
use super::{CollectorConfig, ScanError};
use crate::logging::{log_collected, PhaseLog};
use crate::progress::{ProgressCallback, PHASE_COLLECTING};

/// Resolve a root path to an absolute directory.
///
/// Relative paths are resolved against the current working directory. The
/// result is not canonicalized, so symlinked roots keep their given spelling.
///
/// # Errors
///
/// - [`ScanError::PathResolution`] if the path cannot be made absolute or
///   does not exist
/// - [`ScanError::NotADirectory`] if it exists but is not a directory
pub fn resolve_root(root: &Path) -> Result<PathBuf, ScanError> {
    let absolute = std::path::absolute(root).map_err(|source| ScanError::PathResolution {
        path: root.to_path_buf(),
        source,
    })?;

    let metadata = std::fs::metadata(&absolute).map_err(|source| ScanError::PathResolution {
        path: root.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(absolute));
    }

    Ok(absolute)
}

/// Builds the record set for one directory tree.
pub struct Collector<'a> {
    config: &'a CollectorConfig,
    hasher: Hasher,
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl<'a> Collector<'a> {
    /// Create a collector for the given run settings.
    #[must_use]
    pub fn new(config: &'a CollectorConfig) -> Self {
        Self {
            config,
            hasher: Hasher::new(),
            progress: None,
        }
    }

    /// Report progress to `callback`.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Collect one record per regular file under `root`, in walk order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScanError`] met; no partial record set is produced.
    pub fn collect(&self, root: &Path) -> Result<Vec<FileRecord>, ScanError> {
        let root = resolve_root(root)?;
        let phase = PhaseLog::start(PHASE_COLLECTING, root.display());

        if let Some(ref progress) = self.progress {
            progress.on_phase_start(PHASE_COLLECTING, 0);
        }

        let result = self.collect_from(&Walker::new(&root));

        if let Some(ref progress) = self.progress {
            progress.on_phase_end(PHASE_COLLECTING);
        }

        let records = result?;
        phase.finish(format_args!("{} files", records.len()));
        Ok(records)
    }

    fn collect_from(&self, walker: &Walker) -> Result<Vec<FileRecord>, ScanError> {
        let options = &self.config.hash_options;
        let log_algorithm = options.enabled().last();
        let mut records = Vec::new();

        for entry in walker.walk() {
            let entry = entry?;

            if entry.is_dir() {
                continue;
            }
            if !entry.is_regular_file() {
                let kind = if entry.is_symlink() { "symlink" } else { "special file" };
                log::trace!("Skipping {}: {}", kind, entry.path.display());
                continue;
            }

            let mut record = FileRecord::from_metadata(entry.path, &entry.metadata, self.config);
            if !options.is_empty() {
                record.digests = self.hasher.hash_file(&record.path, options)?;
            }
            log_collected(&record, log_algorithm);

            records.push(record);
            if let Some(ref progress) = self.progress {
                let last = &records[records.len() - 1];
                progress.on_progress(records.len(), &last.path.to_string_lossy());
            }
        }

        Ok(records)
    }
}
