//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct, a lazy single-pass traversal of
//! a directory tree. It yields every entry below the root (directories,
//! regular files, symlinks and special files alike) together with its
//! `symlink_metadata`. Deciding what to record is left to the
//! [`Collector`](super::Collector).
//!
//! Entries are sorted by file name within each directory and symlinks are
//! never followed, so two walks of an unchanged tree yield the same sequence.
//!
//! # Example
//!
//! ```no_run
//! use dirinfo::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/var/log"));
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(entry) if entry.is_regular_file() => println!("{}", entry.path.display()),
//!         Ok(_) => {}
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

use std::fs::Metadata;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::ScanError;

/// One filesystem entry found during the walk.
#[derive(Debug, Clone)]
pub struct WalkEntry {
    /// Full path of the entry
    pub path: PathBuf,
    /// Metadata of the entry itself, not of a symlink target
    pub metadata: Metadata,
}

impl WalkEntry {
    /// Whether the entry is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir()
    }

    /// Whether the entry is a regular file.
    #[must_use]
    pub fn is_regular_file(&self) -> bool {
        self.metadata.file_type().is_file()
    }

    /// Whether the entry is a symbolic link.
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        self.metadata.file_type().is_symlink()
    }
}

/// Lazy directory walker.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
}

impl Walker {
    /// Create a new walker for the given root.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Walk the directory tree, yielding every entry below the root.
    ///
    /// The root itself is not yielded. A failure to read a directory or an
    /// entry's metadata is yielded as [`ScanError::Traversal`]; callers that
    /// treat it as fatal simply stop consuming.
    pub fn walk(&self) -> impl Iterator<Item = Result<WalkEntry, ScanError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(move |entry_result| {
                let entry = entry_result.map_err(|e| self.handle_walkdir_error(e))?;
                let metadata = entry.metadata().map_err(|e| self.handle_walkdir_error(e))?;
                Ok(WalkEntry {
                    path: entry.into_path(),
                    metadata,
                })
            })
    }

    /// Convert a walkdir error into a traversal error.
    fn handle_walkdir_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        log::warn!("Walker error for {}: {}", path.display(), error);
        ScanError::Traversal {
            path,
            source: std::io::Error::from(error),
        }
    }
}
