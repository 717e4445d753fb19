//! Digest-based duplicate grouping.
//!
//! # Overview
//!
//! Records are grouped by one chosen digest. Groups with a single member are
//! dropped, so every retained group is a set of two or more files with
//! identical content. Annotation then produces a new record set in which each
//! record lists the paths of the other members of its group.
//!
//! Records that lack the chosen digest take no part in grouping.
//!
//! # Example
//!
//! ```
//! use dirinfo::duplicates::{annotate_duplicates, group_by_digest};
//! use dirinfo::scanner::{FileRecord, HashAlgorithm};
//!
//! let records = vec![
//!     FileRecord::new("/a", 1, "h").with_digest(HashAlgorithm::Sha1, "x"),
//!     FileRecord::new("/b", 1, "h").with_digest(HashAlgorithm::Sha1, "x"),
//!     FileRecord::new("/c", 1, "h").with_digest(HashAlgorithm::Sha1, "y"),
//! ];
//!
//! let (groups, stats) = group_by_digest(&records, HashAlgorithm::Sha1);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(stats.eliminated_unique, 1);
//!
//! let annotated = annotate_duplicates(records, &groups);
//! assert_eq!(annotated[0].duplicates_of, vec![std::path::PathBuf::from("/b")]);
//! assert!(annotated[2].duplicates_of.is_empty());
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::scanner::{FileRecord, HashAlgorithm, HashOptions};

/// Preferred grouping key order, strongest first.
pub const KEY_PRIORITY: [HashAlgorithm; 3] = [
    HashAlgorithm::Sha256,
    HashAlgorithm::Sha1,
    HashAlgorithm::Md5,
];

/// Pick the grouping digest from the enabled algorithms.
///
/// Returns the first enabled algorithm in [`KEY_PRIORITY`], or `None` when no
/// digest is enabled.
#[must_use]
pub fn select_key_algorithm(options: &HashOptions) -> Option<HashAlgorithm> {
    KEY_PRIORITY
        .into_iter()
        .find(|algorithm| options.is_enabled(*algorithm))
}

/// Files sharing one digest value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// Hex digest shared by every member
    pub digest: String,
    /// Size of the first member in bytes
    pub size: u64,
    /// Member paths in record-set order
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of duplicate copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Total wasted space (all copies minus one).
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }
}

/// Retained duplicate groups for one key algorithm.
///
/// Groups are kept in order of first appearance in the record set.
#[derive(Debug, Clone, Default)]
pub struct DuplicateGroups {
    algorithm: Option<HashAlgorithm>,
    groups: Vec<DuplicateGroup>,
    index: HashMap<String, usize>,
}

impl DuplicateGroups {
    /// Algorithm whose digest keyed the groups.
    #[must_use]
    pub fn algorithm(&self) -> Option<HashAlgorithm> {
        self.algorithm
    }

    /// Number of retained groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group was retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group for `digest`, if it has two or more members.
    #[must_use]
    pub fn get(&self, digest: &str) -> Option<&DuplicateGroup> {
        self.index.get(digest).map(|&i| &self.groups[i])
    }

    /// Iterate over the groups in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.iter()
    }

    /// Space that removing all but one copy of every group would free.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.groups.iter().map(DuplicateGroup::wasted_space).sum()
    }
}

/// Statistics from a grouping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Records offered to the grouper
    pub total_records: usize,
    /// Records without the key digest, left out of grouping
    pub unkeyed_records: usize,
    /// Distinct digest values seen
    pub unique_digests: usize,
    /// Records whose digest no other record shares
    pub eliminated_unique: usize,
    /// Groups with 2+ members
    pub duplicate_groups: usize,
    /// Records that belong to a retained group
    pub duplicate_records: usize,
}

impl GroupingStats {
    /// Percentage of keyed records that turned out unique.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        let keyed = self.total_records - self.unkeyed_records;
        if keyed == 0 {
            0.0
        } else {
            (self.eliminated_unique as f64 / keyed as f64) * 100.0
        }
    }
}

/// Group records by the digest of `algorithm`.
///
/// One linear pass builds digest → member paths; singleton groups are then
/// dropped. Records with no (or an empty) digest for `algorithm` are counted
/// in [`GroupingStats::unkeyed_records`] and otherwise ignored.
#[must_use]
pub fn group_by_digest(
    records: &[FileRecord],
    algorithm: HashAlgorithm,
) -> (DuplicateGroups, GroupingStats) {
    let mut all_groups: Vec<DuplicateGroup> = Vec::new();
    let mut all_index: HashMap<&str, usize> = HashMap::new();
    let mut stats = GroupingStats {
        total_records: records.len(),
        ..GroupingStats::default()
    };

    for record in records {
        let digest = match record.digest(algorithm) {
            Some(d) if !d.is_empty() => d,
            _ => {
                stats.unkeyed_records += 1;
                log::trace!("No {} digest: {}", algorithm, record.path.display());
                continue;
            }
        };

        let slot = *all_index.entry(digest).or_insert_with(|| {
            all_groups.push(DuplicateGroup {
                digest: digest.to_string(),
                size: record.size,
                paths: Vec::new(),
            });
            all_groups.len() - 1
        });
        all_groups[slot].paths.push(record.path.clone());
    }

    stats.unique_digests = all_groups.len();

    let mut retained = DuplicateGroups {
        algorithm: Some(algorithm),
        ..DuplicateGroups::default()
    };
    for group in all_groups {
        if group.len() < 2 {
            stats.eliminated_unique += 1;
            log::trace!("Unique {} {}", algorithm, group.digest);
            continue;
        }
        stats.duplicate_groups += 1;
        stats.duplicate_records += group.len();
        log::debug!(
            "Duplicate group {}: {} files of {} bytes",
            group.digest,
            group.len(),
            group.size
        );
        retained
            .index
            .insert(group.digest.clone(), retained.groups.len());
        retained.groups.push(group);
    }

    log::info!("Found {} Duplicate Items", stats.duplicate_groups);
    log::debug!(
        "Grouped {} records by {}: {} groups, {:.1}% unique",
        stats.total_records,
        algorithm,
        stats.duplicate_groups,
        stats.elimination_rate()
    );

    (retained, stats)
}

/// Attach duplicate paths to every record.
///
/// Returns a new record set in the same order. A record in a retained group
/// gets the other members' paths in group order; its own path is never
/// listed. Every other record ends up with an empty `duplicates_of`.
#[must_use]
pub fn annotate_duplicates(records: Vec<FileRecord>, groups: &DuplicateGroups) -> Vec<FileRecord> {
    let Some(algorithm) = groups.algorithm() else {
        return records
            .into_iter()
            .map(|mut record| {
                record.duplicates_of.clear();
                record
            })
            .collect();
    };

    records
        .into_iter()
        .map(|mut record| {
            record.duplicates_of = record
                .digest(algorithm)
                .and_then(|digest| groups.get(digest))
                .map(|group| {
                    group
                        .paths
                        .iter()
                        .filter(|p| **p != record.path)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            record
        })
        .collect()
}
