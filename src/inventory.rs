//! Inventory pipeline: collect, then optionally group duplicates.
//!
//! # Overview
//!
//! [`Inventory`] runs the two passes for one [`RunConfig`]:
//! 1. **Collect**: walk the root and build one record per regular file
//! 2. **Group** (when duplicate detection is on): group by the key digest
//!    and annotate every record with its duplicates
//!
//! Both passes run on the calling thread. The first error aborts the run.
//!
//! # Example
//!
//! ```no_run
//! use dirinfo::config::RunConfig;
//! use dirinfo::inventory::Inventory;
//!
//! let config = RunConfig::for_root(".", "host");
//! let report = Inventory::new(&config).run().unwrap();
//! println!("{} files, {} duplicate groups", report.summary.total_files, report.summary.duplicate_groups);
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytesize::ByteSize;

use crate::config::RunConfig;
use crate::duplicates::{
    annotate_duplicates, group_by_digest, select_key_algorithm, DuplicateGroups, GroupingStats,
};
use crate::logging::PhaseLog;
use crate::progress::{ProgressCallback, PHASE_GROUPING};
use crate::scanner::{Collector, FileRecord, HashAlgorithm, ScanError};

/// Summary of a finished run.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Number of records collected
    pub total_files: usize,
    /// Total size of all collected files in bytes
    pub total_size: u64,
    /// Algorithm used as the grouping key, if grouping ran
    pub key_algorithm: Option<HashAlgorithm>,
    /// Number of retained duplicate groups
    pub duplicate_groups: usize,
    /// Number of records belonging to a duplicate group
    pub duplicate_files: usize,
    /// Space freed by keeping one copy per group
    pub reclaimable_space: u64,
    /// Records left out of grouping for lack of the key digest
    pub unkeyed_files: usize,
    /// Duration of the collection pass
    pub walk_duration: Duration,
    /// Duration of the grouping pass
    pub grouping_duration: Duration,
    /// Duration of the entire run
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Format total size as human-readable string.
    #[must_use]
    pub fn total_size_display(&self) -> String {
        ByteSize::b(self.total_size).to_string()
    }

    /// Format reclaimable space as human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize::b(self.reclaimable_space).to_string()
    }

    /// Percentage of the total size taken by redundant copies.
    #[must_use]
    pub fn wasted_percentage(&self) -> f64 {
        if self.total_size == 0 {
            0.0
        } else {
            (self.reclaimable_space as f64 / self.total_size as f64) * 100.0
        }
    }

    fn record_grouping(&mut self, groups: &DuplicateGroups, stats: &GroupingStats) {
        self.key_algorithm = groups.algorithm();
        self.duplicate_groups = stats.duplicate_groups;
        self.duplicate_files = stats.duplicate_records;
        self.unkeyed_files = stats.unkeyed_records;
        self.reclaimable_space = groups.wasted_space();
    }
}

/// Output of a run.
#[derive(Debug, Clone)]
pub struct InventoryReport {
    /// Records in discovery order, annotated when grouping ran
    pub records: Vec<FileRecord>,
    /// Retained duplicate groups, when grouping ran
    pub groups: Option<DuplicateGroups>,
    /// Run statistics
    pub summary: ScanSummary,
}

/// Runs collection and grouping for one configuration.
pub struct Inventory<'a> {
    config: &'a RunConfig,
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl<'a> Inventory<'a> {
    /// Create an inventory run.
    #[must_use]
    pub fn new(config: &'a RunConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Report progress to `callback`.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Run the inventory.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScanError`] met while collecting.
    pub fn run(&self) -> Result<InventoryReport, ScanError> {
        let start_time = Instant::now();
        let mut summary = ScanSummary::default();

        let mut collector = Collector::new(&self.config.collector);
        if let Some(ref progress) = self.progress {
            collector = collector.with_progress(progress.clone());
        }

        let records = collector.collect(&self.config.root)?;
        summary.walk_duration = start_time.elapsed();
        summary.total_files = records.len();
        summary.total_size = records.iter().map(|r| r.size).sum();
        log::debug!(
            "Collection complete: {} files, {} in {:?}",
            summary.total_files,
            summary.total_size_display(),
            summary.walk_duration
        );

        let (records, groups) = if self.config.detect_duplicates {
            self.group(records, &mut summary)
        } else {
            (records, None)
        };

        summary.scan_duration = start_time.elapsed();
        Ok(InventoryReport {
            records,
            groups,
            summary,
        })
    }

    fn group(
        &self,
        records: Vec<FileRecord>,
        summary: &mut ScanSummary,
    ) -> (Vec<FileRecord>, Option<DuplicateGroups>) {
        let Some(algorithm) = select_key_algorithm(&self.config.collector.hash_options) else {
            log::warn!("Duplicate detection needs a digest; none enabled, skipping");
            return (records, None);
        };

        let phase = PhaseLog::start(
            PHASE_GROUPING,
            format_args!("{} records by {}", records.len(), algorithm),
        );
        if let Some(ref progress) = self.progress {
            progress.on_phase_start(PHASE_GROUPING, records.len());
        }

        let (groups, stats) = group_by_digest(&records, algorithm);
        let records = annotate_duplicates(records, &groups);

        if let Some(ref progress) = self.progress {
            progress.on_progress(records.len(), "");
            progress.on_phase_end(PHASE_GROUPING);
        }

        summary.record_grouping(&groups, &stats);
        summary.grouping_duration =
            phase.finish(format_args!("{} duplicate groups", stats.duplicate_groups));
        if stats.unkeyed_records > 0 {
            log::warn!(
                "{} files had no {} digest and were not grouped",
                stats.unkeyed_records,
                algorithm
            );
        }

        (records, Some(groups))
    }
}
