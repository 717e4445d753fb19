//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Choosing the grouping digest from the enabled algorithms
//! - Grouping records by digest and dropping singletons
//! - Annotating each record with the paths of its duplicates

pub mod groups;

pub use groups::{
    annotate_duplicates, group_by_digest, select_key_algorithm, DuplicateGroup, DuplicateGroups,
    GroupingStats, KEY_PRIORITY,
};
