//! Output formatters for inventory results.
//!
//! This module provides:
//! - JSON output of the record set, as an array or one object per line
//! - The human-readable summary printed at the end of a run
//!
//! # Example
//!
//! ```no_run
//! use dirinfo::config::RunConfig;
//! use dirinfo::inventory::Inventory;
//! use dirinfo::output::JsonOutput;
//!
//! let config = RunConfig::for_root(".", "host");
//! let report = Inventory::new(&config).run().unwrap();
//!
//! let output = JsonOutput::new(&report.records, config.format);
//! println!("{}", output.to_json().unwrap());
//! ```

pub mod json;
pub mod summary;

// Re-export main types
pub use json::{read_records, JsonOutput, JsonOutputError, OutputFormat};
pub use summary::write_summary;
