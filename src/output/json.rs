//! JSON output formatter for inventory records.
//!
//! Records are written in discovery order, either as one JSON array or as one
//! JSON object per line.
//!
//! # Output Schema
//!
//! ```json
//! [
//!   {
//!     "path": "/data/a.txt",
//!     "directory": "/data",
//!     "name": "a.txt",
//!     "size": 5,
//!     "permissions": 33188,
//!     "hostMachine": "build-01",
//!     "extension": ".txt",
//!     "modifiedAt": "2024-03-01T10:00:00Z",
//!     "digests": { "sha256": "2cf24dba..." },
//!     "duplicatesOf": ["/data/b.txt"]
//!   }
//! ]
//! ```
//!
//! # Example
//!
//! ```no_run
//! use dirinfo::output::json::{JsonOutput, OutputFormat};
//! use dirinfo::scanner::{Collector, CollectorConfig};
//! use std::path::Path;
//!
//! let config = CollectorConfig::new("host");
//! let records = Collector::new(&config).collect(Path::new(".")).unwrap();
//!
//! let output = JsonOutput::new(&records, OutputFormat::Lines);
//! let written = output.write_file("inventory").unwrap();
//! println!("Data written to: {}", written.display());
//! ```

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::scanner::FileRecord;

/// Layout of the written record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A single JSON array
    #[default]
    Array,
    /// One JSON object per line
    Lines,
}

/// JSON writer over a finished record set.
#[derive(Debug, Clone, Copy)]
pub struct JsonOutput<'a> {
    records: &'a [FileRecord],
    format: OutputFormat,
    pretty: bool,
}

impl<'a> JsonOutput<'a> {
    /// Create a writer for `records`.
    #[must_use]
    pub fn new(records: &'a [FileRecord], format: OutputFormat) -> Self {
        Self {
            records,
            format,
            pretty: false,
        }
    }

    /// Pretty-print the array layout. Line output is always compact.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Serialize to a string in the configured layout.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, JsonOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| JsonOutputError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Write the records to `writer`.
    ///
    /// The array layout ends with a single newline; the line layout writes a
    /// newline after every record. An empty record set produces `[]` or
    /// nothing respectively.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), JsonOutputError> {
        match self.format {
            OutputFormat::Array => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut *writer, self.records)?;
                } else {
                    serde_json::to_writer(&mut *writer, self.records)?;
                }
                writer.write_all(b"\n")?;
            }
            OutputFormat::Lines => {
                for record in self.records {
                    serde_json::to_writer(&mut *writer, record)?;
                    writer.write_all(b"\n")?;
                }
            }
        }
        Ok(())
    }

    /// Write the records to `<base>.json` and return that path.
    ///
    /// An existing file is truncated.
    ///
    /// # Errors
    ///
    /// Returns [`JsonOutputError::Create`] if the file cannot be created, or a
    /// serialization/I/O error while writing.
    pub fn write_file(&self, base: &str) -> Result<PathBuf, JsonOutputError> {
        let path = output_file_name(base);
        let file = File::create(&path).map_err(|source| JsonOutputError::Create {
            path: path.clone(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;

        log::debug!("Wrote {} records to {}", self.records.len(), path.display());
        Ok(path)
    }
}

/// File name for an output base name: `<base>.json`.
#[must_use]
pub fn output_file_name(base: &str) -> PathBuf {
    PathBuf::from(format!("{base}.json"))
}

/// Parse records written by [`JsonOutput`] in either layout.
///
/// Blank lines are ignored in the line layout.
///
/// # Errors
///
/// Returns an error on malformed JSON or a read failure.
pub fn read_records<R: BufRead>(
    reader: R,
    format: OutputFormat,
) -> Result<Vec<FileRecord>, JsonOutputError> {
    match format {
        OutputFormat::Array => Ok(serde_json::from_reader(reader)?),
        OutputFormat::Lines => {
            let mut records = Vec::new();
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                records.push(serde_json::from_str(&line)?);
            }
            Ok(records)
        }
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),

    /// The output file could not be created
    #[error("Cannot create output file {path}: {source}")]
    Create {
        /// Output path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
