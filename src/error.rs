//! Structured error handling and exit codes.

use serde::Serialize;

use crate::scanner::ScanError;

/// Exit codes for the dirinfo application.
///
/// - 0: Success (inventory written)
/// - 1: General error (unexpected failure, unreadable file, unwritable output)
/// - 2: Invalid root path (missing, unresolvable or not a directory)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the inventory was written.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// The root path could not be used.
    InvalidPath = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DI000",
            Self::GeneralError => "DI001",
            Self::InvalidPath => "DI002",
        }
    }

    /// Classify an application error.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ScanError>() {
            Some(scan) if scan.is_root_error() => Self::InvalidPath,
            _ => Self::GeneralError,
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DI001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Messages of the underlying causes, outermost first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
            causes: err.chain().skip(1).map(ToString::to_string).collect(),
        }
    }
}
