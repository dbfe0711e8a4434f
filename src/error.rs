//! Error types for the huddle CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=storage, 3=not_found, 4=validation, 6=import)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use thiserror::Error;

/// Result type alias for huddle operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Storage (exit 2)
    StorageError,

    // Not Found (exit 3)
    CaseNotFound,
    SessionNotFound,

    // Validation (exit 4)
    InvalidIssueType,
    InvalidStatus,
    InvalidArgument,

    // Import (exit 6)
    ImportError,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::StorageError => "STORAGE_ERROR",
            Self::CaseNotFound => "CASE_NOT_FOUND",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::InvalidIssueType => "INVALID_ISSUE_TYPE",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::ImportError => "IMPORT_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::StorageError => 2,
            Self::CaseNotFound | Self::SessionNotFound => 3,
            Self::InvalidIssueType | Self::InvalidStatus | Self::InvalidArgument => 4,
            Self::ImportError => 6,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in huddle CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Case not found: #{index} ({count} cases on file)")]
    CaseNotFound { index: usize, count: usize },

    #[error("Session not found: case #{case} has {count} sessions, asked for #{index}")]
    SessionNotFound {
        case: usize,
        index: usize,
        count: usize,
    },

    #[error("Invalid issue type: '{input}'")]
    InvalidIssueType {
        input: String,
        suggestion: Option<String>,
    },

    #[error("Invalid session status: '{input}'")]
    InvalidStatus {
        input: String,
        suggestion: Option<String>,
    },

    #[error("CSV import failed at line {line}: {reason}")]
    CsvImport { line: usize, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::CaseNotFound { .. } => ErrorCode::CaseNotFound,
            Self::SessionNotFound { .. } => ErrorCode::SessionNotFound,
            Self::InvalidIssueType { .. } => ErrorCode::InvalidIssueType,
            Self::InvalidStatus { .. } => ErrorCode::InvalidStatus,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::CsvImport { .. } => ErrorCode::ImportError,
            Self::Storage(_) => ErrorCode::StorageError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint for humans and scripts.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::CaseNotFound { count, .. } => {
                if *count == 0 {
                    Some("No cases on file. Add one with `huddle case add`.".to_string())
                } else {
                    Some(format!(
                        "Indices are 1-{count} as shown in the `#` column of `huddle case list`."
                    ))
                }
            }

            Self::SessionNotFound { case, count, .. } => {
                if *count == 0 {
                    Some(format!(
                        "Case #{case} has no sessions. Add one with `huddle session add {case}`."
                    ))
                } else {
                    Some(format!(
                        "Use `huddle session show {case}` to see that case's sessions."
                    ))
                }
            }

            Self::InvalidIssueType { suggestion, .. } => {
                let mut hint =
                    String::from("Valid issue types: Bug, Feature Request, Support, Other.");
                if let Some(s) = suggestion {
                    hint.push_str(&format!(" Did you mean '{s}'?"));
                }
                Some(hint)
            }

            Self::InvalidStatus { suggestion, .. } => {
                let mut hint = String::from(
                    "Valid statuses: Open, In Progress, Pending Customer, \
                     Pending Development, Pending QA, Resolved, Closed, Other.",
                );
                if let Some(s) = suggestion {
                    hint.push_str(&format!(" Did you mean '{s}'?"));
                }
                Some(hint)
            }

            Self::CsvImport { .. } => Some(
                "The import was aborted; no cases were changed. Fix the file and retry."
                    .to_string(),
            ),

            Self::Storage(_) => Some(
                "Changes applied this run were not persisted and will not survive a restart."
                    .to_string(),
            ),

            Self::InvalidArgument(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Config(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, exit code, and optional recovery hint.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
