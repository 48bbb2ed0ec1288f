//! Error types for report generation.
//!
//! Two kinds of failure exist in the engine:
//!
//! - **Data errors** (`MalformedRecord`, `MalformedDocumentation`): a document
//!   lacks the nested keys a computation needs. These are recoverable; the
//!   affected record contributes nothing and the batch continues.
//! - **Contract errors** (`MissingPrefix`): a caller handed the label
//!   resolver a flag that is not issue-prefixed. These propagate.
//!
//! I/O, JSON and configuration errors only occur at the loading edges.
//!
//! # Error Codes
//!
//! - E001-E009: I/O and input decoding errors
//! - E010-E019: record shape errors
//! - E020-E029: configuration errors
//! - E030-E039: caller contract violations

use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - file could not be read
    pub const IO_READ: ErrorCode = ErrorCode("E001");
    /// Input file is not valid JSON / JSON Lines
    pub const INPUT_JSON: ErrorCode = ErrorCode("E002");

    /// Page result is missing expected nested keys
    pub const RECORD_MALFORMED: ErrorCode = ErrorCode("E010");
    /// Documentation record could not be decoded
    pub const DOCUMENTATION_MALFORMED: ErrorCode = ErrorCode("E011");

    /// Configuration could not be loaded or parsed
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");

    /// Flag name passed to the label resolver lacks the issue prefix
    pub const CONTRACT_MISSING_PREFIX: ErrorCode = ErrorCode("E030");

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    /// A page result lacks one of `results`, `accessibility` or `tests`.
    #[error("page result {url} is missing `{missing}`")]
    MalformedRecord { url: String, missing: &'static str },

    /// A documentation payload is present but does not decode.
    #[error("documentation for `{test_id}` is malformed: {message}")]
    MalformedDocumentation { test_id: String, message: String },

    /// The label resolver was called with a flag that is not issue-prefixed.
    #[error("flag `{flag}` does not start with the issue prefix `{prefix}`")]
    MissingPrefix { flag: String, prefix: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },
}

impl ReportError {
    /// Create a malformed-record error for a page.
    #[must_use]
    pub fn malformed(url: impl Into<String>, missing: &'static str) -> Self {
        Self::MalformedRecord {
            url: url.into(),
            missing,
        }
    }

    #[must_use]
    pub fn config(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path,
        }
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedRecord { .. } => ErrorCode::RECORD_MALFORMED,
            Self::MalformedDocumentation { .. } => ErrorCode::DOCUMENTATION_MALFORMED,
            Self::MissingPrefix { .. } => ErrorCode::CONTRACT_MISSING_PREFIX,
            Self::Io { .. } => ErrorCode::IO_READ,
            Self::Json { .. } => ErrorCode::INPUT_JSON,
            Self::Config { .. } => ErrorCode::CONFIG_INVALID,
        }
    }

    /// Whether the batch should skip the offending record and carry on.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MalformedRecord { .. } | Self::MalformedDocumentation { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_categories() {
        assert_eq!(ReportError::malformed("u", "tests").code().as_str(), "E010");
        let err = ReportError::MissingPrefix {
            flag: "lacksLabels".into(),
            prefix: "has".into(),
        };
        assert_eq!(err.code(), ErrorCode::CONTRACT_MISSING_PREFIX);
        assert_eq!(ReportError::config("bad", None).code().to_string(), "E020");
    }

    #[test]
    fn test_only_data_errors_are_recoverable() {
        assert!(ReportError::malformed("https://a.test", "results").is_recoverable());
        assert!(ReportError::MalformedDocumentation {
            test_id: "forms".into(),
            message: "tests is not a list".into(),
        }
        .is_recoverable());
        assert!(!ReportError::MissingPrefix {
            flag: "x".into(),
            prefix: "has".into()
        }
        .is_recoverable());
    }

    #[test]
    fn test_display_names_missing_key() {
        let err = ReportError::malformed("https://a.test/x", "accessibility");
        assert_eq!(
            err.to_string(),
            "page result https://a.test/x is missing `accessibility`"
        );
    }
}
