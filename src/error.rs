//! Error types for search-wrapped.
//!
//! This module provides comprehensive error handling following the thiserror pattern.
//! Error types are designed to be informative, actionable, and suitable for both
//! programmatic handling and user-facing display.

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for search-wrapped operations.
#[derive(Error, Debug)]
pub enum WrappedError {
    /// No recognized search entries were extracted from the input.
    ///
    /// This is the single analysis-level failure: parsing degrades silently
    /// through its tiers, and only aggregation over an empty event list
    /// surfaces to the user.
    #[error("No Google searches found in the history file")]
    NoSearchesFound,

    /// No user prompts were extracted from a conversations export.
    #[error("No user prompts found in the conversations export")]
    NoPromptsFound,

    /// Structured input failed to parse.
    #[error("Failed to parse {context}: {message}")]
    ParseError {
        /// What was being parsed.
        context: String,
        /// Human-readable error message.
        message: String,
        /// Underlying serde_json error, if available.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Permission denied when accessing a file.
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// Path where access was denied.
        path: PathBuf,
    },

    /// Input file exceeds the configured size cap.
    #[error("File too large: {path} ({size} bytes, maximum {max_size})")]
    FileTooLarge {
        /// Path to the oversized file.
        path: PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Configured maximum in bytes.
        max_size: u64,
    },

    /// I/O error.
    #[error("I/O error: {context}")]
    IoError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {context}")]
    SerializationError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying serde_json error.
        #[source]
        source: serde_json::Error,
    },

    /// Report output error.
    #[error("Report output failed: {message}")]
    ReportError {
        /// Human-readable error message.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Human-readable error message.
        message: String,
    },

    /// Invalid configuration file contents.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Human-readable error message.
        message: String,
    },

    /// Invalid argument.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the invalid argument.
        name: String,
        /// Reason why the argument is invalid.
        reason: String,
    },

    /// Unsupported operation or feature.
    #[error("Unsupported: {feature}")]
    Unsupported {
        /// Name of the unsupported feature.
        feature: String,
    },
}

impl WrappedError {
    /// Create a new parse error.
    #[must_use]
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            context: context.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a new parse error with source.
    #[must_use]
    pub fn parse_with_source(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::ParseError {
            context: context.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create a new I/O error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            context: context.into(),
            source,
        }
    }

    /// Create a new report error.
    #[must_use]
    pub fn report(message: impl Into<String>) -> Self {
        Self::ReportError {
            message: message.into(),
        }
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NoSearchesFound | Self::NoPromptsFound => 2,
            Self::FileNotFound { .. } => 3,
            Self::PermissionDenied { .. } => 4,
            Self::ConfigError { .. } | Self::InvalidConfig { .. } => 5,
            Self::ReportError { .. } => 6,
            Self::ParseError { .. } | Self::FileTooLarge { .. } => 65,
            Self::IoError { .. } => 74,
            _ => 1,
        }
    }

    /// Check if this error is recoverable by supplying a different input file.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoSearchesFound
                | Self::NoPromptsFound
                | Self::ParseError { .. }
                | Self::FileTooLarge { .. }
        )
    }
}

/// Result type alias for search-wrapped operations.
pub type Result<T> = std::result::Result<T, WrappedError>;

impl From<std::io::Error> for WrappedError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            context: "I/O operation failed".to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for WrappedError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            context: "JSON operation failed".to_string(),
            source: err,
        }
    }
}

/// Exit codes for CLI operations.
pub mod exit_codes {
    /// Operation completed successfully.
    pub const EXIT_SUCCESS: i32 = 0;
    /// General/unspecified error.
    pub const EXIT_GENERAL_ERROR: i32 = 1;
    /// No search entries or prompts were found in the input.
    pub const EXIT_NO_RESULTS: i32 = 2;
    /// Specified file not found.
    pub const EXIT_FILE_NOT_FOUND: i32 = 3;
    /// Insufficient permissions.
    pub const EXIT_PERMISSION_DENIED: i32 = 4;
    /// Invalid configuration.
    pub const EXIT_CONFIG_ERROR: i32 = 5;
    /// Report output failed.
    pub const EXIT_REPORT_ERROR: i32 = 6;
    /// Input data format error (BSD standard).
    pub const EXIT_DATA_ERROR: i32 = 65;
    /// I/O error (BSD standard).
    pub const EXIT_IO_ERROR: i32 = 74;
}
