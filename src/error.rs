//! Error types for `schedcfg`
//!
//! Configuration failures are reported through [`ConfigError`], whose
//! variants follow the loader's failure taxonomy. [`SchedcfgError`] wraps
//! everything the command-line front end can fail with and maps it to a
//! process exit code.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `schedcfg` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (unknown key, rule violation)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `schedcfg` operations.
#[derive(Debug, Error)]
pub enum SchedcfgError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchedcfgError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(ConfigError::SourceUnavailable { .. }) | Self::Io(_) => {
                ExitCode::IO_ERROR
            }
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// Every variant names the source it came from and, where one exists, the
/// offending key, so the message alone is enough to fix the input.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source could not be opened or read
    #[error("failed to open {path}: {source}")]
    SourceUnavailable {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The source exceeds the configured size limit
    #[error("{path} exceeds the {limit} byte size limit (read {size} bytes)")]
    SourceTooLarge {
        /// Path to the configuration file
        path: PathBuf,
        /// Bytes seen before giving up; a lower bound for unsized sources
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// The source was read but is not UTF-8 text
    #[error("{path} is not valid UTF-8 (first invalid byte at offset {offset})")]
    InvalidEncoding {
        /// Path to the configuration file
        path: PathBuf,
        /// Byte offset of the first invalid sequence
        offset: usize,
    },

    /// A data line named a key outside the registry
    #[error(
        "unknown parameter in {path} at line {line}: {key}{}",
        .suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default()
    )]
    UnknownKey {
        /// Path to the configuration file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// The unrecognized key
        key: String,
        /// Closest recognized key, if any is near enough
        suggestion: Option<String>,
    },

    /// A numeric value lies outside its declared bound
    #[error("invalid {key} in {path} at line {line}: got '{value}', must be {expected}")]
    RangeViolation {
        /// Path to the configuration file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Key whose value is out of range
        key: String,
        /// The value as written
        value: String,
        /// Description of the accepted range
        expected: String,
    },

    /// A value has the wrong shape: not an integer, not a power of two,
    /// or not one of the allowed literals
    #[error("invalid {key} in {path} at line {line}: got '{value}', must be {expected}")]
    FormatViolation {
        /// Path to the configuration file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Key whose value is malformed
        key: String,
        /// The value as written
        value: String,
        /// Description of the accepted format
        expected: String,
    },

    /// Two fields violate an ordering rule between them
    #[error("invalid {key} in {path}: {message}")]
    CrossFieldViolation {
        /// Path to the configuration file
        path: PathBuf,
        /// The dependent key
        key: String,
        /// The bounding key it is compared against
        companion: String,
        /// Human-readable description including both values
        message: String,
    },

    /// Warnings were raised while strict mode was enabled
    #[error("{path} failed strict validation: {count} warning(s), first: {first}")]
    Strict {
        /// Path to the configuration file
        path: PathBuf,
        /// Number of warnings raised
        count: usize,
        /// Rendering of the first warning
        first: String,
    },

    /// A configuration was already installed process-wide
    #[error("a configuration is already installed for this process")]
    AlreadyInstalled,
}

/// Coarse classification of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// File missing, unreadable, too large, or not text
    SourceUnavailable,
    /// Key outside the registry
    UnknownKey,
    /// Value outside its bound
    RangeViolation,
    /// Value of the wrong shape
    FormatViolation,
    /// Ordering rule between two fields broken
    CrossFieldViolation,
    /// Warnings rejected by strict mode
    Strict,
    /// Process-wide slot already filled
    AlreadyInstalled,
}

impl ConfigError {
    /// Returns the taxonomy bucket this error falls into.
    #[must_use]
    pub const fn kind(&self) -> ConfigErrorKind {
        match self {
            Self::SourceUnavailable { .. }
            | Self::SourceTooLarge { .. }
            | Self::InvalidEncoding { .. } => ConfigErrorKind::SourceUnavailable,
            Self::UnknownKey { .. } => ConfigErrorKind::UnknownKey,
            Self::RangeViolation { .. } => ConfigErrorKind::RangeViolation,
            Self::FormatViolation { .. } => ConfigErrorKind::FormatViolation,
            Self::CrossFieldViolation { .. } => ConfigErrorKind::CrossFieldViolation,
            Self::Strict { .. } => ConfigErrorKind::Strict,
            Self::AlreadyInstalled => ConfigErrorKind::AlreadyInstalled,
        }
    }

    /// Returns the key the error is about, if it concerns a single key.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::UnknownKey { key, .. }
            | Self::RangeViolation { key, .. }
            | Self::FormatViolation { key, .. }
            | Self::CrossFieldViolation { key, .. } => Some(key.as_str()),
            _ => None,
        }
    }
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `schedcfg` operations.
pub type Result<T> = std::result::Result<T, SchedcfgError>;

// ============================================================================
// Tests
// ============================================================================
