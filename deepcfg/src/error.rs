//! Error types for the deepcfg library.
//!
//! This module provides the error hierarchy for namespace access, schema
//! validation and configuration loading, using `thiserror` for ergonomic
//! error handling.
//!
//! Only conditions the engine cannot recover from are errors. Missing values
//! and values of the wrong type are repaired by the validator and reported as
//! [`Correction`](crate::validator::Correction)s instead.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a deepcfg error.
///
/// # Examples
///
/// ```
/// use deepcfg::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(10)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the deepcfg library.
#[derive(Debug, Error)]
pub enum Error {
    /// A path-addressed read targeted a node that does not exist.
    #[error("path not found: {path}")]
    PathNotFound {
        /// The path that was not found, joined with `/`.
        path: String,
    },

    /// Two keys of one mapping are the same once rendered as strings,
    /// e.g. `1` and `'1'`.
    #[error("duplicate key: {path}")]
    DuplicateKey {
        /// The repeated key's path, joined with `/`.
        path: String,
    },

    /// A path resolved to a value where a mapping was required.
    #[error("not a mapping: {path}")]
    NotAMapping {
        /// The offending path, joined with `/`.
        path: String,
    },

    /// The configuration directory does not exist.
    #[error("configuration directory not found: {}", path.display())]
    DirectoryNotFound {
        /// The directory that was looked up.
        path: PathBuf,
    },

    /// A declared configuration section has no file in the directory.
    #[error("configuration file not found for section '{section}': {}", path.display())]
    SectionFileNotFound {
        /// The section name.
        section: String,
        /// The expected file location.
        path: PathBuf,
    },

    /// A section file exists but could not be read or parsed.
    #[error("invalid configuration file for section '{section}' ({}): {reason}", path.display())]
    InvalidSectionFile {
        /// The section name.
        section: String,
        /// The file location.
        path: PathBuf,
        /// Why the file was rejected.
        reason: String,
    },

    /// One or more sections failed to load.
    #[error("{} configuration section(s) failed to load", failures.len())]
    SectionsFailed {
        /// The individual failures, in section declaration order.
        failures: Vec<Error>,
    },

    /// A section name that the schema does not declare.
    #[error("unknown configuration section: {section}")]
    UnknownSection {
        /// The requested section name.
        section: String,
    },

    /// Refused to overwrite an existing file.
    #[error("file already exists: {}", path.display())]
    FileExists {
        /// The existing file.
        path: PathBuf,
    },

    /// A YAML (de)serialization error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if the error is a strict path lookup failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use deepcfg::Error;
    ///
    /// let err = Error::PathNotFound { path: "model/name".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if the error is fatal for a configuration load.
    ///
    /// Fatal errors leave the live configuration empty.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DirectoryNotFound { .. }
                | Self::SectionFileNotFound { .. }
                | Self::InvalidSectionFile { .. }
                | Self::SectionsFailed { .. }
        )
    }
}
