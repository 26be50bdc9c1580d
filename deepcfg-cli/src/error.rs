//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use deepcfg::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Configuration failed to load
    /// - 3: Configuration directory not found
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(lib_err) => match lib_err {
                LibError::DirectoryNotFound { .. } => 3,
                LibError::Io(_) => 5,
                e if e.is_fatal() => 1,
                _ => 6,
            },
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(LibError::SectionsFailed { failures }) => {
                write!(f, "{} configuration section(s) failed to load:", failures.len())?;
                for failure in failures {
                    write!(f, "\n  - {failure}")?;
                }
                Ok(())
            }
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::InvalidArguments(_) => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        // Lookups of user-supplied paths are argument errors
        match e {
            LibError::PathNotFound { path } => {
                CliError::InvalidArguments(format!("no such configuration path: {path}"))
            }
            LibError::UnknownSection { section } => {
                CliError::InvalidArguments(format!("unknown section: {section}"))
            }
            other => CliError::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        let missing_dir = CliError::from(LibError::DirectoryNotFound {
            path: PathBuf::from("config"),
        });
        assert_eq!(missing_dir.exit_code(), 3);

        let failed = CliError::from(LibError::SectionsFailed { failures: vec![] });
        assert_eq!(failed.exit_code(), 1);

        let invalid = CliError::from(LibError::InvalidSectionFile {
            section: "losses".to_string(),
            path: PathBuf::from("config/losses.yaml"),
            reason: "duplicate key: 1".to_string(),
        });
        assert_eq!(invalid.exit_code(), 1);

        let duplicate = CliError::from(LibError::DuplicateKey {
            path: "losses/1".to_string(),
        });
        assert_eq!(duplicate.exit_code(), 6);

        let bad_path = CliError::from(LibError::PathNotFound {
            path: "model/nope".to_string(),
        });
        assert_eq!(bad_path.exit_code(), 4);

        let exists = CliError::from(LibError::FileExists {
            path: PathBuf::from("config/model.yaml"),
        });
        assert_eq!(exists.exit_code(), 6);

        let io = CliError::from(std::io::Error::other("disk full"));
        assert_eq!(io.exit_code(), 5);
    }

    #[test]
    fn test_sections_failed_lists_every_section() {
        let err = CliError::from(LibError::SectionsFailed {
            failures: vec![
                LibError::SectionFileNotFound {
                    section: "model".to_string(),
                    path: PathBuf::from("config/model.yaml"),
                },
                LibError::SectionFileNotFound {
                    section: "losses".to_string(),
                    path: PathBuf::from("config/losses.yaml"),
                },
            ],
        });
        let message = err.to_string();
        assert!(message.contains("'model'"));
        assert!(message.contains("'losses'"));
    }
}
