//! Unified error type for the alfie library.
//!
//! Library code returns `AlfieError`; the CLI wraps it in `anyhow::Result`
//! for user-facing context.
//!
//! # Error Categories
//!
//! - **Io**: File system operations (open, read, write, create_dir)
//! - **Format**: Unrecognized sequence file extension
//! - **InvalidSequence**: A sequence contains symbols outside `ACGTN-`
//! - **Validation**: Invalid parameters or data (k size, batch size, label range)
//! - **Classifier**: The scoring model rejected its input or returned a bad shape
//! - **Config**: Model or run configuration files that cannot be used

use std::fmt;
use std::path::PathBuf;

use crate::constants::ACCEPTED_EXTENSIONS;

/// Unified error type for the alfie library.
#[derive(Debug)]
pub enum AlfieError {
    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: std::io::Error,
    },

    /// File extension does not name a supported sequence format.
    Format { path: PathBuf, detail: String },

    /// Sequence contains a symbol outside the accepted nucleotide set.
    InvalidSequence {
        name: String,
        position: usize,
        symbol: char,
    },

    /// Validation error (invalid parameters, data invariants).
    Validation(String),

    /// The external classifier failed or produced unusable scores.
    Classifier(String),

    /// Model or run configuration could not be used.
    Config { path: PathBuf, detail: String },
}

impl fmt::Display for AlfieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlfieError::Io {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "I/O error during {} on '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            AlfieError::Format { path, detail } => {
                write!(f, "Unsupported file '{}': {}", path.display(), detail)
            }
            AlfieError::InvalidSequence {
                name,
                position,
                symbol,
            } => {
                write!(
                    f,
                    "Invalid sequence '{}': symbol {:?} at position {} is not one of A, C, G, T, N, -",
                    name, symbol, position
                )
            }
            AlfieError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AlfieError::Classifier(msg) => write!(f, "Classifier error: {}", msg),
            AlfieError::Config { path, detail } => {
                write!(f, "Invalid configuration in '{}': {}", path.display(), detail)
            }
        }
    }
}

impl std::error::Error for AlfieError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AlfieError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AlfieError {
    fn from(err: std::io::Error) -> Self {
        AlfieError::Io {
            path: PathBuf::new(),
            operation: "unknown",
            source: err,
        }
    }
}

/// Convenience type alias for Results using AlfieError.
pub type Result<T> = std::result::Result<T, AlfieError>;

// ============================================================================
// Helper constructors
// ============================================================================

impl AlfieError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, operation: &'static str, source: std::io::Error) -> Self {
        AlfieError::Io {
            path: path.into(),
            operation,
            source,
        }
    }

    /// Create a format error for an unrecognized extension.
    ///
    /// The message always names the accepted extension list.
    pub fn unsupported_format(path: impl Into<PathBuf>) -> Self {
        AlfieError::Format {
            path: path.into(),
            detail: format!(
                "input file must be in fasta or fastq format. Accepted file extensions: {} (optionally followed by .gz)",
                ACCEPTED_EXTENSIONS.join(", ")
            ),
        }
    }

    /// Create an invalid-sequence error.
    pub fn invalid_sequence(name: impl Into<String>, position: usize, symbol: char) -> Self {
        AlfieError::InvalidSequence {
            name: name.into(),
            position,
            symbol,
        }
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        AlfieError::Validation(msg.into())
    }

    /// Create a classifier error.
    pub fn classifier(msg: impl Into<String>) -> Self {
        AlfieError::Classifier(msg.into())
    }

    /// Create a configuration error.
    pub fn config(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        AlfieError::Config {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
