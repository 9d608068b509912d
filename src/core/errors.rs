//! Error types for depval
//!
//! This module defines the errors that can occur while parsing
//! discovery logs and validating dependency candidates.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during parsing or validation
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Unknown candidate type '{0}'")]
    UnknownCandidateKind(String),

    #[error("Could not parse line {line}: {reason}")]
    MalformedCandidate { line: usize, reason: String },

    #[error("Log file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQL execution failed for `{sql}`: {source}")]
    SqlExecution {
        sql: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Cannot interpret {value} as {target}")]
    TypeCoercion { value: String, target: &'static str },

    #[error("Unexpected result for `{sql}`: {reason}")]
    UnexpectedResult { sql: String, reason: String },
}

impl ValidationError {
    /// Shorthand for a malformed candidate line
    pub fn malformed<S: Into<String>>(line: usize, reason: S) -> Self {
        ValidationError::MalformedCandidate {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for parsing and validation
pub type Result<T> = std::result::Result<T, ValidationError>;
