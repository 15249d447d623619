//! Core error types.

use std::error::Error;
use std::fmt;

/// Errors from grid construction and parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The grid string could not be parsed into at least one cell.
    MalformedRows {
        /// Description of what was wrong with the input.
        reason: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRows { reason } => write!(f, "malformed grid rows: {reason}"),
        }
    }
}

impl Error for GridError {}
