//! Error types for the setcover library.

use thiserror::Error;

/// Errors that can occur while building, parsing, or writing set covering
/// instances and certificates.
///
/// Programming errors (double-add of a set, removal of a set not present,
/// out-of-range arc indices during incremental solution maintenance) are
/// never represented here: per spec they are fatal assertions that abort
/// the process rather than values that get propagated and handled.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetCoverError {
    /// The instance file could not be parsed in the requested format.
    #[error("malformed {format} instance at line {line}: {message}")]
    MalformedInstance {
        format: String,
        line: usize,
        message: String,
    },

    /// The requested input/output format is not recognized.
    #[error("unknown instance format: {0}")]
    UnknownFormat(String),

    /// An element has no covering set. The builder rejects this as a hard
    /// error rather than letting the reducer observe it.
    #[error("element {element} is not covered by any set")]
    UncoveredElement { element: usize },

    /// A set or element index read from a file falls outside the declared
    /// bounds of the instance.
    #[error("index out of range: {index} >= {bound} ({what})")]
    IndexOutOfRange {
        what: String,
        index: usize,
        bound: usize,
    },

    /// A certificate file referenced a set ID that does not belong to the
    /// dual instance it is being checked or lifted against.
    #[error("invalid certificate: {0}")]
    InvalidCertificate(String),

    /// Generic I/O failure reading or writing an instance/certificate file.
    #[error("I/O error: {0}")]
    Io(String),

    /// The requested operation is not implemented for the given format
    /// (e.g. writing an instance in a read-only format).
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl From<std::io::Error> for SetCoverError {
    fn from(err: std::io::Error) -> Self {
        SetCoverError::Io(err.to_string())
    }
}

/// Result type alias for setcover operations.
pub type Result<T> = std::result::Result<T, SetCoverError>;

#[cfg(test)]
#[path = "tests_unit/error.rs"]
mod tests;
