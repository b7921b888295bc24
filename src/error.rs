//! Error types for ipregion.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for ipregion operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Address text is not a dotted-quad IPv4 address
    #[error("invalid IP address: {0}")]
    InvalidIpAddress(String),

    /// Database file missing or unreadable
    #[error("failed to open database {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Operation attempted after the database was closed
    #[error("database is closed")]
    Closed,

    /// No index entry covers the address
    #[error("not found: {0}")]
    NotFound(String),

    /// Offset or length outside the database file
    #[error("corrupt database: {0}")]
    CorruptData(String),

    /// Unknown search strategy name
    #[error("parameter error: unknown strategy {0:?}")]
    InvalidStrategy(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true for the "address not covered" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Result type alias for ipregion operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::Closed.to_string(), "database is closed");
        assert_eq!(
            Error::InvalidStrategy("fast".to_string()).to_string(),
            "parameter error: unknown strategy \"fast\""
        );
        assert_eq!(
            Error::NotFound("1.2.3.4".to_string()).to_string(),
            "not found: 1.2.3.4"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::NotFound("0.0.0.0".to_string()).is_not_found());
        assert!(!Error::Closed.is_not_found());
        assert!(!Error::InvalidStrategy("x".to_string()).is_not_found());
    }
}
