//! Error types for the Firebird dialect compiler.

use thiserror::Error;

/// The main error type for compilation and session operations.
#[derive(Debug, Error)]
pub enum DialectError {
    /// The connection could not report a server version.
    #[error("Server version unavailable: {0}")]
    VersionUnavailable(String),

    /// The server version string is not in the expected vendor format.
    #[error("Unparseable server version: '{raw}'")]
    VersionUnparseable { raw: String },

    /// A predicate used an operator Firebird does not understand.
    #[error("Unsupported operator: '{0}'")]
    UnsupportedOperator(String),

    /// The query description is structurally invalid.
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    /// A result row lacked an expected field.
    #[error("Malformed row: {0}")]
    MalformedRow(String),

    /// Error reported by the connection while executing.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DialectError {
    /// Create a malformed query error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedQuery(message.into())
    }

    /// Create an unparseable version error carrying the raw string.
    pub fn unparseable(raw: impl Into<String>) -> Self {
        Self::VersionUnparseable { raw: raw.into() }
    }
}

/// Result type alias for dialect operations.
pub type DialectResult<T> = Result<T, DialectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DialectError::malformed("negative limit: -1");
        assert_eq!(err.to_string(), "Malformed query: negative limit: -1");

        let err = DialectError::unparseable("WI-VX.Y");
        assert_eq!(err.to_string(), "Unparseable server version: 'WI-VX.Y'");
    }
}
