//! The seam to the transport layer.
//!
//! Opening a session and running SQL belongs to whatever driver the
//! application uses; this crate only needs the two calls below.

use crate::ast::Value;
use crate::error::DialectResult;

/// A result row as returned by the driver, keyed however it likes.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A live connection to a Firebird server.
pub trait Connection {
    /// The raw vendor version string, e.g. `LI-V4.0.1.2692 Firebird 4.0`.
    fn server_version_string(&self) -> DialectResult<String>;

    /// Execute compiled SQL with positional parameters.
    fn execute(&self, sql: &str, params: &[Value]) -> DialectResult<Vec<Row>>;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn server_version_string(&self) -> DialectResult<String> {
        (**self).server_version_string()
    }

    fn execute(&self, sql: &str, params: &[Value]) -> DialectResult<Vec<Row>> {
        (**self).execute(sql, params)
    }
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn server_version_string(&self) -> DialectResult<String> {
        (**self).server_version_string()
    }

    fn execute(&self, sql: &str, params: &[Value]) -> DialectResult<Vec<Row>> {
        (**self).execute(sql, params)
    }
}
