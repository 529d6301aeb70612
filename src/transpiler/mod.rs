//! SQL compiler for Firebird.
//!
//! Converts [`Query`] descriptions into SQL text plus ordered `?`
//! parameters.

pub mod conditions;
pub mod dialect;
pub mod dml;
pub mod grammar;
pub mod params;
pub mod procedure;
pub mod quote;

#[cfg(test)]
mod tests;

use crate::ast::Query;
use crate::error::DialectResult;

pub use dialect::Paging;
pub use grammar::Grammar;
pub use params::{CompiledStatement, ParamContext};
pub use procedure::compile_procedure_call;

/// Trait for converting query descriptions to SQL.
pub trait ToSql {
    /// Compile with the modern paging syntax.
    fn to_sql(&self) -> DialectResult<CompiledStatement> {
        self.to_sql_with_paging(Paging::default())
    }
    /// Compile with a specific paging syntax.
    fn to_sql_with_paging(&self, paging: Paging) -> DialectResult<CompiledStatement>;
}

impl ToSql for Query {
    fn to_sql_with_paging(&self, paging: Paging) -> DialectResult<CompiledStatement> {
        Grammar::new(paging).compile(self)
    }
}

/// Compile a query description for the given paging syntax.
pub fn compile(query: &Query, paging: Paging) -> DialectResult<CompiledStatement> {
    Grammar::new(paging).compile(query)
}
