//! DELETE SQL generation.

use crate::ast::*;
use crate::error::{DialectError, DialectResult};
use crate::transpiler::dml::{reject_select_clauses, returning_clause, target_table, where_clause};
use crate::transpiler::grammar::Grammar;
use crate::transpiler::params::ParamContext;
use crate::transpiler::quote::wrap_table;

/// Generate DELETE SQL.
pub fn build_delete(
    grammar: &Grammar,
    query: &Query,
    params: &mut ParamContext,
) -> DialectResult<String> {
    let table = target_table(query)?;
    reject_select_clauses(query)?;
    if !query.assignments.is_empty() {
        return Err(DialectError::malformed("delete with assignments"));
    }

    let mut parts = vec![format!("delete from {}", wrap_table(table))];
    if let Some(clause) = where_clause(grammar, query.filter.as_ref(), params)? {
        parts.push(clause);
    }
    if let Some(returning) = returning_clause(&query.returning) {
        parts.push(returning);
    }
    Ok(parts.join(" "))
}
