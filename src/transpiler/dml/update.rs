//! UPDATE SQL generation.

use crate::ast::*;
use crate::error::{DialectError, DialectResult};
use crate::transpiler::conditions::compile_value;
use crate::transpiler::dml::{reject_select_clauses, returning_clause, target_table, where_clause};
use crate::transpiler::grammar::Grammar;
use crate::transpiler::params::ParamContext;
use crate::transpiler::quote::{wrap, wrap_table};

/// Generate UPDATE SQL. Firebird has no `update ... join`, so joins are
/// rejected along with the other read-only clauses.
pub fn build_update(
    grammar: &Grammar,
    query: &Query,
    params: &mut ParamContext,
) -> DialectResult<String> {
    let table = target_table(query)?;
    reject_select_clauses(query)?;
    if query.assignments.is_empty() {
        return Err(DialectError::malformed(format!(
            "update of {} sets no columns",
            table
        )));
    }

    let mut sets = Vec::with_capacity(query.assignments.len());
    for (column, value) in &query.assignments {
        sets.push(format!("{} = {}", wrap(column), compile_value(grammar, value, params)?));
    }

    let mut parts = vec![format!("update {} set {}", wrap_table(table), sets.join(", "))];
    if let Some(clause) = where_clause(grammar, query.filter.as_ref(), params)? {
        parts.push(clause);
    }
    if let Some(returning) = returning_clause(&query.returning) {
        parts.push(returning);
    }
    Ok(parts.join(" "))
}
