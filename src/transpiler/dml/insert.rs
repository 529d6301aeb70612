//! INSERT SQL generation.

use crate::ast::*;
use crate::error::{DialectError, DialectResult};
use crate::transpiler::conditions::compile_value;
use crate::transpiler::dml::{reject_select_clauses, returning_clause, target_table};
use crate::transpiler::grammar::Grammar;
use crate::transpiler::params::ParamContext;
use crate::transpiler::quote::{wrap, wrap_table};

/// Generate a single-row INSERT.
pub fn build_insert(
    grammar: &Grammar,
    query: &Query,
    params: &mut ParamContext,
) -> DialectResult<String> {
    let table = target_table(query)?;
    reject_select_clauses(query)?;
    if query.filter.is_some() {
        return Err(DialectError::malformed("insert with a where clause"));
    }
    if query.assignments.is_empty() {
        return Err(DialectError::malformed(format!(
            "insert into {} has no values",
            table
        )));
    }

    let mut columns = Vec::with_capacity(query.assignments.len());
    let mut values = Vec::with_capacity(query.assignments.len());
    for (column, value) in &query.assignments {
        columns.push(wrap(column));
        values.push(compile_value(grammar, value, params)?);
    }

    let mut sql = format!(
        "insert into {} ({}) values ({})",
        wrap_table(table),
        columns.join(", "),
        values.join(", ")
    );
    if let Some(returning) = returning_clause(&query.returning) {
        sql.push(' ');
        sql.push_str(&returning);
    }
    Ok(sql)
}
