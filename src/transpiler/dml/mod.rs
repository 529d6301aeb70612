//! DML statement builders.

pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

use crate::ast::*;
use crate::error::{DialectError, DialectResult};
use crate::transpiler::conditions::compile_filter;
use crate::transpiler::grammar::Grammar;
use crate::transpiler::params::ParamContext;
use crate::transpiler::quote::wrap;

/// The named table an insert, update or delete writes to.
pub(crate) fn target_table(query: &Query) -> DialectResult<&str> {
    match &query.table {
        Some(TableRef::Named(name)) if !name.trim().is_empty() => Ok(name.as_str()),
        Some(_) => Err(DialectError::malformed(format!(
            "{} needs a plain table name",
            query.action
        ))),
        None => Err(DialectError::malformed(format!("{} without a table", query.action))),
    }
}

/// Writes carry none of the read-only clauses.
pub(crate) fn reject_select_clauses(query: &Query) -> DialectResult<()> {
    let offending = [
        (!query.columns.is_empty(), "selected columns"),
        (query.distinct, "distinct"),
        (!query.joins.is_empty(), "joins"),
        (!query.set_ops.is_empty(), "unions"),
        (query.aggregate.is_some(), "an aggregate"),
        (!query.groups.is_empty(), "group by"),
        (query.having.is_some(), "having"),
        (!query.orders.is_empty(), "order by"),
        (query.limit.is_some() || query.offset.is_some(), "paging"),
        (query.lock.is_some(), "a lock"),
    ];
    match offending.iter().find(|(hit, _)| *hit) {
        Some((_, what)) => Err(DialectError::malformed(format!(
            "{} with {} is not supported",
            query.action, what
        ))),
        None => Ok(()),
    }
}

/// `where ...`, or `None` when there is nothing to filter on.
pub(crate) fn where_clause(
    grammar: &Grammar,
    filter: Option<&Filter>,
    params: &mut ParamContext,
) -> DialectResult<Option<String>> {
    let Some(filter) = filter else {
        return Ok(None);
    };
    let sql = compile_filter(grammar, filter, params)?;
    Ok((!sql.is_empty()).then(|| format!("where {}", sql)))
}

/// `returning "a", "b"`, or `None`.
pub(crate) fn returning_clause(columns: &[String]) -> Option<String> {
    if columns.is_empty() {
        return None;
    }
    let cols: Vec<String> = columns.iter().map(|c| wrap(c)).collect();
    Some(format!("returning {}", cols.join(", ")))
}
