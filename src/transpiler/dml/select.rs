//! SELECT SQL generation.
//!
//! Clauses are emitted in a fixed order: aggregate or columns, from,
//! joins, where, group by, having, order by, paging, lock. Unions follow
//! the head branch unparenthesized, since Firebird rejects a
//! parenthesized union branch. The head's ordering and paging then close
//! the whole union, after the last branch.

use crate::ast::*;
use crate::error::{DialectError, DialectResult};
use crate::transpiler::conditions::compile_filter;
use crate::transpiler::dml::where_clause;
use crate::transpiler::grammar::{
    Grammar, AGGREGATE_ALIAS, FOR_UPDATE, RANDOM_ORDER, WRAPPED_TABLE_ALIAS,
};
use crate::transpiler::params::ParamContext;
use crate::transpiler::procedure::procedure_fragment;
use crate::transpiler::quote::{columnize, wrap, wrap_segment, wrap_table};

/// Generate SELECT SQL.
pub fn build_select(
    grammar: &Grammar,
    query: &Query,
    params: &mut ParamContext,
) -> DialectResult<String> {
    validate(grammar, query)?;

    if let Some(aggregate) = &query.aggregate {
        if wraps_aggregate(query) {
            return build_wrapped_aggregate(grammar, query, aggregate, params);
        }
    }

    let mut parts = vec![compile_head(grammar, query)];

    if let Some(table) = &query.table {
        parts.push(format!("from {}", compile_table(grammar, table, params)?));
    }

    for join in &query.joins {
        parts.push(compile_join(grammar, join, params)?);
    }

    if let Some(clause) = where_clause(grammar, query.filter.as_ref(), params)? {
        parts.push(clause);
    }

    if !query.groups.is_empty() {
        parts.push(format!("group by {}", columnize(&query.groups)));
    }

    if let Some(having) = &query.having {
        let sql = compile_filter(grammar, having, params)?;
        if !sql.is_empty() {
            parts.push(format!("having {}", sql));
        }
    }

    if query.set_ops.is_empty() {
        parts.extend(compile_tail(grammar, query));
        return Ok(parts.join(" "));
    }

    for (op, branch) in &query.set_ops {
        validate_branch(branch)?;
        parts.push(op.keyword().to_string());
        parts.push(build_select(grammar, branch, params)?);
    }
    parts.extend(compile_tail(grammar, query));

    Ok(parts.join(" "))
}

/// Whether an aggregate must be taken over the query as a derived table.
pub(crate) fn wraps_aggregate(query: &Query) -> bool {
    !query.set_ops.is_empty() || query.having.as_ref().is_some_and(|h| !h.is_empty())
}

/// `fn(column) as "aggregate"`
pub fn compile_aggregate(aggregate: &Aggregate, distinct: bool) -> String {
    let column = if aggregate.column == "*" {
        "*".to_string()
    } else if distinct {
        format!("distinct {}", wrap(&aggregate.column))
    } else {
        wrap(&aggregate.column)
    };
    format!(
        "{}({}) as {}",
        aggregate.func,
        column,
        wrap_segment(AGGREGATE_ALIAS)
    )
}

/// `select [first n] [skip m] [distinct] columns` or the aggregate.
fn compile_head(grammar: &Grammar, query: &Query) -> String {
    let mut head = vec!["select".to_string()];
    if let Some(paging) = grammar.paging().leading(query.limit, query.offset) {
        head.push(paging);
    }
    match &query.aggregate {
        Some(aggregate) => head.push(compile_aggregate(aggregate, query.distinct)),
        None => {
            if query.distinct {
                head.push("distinct".to_string());
            }
            head.push(columnize(&query.columns));
        }
    }
    head.join(" ")
}

/// Aggregate over a union or a having query: the query keeps its columns
/// and becomes a derived table.
fn build_wrapped_aggregate(
    grammar: &Grammar,
    query: &Query,
    aggregate: &Aggregate,
    params: &mut ParamContext,
) -> DialectResult<String> {
    let mut inner = query.clone();
    inner.aggregate = None;
    let inner_sql = build_select(grammar, &inner, params)?;
    Ok(format!(
        "select {} from ({}) as {}",
        compile_aggregate(aggregate, query.distinct),
        inner_sql,
        wrap_segment(WRAPPED_TABLE_ALIAS)
    ))
}

pub(crate) fn compile_table(
    grammar: &Grammar,
    table: &TableRef,
    params: &mut ParamContext,
) -> DialectResult<String> {
    match table {
        TableRef::Named(name) => {
            if name.trim().is_empty() {
                return Err(DialectError::malformed("empty table name"));
            }
            Ok(wrap_table(name))
        }
        TableRef::Raw { sql, bindings } => {
            params.extend(bindings.iter().cloned());
            Ok(sql.clone())
        }
        TableRef::Subquery { query, alias } => {
            let sub = build_select(grammar, query, params)?;
            Ok(match alias {
                Some(alias) => format!("({}) as {}", sub, wrap_segment(alias)),
                None => format!("({})", sub),
            })
        }
        TableRef::Procedure { name, args } => procedure_fragment(grammar, name, args, params),
    }
}

fn compile_join(grammar: &Grammar, join: &Join, params: &mut ParamContext) -> DialectResult<String> {
    let table = compile_table(grammar, &join.table, params)?;

    if join.kind.is_lateral() {
        return Ok(format!("{} join lateral {} on true", join.kind.keyword(), table));
    }

    if join.kind == JoinKind::Cross {
        return Ok(format!("cross join {}", table));
    }

    let on = match &join.on {
        Some(filter) => compile_filter(grammar, filter, params)?,
        None => String::new(),
    };
    if on.is_empty() {
        return Err(DialectError::malformed(format!(
            "{} join {} has no condition",
            join.kind.keyword(),
            table
        )));
    }
    Ok(format!("{} join {} on {}", join.kind.keyword(), table, on))
}

/// `order by`, trailing paging and lock, in that order.
fn compile_tail(grammar: &Grammar, query: &Query) -> Vec<String> {
    let mut tail = Vec::new();
    if !query.orders.is_empty() {
        tail.push(format!("order by {}", compile_orders(&query.orders)));
    }
    if let Some(paging) = grammar.paging().trailing(query.limit, query.offset) {
        tail.push(paging);
    }
    match &query.lock {
        Some(Lock::ForUpdate) => tail.push(FOR_UPDATE.to_string()),
        Some(Lock::Raw(sql)) if !sql.trim().is_empty() => tail.push(sql.clone()),
        _ => {}
    }
    tail
}

fn compile_orders(orders: &[OrderBy]) -> String {
    orders
        .iter()
        .map(|order| match order {
            OrderBy::Column { column, order } => format!("{} {}", wrap(column), order.keyword()),
            OrderBy::Raw(sql) => sql.clone(),
            OrderBy::Random => RANDOM_ORDER.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn validate(grammar: &Grammar, query: &Query) -> DialectResult<()> {
    if query.action != Action::Select {
        return Err(DialectError::malformed(format!(
            "expected a select, got {}",
            query.action
        )));
    }
    if query.table.is_none() {
        return Err(DialectError::malformed("select without a table"));
    }
    if let Some(n) = query.limit.filter(|n| *n < 0) {
        return Err(DialectError::malformed(format!("negative limit: {}", n)));
    }
    if let Some(n) = query.offset.filter(|n| *n < 0) {
        return Err(DialectError::malformed(format!("negative offset: {}", n)));
    }
    if query.aggregate.is_some() && !query.columns.is_empty() && !wraps_aggregate(query) {
        return Err(DialectError::malformed(
            "an aggregate cannot be mixed with plain columns",
        ));
    }
    if !query.set_ops.is_empty() {
        // first/skip only ever limits the branch it sits in
        if grammar.paging().is_legacy() && (query.limit.is_some() || query.offset.is_some()) {
            return Err(DialectError::malformed(
                "legacy first/skip paging cannot limit a union",
            ));
        }
        if query.lock.is_some() {
            return Err(DialectError::malformed("a union cannot be locked"));
        }
    }
    if !query.assignments.is_empty() {
        return Err(DialectError::malformed("select with assignments"));
    }
    if !query.returning.is_empty() {
        return Err(DialectError::malformed("select with returning"));
    }
    Ok(())
}

/// A union branch is emitted bare, so it cannot close itself with an
/// ordering, paging or a lock of its own.
fn validate_branch(branch: &Query) -> DialectResult<()> {
    if !branch.orders.is_empty()
        || branch.limit.is_some()
        || branch.offset.is_some()
        || branch.lock.is_some()
    {
        return Err(DialectError::malformed(
            "a union branch cannot carry order by, paging or a lock; set them on the head query",
        ));
    }
    Ok(())
}
