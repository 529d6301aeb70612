//! WHERE / HAVING / ON condition compilation.

use crate::ast::*;
use crate::error::{DialectError, DialectResult};
use crate::transpiler::dml::select::build_select;
use crate::transpiler::grammar::Grammar;
use crate::transpiler::params::ParamContext;
use crate::transpiler::quote::wrap;

/// Compile a filter tree. Returns an empty string for an empty tree.
pub fn compile_filter(
    grammar: &Grammar,
    filter: &Filter,
    params: &mut ParamContext,
) -> DialectResult<String> {
    match filter {
        Filter::And(children) => compile_group(grammar, children, LogicalOp::And, params),
        Filter::Or(children) => compile_group(grammar, children, LogicalOp::Or, params),
        Filter::Not(inner) => {
            let sql = compile_filter(grammar, inner, params)?;
            if sql.is_empty() {
                return Ok(sql);
            }
            Ok(format!("not ({})", sql))
        }
        Filter::Predicate(pred) => compile_predicate(grammar, pred, params),
        Filter::Raw { sql, bindings } => {
            params.extend(bindings.iter().cloned());
            Ok(sql.clone())
        }
    }
}

/// Children joined left to right. A child that is itself a group of
/// several conditions is parenthesized.
fn compile_group(
    grammar: &Grammar,
    children: &[Filter],
    op: LogicalOp,
    params: &mut ParamContext,
) -> DialectResult<String> {
    let mut parts = Vec::with_capacity(children.len());
    for child in children.iter().filter(|c| !c.is_empty()) {
        let sql = compile_filter(grammar, child, params)?;
        if needs_parens(child) {
            parts.push(format!("({})", sql));
        } else {
            parts.push(sql);
        }
    }
    Ok(parts.join(&format!(" {} ", op.keyword())))
}

fn needs_parens(filter: &Filter) -> bool {
    match filter {
        Filter::And(children) | Filter::Or(children) => {
            children.iter().filter(|c| !c.is_empty()).count() > 1
        }
        _ => false,
    }
}

fn compile_predicate(
    grammar: &Grammar,
    pred: &Predicate,
    params: &mut ParamContext,
) -> DialectResult<String> {
    match pred {
        Predicate::Compare {
            column,
            op,
            value,
            negated,
        } => {
            let op = Operator::parse(op)?;
            let (op, wrap_not) = match (*negated, op.negated()) {
                (false, _) => (op, false),
                (true, Some(flipped)) => (flipped, false),
                (true, None) => (op, true),
            };
            let sql = compile_comparison(grammar, &wrap(column), op, value, None, params)?;
            if wrap_not {
                Ok(format!("not ({})", sql))
            } else {
                Ok(sql)
            }
        }
        Predicate::In {
            column,
            values,
            negated,
        } => {
            // An empty list matches nothing; its negation matches everything.
            if values.is_empty() {
                return Ok(if *negated { "1 = 1" } else { "0 = 1" }.to_string());
            }
            let mut items = Vec::with_capacity(values.len());
            for v in values {
                items.push(compile_value(grammar, v, params)?);
            }
            Ok(format!(
                "{} {}in ({})",
                wrap(column),
                not_prefix(*negated),
                items.join(", ")
            ))
        }
        Predicate::InSubquery {
            column,
            query,
            negated,
        } => {
            let sub = build_select(grammar, query, params)?;
            Ok(format!("{} {}in ({})", wrap(column), not_prefix(*negated), sub))
        }
        Predicate::Null { column, negated } => Ok(format!(
            "{} is {}null",
            wrap(column),
            not_prefix(*negated)
        )),
        Predicate::Date {
            column,
            part,
            op,
            value,
        } => {
            let op = Operator::parse(op)?;
            let lhs = if part.is_cast() {
                format!("cast({} as {})", wrap(column), part.keyword())
            } else {
                format!("extract({} from {})", part.keyword(), wrap(column))
            };
            compile_comparison(grammar, &lhs, op, value, Some(*part), params)
        }
        Predicate::Exists { query, negated } => {
            let sub = build_select(grammar, query, params)?;
            Ok(format!("{}exists ({})", not_prefix(*negated), sub))
        }
    }
}

/// `lhs <op> rhs`, with `between`, null and list handling.
fn compile_comparison(
    grammar: &Grammar,
    lhs: &str,
    op: Operator,
    value: &Value,
    part: Option<DatePart>,
    params: &mut ParamContext,
) -> DialectResult<String> {
    let narrow = |v: &Value| match part {
        Some(p) => v.clone().narrow_to(p),
        None => v.clone(),
    };

    if op.is_range() {
        let (low, high) = match value {
            Value::List(items) if items.len() == 2 => (narrow(&items[0]), narrow(&items[1])),
            _ => {
                return Err(DialectError::malformed(format!(
                    "{} on {} needs exactly two bounds",
                    op, lhs
                )))
            }
        };
        let low = compile_value(grammar, &low, params)?;
        let high = compile_value(grammar, &high, params)?;
        return Ok(format!("{} {} {} and {}", lhs, op, low, high));
    }

    match value {
        Value::Null => Ok(match op {
            Operator::Eq => format!("{} is null", lhs),
            Operator::Ne | Operator::BangEq => format!("{} is not null", lhs),
            op if op.is_distinctness() => format!("{} {} null", lhs, op),
            op => format!("{} {} {}", lhs, op, params.add_param(Value::Null)),
        }),
        Value::List(_) => Err(DialectError::malformed(format!(
            "a value list needs between, not {} on {}",
            op, lhs
        ))),
        other => {
            let rhs = compile_value(grammar, &narrow(other), params)?;
            Ok(format!("{} {} {}", lhs, op, rhs))
        }
    }
}

/// Right-hand side of a comparison: bound, spliced or a subquery.
pub fn compile_value(
    grammar: &Grammar,
    value: &Value,
    params: &mut ParamContext,
) -> DialectResult<String> {
    match value {
        Value::Raw(sql) => Ok(sql.clone()),
        Value::Column(name) => Ok(wrap(name)),
        Value::Subquery(query) => Ok(format!("({})", build_select(grammar, query, params)?)),
        Value::List(_) => Err(DialectError::malformed(
            "a value list is only allowed as between bounds",
        )),
        scalar => Ok(params.add_param(scalar.clone()).to_string()),
    }
}

fn not_prefix(negated: bool) -> &'static str {
    if negated { "not " } else { "" }
}
