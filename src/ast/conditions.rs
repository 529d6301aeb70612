use serde::{Deserialize, Serialize};

use crate::ast::{DatePart, LogicalOp, Query, Value};

/// A boolean filter tree, used for `where`, `having` and join conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// All children must hold.
    And(Vec<Filter>),
    /// Any child may hold.
    Or(Vec<Filter>),
    Not(Box<Filter>),
    Predicate(Predicate),
    /// Verbatim SQL with its own positional bindings.
    Raw {
        sql: String,
        #[serde(default)]
        bindings: Vec<Value>,
    },
}

/// A single leaf condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// `column <op> value`. The operator is kept as written and checked
    /// against the dialect's operator set when compiled.
    Compare {
        column: String,
        op: String,
        value: Value,
        #[serde(default)]
        negated: bool,
    },
    /// `column in (...)` over a value list.
    In {
        column: String,
        values: Vec<Value>,
        #[serde(default)]
        negated: bool,
    },
    /// `column in (select ...)`
    InSubquery {
        column: String,
        query: Box<Query>,
        #[serde(default)]
        negated: bool,
    },
    /// `column is [not] null`
    Null {
        column: String,
        #[serde(default)]
        negated: bool,
    },
    /// Compare only part of a timestamp column.
    Date {
        column: String,
        part: DatePart,
        op: String,
        value: Value,
    },
    /// `[not] exists (select ...)`
    Exists {
        query: Box<Query>,
        #[serde(default)]
        negated: bool,
    },
}

impl Filter {
    /// `column <op> value`
    pub fn compare(column: impl Into<String>, op: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Predicate(Predicate::Compare {
            column: column.into(),
            op: op.into(),
            value: value.into(),
            negated: false,
        })
    }

    /// `column = value`
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "=", value)
    }

    /// `column = other_column`
    pub fn columns(left: impl Into<String>, op: impl Into<String>, right: impl Into<String>) -> Self {
        Self::compare(left, op, Value::Column(right.into()))
    }

    /// `column between low and high`
    pub fn between(column: impl Into<String>, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::compare(column, "between", Value::List(vec![low.into(), high.into()]))
    }

    pub fn is_in<V: Into<Value>>(column: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Filter::Predicate(Predicate::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        })
    }

    pub fn not_in<V: Into<Value>>(column: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Filter::Predicate(Predicate::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        })
    }

    pub fn in_subquery(column: impl Into<String>, query: Query) -> Self {
        Filter::Predicate(Predicate::InSubquery {
            column: column.into(),
            query: Box::new(query),
            negated: false,
        })
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Filter::Predicate(Predicate::Null {
            column: column.into(),
            negated: false,
        })
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Filter::Predicate(Predicate::Null {
            column: column.into(),
            negated: true,
        })
    }

    /// Compare the date, time, day, month or year of a timestamp column.
    pub fn date_part(
        column: impl Into<String>,
        part: DatePart,
        op: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Filter::Predicate(Predicate::Date {
            column: column.into(),
            part,
            op: op.into(),
            value: value.into(),
        })
    }

    pub fn exists(query: Query) -> Self {
        Filter::Predicate(Predicate::Exists {
            query: Box::new(query),
            negated: false,
        })
    }

    pub fn not_exists(query: Query) -> Self {
        Filter::Predicate(Predicate::Exists {
            query: Box::new(query),
            negated: true,
        })
    }

    pub fn raw(sql: impl Into<String>, bindings: Vec<Value>) -> Self {
        Filter::Raw {
            sql: sql.into(),
            bindings,
        }
    }

    /// Flip a compare predicate to its `not` form; any other filter is
    /// wrapped in `not (...)`.
    pub fn negate(self) -> Self {
        match self {
            Filter::Predicate(Predicate::Compare {
                column,
                op,
                value,
                negated,
            }) => Filter::Predicate(Predicate::Compare {
                column,
                op,
                value,
                negated: !negated,
            }),
            Filter::Not(inner) => *inner,
            other => Filter::Not(Box::new(other)),
        }
    }

    /// Combine with `next`, folding into an existing group of the same kind.
    pub fn combine(self, op: LogicalOp, next: Filter) -> Filter {
        match (op, self) {
            (LogicalOp::And, Filter::And(mut children)) => {
                children.push(next);
                Filter::And(children)
            }
            (LogicalOp::Or, Filter::Or(mut children)) => {
                children.push(next);
                Filter::Or(children)
            }
            (LogicalOp::And, current) => Filter::And(vec![current, next]),
            (LogicalOp::Or, current) => Filter::Or(vec![current, next]),
        }
    }

    /// True for an `And`/`Or` with no children.
    pub fn is_empty(&self) -> bool {
        match self {
            Filter::And(children) | Filter::Or(children) => children.iter().all(Filter::is_empty),
            Filter::Not(inner) => inner.is_empty(),
            _ => false,
        }
    }
}

/// Fold `next` onto an optional tree.
pub(crate) fn push_filter(slot: &mut Option<Filter>, op: LogicalOp, next: Filter) {
    *slot = Some(match slot.take() {
        None => next,
        Some(current) => current.combine(op, next),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_folds_same_kind() {
        let f = Filter::eq("a", 1)
            .combine(LogicalOp::And, Filter::eq("b", 2))
            .combine(LogicalOp::And, Filter::eq("c", 3));
        match f {
            Filter::And(children) => assert_eq!(children.len(), 3),
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn test_combine_nests_different_kind() {
        let f = Filter::eq("a", 1)
            .combine(LogicalOp::And, Filter::eq("b", 2))
            .combine(LogicalOp::Or, Filter::eq("c", 3));
        match f {
            Filter::Or(children) => {
                assert_eq!(children.len(), 2);
                assert!(matches!(children[0], Filter::And(_)));
            }
            other => panic!("expected Or, got {other:?}"),
        }
    }

    #[test]
    fn test_negate_compare_toggles_flag() {
        match Filter::compare("name", "like", "A%").negate() {
            Filter::Predicate(Predicate::Compare { negated, .. }) => assert!(negated),
            other => panic!("unexpected {other:?}"),
        }
        let twice = Filter::is_null("x").negate().negate();
        assert_eq!(twice, Filter::is_null("x"));
    }

    #[test]
    fn test_empty_groups() {
        assert!(Filter::And(vec![]).is_empty());
        assert!(Filter::Or(vec![Filter::And(vec![])]).is_empty());
        assert!(!Filter::eq("a", 1).is_empty());
    }
}
