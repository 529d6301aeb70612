use serde::{Deserialize, Serialize};

use crate::ast::{Filter, JoinKind, LogicalOp, Query, TableRef};
use crate::ast::conditions::push_filter;

/// A join definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub table: TableRef,
    /// Join condition. Lateral and cross joins leave this empty.
    #[serde(default)]
    pub on: Option<Filter>,
}

impl Join {
    pub fn new(kind: JoinKind, table: impl Into<TableRef>) -> Self {
        Self {
            kind,
            table: table.into(),
            on: None,
        }
    }

    /// Lateral join over a correlated subquery.
    pub fn lateral(kind: JoinKind, query: Query, alias: Option<String>) -> Self {
        Self {
            kind,
            table: TableRef::Subquery {
                query: Box::new(query),
                alias,
            },
            on: None,
        }
    }

    /// Add `left <op> right` between two columns.
    pub fn on(mut self, left: &str, op: &str, right: &str) -> Self {
        push_filter(&mut self.on, LogicalOp::And, Filter::columns(left, op, right));
        self
    }

    /// Add `left <op> right` joined with `or`.
    pub fn or_on(mut self, left: &str, op: &str, right: &str) -> Self {
        push_filter(&mut self.on, LogicalOp::Or, Filter::columns(left, op, right));
        self
    }

    /// Add an arbitrary condition (bound values allowed).
    pub fn filter(mut self, condition: Filter) -> Self {
        push_filter(&mut self.on, LogicalOp::And, condition);
        self
    }

    pub fn or_filter(mut self, condition: Filter) -> Self {
        push_filter(&mut self.on, LogicalOp::Or, condition);
        self
    }
}
