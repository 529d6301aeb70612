use serde::{Deserialize, Serialize};

use crate::ast::{AggregateFunc, Query, SortOrder, Value};

/// A selected column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// `*`
    Star,
    /// Column name; `table.column` and `name as alias` are understood.
    Named(String),
    Aliased { name: String, alias: String },
    /// Verbatim SQL.
    Raw(String),
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        if name == "*" {
            Column::Star
        } else {
            Column::Named(name.to_string())
        }
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Column::from(name.as_str())
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Column::Star => write!(f, "*"),
            Column::Named(name) => write!(f, "{}", name),
            Column::Aliased { name, alias } => write!(f, "{} as {}", name, alias),
            Column::Raw(sql) => write!(f, "{}", sql),
        }
    }
}

/// What a statement reads from or writes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableRef {
    /// A table name, optionally `name as alias`.
    Named(String),
    /// Verbatim table expression with its bindings.
    Raw {
        sql: String,
        #[serde(default)]
        bindings: Vec<Value>,
    },
    /// `(select ...) as "alias"`
    Subquery {
        query: Box<Query>,
        alias: Option<String>,
    },
    /// Selectable stored procedure, `"NAME" (?, ?)`.
    Procedure { name: String, args: Vec<Value> },
}

impl From<&str> for TableRef {
    fn from(name: &str) -> Self {
        TableRef::Named(name.to_string())
    }
}

impl From<String> for TableRef {
    fn from(name: String) -> Self {
        TableRef::Named(name)
    }
}

/// One `order by` term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    Column { column: String, order: SortOrder },
    Raw(String),
    /// Random row order.
    Random,
}

/// Aggregate descriptor, `fn(column) as "aggregate"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub func: AggregateFunc,
    pub column: String,
}

impl Aggregate {
    pub fn new(func: AggregateFunc, column: impl Into<String>) -> Self {
        Self {
            func,
            column: column.into(),
        }
    }

    /// `count(*)`
    pub fn count() -> Self {
        Self::new(AggregateFunc::Count, "*")
    }
}
