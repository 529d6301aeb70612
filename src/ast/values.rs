use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::ast::{DatePart, Query};

/// A value in a condition or assignment.
///
/// Scalars are bound as positional parameters. `Raw`, `Column` and
/// `Subquery` are spliced into the SQL text instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// String
    String(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    /// Unparameterized SQL fragment (e.g. `"votes" + 1`)
    Raw(String),
    /// Column reference (e.g. `orders.user_id = users.id`)
    Column(String),
    /// List of values, used by `between`
    List(Vec<Value>),
    /// Subquery compared against (e.g. `price > (select ...)`)
    Subquery(Box<Query>),
}

impl Value {
    /// Narrow a chrono value to the part a date-scoped predicate compares.
    ///
    /// Anything that is not a chrono value of a wider type passes through.
    pub fn narrow_to(self, part: DatePart) -> Value {
        match (part, self) {
            (DatePart::Date, Value::Timestamp(ts)) => Value::Date(ts.date()),
            (DatePart::Time, Value::Timestamp(ts)) => Value::Time(ts.time()),
            (DatePart::Day, Value::Timestamp(ts)) => Value::Int(ts.day() as i64),
            (DatePart::Day, Value::Date(d)) => Value::Int(d.day() as i64),
            (DatePart::Month, Value::Timestamp(ts)) => Value::Int(ts.month() as i64),
            (DatePart::Month, Value::Date(d)) => Value::Int(d.month() as i64),
            (DatePart::Year, Value::Timestamp(ts)) => Value::Int(ts.year() as i64),
            (DatePart::Year, Value::Date(d)) => Value::Int(d.year() as i64),
            (_, other) => other,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Value::Date(d) => write!(f, "'{}'", d.format("%Y-%m-%d")),
            Value::Time(t) => write!(f, "'{}'", t.format("%H:%M:%S")),
            Value::Timestamp(ts) => write!(f, "'{}'", ts.format("%Y-%m-%d %H:%M:%S")),
            Value::Raw(s) => write!(f, "{}", s),
            Value::Column(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Subquery(_) => write!(f, "(SUBQUERY)"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Value::Time(t)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(ts: NaiveDateTime) -> Self {
        Value::Timestamp(ts)
    }
}

impl From<Query> for Value {
    fn from(q: Query) -> Self {
        Value::Subquery(Box::new(q))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Build a raw, unparameterized value.
pub fn raw(sql: impl Into<String>) -> Value {
    Value::Raw(sql.into())
}

/// Build a column reference value.
pub fn col(name: impl Into<String>) -> Value {
    Value::Column(name.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(14, 5, 30))
            .unwrap()
    }

    #[test]
    fn test_narrow_timestamp() {
        assert_eq!(
            Value::Timestamp(ts()).narrow_to(DatePart::Date),
            Value::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
        );
        assert_eq!(
            Value::Timestamp(ts()).narrow_to(DatePart::Time),
            Value::Time(NaiveTime::from_hms_opt(14, 5, 30).unwrap())
        );
        assert_eq!(Value::Timestamp(ts()).narrow_to(DatePart::Day), Value::Int(9));
        assert_eq!(Value::Timestamp(ts()).narrow_to(DatePart::Month), Value::Int(3));
        assert_eq!(Value::Timestamp(ts()).narrow_to(DatePart::Year), Value::Int(2024));
    }

    #[test]
    fn test_narrow_leaves_scalars_alone() {
        assert_eq!(Value::Int(7).narrow_to(DatePart::Day), Value::Int(7));
        assert_eq!(
            Value::from("2024-01-01").narrow_to(DatePart::Date),
            Value::String("2024-01-01".to_string())
        );
    }

    #[test]
    fn test_option_into_value() {
        let none: Option<i32> = None;
        assert_eq!(Value::from(none), Value::Null);
        assert_eq!(Value::from(Some("NY")), Value::String("NY".to_string()));
    }
}
