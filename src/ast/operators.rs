use serde::{Deserialize, Serialize};

use crate::error::{DialectError, DialectResult};

/// The statement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// SELECT query
    #[default]
    Select,
    /// INSERT statement
    Insert,
    /// UPDATE statement
    Update,
    /// DELETE statement
    Delete,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Select => write!(f, "SELECT"),
            Action::Insert => write!(f, "INSERT"),
            Action::Update => write!(f, "UPDATE"),
            Action::Delete => write!(f, "DELETE"),
        }
    }
}

/// Logical operator between conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOp {
    #[default]
    And,
    Or,
}

impl LogicalOp {
    pub fn keyword(&self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }
}

/// Sort order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Comparison operators understood by Firebird.
///
/// Besides the usual comparisons Firebird accepts the "not less" / "not
/// greater" spellings (`!<`, `~<`, `^<` and friends), case-insensitive
/// substring and prefix tests (`containing`, `starting with`), SQL regular
/// expressions (`similar to`) and null-safe equality (`is distinct from`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Lt,
    Gt,
    Lte,
    Gte,
    /// `<>`
    Ne,
    /// `!=`
    BangEq,
    /// `!<`
    NotLt,
    /// `!>`
    NotGt,
    /// `~<`
    TildeNotLt,
    /// `~>`
    TildeNotGt,
    /// `^<`
    CaretNotLt,
    /// `^>`
    CaretNotGt,
    /// `~=`
    TildeNe,
    /// `^=`
    CaretNe,
    Like,
    NotLike,
    Between,
    NotBetween,
    /// Case-insensitive substring test.
    Containing,
    NotContaining,
    /// Case-sensitive prefix test.
    StartingWith,
    NotStartingWith,
    /// SQL regular expression match.
    SimilarTo,
    NotSimilarTo,
    IsDistinctFrom,
    IsNotDistinctFrom,
}

impl Operator {
    /// Every operator, in the order Firebird's reference lists them.
    pub const ALL: [Operator; 27] = [
        Operator::Eq,
        Operator::Lt,
        Operator::Gt,
        Operator::Lte,
        Operator::Gte,
        Operator::Ne,
        Operator::BangEq,
        Operator::NotLt,
        Operator::NotGt,
        Operator::TildeNotLt,
        Operator::TildeNotGt,
        Operator::CaretNotLt,
        Operator::CaretNotGt,
        Operator::TildeNe,
        Operator::CaretNe,
        Operator::Like,
        Operator::NotLike,
        Operator::Between,
        Operator::NotBetween,
        Operator::Containing,
        Operator::NotContaining,
        Operator::StartingWith,
        Operator::NotStartingWith,
        Operator::SimilarTo,
        Operator::NotSimilarTo,
        Operator::IsDistinctFrom,
        Operator::IsNotDistinctFrom,
    ];

    /// Returns the SQL symbol/keyword for this operator.
    pub fn sql_symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Lte => "<=",
            Operator::Gte => ">=",
            Operator::Ne => "<>",
            Operator::BangEq => "!=",
            Operator::NotLt => "!<",
            Operator::NotGt => "!>",
            Operator::TildeNotLt => "~<",
            Operator::TildeNotGt => "~>",
            Operator::CaretNotLt => "^<",
            Operator::CaretNotGt => "^>",
            Operator::TildeNe => "~=",
            Operator::CaretNe => "^=",
            Operator::Like => "like",
            Operator::NotLike => "not like",
            Operator::Between => "between",
            Operator::NotBetween => "not between",
            Operator::Containing => "containing",
            Operator::NotContaining => "not containing",
            Operator::StartingWith => "starting with",
            Operator::NotStartingWith => "not starting with",
            Operator::SimilarTo => "similar to",
            Operator::NotSimilarTo => "not similar to",
            Operator::IsDistinctFrom => "is distinct from",
            Operator::IsNotDistinctFrom => "is not distinct from",
        }
    }

    /// Look up an operator by its SQL spelling.
    ///
    /// Matching ignores case and collapses runs of whitespace, so
    /// `"NOT  Starting With"` resolves to [`Operator::NotStartingWith`].
    pub fn parse(op: &str) -> DialectResult<Operator> {
        let normalized = op
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        Operator::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.sql_symbol() == normalized)
            .ok_or_else(|| DialectError::UnsupportedOperator(op.to_string()))
    }

    /// The keyword form with `not` applied, for operators that have one.
    pub fn negated(&self) -> Option<Operator> {
        match self {
            Operator::Like => Some(Operator::NotLike),
            Operator::NotLike => Some(Operator::Like),
            Operator::Between => Some(Operator::NotBetween),
            Operator::NotBetween => Some(Operator::Between),
            Operator::Containing => Some(Operator::NotContaining),
            Operator::NotContaining => Some(Operator::Containing),
            Operator::StartingWith => Some(Operator::NotStartingWith),
            Operator::NotStartingWith => Some(Operator::StartingWith),
            Operator::SimilarTo => Some(Operator::NotSimilarTo),
            Operator::NotSimilarTo => Some(Operator::SimilarTo),
            Operator::IsDistinctFrom => Some(Operator::IsNotDistinctFrom),
            Operator::IsNotDistinctFrom => Some(Operator::IsDistinctFrom),
            _ => None,
        }
    }

    /// Returns true for `between` / `not between`, which take two operands.
    pub fn is_range(&self) -> bool {
        matches!(self, Operator::Between | Operator::NotBetween)
    }

    /// Returns true for the null-safe comparisons.
    pub fn is_distinctness(&self) -> bool {
        matches!(self, Operator::IsDistinctFrom | Operator::IsNotDistinctFrom)
    }
}

impl std::str::FromStr for Operator {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::parse(s)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sql_symbol())
    }
}

/// Aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateFunc {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl std::fmt::Display for AggregateFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregateFunc::Count => write!(f, "count"),
            AggregateFunc::Sum => write!(f, "sum"),
            AggregateFunc::Avg => write!(f, "avg"),
            AggregateFunc::Min => write!(f, "min"),
            AggregateFunc::Max => write!(f, "max"),
        }
    }
}

/// Join Type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    /// CROSS JOIN
    Cross,
    /// INNER JOIN LATERAL (Firebird 4+)
    LateralInner,
    /// LEFT JOIN LATERAL (Firebird 4+)
    LateralLeft,
}

impl JoinKind {
    /// Keyword placed before `join`.
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner | JoinKind::LateralInner => "inner",
            JoinKind::Left | JoinKind::LateralLeft => "left",
            JoinKind::Right => "right",
            JoinKind::Cross => "cross",
        }
    }

    pub fn is_lateral(&self) -> bool {
        matches!(self, JoinKind::LateralInner | JoinKind::LateralLeft)
    }
}

/// Set operation type for combining queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOp {
    /// UNION (removes duplicates)
    Union,
    /// UNION ALL (keeps duplicates)
    UnionAll,
}

impl SetOp {
    pub fn keyword(&self) -> &'static str {
        match self {
            SetOp::Union => "union",
            SetOp::UnionAll => "union all",
        }
    }
}

/// Part of a timestamp a date-scoped predicate compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePart {
    Date,
    Time,
    Day,
    Month,
    Year,
}

impl DatePart {
    pub fn keyword(&self) -> &'static str {
        match self {
            DatePart::Date => "date",
            DatePart::Time => "time",
            DatePart::Day => "day",
            DatePart::Month => "month",
            DatePart::Year => "year",
        }
    }

    /// Whole date/time comparisons use `cast`, the rest use `extract`.
    pub fn is_cast(&self) -> bool {
        matches!(self, DatePart::Date | DatePart::Time)
    }
}

/// Row locking mode appended after paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lock {
    /// `with lock`
    ForUpdate,
    /// Caller-supplied locking clause, emitted verbatim.
    Raw(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_symbol() {
        for op in Operator::ALL {
            assert_eq!(Operator::parse(op.sql_symbol()).unwrap(), op);
        }
    }

    #[test]
    fn test_parse_is_case_and_space_insensitive() {
        assert_eq!(
            Operator::parse("NOT  Starting With").unwrap(),
            Operator::NotStartingWith
        );
        assert_eq!(Operator::parse(" LIKE ").unwrap(), Operator::Like);
    }

    #[test]
    fn test_parse_rejects_foreign_operators() {
        for op in ["ilike", "regexp", "&&", "@>", "in", ""] {
            match Operator::parse(op) {
                Err(DialectError::UnsupportedOperator(found)) => assert_eq!(found, op),
                other => panic!("expected UnsupportedOperator for {op:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_negated_pairs_are_symmetric() {
        for op in Operator::ALL {
            if let Some(neg) = op.negated() {
                assert_eq!(neg.negated(), Some(op));
            }
        }
        assert_eq!(Operator::Eq.negated(), None);
    }
}
