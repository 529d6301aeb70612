//! Structural query description.
//!
//! A [`Query`] is a plain value: the builder methods consume and return it,
//! and the compiler only ever borrows it.

pub mod cmd;
pub mod conditions;
pub mod expr;
pub mod joins;
pub mod operators;
pub mod values;

pub use self::cmd::Query;
pub use self::conditions::{Filter, Predicate};
pub use self::expr::{Aggregate, Column, OrderBy, TableRef};
pub use self::joins::Join;
pub use self::operators::{
    Action, AggregateFunc, DatePart, JoinKind, Lock, LogicalOp, Operator, SetOp, SortOrder,
};
pub use self::values::Value;
