//! Transpiler test modules.
//!
//! Tests are organized by category:
//! - `core`: SELECT, INSERT, UPDATE, DELETE and condition basics
//! - `paging`: legacy `first/skip` vs modern `offset/fetch`
//! - `features`: date parts, subqueries, joins, unions, aggregates, procedures

mod paging;
