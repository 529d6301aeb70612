//! # firebird-dialect: SQL compiler for Firebird
//!
//! Turns structural query descriptions into Firebird SQL text plus ordered
//! `?` parameters. The paging syntax follows the server: `first/skip`
//! before 3.0, `offset/fetch` from 3.0 on.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use firebird_dialect::prelude::*;
//!
//! let query = Query::select("orders")
//!     .columns(["id", "price"])
//!     .filter("price", ">", 100)
//!     .order_by_desc("id")
//!     .limit(10);
//!
//! let legacy = compile(&query, Paging::Legacy)?;
//! // => select first 10 "id", "price" from "orders" where "price" > ? order by "id" desc
//!
//! let modern = compile(&query, Paging::Modern)?;
//! // => select "id", "price" from "orders" where "price" > ? order by "id" desc fetch first 10 rows only
//! ```
//!
//! Against a live server, wrap the driver in a [`Session`](session::Session),
//! which asks for the version once and picks the paging syntax itself.

pub mod ast;
pub mod config;
pub mod connection;
pub mod error;
pub mod processor;
pub mod session;
pub mod transpiler;
pub mod version;

pub mod prelude {
    pub use crate::ast::values::{col, raw};
    pub use crate::ast::*;
    pub use crate::connection::{Connection, Row};
    pub use crate::error::*;
    pub use crate::processor::normalize_column_listing;
    pub use crate::session::Session;
    pub use crate::transpiler::{
        compile, compile_procedure_call, CompiledStatement, Grammar, Paging, ToSql,
    };
    pub use crate::version::{resolve_version, EngineVersion};
}

pub use transpiler::compile;
