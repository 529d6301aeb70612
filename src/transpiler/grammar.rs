//! The Firebird statement compiler.
//!
//! A [`Grammar`] is fixed to one paging syntax at construction and is
//! otherwise stateless; it can be shared freely and used concurrently.

use crate::ast::*;
use crate::error::DialectResult;
use crate::transpiler::dialect::Paging;
use crate::transpiler::dml;
use crate::transpiler::params::{CompiledStatement, ParamContext};
use crate::version::EngineVersion;

/// Alias given to aggregate results; the session reads it back by name.
pub const AGGREGATE_ALIAS: &str = "aggregate";

/// Alias of the derived table that wraps unions and havings when an
/// aggregate is taken over them.
pub const WRAPPED_TABLE_ALIAS: &str = "temp_table";

/// Firebird has no `random()`; `RAND()` ships with the built-in UDFs.
pub const RANDOM_ORDER: &str = "RAND()";

/// Locking clause for [`Lock::ForUpdate`].
pub const FOR_UPDATE: &str = "with lock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grammar {
    paging: Paging,
}

impl Grammar {
    pub fn new(paging: Paging) -> Self {
        Self { paging }
    }

    /// Grammar for a server of the given version.
    pub fn for_version(version: &EngineVersion) -> Self {
        Self::new(Paging::for_version(version))
    }

    pub fn paging(&self) -> Paging {
        self.paging
    }

    /// Compile a query description into SQL text and its ordered
    /// parameters.
    ///
    /// Nothing is returned unless the whole statement compiled; an invalid
    /// description never yields partial SQL.
    pub fn compile(&self, query: &Query) -> DialectResult<CompiledStatement> {
        let mut params = ParamContext::new();
        let sql = match query.action {
            Action::Select => dml::select::build_select(self, query, &mut params)?,
            Action::Insert => dml::insert::build_insert(self, query, &mut params)?,
            Action::Update => dml::update::build_update(self, query, &mut params)?,
            Action::Delete => dml::delete::build_delete(self, query, &mut params)?,
        };
        Ok(params.finish(sql))
    }

    /// Compile `query` reduced to a single aggregate.
    ///
    /// Selected columns and orderings are dropped, except that unions and
    /// havings keep their columns and are wrapped in a derived table.
    pub fn compile_aggregate(
        &self,
        query: &Query,
        aggregate: Aggregate,
    ) -> DialectResult<CompiledStatement> {
        let mut reduced = query.clone();
        if !dml::select::wraps_aggregate(&reduced) {
            reduced.columns.clear();
        }
        reduced.orders.clear();
        reduced.aggregate = Some(aggregate);
        self.compile(&reduced)
    }

    /// Compile the row-count probe behind an existence check.
    ///
    /// Firebird has no `select exists(...)`, so existence is asked as
    /// `count(*)` and tested for being above zero.
    pub fn compile_exists(&self, query: &Query) -> DialectResult<CompiledStatement> {
        self.compile_aggregate(query, Aggregate::count())
    }
}
