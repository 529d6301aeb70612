//! Version-aware compilation and execution over one connection.

use once_cell::sync::OnceCell;

use crate::ast::{Aggregate, AggregateFunc, Query, Value};
use crate::connection::{Connection, Row};
use crate::error::{DialectError, DialectResult};
use crate::processor::{normalize_column_listing, COLUMN_LISTING_SQL};
use crate::transpiler::grammar::AGGREGATE_ALIAS;
use crate::transpiler::{CompiledStatement, Grammar, Paging};
use crate::version::{resolve_version, EngineVersion};

/// A connection plus its engine version, asked for once and cached.
///
/// The cache belongs to this session only; two sessions over servers of
/// different versions never share it.
pub struct Session<C> {
    conn: C,
    version: OnceCell<EngineVersion>,
}

impl<C: Connection> Session<C> {
    pub fn new(conn: C) -> Self {
        Self {
            conn,
            version: OnceCell::new(),
        }
    }

    /// A session whose version is already known, e.g. from configuration.
    /// The server is never asked.
    pub fn with_version(conn: C, version: EngineVersion) -> Self {
        Self {
            conn,
            version: OnceCell::with_value(version),
        }
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    /// The server's engine version, resolved on first use.
    ///
    /// A failed lookup is not cached; the next call asks again.
    pub fn engine_version(&self) -> DialectResult<EngineVersion> {
        self.version
            .get_or_try_init(|| {
                let version = resolve_version(&self.conn)?;
                tracing::info!(
                    "Firebird server {} uses {} paging",
                    version,
                    Paging::for_version(&version)
                );
                Ok(version)
            })
            .copied()
    }

    pub fn paging(&self) -> DialectResult<Paging> {
        Ok(Paging::for_version(&self.engine_version()?))
    }

    pub fn grammar(&self) -> DialectResult<Grammar> {
        Ok(Grammar::new(self.paging()?))
    }

    /// Compile for this connection's server.
    pub fn compile(&self, query: &Query) -> DialectResult<CompiledStatement> {
        self.grammar()?.compile(query)
    }

    /// Compile and run any statement.
    pub fn execute(&self, query: &Query) -> DialectResult<Vec<Row>> {
        let statement = self.compile(query)?;
        self.run(&statement)
    }

    /// Compile and run a select.
    pub fn select(&self, query: &Query) -> DialectResult<Vec<Row>> {
        if query.action != crate::ast::Action::Select {
            return Err(DialectError::malformed(format!(
                "select() given a {} statement",
                query.action
            )));
        }
        self.execute(query)
    }

    /// Whether the query matches any row, asked as `count(*) > 0`.
    pub fn exists(&self, query: &Query) -> DialectResult<bool> {
        Ok(self.count(query)? > 0)
    }

    pub fn count(&self, query: &Query) -> DialectResult<i64> {
        let value = self.aggregate(query, AggregateFunc::Count, "*")?;
        let count = match &value {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        count.ok_or_else(|| DialectError::MalformedRow(format!("count is not an integer: {}", value)))
    }

    /// Run an aggregate over the query and return its single value.
    /// An empty result is `null`.
    pub fn aggregate(
        &self,
        query: &Query,
        func: AggregateFunc,
        column: &str,
    ) -> DialectResult<serde_json::Value> {
        let statement = self
            .grammar()?
            .compile_aggregate(query, Aggregate::new(func, column))?;
        let rows = self.run(&statement)?;
        let Some(row) = rows.first() else {
            return Ok(serde_json::Value::Null);
        };
        row.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(AGGREGATE_ALIAS))
            .map(|(_, value)| value.clone())
            .ok_or_else(|| {
                DialectError::MalformedRow(format!("aggregate row has no {} field", AGGREGATE_ALIAS))
            })
    }

    /// `select * from "NAME" (?, ...)`
    pub fn execute_procedure(&self, name: &str, args: Vec<Value>) -> DialectResult<Vec<Row>> {
        tracing::debug!("Executing procedure {} with {} argument(s)", name, args.len());
        self.select(&Query::procedure(name, args))
    }

    /// Column names of a table, in declaration order.
    pub fn column_listing(&self, table: &str) -> DialectResult<Vec<String>> {
        let rows = self
            .conn
            .execute(COLUMN_LISTING_SQL, &[Value::String(table.to_string())])?;
        normalize_column_listing(&rows)
    }

    /// Swap in a new connection. The cached version belongs to the old
    /// server and is dropped.
    pub fn replace_connection(&mut self, conn: C) -> C {
        self.version = OnceCell::new();
        tracing::debug!("Connection replaced, server version will be resolved again");
        std::mem::replace(&mut self.conn, conn)
    }

    pub fn into_inner(self) -> C {
        self.conn
    }

    fn run(&self, statement: &CompiledStatement) -> DialectResult<Vec<Row>> {
        tracing::debug!("Executing: {} ({} params)", statement.sql, statement.params.len());
        self.conn.execute(&statement.sql, &statement.params)
    }
}

impl<C> std::fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("version", &self.version.get())
            .finish_non_exhaustive()
    }
}
