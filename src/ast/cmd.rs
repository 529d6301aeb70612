use serde::{Deserialize, Serialize};

use crate::ast::conditions::push_filter;
use crate::ast::{
    Action, Aggregate, AggregateFunc, Column, Filter, Join, JoinKind, Lock, LogicalOp, OrderBy,
    SetOp, SortOrder, TableRef, Value,
};

/// A structural query description.
///
/// Built with the consuming builder methods below and handed to the
/// compiler by reference; compilation never mutates it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    /// The statement kind.
    pub action: Action,
    /// Target table, subquery, raw expression or procedure.
    pub table: Option<TableRef>,
    /// Whether to use DISTINCT in SELECT
    pub distinct: bool,
    /// Columns to select. Empty means `*`.
    pub columns: Vec<Column>,
    /// Joins to other tables
    pub joins: Vec<Join>,
    /// WHERE tree
    pub filter: Option<Filter>,
    /// GROUP BY columns
    pub groups: Vec<Column>,
    /// HAVING tree (filter on aggregates)
    pub having: Option<Filter>,
    pub orders: Vec<OrderBy>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Aggregate select, exclusive with plain columns.
    pub aggregate: Option<Aggregate>,
    /// Set operations (UNION, UNION ALL) chained queries
    pub set_ops: Vec<(SetOp, Box<Query>)>,
    pub lock: Option<Lock>,
    /// Column assignments for INSERT/UPDATE
    pub assignments: Vec<(String, Value)>,
    /// RETURNING clause columns (for INSERT/UPDATE/DELETE)
    pub returning: Vec<String>,
}

impl Query {
    fn with_action(action: Action, table: TableRef) -> Self {
        Self {
            action,
            table: Some(table),
            ..Self::default()
        }
    }

    /// Create a new SELECT for the given table.
    pub fn select(table: impl Into<TableRef>) -> Self {
        Self::with_action(Action::Select, table.into())
    }

    /// Create a new INSERT into the given table.
    pub fn insert(table: impl Into<String>) -> Self {
        Self::with_action(Action::Insert, TableRef::Named(table.into()))
    }

    /// Create a new UPDATE of the given table.
    pub fn update(table: impl Into<String>) -> Self {
        Self::with_action(Action::Update, TableRef::Named(table.into()))
    }

    /// Create a new DELETE from the given table.
    pub fn delete(table: impl Into<String>) -> Self {
        Self::with_action(Action::Delete, TableRef::Named(table.into()))
    }

    /// Select from a selectable stored procedure.
    pub fn procedure<I, V>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::with_action(
            Action::Select,
            TableRef::Procedure {
                name: name.into(),
                args: args.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Select from a derived table.
    pub fn from_subquery(query: Query, alias: impl Into<String>) -> Self {
        Self::with_action(
            Action::Select,
            TableRef::Subquery {
                query: Box::new(query),
                alias: Some(alias.into()),
            },
        )
    }

    /// Select from a raw table expression.
    pub fn from_raw(sql: impl Into<String>, bindings: Vec<Value>) -> Self {
        Self::with_action(
            Action::Select,
            TableRef::Raw {
                sql: sql.into(),
                bindings,
            },
        )
    }

    // ----- columns -----

    pub fn columns<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Column>,
    {
        self.columns.extend(cols.into_iter().map(Into::into));
        self
    }

    pub fn column(mut self, col: impl Into<Column>) -> Self {
        self.columns.push(col.into());
        self
    }

    pub fn column_as(mut self, name: impl Into<String>, alias: impl Into<String>) -> Self {
        self.columns.push(Column::Aliased {
            name: name.into(),
            alias: alias.into(),
        });
        self
    }

    pub fn select_raw(mut self, sql: impl Into<String>) -> Self {
        self.columns.push(Column::Raw(sql.into()));
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Replace the selection with an aggregate.
    pub fn aggregate(mut self, func: AggregateFunc, column: impl Into<String>) -> Self {
        self.aggregate = Some(Aggregate::new(func, column));
        self
    }

    // ----- filters -----

    /// Add `column <op> value`, joined with `and`.
    pub fn filter(mut self, column: impl Into<String>, op: &str, value: impl Into<Value>) -> Self {
        push_filter(&mut self.filter, LogicalOp::And, Filter::compare(column, op, value));
        self
    }

    /// Add `column <op> value`, joined with `or`.
    pub fn or_filter(mut self, column: impl Into<String>, op: &str, value: impl Into<Value>) -> Self {
        push_filter(&mut self.filter, LogicalOp::Or, Filter::compare(column, op, value));
        self
    }

    pub fn where_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(column, "=", value)
    }

    /// Add any filter tree, joined with `and`.
    pub fn filter_cond(mut self, condition: Filter) -> Self {
        push_filter(&mut self.filter, LogicalOp::And, condition);
        self
    }

    /// Add any filter tree, joined with `or`.
    pub fn or_filter_cond(mut self, condition: Filter) -> Self {
        push_filter(&mut self.filter, LogicalOp::Or, condition);
        self
    }

    /// Add a raw `where` fragment.
    pub fn where_raw(self, sql: impl Into<String>, bindings: Vec<Value>) -> Self {
        self.filter_cond(Filter::raw(sql, bindings))
    }

    // ----- joins -----

    pub fn join_with(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// `inner join "table" on "left" <op> "right"`
    pub fn join(self, table: impl Into<TableRef>, left: &str, op: &str, right: &str) -> Self {
        self.join_with(Join::new(JoinKind::Inner, table).on(left, op, right))
    }

    pub fn left_join(self, table: impl Into<TableRef>, left: &str, op: &str, right: &str) -> Self {
        self.join_with(Join::new(JoinKind::Left, table).on(left, op, right))
    }

    pub fn right_join(self, table: impl Into<TableRef>, left: &str, op: &str, right: &str) -> Self {
        self.join_with(Join::new(JoinKind::Right, table).on(left, op, right))
    }

    pub fn cross_join(self, table: impl Into<TableRef>) -> Self {
        self.join_with(Join::new(JoinKind::Cross, table))
    }

    /// Join an aliased subquery.
    pub fn join_sub(self, query: Query, alias: impl Into<String>, left: &str, op: &str, right: &str) -> Self {
        let table = TableRef::Subquery {
            query: Box::new(query),
            alias: Some(alias.into()),
        };
        self.join_with(Join::new(JoinKind::Inner, table).on(left, op, right))
    }

    /// `inner join lateral (...) as "alias" on true`
    pub fn join_lateral(self, query: Query, alias: impl Into<String>) -> Self {
        self.join_with(Join::lateral(JoinKind::LateralInner, query, Some(alias.into())))
    }

    /// `left join lateral (...) as "alias" on true`
    pub fn left_join_lateral(self, query: Query, alias: impl Into<String>) -> Self {
        self.join_with(Join::lateral(JoinKind::LateralLeft, query, Some(alias.into())))
    }

    // ----- grouping -----

    pub fn group_by<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Column>,
    {
        self.groups.extend(cols.into_iter().map(Into::into));
        self
    }

    pub fn having(mut self, column: impl Into<String>, op: &str, value: impl Into<Value>) -> Self {
        push_filter(&mut self.having, LogicalOp::And, Filter::compare(column, op, value));
        self
    }

    pub fn or_having(mut self, column: impl Into<String>, op: &str, value: impl Into<Value>) -> Self {
        push_filter(&mut self.having, LogicalOp::Or, Filter::compare(column, op, value));
        self
    }

    pub fn having_raw(mut self, sql: impl Into<String>, bindings: Vec<Value>) -> Self {
        push_filter(&mut self.having, LogicalOp::And, Filter::raw(sql, bindings));
        self
    }

    // ----- ordering & paging -----

    pub fn order_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.orders.push(OrderBy::Column {
            column: column.into(),
            order,
        });
        self
    }

    pub fn order_by_desc(self, column: impl Into<String>) -> Self {
        self.order_by(column, SortOrder::Desc)
    }

    pub fn order_by_raw(mut self, sql: impl Into<String>) -> Self {
        self.orders.push(OrderBy::Raw(sql.into()));
        self
    }

    /// Newest first on `created_at`.
    pub fn latest(self) -> Self {
        self.latest_by("created_at")
    }

    pub fn latest_by(self, column: impl Into<String>) -> Self {
        self.order_by(column, SortOrder::Desc)
    }

    /// Oldest first on `created_at`.
    pub fn oldest(self) -> Self {
        self.oldest_by("created_at")
    }

    pub fn oldest_by(self, column: impl Into<String>) -> Self {
        self.order_by(column, SortOrder::Asc)
    }

    pub fn in_random_order(mut self) -> Self {
        self.orders.push(OrderBy::Random);
        self
    }

    /// Drop every ordering added so far.
    pub fn reorder(mut self) -> Self {
        self.orders.clear();
        self
    }

    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Page `page` (1-based) of `per_page` rows.
    ///
    /// The offset saturates instead of overflowing; a negative `per_page`
    /// is left for the compiler to reject.
    pub fn for_page(self, page: i64, per_page: i64) -> Self {
        self.offset((page.max(1) - 1).saturating_mul(per_page))
            .limit(per_page)
    }

    // ----- set operations & locking -----

    pub fn union(mut self, other: Query) -> Self {
        self.set_ops.push((SetOp::Union, Box::new(other)));
        self
    }

    pub fn union_all(mut self, other: Query) -> Self {
        self.set_ops.push((SetOp::UnionAll, Box::new(other)));
        self
    }

    pub fn lock_for_update(mut self) -> Self {
        self.lock = Some(Lock::ForUpdate);
        self
    }

    // ----- DML -----

    /// Assign a column for INSERT/UPDATE.
    pub fn set_value(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments.push((column.into(), value.into()));
        self
    }

    pub fn values<I, S, V>(mut self, vals: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Value>,
    {
        self.assignments
            .extend(vals.into_iter().map(|(c, v)| (c.into(), v.into())));
        self
    }

    pub fn returning<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.returning.extend(cols.into_iter().map(Into::into));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_clauses() {
        let q = Query::select("orders")
            .columns(["id", "price"])
            .filter("price", ">", 100)
            .or_filter("price", "=", 5)
            .order_by_desc("id")
            .limit(10)
            .offset(20);
        assert_eq!(q.columns.len(), 2);
        assert!(matches!(q.filter, Some(Filter::Or(_))));
        assert_eq!(q.limit, Some(10));
        assert_eq!(q.offset, Some(20));
    }

    #[test]
    fn test_star_column_from_str() {
        let q = Query::select("users").column("*");
        assert_eq!(q.columns, vec![Column::Star]);
    }

    #[test]
    fn test_for_page() {
        let q = Query::select("users").for_page(3, 15);
        assert_eq!(q.offset, Some(30));
        assert_eq!(q.limit, Some(15));
    }

    #[test]
    fn test_for_page_saturates() {
        let q = Query::select("users").for_page(i64::MAX, 2);
        assert_eq!(q.offset, Some(i64::MAX));
        assert_eq!(q.limit, Some(2));

        let q = Query::select("users").for_page(i64::MAX, -2);
        assert_eq!(q.offset, Some(i64::MIN));
    }

    #[test]
    fn test_query_deserializes_from_json() {
        let json = r#"{
            "table": {"named": "orders"},
            "columns": [{"named": "price"}],
            "filter": {"predicate": {"compare": {"column": "price", "op": ">", "value": {"int": 10}}}},
            "limit": 5
        }"#;
        let q: Query = serde_json::from_str(json).unwrap();
        assert_eq!(q.action, Action::Select);
        assert_eq!(q.table, Some(TableRef::Named("orders".to_string())));
        assert_eq!(q.limit, Some(5));
    }
}
