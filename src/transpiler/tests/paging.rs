//! Paging syntax tests: `first/skip` before 3.0, `offset/fetch` from 3.0.

use pretty_assertions::assert_eq;

use crate::ast::*;
use crate::error::DialectError;
use crate::transpiler::{Grammar, Paging, ToSql};
use crate::version::EngineVersion;

fn legacy(query: &Query) -> String {
    query.to_sql_with_paging(Paging::Legacy).unwrap().sql
}

fn modern(query: &Query) -> String {
    query.to_sql_with_paging(Paging::Modern).unwrap().sql
}

#[test]
fn test_legacy_limit() {
    let q = Query::select("users").limit(10);
    assert_eq!(legacy(&q), "select first 10 * from \"users\"");
}

#[test]
fn test_legacy_limit_offset_distinct() {
    let q = Query::select("users")
        .column("city")
        .distinct()
        .limit(10)
        .offset(20);
    assert_eq!(legacy(&q), "select first 10 skip 20 distinct \"city\" from \"users\"");
}

#[test]
fn test_legacy_offset_only() {
    let q = Query::select("users").offset(5);
    assert_eq!(legacy(&q), "select skip 5 * from \"users\"");
}

#[test]
fn test_legacy_keeps_order_by_last() {
    let q = Query::select("users").order_by_desc("id").limit(3);
    assert_eq!(legacy(&q), "select first 3 * from \"users\" order by \"id\" desc");
}

#[test]
fn test_modern_limit_offset() {
    let q = Query::select("users")
        .order_by("id", SortOrder::Asc)
        .limit(10)
        .offset(20);
    assert_eq!(
        modern(&q),
        "select * from \"users\" order by \"id\" asc offset 20 rows fetch first 10 rows only"
    );
}

#[test]
fn test_modern_single_clauses() {
    assert_eq!(
        modern(&Query::select("users").offset(5)),
        "select * from \"users\" offset 5 rows"
    );
    assert_eq!(
        modern(&Query::select("users").limit(10)),
        "select * from \"users\" fetch first 10 rows only"
    );
}

#[test]
fn test_paging_before_lock() {
    let q = Query::select("jobs").where_eq("state", "new").limit(1).lock_for_update();
    assert_eq!(
        modern(&q),
        "select * from \"jobs\" where \"state\" = ? fetch first 1 rows only with lock"
    );
    assert_eq!(
        legacy(&q),
        "select first 1 * from \"jobs\" where \"state\" = ? with lock"
    );
}

#[test]
fn test_zero_limit_is_emitted() {
    let q = Query::select("t").limit(0);
    assert_eq!(legacy(&q), "select first 0 * from \"t\"");
    assert_eq!(modern(&q), "select * from \"t\" fetch first 0 rows only");
}

#[test]
fn test_legacy_aggregate_keeps_paging() {
    let q = Query::select("users").limit(5).aggregate(AggregateFunc::Count, "*");
    assert_eq!(legacy(&q), "select first 5 count(*) as \"aggregate\" from \"users\"");
}

#[test]
fn test_forms_never_mix() {
    let q = Query::select("users").where_eq("a", 1).limit(7).offset(2);
    let old = legacy(&q);
    let new = modern(&q);
    assert!(!old.contains("offset") && !old.contains("fetch"));
    assert!(!new.contains("skip") && !new.starts_with("select first"));
}

#[test]
fn test_grammar_for_version() {
    let g = Grammar::for_version(&EngineVersion::new(2, 5, 9));
    assert_eq!(g.paging(), Paging::Legacy);
    let g = Grammar::for_version(&EngineVersion::new(3, 0, 0));
    assert_eq!(g.paging(), Paging::Modern);
}

#[test]
fn test_no_paging_is_identical() {
    let q = Query::select("users").column("id").where_eq("active", true);
    assert_eq!(legacy(&q), modern(&q));
}

#[test]
fn test_far_page_does_not_overflow() {
    let q = Query::select("users").for_page(i64::MAX, 2);
    assert_eq!(
        modern(&q),
        "select * from \"users\" offset 9223372036854775807 rows fetch first 2 rows only"
    );

    let negative = Query::select("users").for_page(i64::MAX, -2);
    assert!(matches!(
        negative.to_sql(),
        Err(DialectError::MalformedQuery(_))
    ));
}
