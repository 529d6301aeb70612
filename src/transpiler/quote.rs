//! Identifier quoting.
//!
//! Every identifier is double-quoted so Firebird keeps its case, which
//! means `"price"` and `"PRICE"` name different columns.

use crate::ast::Column;

/// Quote an identifier.
///
/// Handles dotted identifiers (`users.id` → `"users"."id"`), trailing
/// wildcards (`users.*` → `"users".*`) and aliases (`price as p` →
/// `"price" as "p"`, case-insensitive `as`).
pub fn wrap(value: &str) -> String {
    if let Some((name, alias)) = split_alias(value) {
        return format!("{} as {}", wrap(name), wrap_segment(alias));
    }
    value
        .split('.')
        .map(wrap_segment)
        .collect::<Vec<_>>()
        .join(".")
}

/// Quote a table name. Tables follow the same rules as columns.
pub fn wrap_table(value: &str) -> String {
    wrap(value)
}

/// Quote a single identifier part (no dots).
pub fn wrap_segment(segment: &str) -> String {
    let segment = segment.trim();
    if segment == "*" {
        return segment.to_string();
    }
    format!("\"{}\"", segment.replace('"', "\"\""))
}

/// Render a column list; empty means `*`.
pub fn columnize(columns: &[Column]) -> String {
    if columns.is_empty() {
        return "*".to_string();
    }
    columns
        .iter()
        .map(wrap_column)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn wrap_column(column: &Column) -> String {
    match column {
        Column::Star => "*".to_string(),
        Column::Named(name) => wrap(name),
        Column::Aliased { name, alias } => format!("{} as {}", wrap(name), wrap_segment(alias)),
        Column::Raw(sql) => sql.clone(),
    }
}

/// Split `name as alias`. ASCII lowercasing keeps byte offsets intact.
fn split_alias(value: &str) -> Option<(&str, &str)> {
    let lower = value.to_ascii_lowercase();
    let at = lower.find(" as ")?;
    Some((value[..at].trim(), value[at + 4..].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_plain_and_dotted() {
        assert_eq!(wrap("price"), "\"price\"");
        assert_eq!(wrap("users.id"), "\"users\".\"id\"");
        assert_eq!(wrap("users.*"), "\"users\".*");
        assert_eq!(wrap("*"), "*");
    }

    #[test]
    fn test_wrap_alias() {
        assert_eq!(wrap("price as p"), "\"price\" as \"p\"");
        assert_eq!(
            wrap("latest_order.price AS latest_order_price"),
            "\"latest_order\".\"price\" as \"latest_order_price\""
        );
    }

    #[test]
    fn test_wrap_escapes_quotes() {
        assert_eq!(wrap("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_columnize() {
        assert_eq!(columnize(&[]), "*");
        let cols = vec![
            Column::from("name"),
            Column::Aliased {
                name: "city".into(),
                alias: "user_city".into(),
            },
            Column::Raw("count(*) as \"c\"".into()),
        ];
        assert_eq!(
            columnize(&cols),
            "\"name\", \"city\" as \"user_city\", count(*) as \"c\""
        );
    }
}
