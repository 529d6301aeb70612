//! Result shape normalization.

use crate::connection::Row;
use crate::error::{DialectError, DialectResult};

/// Field name the column listing query aliases its result to.
pub const COLUMN_NAME_FIELD: &str = "column_name";

/// Table column introspection, one row per column in declaration order.
pub const COLUMN_LISTING_SQL: &str = "select trim(rdb$field_name) as \"column_name\" \
     from rdb$relation_fields where rdb$relation_name = ? order by rdb$field_position";

/// Extract the column names from a column listing result.
///
/// Drivers disagree on key case (`column_name` vs `COLUMN_NAME`), so the
/// field is matched case-insensitively.
pub fn normalize_column_listing(rows: &[Row]) -> DialectResult<Vec<String>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let value = row
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(COLUMN_NAME_FIELD))
                .map(|(_, value)| value)
                .ok_or_else(|| {
                    DialectError::MalformedRow(format!("row {} has no {} field", i, COLUMN_NAME_FIELD))
                })?;
            match value.as_str() {
                Some(name) => Ok(name.to_string()),
                None => Err(DialectError::MalformedRow(format!(
                    "row {}: {} is not a string: {}",
                    i, COLUMN_NAME_FIELD, value
                ))),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_normalize_in_order() {
        let rows = vec![
            row(json!({"column_name": "ID"})),
            row(json!({"column_name": "NAME"})),
        ];
        assert_eq!(normalize_column_listing(&rows).unwrap(), vec!["ID", "NAME"]);
    }

    #[test]
    fn test_key_case_is_ignored() {
        let rows = vec![row(json!({"COLUMN_NAME": "PRICE", "other": 1}))];
        assert_eq!(normalize_column_listing(&rows).unwrap(), vec!["PRICE"]);
    }

    #[test]
    fn test_empty_listing() {
        assert!(normalize_column_listing(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_missing_field() {
        let rows = vec![row(json!({"column_name": "ID"})), row(json!({"name": "X"}))];
        assert!(matches!(
            normalize_column_listing(&rows),
            Err(DialectError::MalformedRow(_))
        ));
    }

    #[test]
    fn test_non_string_value() {
        let rows = vec![row(json!({"column_name": 5}))];
        assert!(matches!(
            normalize_column_listing(&rows),
            Err(DialectError::MalformedRow(_))
        ));
    }
}
