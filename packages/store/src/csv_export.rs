//! CSV rendering for grid exports.

use crate::draft::{value_text, Record};
use crate::error::StoreError;

/// Render `rows` as CSV with a header row of `columns`, in that order.
/// Missing and null values are empty cells; quoting follows RFC 4180.
pub fn to_csv(columns: &[&str], rows: &[Record]) -> Result<String, StoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(
            columns
                .iter()
                .map(|c| row.get(*c).map(value_text).unwrap_or_default()),
        )?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| StoreError::CsvEncoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_header_and_column_order() {
        let rows = vec![row(json!({ "email": "a@x.test", "name": "Ann", "extra": 1 }))];
        let text = to_csv(&["name", "email"], &rows).unwrap();
        assert_eq!(text, "name,email\nAnn,a@x.test\n");
    }

    #[test]
    fn test_missing_null_and_quoted_values() {
        let rows = vec![row(json!({
            "name": "Smith, Jo",
            "note": null,
            "qty": 3
        }))];
        let text = to_csv(&["name", "note", "qty", "absent"], &rows).unwrap();
        assert_eq!(text, "name,note,qty,absent\n\"Smith, Jo\",,3,\n");
    }

    #[test]
    fn test_no_rows_is_header_only() {
        assert_eq!(to_csv(&["a", "b"], &[]).unwrap(), "a,b\n");
    }
}
