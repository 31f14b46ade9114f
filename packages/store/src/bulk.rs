//! # Row selection and bulk edits
//!
//! A [`Selection`] is the set of record ids checked in a grid. A [`BulkEdit`]
//! captures the fields the user touched in the bulk-edit dialog; only those are
//! applied, together with the selected ids, in a single request:
//!
//! ```json
//! { "ids": ["a", "b"], "status": "discontinued" }
//! ```

use std::collections::BTreeSet;

use serde_json::Value;

use crate::draft::{value_text, Record};
use crate::error::StoreError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Header checkbox: select every id on the page, or clear them if all are
    /// already selected.
    pub fn toggle_all<'a>(&mut self, page_ids: impl IntoIterator<Item = &'a str>) {
        let page: Vec<&str> = page_ids.into_iter().collect();
        if !page.is_empty() && page.iter().all(|id| self.ids.contains(*id)) {
            for id in page {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(page.into_iter().map(str::to_string));
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum BulkSubmission {
    /// Request body for `PUT /api/<entity>/bulk-edit`.
    Apply(Record),
    /// Nothing was touched: no request.
    NoChanges,
}

/// Fields set in the bulk-edit dialog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BulkEdit {
    fields: Record,
}

impl BulkEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. Clearing an input back to blank untouches it.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        let value = value.into();
        if value_text(&value).trim().is_empty() {
            self.fields.remove(field);
        } else {
            self.fields.insert(field.to_string(), value);
        }
    }

    pub fn text(&self, field: &str) -> String {
        self.fields.get(field).map(value_text).unwrap_or_default()
    }

    pub fn touched(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn submission(&self, selection: &Selection) -> Result<BulkSubmission, StoreError> {
        if selection.is_empty() {
            return Err(StoreError::EmptySelection);
        }
        if self.fields.is_empty() {
            return Ok(BulkSubmission::NoChanges);
        }
        let mut body = self.fields.clone();
        let ids = selection.ids().into_iter().map(Value::String).collect();
        body.insert("ids".to_string(), Value::Array(ids));
        Ok(BulkSubmission::Apply(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        selection.toggle("a");
        selection.toggle("b");
        selection.toggle("a");
        assert_eq!(selection.ids(), vec!["b"]);
        assert!(!selection.contains("a"));
    }

    #[test]
    fn test_toggle_all() {
        let mut selection = Selection::new();
        selection.toggle("a");
        selection.toggle_all(["a", "b", "c"]);
        assert_eq!(selection.len(), 3);
        selection.toggle_all(["a", "b", "c"]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_only_touched_fields_are_sent() {
        let mut selection = Selection::new();
        selection.toggle("i1");
        selection.toggle("i2");

        let mut edit = BulkEdit::new();
        edit.set("status", "discontinued");
        edit.set("price", "");

        let BulkSubmission::Apply(body) = edit.submission(&selection).unwrap() else {
            panic!("expected a request");
        };
        assert_eq!(
            serde_json::Value::Object(body),
            json!({ "ids": ["i1", "i2"], "status": "discontinued" })
        );
    }

    #[test]
    fn test_untouched_edit_sends_nothing() {
        let mut selection = Selection::new();
        selection.toggle("i1");
        let mut edit = BulkEdit::new();
        edit.set("cost", "12");
        edit.set("cost", " ");
        assert_eq!(edit.submission(&selection).unwrap(), BulkSubmission::NoChanges);
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let mut edit = BulkEdit::new();
        edit.set("status", "in stock");
        let err = edit.submission(&Selection::new()).unwrap_err();
        assert!(matches!(err, StoreError::EmptySelection));
    }
}
