//! # Record drafts and minimal patches
//!
//! A [`Draft`] is the editable copy of a record while a form is open. In edit
//! mode it remembers the original snapshot so [`Draft::submission`] can send
//! only the fields that actually changed; in create mode the whole draft is
//! sent. Closing the form simply drops the draft.
//!
//! Form inputs always produce text while the backend may have sent numbers, so
//! two values are considered equal when their display text matches
//! (`5000` and `"5000"`, `null` and `""`).

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde_json::{Map, Value};

use crate::entity::FieldSpec;
use crate::error::StoreError;

/// An untyped backend record, as returned in list payloads.
pub type Record = Map<String, Value>;

/// Text shown for a JSON value in grids, forms and CSV cells.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Whether a form value differs from the stored one.
pub fn same_value(a: &Value, b: &Value) -> bool {
    a == b || value_text(a) == value_text(b)
}

/// Read a record's identifier as text, whatever JSON type the backend used.
pub fn record_id(record: &Record, id_field: &str) -> Option<String> {
    record
        .get(id_field)
        .map(value_text)
        .filter(|id| !id.is_empty())
}

/// Identity of the part of `record` a form over `fields` displays. Equal keys
/// mean the form would open with the same values, so views key their editors
/// on it to restart them only when the backend's copy actually changed.
pub fn form_key(record: &Record, fields: &[FieldSpec]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for field in fields {
        field.key.hash(&mut hasher);
        record
            .get(field.key)
            .map(value_text)
            .unwrap_or_default()
            .hash(&mut hasher);
    }
    hasher.finish()
}

#[derive(Clone, Debug, PartialEq)]
pub enum DraftMode {
    Create,
    Edit { id: String },
}

/// What a submit should do.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Create(Record),
    Update { id: String, patch: Record },
    /// Edit mode with nothing changed: no request is made.
    NoChanges,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    mode: DraftMode,
    original: Record,
    current: Record,
}

impl Draft {
    /// Blank draft for a new record: every form field starts empty.
    pub fn create(fields: &[FieldSpec]) -> Self {
        let current: Record = fields
            .iter()
            .map(|f| (f.key.to_string(), Value::String(f.default.to_string())))
            .collect();
        Self {
            mode: DraftMode::Create,
            original: Record::new(),
            current,
        }
    }

    /// Draft over an existing record, limited to the form's fields.
    pub fn edit(id: impl Into<String>, record: &Record, fields: &[FieldSpec]) -> Self {
        let snapshot: Record = fields
            .iter()
            .map(|f| {
                let value = record.get(f.key).cloned().unwrap_or(Value::Null);
                (f.key.to_string(), value)
            })
            .collect();
        Self::from_snapshot(id, snapshot)
    }

    /// Draft over a full snapshot, every key editable.
    pub fn from_snapshot(id: impl Into<String>, snapshot: Record) -> Self {
        Self {
            mode: DraftMode::Edit { id: id.into() },
            current: snapshot.clone(),
            original: snapshot,
        }
    }

    pub fn mode(&self) -> &DraftMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, DraftMode::Edit { .. })
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.current.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.current.get(field)
    }

    /// Current value of a field as form text.
    pub fn text(&self, field: &str) -> String {
        self.current.get(field).map(value_text).unwrap_or_default()
    }

    /// Fields whose draft value differs from the original snapshot.
    pub fn patch(&self) -> Record {
        self.current
            .iter()
            .filter(|(key, value)| {
                self.original
                    .get(*key)
                    .map_or(!value_text(value).is_empty(), |orig| !same_value(orig, value))
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        !self.patch().is_empty()
    }

    /// Labels of required fields that are still blank.
    pub fn missing_required(&self, fields: &[FieldSpec]) -> Vec<&'static str> {
        fields
            .iter()
            .filter(|f| f.required && self.text(f.key).trim().is_empty())
            .map(|f| f.label)
            .collect()
    }

    /// Decide what to send. Required fields are checked first; nothing is sent
    /// while one is blank.
    pub fn submission(&self, fields: &[FieldSpec]) -> Result<Submission, StoreError> {
        if let Some(missing) = self.missing_required(fields).first() {
            return Err(StoreError::MissingField(missing.to_string()));
        }
        match &self.mode {
            DraftMode::Create => Ok(Submission::Create(self.current.clone())),
            DraftMode::Edit { id } => {
                let patch = self.patch();
                if patch.is_empty() {
                    Ok(Submission::NoChanges)
                } else {
                    Ok(Submission::Update {
                        id: id.clone(),
                        patch,
                    })
                }
            }
        }
    }
}
