use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use crate::codec::StringArray;
use crate::error::ArrayError;

/// Column stamped whenever a task row is modified.
pub const UPDATED_AT: &str = "updatedat";

/// Field change information for diff tracking
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

/// Errors that can occur during Record operations
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Column '{column}' cannot be read as a text array: {source}")]
    InvalidArrayColumn {
        column: String,
        #[source]
        source: ArrayError,
    },
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),
}

/// A dynamic row (column name -> stored value) with change tracking.
///
/// Text-array columns are kept in their stored array-literal form and only
/// decoded through [`Record::string_array`].
#[derive(Debug, Clone, Default)]
pub struct Record {
    /// Original state from database (None for new rows)
    original: Option<HashMap<String, Value>>,
    fields: HashMap<String, Value>,
    modified_fields: HashSet<String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create record from SQL row data
    pub fn from_sql_data(data: HashMap<String, Value>) -> Self {
        Self {
            original: Some(data.clone()),
            fields: data,
            modified_fields: HashSet::new(),
        }
    }

    /// Create record from a JSON object
    pub fn from_json(json: Value) -> Result<Self, RecordError> {
        match json {
            Value::Object(map) => Ok(Self::from_sql_data(map.into_iter().collect())),
            _ => Err(RecordError::InvalidJson("Expected JSON object".to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set field value with automatic change tracking
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        if self.original.is_some() {
            self.modified_fields.insert(key.clone());
        }
        self.fields.insert(key, value.into());
        self
    }

    /// Remove field and return its value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        if self.original.is_some() {
            self.modified_fields.insert(key.to_string());
        }
        self.fields.remove(key)
    }

    pub fn id(&self) -> Option<i64> {
        self.get("id").and_then(Value::as_i64)
    }

    /// Decode a text-array column. A missing column reads like SQL NULL.
    pub fn string_array(&self, key: &str) -> Result<StringArray, RecordError> {
        let Some(value) = self.get(key) else {
            return Ok(StringArray::new());
        };
        StringArray::scan(value).map_err(|source| RecordError::InvalidArrayColumn {
            column: key.to_string(),
            source,
        })
    }

    /// Store a text-array column as array-literal text.
    ///
    /// Writing back the text already stored is not tracked as a change.
    pub fn set_string_array(&mut self, key: &str, array: &StringArray) -> &mut Self {
        let encoded = Value::String(array.value());
        if self.get(key) == Some(&encoded) {
            return self;
        }
        self.set(key, encoded)
    }

    /// Stamp the updated-at column with the current time
    pub fn touch_updated_at(&mut self) -> &mut Self {
        self.set(UPDATED_AT, Value::String(Utc::now().to_rfc3339()))
    }

    // ========================================
    // Change tracking
    // ========================================

    /// Check if a specific field has been changed
    pub fn changed(&self, key: &str) -> bool {
        match (&self.original, self.fields.get(key)) {
            (Some(original), Some(current)) => original.get(key) != Some(current),
            (Some(original), None) => original.contains_key(key),
            (None, Some(_)) => true,
            (None, None) => false,
        }
    }

    /// Check if record has any changes
    pub fn has_changes(&self) -> bool {
        self.modified_fields.iter().any(|key| self.changed(key)) || self.original.is_none()
    }

    /// Get detailed changes for each field, sorted by column name
    pub fn changes(&self) -> Vec<FieldChange> {
        let mut changes: Vec<FieldChange> = match &self.original {
            Some(original) => self
                .modified_fields
                .iter()
                .filter(|field| self.changed(field))
                .map(|field| FieldChange {
                    field: field.clone(),
                    old_value: original.get(field).cloned(),
                    new_value: self.fields.get(field).cloned(),
                })
                .collect(),
            None => self
                .fields
                .iter()
                .map(|(field, value)| FieldChange {
                    field: field.clone(),
                    old_value: None,
                    new_value: Some(value.clone()),
                })
                .collect(),
        };
        changes.sort_by(|a, b| a.field.cmp(&b.field));
        changes
    }

    /// Convert to JSON Value (all fields)
    pub fn to_json(&self) -> Value {
        Value::Object(self.to_map())
    }

    pub fn to_map(&self) -> Map<String, Value> {
        self.fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl From<HashMap<String, Value>> for Record {
    fn from(map: HashMap<String, Value>) -> Self {
        Self::from_sql_data(map)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_sql_data(map.into_iter().collect())
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Record(id: {:?}, fields: {}, changed: {})",
            self.id(),
            self.fields.len(),
            self.has_changes()
        )
    }
}
