use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::codec::StringArray;
use crate::database::record::{Record, RecordError};

pub const URLS_BEFORE: &str = "urlsBefore";
pub const URLS_AFTER: &str = "urlsAfter";

/// Photo URLs attached to a daily task report, taken before and after the work.
///
/// When loaded with `FromRow`, select both columns cast to text, e.g.
/// `SELECT id, "urlsBefore"::text AS "urlsBefore", ...`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskPhotos {
    pub id: i64,
    #[sqlx(rename = "urlsBefore")]
    pub urls_before: StringArray,
    #[sqlx(rename = "urlsAfter")]
    pub urls_after: StringArray,
}

/// Partial update payload. `None` leaves a list untouched, `Some(vec![])` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPhotosUpdate {
    #[serde(default)]
    pub urls_before: Option<Vec<String>>,
    #[serde(default)]
    pub urls_after: Option<Vec<String>>,
}

impl TaskPhotosUpdate {
    pub fn is_empty(&self) -> bool {
        self.urls_before.is_none() && self.urls_after.is_none()
    }
}

impl TaskPhotos {
    /// Fails when `id` is absent or not an integer.
    pub fn from_record(record: &Record) -> Result<Self, RecordError> {
        let id = record
            .id()
            .ok_or_else(|| RecordError::MissingRequiredField("id".to_string()))?;
        Ok(Self {
            id,
            urls_before: record.string_array(URLS_BEFORE)?,
            urls_after: record.string_array(URLS_AFTER)?,
        })
    }

    pub fn apply(&mut self, update: &TaskPhotosUpdate) -> &mut Self {
        if let Some(urls) = &update.urls_before {
            self.urls_before = StringArray::from(urls.clone());
        }
        if let Some(urls) = &update.urls_after {
            self.urls_after = StringArray::from(urls.clone());
        }
        self
    }

    /// Write both columns back and stamp `updatedat` if either one changed.
    pub fn write_to(&self, record: &mut Record) {
        record
            .set_string_array(URLS_BEFORE, &self.urls_before)
            .set_string_array(URLS_AFTER, &self.urls_after);

        if record.changed(URLS_BEFORE) || record.changed(URLS_AFTER) {
            tracing::debug!(
                task_id = self.id,
                before = self.urls_before.len(),
                after = self.urls_after.len(),
                "Task photo URLs changed"
            );
            record.touch_updated_at();
        }
    }
}
