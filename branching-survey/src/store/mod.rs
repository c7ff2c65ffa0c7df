//! Persistence of finished survey records.
//!
//! A store receives one flat document per completed survey, tagged with the
//! collection of its respondent class, and assigns it a unique id. Writes are
//! dispatched by the kiosk without waiting for the outcome.

mod jsonl;
mod memory;

pub use jsonl::{JsonlStore, StoredDocument};
pub use memory::MemoryStore;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{MODE_KEY, RespondentClass, ResponseRecord, ResponseValue};

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Collection names become file names and must not escape the data directory.
    #[error("Invalid collection name: '{0}'")]
    InvalidCollection(String),

    /// The backing service refused or could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A document store for finished responses.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Durably store `document` in `collection`, returning its new id.
    async fn save(&self, collection: &str, document: Document) -> Result<DocumentId, StoreError>;
}

/// Unique id assigned to a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A flat key-value document: one entry per answered question plus `mode`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Flatten a finished record. Multi-select answers become string arrays.
    pub fn from_record(record: &ResponseRecord) -> Self {
        let mut fields = Map::new();
        for (id, value) in record.responses() {
            let value = match value {
                ResponseValue::Text(text) => Value::String(text.clone()),
                ResponseValue::Selections(items) => {
                    Value::Array(items.iter().cloned().map(Value::String).collect())
                }
            };
            fields.insert(id.to_string(), value);
        }
        fields.insert(
            MODE_KEY.to_string(),
            Value::String(record.mode().to_string()),
        );
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&ResponseRecord> for Document {
    fn from(record: &ResponseRecord) -> Self {
        Self::from_record(record)
    }
}

/// Check that `name` can name a collection: not empty, not `.` or `..`, and
/// free of path separators.
pub fn validate_collection_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\']);
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(name.to_string()))
    }
}

/// Names of the collection each respondent class is stored in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collections {
    pub parent: String,
    pub student: String,
}

impl Collections {
    pub fn for_class(&self, class: RespondentClass) -> &str {
        match class {
            RespondentClass::Parent => &self.parent,
            RespondentClass::Student => &self.student,
        }
    }

    /// Check every collection name.
    pub fn validate(&self) -> Result<(), StoreError> {
        RespondentClass::ALL
            .into_iter()
            .try_for_each(|class| validate_collection_name(self.for_class(class)))
    }
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            parent: "parent_responses".to_string(),
            student: "student_responses".to_string(),
        }
    }
}
