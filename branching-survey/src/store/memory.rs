use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Document, DocumentId, ResponseStore, StoreError};

/// Keeps documents in memory, grouped by collection.
///
/// Useful for dry runs and tests; everything is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<(DocumentId, Document)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents stored in `collection`, oldest first.
    pub async fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .await
            .get(collection)
            .map(|docs| docs.iter().map(|(_, doc)| doc.clone()).collect())
            .unwrap_or_default()
    }

    /// Total number of documents across all collections.
    pub async fn len(&self) -> usize {
        self.collections.lock().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ResponseStore for MemoryStore {
    async fn save(&self, collection: &str, document: Document) -> Result<DocumentId, StoreError> {
        let id = DocumentId::new();
        self.collections
            .lock()
            .await
            .entry(collection.to_string())
            .or_default()
            .push((id, document));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RespondentClass, ResponseRecord};

    #[tokio::test]
    async fn stores_per_collection() {
        let store = MemoryStore::new();
        let mut record = ResponseRecord::new(RespondentClass::Parent);
        record.insert("city", "Pune");

        store
            .save("parent_responses", Document::from_record(&record))
            .await
            .unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.documents("parent_responses").await.len(), 1);
        assert!(store.documents("student_responses").await.is_empty());
    }
}
