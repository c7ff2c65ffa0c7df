use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use super::{Document, DocumentId, ResponseStore, StoreError, validate_collection_name};

/// One line of a collection file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub document: Document,
}

/// Appends each document as a JSON line to `<dir>/<collection>.jsonl`.
///
/// The directory is created on first write.
#[derive(Debug)]
pub struct JsonlStore {
    dir: PathBuf,
    // Serializes appends so lines from concurrent saves never interleave.
    write_lock: Mutex<()>,
}

impl JsonlStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the file backing `collection`.
    pub fn collection_path(&self, collection: &str) -> Result<PathBuf, StoreError> {
        validate_collection_name(collection)?;
        Ok(self.dir.join(format!("{collection}.jsonl")))
    }

    /// Read back every document of `collection`. A missing file is an empty collection.
    pub async fn load(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let path = self.collection_path(collection)?;
        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(StoreError::from))
            .collect()
    }
}

#[async_trait]
impl ResponseStore for JsonlStore {
    async fn save(&self, collection: &str, document: Document) -> Result<DocumentId, StoreError> {
        let path = self.collection_path(collection)?;
        let stored = StoredDocument {
            id: DocumentId::new(),
            document,
        };
        let mut line = serde_json::to_string(&stored)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        fs::create_dir_all(&self.dir).await?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        debug!("Appended document {} to {}", stored.id, path.display());
        Ok(stored.id)
    }
}
