//! JSON-file backed collection store
//!
//! Each collection lives in one file holding a pretty-printed JSON array.
//! Every mutation reads the whole file, changes the in-memory sequence and
//! writes the whole sequence back. Stored records are handled as raw JSON
//! values, so records this service did not write survive a rewrite exactly
//! as they were. Mutations inside one process are serialized; separate
//! processes sharing a data directory are not coordinated.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("collection {collection} is not valid JSON: {source}")]
    Corrupt {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("collection {collection} does not hold a JSON array")]
    NotAnArray { collection: &'static str },

    #[error("failed to serialize collection {collection}: {source}")]
    Serialize {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// The named collections this service persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Bookings,
    Contacts,
}

impl Collection {
    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Bookings => "bookings.json",
            Collection::Contacts => "contacts.json",
        }
    }
}

/// A record type that lives in exactly one collection.
pub trait Record: Serialize + Send + Sync {
    const COLLECTION: Collection;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The collection file does not exist; nothing was written.
    CollectionMissing,
    /// The collection was rewritten without the matching records.
    Removed(usize),
}

#[derive(Clone)]
pub struct CollectionStore {
    data_dir: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl CollectionStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Arc::new(data_dir.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    /// Returns the stored records of `R`'s collection as-is, in insertion
    /// order, or an empty sequence when the file does not exist.
    pub async fn load<R: Record>(&self) -> StoreResult<Vec<Value>> {
        let collection = R::COLLECTION;
        match self.read_raw(collection).await? {
            None => Ok(Vec::new()),
            Some(raw) => parse_records(collection, &raw),
        }
    }

    /// Appends `record` to the end of its collection and rewrites the file.
    /// A missing file, or one that does not hold a JSON array, is treated as
    /// an empty collection.
    pub async fn append<R: Record>(&self, record: &R) -> StoreResult<usize> {
        let collection = R::COLLECTION;
        let value = serde_json::to_value(record).map_err(|source| StoreError::Serialize {
            collection: collection.file_name(),
            source,
        })?;

        let _guard = self.write_lock.lock().await;

        let mut records = match self.read_raw(collection).await? {
            None => Vec::new(),
            Some(raw) => match parse_records(collection, &raw) {
                Ok(records) => records,
                Err(err) => {
                    warn!(
                        collection = collection.file_name(),
                        error = %err,
                        "discarding unreadable collection contents"
                    );
                    Vec::new()
                }
            },
        };

        records.push(value);
        self.persist(collection, &records).await?;

        debug!(collection = collection.file_name(), len = records.len(), "appended record");
        Ok(records.len())
    }

    /// Rewrites the collection without every record whose string `id` equals
    /// `id`. Removing an id that is not present still rewrites the collection.
    pub async fn remove_by_id<R: Record>(&self, id: &str) -> StoreResult<RemoveOutcome> {
        let collection = R::COLLECTION;
        let _guard = self.write_lock.lock().await;

        let raw = match self.read_raw(collection).await? {
            None => return Ok(RemoveOutcome::CollectionMissing),
            Some(raw) => raw,
        };

        let records = parse_records(collection, &raw)?;
        let before = records.len();
        let kept: Vec<Value> = records
            .into_iter()
            .filter(|record| record_id(record) != Some(id))
            .collect();
        let removed = before - kept.len();

        self.persist(collection, &kept).await?;

        debug!(collection = collection.file_name(), id, removed, "removed records");
        Ok(RemoveOutcome::Removed(removed))
    }

    async fn read_raw(&self, collection: Collection) -> StoreResult<Option<String>> {
        let path = self.path_for(collection);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Serializes fully in memory, writes a sibling temp file and renames it
    /// over the collection file.
    async fn persist(&self, collection: Collection, records: &[Value]) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|source| StoreError::Serialize {
            collection: collection.file_name(),
            source,
        })?;

        let path = self.path_for(collection);
        let tmp_path = path.with_extension("json.tmp");

        if let Err(source) = tokio::fs::write(&tmp_path, &bytes).await {
            return Err(StoreError::Io { path: tmp_path, source });
        }

        if let Err(source) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StoreError::Io { path, source });
        }

        Ok(())
    }
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

// Empty files and a literal `null` read as an empty collection.
fn parse_records(collection: Collection, raw: &str) -> StoreResult<Vec<Value>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(raw).map_err(|source| StoreError::Corrupt {
        collection: collection.file_name(),
        source,
    })?;

    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(records) => Ok(records),
        _ => Err(StoreError::NotAnArray { collection: collection.file_name() }),
    }
}
