//! Flat-file JSON store.
//!
//! Each collection lives in its own document, `<data_dir>/<collection>.json`,
//! shaped as `{"<collection>": [ ... ]}`. Every write reads the whole document,
//! modifies it in memory and replaces the file. Writes within this process are
//! serialized; separate processes writing the same directory can still race.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::candidate::{Candidate, CandidateStatus};
use crate::models::interview::Interview;
use crate::models::job::Job;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid {collection} document: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {collection}: {source}")]
    Serialize {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{collection} record {id} not found")]
    NotFound { collection: &'static str, id: String },

    #[error("{collection} record {id} already exists")]
    Duplicate { collection: &'static str, id: String },

    #[error("{collection} record has an empty identifier")]
    MissingId { collection: &'static str },
}

/// A typed record kept in one collection document.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Top-level key of the document and stem of its file name.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

impl Record for Candidate {
    const COLLECTION: &'static str = "candidates";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Job {
    const COLLECTION: &'static str = "jobs";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Interview {
    const COLLECTION: &'static str = "interviews";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn collection_path<T: Record>(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", T::COLLECTION))
    }

    /// Returns every record of the collection in stored order.
    /// A missing file reads as an empty collection.
    pub async fn list<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        let path = self.collection_path::<T>();
        let mut document = load_document(&path, T::COLLECTION).await?;
        take_records(&mut document, &path)
    }

    pub async fn get<T: Record>(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.list::<T>().await?.into_iter().find(|r| r.id() == id))
    }

    /// Like `get`, but a missing record is an error.
    pub async fn require<T: Record>(&self, id: &str) -> Result<T, StoreError> {
        self.get::<T>(id).await?.ok_or_else(|| StoreError::NotFound {
            collection: T::COLLECTION,
            id: id.to_string(),
        })
    }

    pub async fn append<T: Record>(&self, record: &T) -> Result<(), StoreError> {
        self.append_unless(record, |_: &[T]| false).await.map(|_| ())
    }

    /// Appends `record` unless `conflicts` holds for the current collection.
    /// The check and the write happen under one lock. Returns whether the
    /// record was written.
    pub async fn append_unless<T, F>(&self, record: &T, conflicts: F) -> Result<bool, StoreError>
    where
        T: Record,
        F: FnOnce(&[T]) -> bool,
    {
        if record.id().trim().is_empty() {
            return Err(StoreError::MissingId {
                collection: T::COLLECTION,
            });
        }

        let written = self
            .modify::<T, _, _>(|records| {
                if records.iter().any(|r| r.id() == record.id()) {
                    return Err(StoreError::Duplicate {
                        collection: T::COLLECTION,
                        id: record.id().to_string(),
                    });
                }
                if conflicts(records) {
                    return Ok(false);
                }
                records.push(record.clone());
                Ok(true)
            })
            .await?;

        if written {
            info!(collection = T::COLLECTION, id = record.id(), "Record stored");
        }
        Ok(written)
    }

    /// Replaces the record with the same identifier.
    pub async fn update<T: Record>(&self, record: &T) -> Result<(), StoreError> {
        self.update_unless(record, |_: &[T]| false).await.map(|_| ())
    }

    /// Replaces the record unless `conflicts` holds for the current collection,
    /// checked under the same lock as the write.
    pub async fn update_unless<T, F>(&self, record: &T, conflicts: F) -> Result<bool, StoreError>
    where
        T: Record,
        F: FnOnce(&[T]) -> bool,
    {
        let written = self
            .modify::<T, _, _>(|records| {
                if conflicts(records) {
                    return Ok(false);
                }
                let slot = records
                    .iter_mut()
                    .find(|r| r.id() == record.id())
                    .ok_or_else(|| StoreError::NotFound {
                        collection: T::COLLECTION,
                        id: record.id().to_string(),
                    })?;
                *slot = record.clone();
                Ok(true)
            })
            .await?;

        if written {
            info!(collection = T::COLLECTION, id = record.id(), "Record updated");
        }
        Ok(written)
    }

    pub async fn update_candidate_status(
        &self,
        candidate_id: &str,
        status: CandidateStatus,
    ) -> Result<Candidate, StoreError> {
        let updated = self
            .modify::<Candidate, _, _>(|candidates| {
                let candidate = candidates
                    .iter_mut()
                    .find(|c| c.id == candidate_id)
                    .ok_or_else(|| StoreError::NotFound {
                        collection: Candidate::COLLECTION,
                        id: candidate_id.to_string(),
                    })?;
                candidate.status = status;
                Ok(candidate.clone())
            })
            .await?;

        info!(
            candidate_id,
            status = status.as_str(),
            "Candidate status updated"
        );
        Ok(updated)
    }

    /// Read-modify-write of one collection under the write lock.
    /// Nothing is written when `f` fails.
    async fn modify<T, F, R>(&self, f: F) -> Result<R, StoreError>
    where
        T: Record,
        F: FnOnce(&mut Vec<T>) -> Result<R, StoreError>,
    {
        let _guard = self.write_lock.lock().await;

        let path = self.collection_path::<T>();
        let mut document = load_document(&path, T::COLLECTION).await?;
        let mut records = take_records::<T>(&mut document, &path)?;

        let outcome = f(&mut records)?;

        let records = serde_json::to_value(&records).map_err(|source| StoreError::Serialize {
            collection: T::COLLECTION,
            source,
        })?;
        document.insert(T::COLLECTION.to_string(), records);
        write_document(&path, document, T::COLLECTION).await?;

        Ok(outcome)
    }
}

async fn load_document(
    path: &Path,
    collection: &'static str,
) -> Result<Map<String, Value>, StoreError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if raw.trim().is_empty() {
        return Ok(Map::new());
    }

    serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        collection,
        source,
    })
}

fn take_records<T: Record>(
    document: &mut Map<String, Value>,
    path: &Path,
) -> Result<Vec<T>, StoreError> {
    match document.remove(T::COLLECTION) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            collection: T::COLLECTION,
            source,
        }),
    }
}

/// Writes to a sibling temp file, then renames over the target.
async fn write_document(
    path: &Path,
    document: Map<String, Value>,
    collection: &'static str,
) -> Result<(), StoreError> {
    let body = serde_json::to_string_pretty(&Value::Object(document))
        .map_err(|source| StoreError::Serialize { collection, source })?;

    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, body).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err)?;

    debug!(path = %path.display(), "Collection document written");
    Ok(())
}
