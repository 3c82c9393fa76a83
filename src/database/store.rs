//! Record store backends
//!
//! A store owns one durable collection and exposes exactly two operations:
//! load the whole collection and replace the whole collection. Serialising
//! concurrent writers is the caller's job (see [`crate::database::DatabaseService`]).

use std::future::Future;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::utils::errors::{EventHubError, Result};
use crate::utils::helpers::generate_id;
use crate::utils::logging::log_storage_operation;

/// Durable keyed collection behind a load-all / save-all contract
#[async_trait]
pub trait RecordStore<T>: Send + Sync {
    /// Collection name used in logs
    fn name(&self) -> &str;

    async fn load_all(&self) -> Result<Vec<T>>;

    /// Replace the stored collection. Must be all-or-nothing.
    async fn save_all(&self, records: &[T]) -> Result<()>;
}

/// Collection persisted as a pretty-printed JSON array in a single file
pub struct JsonFileStore<T> {
    name: String,
    path: PathBuf,
    max_retries: u32,
    retry_backoff: Duration,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>, max_retries: u32, retry_backoff: Duration) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "collection".to_string());

        Self {
            name,
            path,
            max_retries: max_retries.max(1),
            retry_backoff,
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run an I/O step, retrying transient failures with linear backoff
    async fn with_retry<R, F, Fut>(&self, operation: &str, mut step: F) -> std::io::Result<R>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::io::Result<R>>,
    {
        let mut attempt = 1;
        loop {
            match step().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_retries => {
                    warn!(
                        collection = %self.name,
                        operation = operation,
                        attempt = attempt,
                        error = %e,
                        "Storage I/O failed, retrying"
                    );
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn read_raw(&self) -> std::io::Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write to a sibling temp file, sync it, then rename over the target.
    async fn write_atomic(&self, body: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(format!(".{}.tmp", generate_id()));
        let tmp_path = self.path.with_file_name(tmp_name);

        let written = async {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(body).await?;
            file.sync_all().await?;
            tokio::fs::rename(&tmp_path, &self.path).await
        }
        .await;

        if written.is_err() {
            let _ = tokio::fs::remove_file(&tmp_path).await;
        }
        written
    }

    fn storage_error(&self, operation: &str, e: impl std::fmt::Display) -> EventHubError {
        EventHubError::Storage(format!(
            "{} of {} failed: {}",
            operation,
            self.path.display(),
            e
        ))
    }
}

#[async_trait]
impl<T> RecordStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_all(&self) -> Result<Vec<T>> {
        let started = Instant::now();
        let raw = self
            .with_retry("load", || self.read_raw())
            .await
            .map_err(|e| {
                log_storage_operation("load", &self.name, 0, elapsed_ms(started), false);
                self.storage_error("load", e)
            })?;

        let records = match raw {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str::<Vec<T>>(&raw).map_err(|e| {
                    log_storage_operation("load", &self.name, 0, elapsed_ms(started), false);
                    self.storage_error("parse", e)
                })?
            }
            _ => {
                debug!(collection = %self.name, path = %self.path.display(), "Collection file missing or empty");
                Vec::new()
            }
        };

        log_storage_operation("load", &self.name, records.len(), elapsed_ms(started), true);
        Ok(records)
    }

    async fn save_all(&self, records: &[T]) -> Result<()> {
        let started = Instant::now();
        let body = serde_json::to_vec_pretty(records)?;

        self.with_retry("save", || self.write_atomic(&body))
            .await
            .map_err(|e| {
                log_storage_operation("save", &self.name, records.len(), elapsed_ms(started), false);
                self.storage_error("save", e)
            })?;

        log_storage_operation("save", &self.name, records.len(), elapsed_ms(started), true);
        Ok(())
    }
}

/// In-process collection, used for tests and embedding
pub struct MemoryStore<T> {
    name: String,
    records: RwLock<Vec<T>>,
    failing_saves: AtomicUsize,
}

impl<T> MemoryStore<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_records(name, Vec::new())
    }

    pub fn with_records(name: impl Into<String>, records: Vec<T>) -> Self {
        Self {
            name: name.into(),
            records: RwLock::new(records),
            failing_saves: AtomicUsize::new(0),
        }
    }

    /// Make the next `count` saves fail without touching the stored records.
    pub fn fail_next_saves(&self, count: usize) {
        self.failing_saves.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl<T> RecordStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_all(&self) -> Result<Vec<T>> {
        Ok(self.records.read().await.clone())
    }

    async fn save_all(&self, records: &[T]) -> Result<()> {
        let injected = self
            .failing_saves
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(EventHubError::Storage(format!(
                "simulated write failure on {}",
                self.name
            )));
        }

        *self.records.write().await = records.to_vec();
        Ok(())
    }
}

/// Shared handle to any store implementation
pub type SharedStore<T> = Arc<dyn RecordStore<T>>;

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
