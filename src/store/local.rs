//! JSON blob task store.
//!
//! The whole list lives under one fixed key (`tasks`), stored as
//! `{data_dir}/tasks.json`. Each save rewrites the blob atomically.

use super::{StoreKind, TaskStore};
use crate::error::StoreError;
use crate::task::Task;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// Key the task list is stored under.
pub const STORAGE_KEY: &str = "tasks";

/// One entry of a stored blob. Older blobs hold bare marker-encoded strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTask {
    Full(Task),
    Legacy(String),
}

impl From<StoredTask> for Task {
    fn from(stored: StoredTask) -> Self {
        match stored {
            StoredTask::Full(task) => task,
            StoredTask::Legacy(text) => Task::from_marked(&text),
        }
    }
}

#[derive(Clone)]
pub struct LocalTaskStore {
    path: PathBuf,
    persist_lock: Arc<Mutex<()>>,
}

impl LocalTaskStore {
    pub async fn new(data_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| StoreError::io(&data_dir, e))?;
        let path = data_dir.join(format!("{}.json", STORAGE_KEY));
        Ok(Self {
            path,
            persist_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw value under the storage key, `None` when nothing was stored yet.
    async fn get(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::io(&self.path, err)),
        }
    }

    async fn set(&self, value: String) -> Result<(), StoreError> {
        let _guard = self.persist_lock.lock().await;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, value)
            .await
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }

    /// Serialize the full list and write it under the storage key.
    pub async fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let value = serde_json::to_string_pretty(tasks)?;
        self.set(value).await?;
        tracing::debug!("Saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl TaskStore for LocalTaskStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Local
    }

    fn is_persistent(&self) -> bool {
        true
    }

    async fn load(&self) -> Result<Vec<Task>, StoreError> {
        let Some(value) = self.get().await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_slice::<Vec<StoredTask>>(&value) {
            Ok(stored) => Ok(stored.into_iter().map(Task::from).collect()),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse task store {}: {}, starting empty",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    async fn insert(&self, task: &Task, tasks: &[Task]) -> Result<Task, StoreError> {
        self.save(tasks).await?;
        Ok(task.clone())
    }

    async fn update(&self, _index: usize, _task: &Task, tasks: &[Task]) -> Result<(), StoreError> {
        self.save(tasks).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.save(&[]).await
    }
}
