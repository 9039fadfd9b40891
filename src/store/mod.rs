//! Task storage module with pluggable backends.
//!
//! Supports:
//! - `memory`: In-memory storage (non-persistent, lost at session end)
//! - `local`: JSON blob under a fixed key in the data directory
//! - `remote`: HTTP `/todos/` collection resource
//!
//! Every backend receives the controller's list *after* the mutation was
//! applied, so snapshot-based backends can rewrite the whole collection while
//! the remote backend issues a targeted request.

mod local;
mod memory;
mod remote;

#[cfg(test)]
pub(crate) mod fake_api;

pub use local::{LocalTaskStore, STORAGE_KEY};
pub use memory::InMemoryTaskStore;
pub use remote::{NewTodo, RemoteTaskStore, TodoRecord};

use crate::config::Config;
use crate::error::StoreError;
use crate::task::Task;
use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;

/// Task store trait - implemented by all storage backends.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> StoreKind;

    /// Whether this store persists data across sessions.
    fn is_persistent(&self) -> bool;

    /// Read the full collection, in display order.
    async fn load(&self) -> Result<Vec<Task>, StoreError>;

    /// Persist a newly appended task.
    ///
    /// `tasks` is the list including `task` as its last entry. Returns the
    /// stored record, which may carry a backend-assigned id.
    async fn insert(&self, task: &Task, tasks: &[Task]) -> Result<Task, StoreError>;

    /// Persist a change to the task at `index`.
    async fn update(&self, index: usize, task: &Task, tasks: &[Task]) -> Result<(), StoreError>;

    /// Remove every task.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Task store type selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Nothing leaves the process.
    Memory,
    /// JSON blob in the data directory.
    Local,
    /// Remote `/todos/` collection.
    Remote,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Memory => "memory",
            StoreKind::Local => "local",
            StoreKind::Remote => "remote",
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "none" => Ok(StoreKind::Memory),
            "local" | "file" => Ok(StoreKind::Local),
            "remote" | "http" => Ok(StoreKind::Remote),
            other => Err(format!(
                "unknown backend '{}' (expected memory, local or remote)",
                other
            )),
        }
    }
}

/// Create a task store based on configuration.
pub async fn create_task_store(config: &Config) -> Result<Arc<dyn TaskStore>, StoreError> {
    let store: Arc<dyn TaskStore> = match config.backend {
        StoreKind::Memory => Arc::new(InMemoryTaskStore::new()),
        StoreKind::Local => Arc::new(LocalTaskStore::new(config.data_dir.clone()).await?),
        StoreKind::Remote => {
            let base_url = config
                .api_url
                .as_deref()
                .ok_or_else(|| StoreError::NotConfigured("API_URL".to_string()))?;
            Arc::new(RemoteTaskStore::new(base_url, config.http_timeout)?)
        }
    };
    tracing::info!(
        "Opened {} task store (persistent: {})",
        store.kind(),
        store.is_persistent()
    );
    Ok(store)
}

/// Contract shared by every backend: `load` reflects the last successfully
/// persisted state.
#[cfg(test)]
mod contract {
    use super::fake_api::FakeTodoApi;
    use super::*;

    async fn append(store: &dyn TaskStore, tasks: &mut Vec<Task>, content: &str) {
        tasks.push(Task::new(content));
        let stored = store
            .insert(tasks.last().expect("just pushed"), tasks)
            .await
            .expect("Failed to insert task");
        *tasks.last_mut().expect("just pushed") = stored;
    }

    async fn exercise(store: &dyn TaskStore) {
        assert!(store.load().await.expect("Failed to load").is_empty());

        let mut tasks = Vec::new();
        append(store, &mut tasks, "a").await;
        append(store, &mut tasks, "b").await;
        append(store, &mut tasks, "c").await;

        let loaded = store.load().await.expect("Failed to load");
        let contents: Vec<&str> = loaded.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
        assert!(loaded.iter().all(|t| !t.done));

        tasks[1].toggle();
        store
            .update(1, &tasks[1], &tasks)
            .await
            .expect("Failed to update task");
        let loaded = store.load().await.expect("Failed to load");
        assert_eq!(loaded, tasks);
        assert!(loaded[1].done);
        assert_eq!(loaded[1].content, "b");

        tasks[1].toggle();
        store
            .update(1, &tasks[1], &tasks)
            .await
            .expect("Failed to update task");
        assert_eq!(store.load().await.expect("Failed to load"), tasks);

        store.clear().await.expect("Failed to clear");
        assert!(store.load().await.expect("Failed to load").is_empty());
        store.clear().await.expect("Failed to clear twice");
        assert!(store.load().await.expect("Failed to load").is_empty());
    }

    #[tokio::test]
    async fn memory_store_honours_contract() {
        let store = InMemoryTaskStore::new();
        exercise(&store).await;
        assert!(!store.is_persistent());
    }

    #[tokio::test]
    async fn local_store_honours_contract() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = LocalTaskStore::new(temp.path().to_path_buf())
            .await
            .expect("Failed to open local store");
        exercise(&store).await;

        // A second handle on the same directory sees the same state.
        let mut tasks = Vec::new();
        append(&store, &mut tasks, "persisted").await;
        let reopened = LocalTaskStore::new(temp.path().to_path_buf())
            .await
            .expect("Failed to reopen local store");
        assert_eq!(reopened.load().await.expect("Failed to load"), tasks);
    }

    #[tokio::test]
    async fn remote_store_honours_contract() {
        let api = FakeTodoApi::start().await;
        let store = RemoteTaskStore::new(&api.base_url, None).expect("Failed to build client");
        exercise(&store).await;
    }

    #[tokio::test]
    async fn factory_builds_configured_backend() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = Config::new(StoreKind::Local, temp.path().join("nested"));
        let store = create_task_store(&config).await.expect("Failed to create store");
        assert_eq!(store.kind(), StoreKind::Local);
        assert!(temp.path().join("nested").is_dir());

        let config = Config::new(StoreKind::Memory, temp.path().to_path_buf());
        let store = create_task_store(&config).await.expect("Failed to create store");
        assert_eq!(store.kind(), StoreKind::Memory);

        let mut config = Config::new(StoreKind::Remote, temp.path().to_path_buf());
        assert!(create_task_store(&config).await.is_err());
        config.api_url = Some("http://127.0.0.1:9".to_string());
        let store = create_task_store(&config).await.expect("Failed to create store");
        assert_eq!(store.kind(), StoreKind::Remote);
    }

    #[test]
    fn store_kind_parses_aliases() {
        assert_eq!("none".parse::<StoreKind>(), Ok(StoreKind::Memory));
        assert_eq!(" FILE ".parse::<StoreKind>(), Ok(StoreKind::Local));
        assert_eq!("remote".parse::<StoreKind>(), Ok(StoreKind::Remote));
        assert!("sqlite".parse::<StoreKind>().is_err());
        assert_eq!(StoreKind::Remote.to_string(), "remote");
    }
}
