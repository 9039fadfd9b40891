//! In-memory task store (non-persistent).

use super::{StoreKind, TaskStore};
use crate::error::StoreError;
use crate::task::Task;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }

    fn is_persistent(&self) -> bool {
        false
    }

    async fn load(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.read().await.clone())
    }

    async fn insert(&self, task: &Task, tasks: &[Task]) -> Result<Task, StoreError> {
        *self.tasks.write().await = tasks.to_vec();
        Ok(task.clone())
    }

    async fn update(&self, _index: usize, _task: &Task, tasks: &[Task]) -> Result<(), StoreError> {
        *self.tasks.write().await = tasks.to_vec();
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.tasks.write().await.clear();
        Ok(())
    }
}
