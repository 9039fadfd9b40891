//! Task list controller.
//!
//! Owns the pending input and the task list, applies user operations and
//! writes each change through to the active [`TaskStore`].
//!
//! # Consistency policy
//! Mutations are optimistic: the in-memory list changes first and store
//! failures are logged, never rolled back. Any failure marks the controller
//! as diverged until the next successful [`TaskListController::reconcile`],
//! which adopts the backend's state.

use std::sync::Arc;

use crate::error::{StoreError, TaskListError, EMPTY_INPUT_MESSAGE};
use crate::notify::Notifier;
use crate::store::{StoreKind, TaskStore};
use crate::task::Task;
use crate::view::ListView;

pub struct TaskListController {
    store: Arc<dyn TaskStore>,
    notifier: Arc<dyn Notifier>,
    pending_input: String,
    tasks: Vec<Task>,
    hydrated: bool,
    diverged: bool,
}

impl TaskListController {
    pub fn new(store: Arc<dyn TaskStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            pending_input: String::new(),
            tasks: Vec::new(),
            hydrated: false,
            diverged: false,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Whether a write-through failed since the last successful load.
    pub fn is_diverged(&self) -> bool {
        self.diverged
    }

    pub fn store_kind(&self) -> StoreKind {
        self.store.kind()
    }

    pub fn view(&self) -> ListView {
        ListView::from_tasks(&self.tasks)
    }

    /// Initial load from the store. On failure the list stays as it is.
    ///
    /// Returns whether the store answered.
    pub async fn hydrate(&mut self) -> bool {
        match self.store.load().await {
            Ok(tasks) => {
                tracing::info!("Hydrated {} tasks from {} store", tasks.len(), self.store.kind());
                self.tasks = tasks;
                self.hydrated = true;
                self.diverged = false;
                true
            }
            Err(e) => {
                tracing::error!("Error fetching tasks from {} store: {}", self.store.kind(), e);
                false
            }
        }
    }

    /// Replace local state with the backend's, discarding optimistic changes.
    pub async fn reconcile(&mut self) -> bool {
        let adopted = self.hydrate().await;
        if !adopted {
            tracing::warn!("Reconcile failed, keeping {} local tasks", self.tasks.len());
        }
        adopted
    }

    pub fn update_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    /// Append the pending input as a new task.
    pub async fn add_task(&mut self) -> Result<(), TaskListError> {
        if self.pending_input.is_empty() {
            self.notifier.alert(EMPTY_INPUT_MESSAGE);
            return Err(TaskListError::EmptyInput);
        }

        let task = Task::new(std::mem::take(&mut self.pending_input));
        self.tasks.push(task);
        let index = self.tasks.len() - 1;

        let result = self.store.insert(&self.tasks[index], &self.tasks).await;
        match result {
            Ok(stored) => self.tasks[index] = stored,
            Err(e) => self.write_failed("adding task", e),
        }
        Ok(())
    }

    /// Flip completion of the task at `index`.
    pub async fn toggle_task(&mut self, index: usize) -> Result<(), TaskListError> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(TaskListError::IndexOutOfRange { index, len })?;
        task.toggle();

        let result = self
            .store
            .update(index, &self.tasks[index], &self.tasks)
            .await;
        if let Err(e) = result {
            self.write_failed("updating task", e);
        }
        Ok(())
    }

    /// Drop every task.
    pub async fn clear_all(&mut self) {
        self.tasks.clear();
        let result = self.store.clear().await;
        if let Err(e) = result {
            self.write_failed("clearing tasks", e);
        }
    }

    fn write_failed(&mut self, action: &str, error: StoreError) {
        tracing::error!("Error {} in {} store: {}", action, self.store.kind(), error);
        self.diverged = true;
    }
}
