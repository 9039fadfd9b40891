//! Remote `/todos/` collection client.
//!
//! The backend record is `{id, content}` with no completion field, so
//! completion travels as the marker prefix inside `content`.

use super::{StoreKind, TaskStore};
use crate::error::StoreError;
use crate::task::Task;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A todo as the backend stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub id: i64,
    pub content: String,
}

/// Body of a create request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodo {
    pub content: String,
}

impl From<TodoRecord> for Task {
    fn from(record: TodoRecord) -> Self {
        Task::from_marked(&record.content).with_id(record.id)
    }
}

#[derive(Clone)]
pub struct RemoteTaskStore {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteTaskStore {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, StoreError> {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url,
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/todos/", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/todos/{}", self.base_url, id)
    }

    /// `GET /todos/`
    pub async fn list(&self) -> Result<Vec<TodoRecord>, StoreError> {
        let resp = self.client.get(self.collection_url()).send().await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json().await?)
    }

    /// `POST /todos/`, returning the backend-assigned record.
    pub async fn create(&self, content: &str) -> Result<TodoRecord, StoreError> {
        let body = NewTodo {
            content: content.to_string(),
        };
        let resp = self
            .client
            .post(self.collection_url())
            .json(&body)
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json().await?)
    }

    /// `PUT /todos/{id}` with the full record. The response body is ignored.
    pub async fn replace(&self, record: &TodoRecord) -> Result<(), StoreError> {
        let resp = self
            .client
            .put(self.item_url(record.id))
            .json(record)
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }

    /// `DELETE /todos/`
    pub async fn delete_all(&self) -> Result<(), StoreError> {
        let resp = self.client.delete(self.collection_url()).send().await?;
        ensure_success(resp).await?;
        Ok(())
    }
}

async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Http {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl TaskStore for RemoteTaskStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Remote
    }

    fn is_persistent(&self) -> bool {
        true
    }

    async fn load(&self) -> Result<Vec<Task>, StoreError> {
        let records = self.list().await?;
        tracing::debug!("Fetched {} todos from {}", records.len(), self.base_url);
        Ok(records.into_iter().map(Task::from).collect())
    }

    async fn insert(&self, task: &Task, _tasks: &[Task]) -> Result<Task, StoreError> {
        let record = self.create(&task.marked_content()).await?;
        tracing::debug!("Created todo {}", record.id);
        Ok(record.into())
    }

    async fn update(&self, _index: usize, task: &Task, _tasks: &[Task]) -> Result<(), StoreError> {
        let id = task.id.ok_or(StoreError::MissingId)?;
        self.replace(&TodoRecord {
            id,
            content: task.marked_content(),
        })
        .await?;
        tracing::debug!("Replaced todo {}", id);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.delete_all().await
    }
}
