//! # tasklist
//!
//! A single-user to-do list whose state is kept in step with one of three
//! interchangeable persistence backends.
//!
//! This library provides:
//! - A controller owning the pending input and the task list
//! - Pluggable task stores (in-memory, local JSON blob, remote `/todos/` API)
//! - A derived list view and an interactive console front end
//!
//! ## Architecture
//!
//! ```text
//!   console ──commands──▶ TaskListController ──renders──▶ ListView
//!                                 │
//!                                 ▼ write-through
//!                          dyn TaskStore
//!               ┌─────────────┼──────────────┐
//!               ▼             ▼              ▼
//!          InMemory      LocalTaskStore  RemoteTaskStore
//!                        (tasks.json)    (GET/POST/PUT/DELETE /todos/)
//! ```
//!
//! ## Modules
//! - `controller`: operations and the consistency policy
//! - `store`: the `TaskStore` trait and its backends
//! - `task`: the task entity and completion marker
//! - `view`: list rendering
//! - `console`: line-oriented front end

pub mod config;
pub mod console;
pub mod controller;
pub mod error;
pub mod notify;
pub mod store;
pub mod task;
pub mod view;

pub use config::Config;
pub use controller::TaskListController;
pub use error::{StoreError, TaskListError};
pub use store::{create_task_store, StoreKind, TaskStore};
pub use task::Task;
