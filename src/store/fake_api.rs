//! In-process fake of the `/todos/` API for store and controller tests.

use super::remote::{NewTodo, TodoRecord};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

#[derive(Default)]
struct FakeState {
    records: Vec<TodoRecord>,
    next_id: i64,
    failing: bool,
    requests: AtomicUsize,
}

type Shared = Arc<Mutex<FakeState>>;

pub struct FakeTodoApi {
    pub base_url: String,
    state: Shared,
    handle: JoinHandle<()>,
}

impl FakeTodoApi {
    pub async fn start() -> Self {
        Self::start_with(Vec::new()).await
    }

    pub async fn start_with(records: Vec<TodoRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let state: Shared = Arc::new(Mutex::new(FakeState {
            records,
            next_id,
            ..FakeState::default()
        }));

        let app = Router::new()
            .route("/todos/", get(list).post(create).delete(delete_all))
            .route("/todos/:id", put(replace))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake api");
        let addr = listener.local_addr().expect("fake api addr");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    /// Make every endpoint answer 500.
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().expect("fake state").failing = failing;
    }

    pub fn records(&self) -> Vec<TodoRecord> {
        self.state.lock().expect("fake state").records.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state
            .lock()
            .expect("fake state")
            .requests
            .load(Ordering::SeqCst)
    }
}

impl Drop for FakeTodoApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn enter(state: &Shared) -> Result<std::sync::MutexGuard<'_, FakeState>, StatusCode> {
    let guard = state.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    guard.requests.fetch_add(1, Ordering::SeqCst);
    if guard.failing {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(guard)
}

async fn list(State(state): State<Shared>) -> Result<Json<Vec<TodoRecord>>, StatusCode> {
    let guard = enter(&state)?;
    Ok(Json(guard.records.clone()))
}

async fn create(
    State(state): State<Shared>,
    Json(body): Json<NewTodo>,
) -> Result<(StatusCode, Json<TodoRecord>), StatusCode> {
    let mut guard = enter(&state)?;
    let record = TodoRecord {
        id: guard.next_id,
        content: body.content,
    };
    guard.next_id += 1;
    guard.records.push(record.clone());
    Ok((StatusCode::CREATED, Json(record)))
}

async fn replace(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<TodoRecord>,
) -> Result<Json<TodoRecord>, StatusCode> {
    let mut guard = enter(&state)?;
    let slot = guard
        .records
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    slot.content = body.content;
    Ok(Json(slot.clone()))
}

async fn delete_all(State(state): State<Shared>) -> Result<StatusCode, StatusCode> {
    let mut guard = enter(&state)?;
    guard.records.clear();
    Ok(StatusCode::NO_CONTENT)
}
