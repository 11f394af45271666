use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const PALETTE: [&str; 8] = [
    "orange", "red", "yellow", "green", "blue", "purple", "pink", "gray",
];
pub const DEFAULT_COLOR: &str = "orange";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub title: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Insertion-ordered so `GET /todos` lists tasks in creation order.
pub type Db = Arc<RwLock<Vec<Task>>>;

type Rejection = (StatusCode, String);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/todos", get(list_tasks).post(create_task))
        .route("/todos/{id}", get(get_task).put(update_task).delete(delete_task))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn valid_title(raw: &str) -> Result<String, Rejection> {
    let title = raw.trim();
    if title.is_empty() {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, "title must not be empty".to_string()));
    }
    Ok(title.to_string())
}

fn valid_color(raw: Option<String>) -> Result<String, Rejection> {
    match raw {
        None => Ok(DEFAULT_COLOR.to_string()),
        Some(color) if PALETTE.contains(&color.as_str()) => Ok(color),
        Some(color) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("unknown color: {color}"),
        )),
    }
}

fn not_found(id: &str) -> Rejection {
    (StatusCode::NOT_FOUND, format!("task {id} not found"))
}

async fn list_tasks(State(db): State<Db>) -> Json<Vec<Task>> {
    Json(db.read().await.clone())
}

async fn create_task(
    State(db): State<Db>,
    Json(input): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), Rejection> {
    let title = valid_title(&input.title)?;
    let color = valid_color(input.color)?;
    let now = Utc::now();
    let task = Task {
        id: Uuid::new_v4().to_string(),
        title,
        completed: false,
        color,
        created_at: now,
        updated_at: now,
    };
    tracing::info!(id = %task.id, "task created");
    db.write().await.push(task.clone());
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Task>, Rejection> {
    let tasks = db.read().await;
    tasks
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Task>, Rejection> {
    let title = input.title.as_deref().map(valid_title).transpose()?;
    let mut tasks = db.write().await;
    let task = tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| not_found(&id))?;
    if let Some(title) = title {
        task.title = title;
    }
    if let Some(completed) = input.completed {
        task.completed = completed;
    }
    task.updated_at = Utc::now();
    Ok(Json(task.clone()))
}

async fn delete_task(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, Rejection> {
    let mut tasks = db.write().await;
    let index = tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| not_found(&id))?;
    tasks.remove(index);
    tracing::info!(%id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}
