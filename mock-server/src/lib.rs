use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Shortest title the service accepts.
pub const MIN_TITLE_CHARS: usize = 3;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub version: u32,
}

/// Body accepted by create, bulk create and update. Any `id` sent by the
/// client is ignored; `version` is accepted but the store keeps its own
/// counter.
#[derive(Debug, Deserialize)]
pub struct ItemInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub version: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keyword: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Checklist item not found with ID: {0}")]
    NotFound(u64),
    #[error("{0}")]
    Invalid(&'static str),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Invalid(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[derive(Debug, Default)]
pub struct Store {
    items: BTreeMap<u64, ChecklistItem>,
    last_id: u64,
}

impl Store {
    fn insert(&mut self, input: ItemInput) -> ChecklistItem {
        self.last_id += 1;
        let item = ChecklistItem {
            id: self.last_id,
            title: input.title.unwrap_or_default(),
            description: input.description,
            completed: input.completed,
            version: 0,
        };
        self.items.insert(item.id, item.clone());
        item
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/checklist", get(list_items).post(create_item))
        .route("/api/checklist/bulk", post(create_items))
        .route("/api/checklist/search", get(search_items))
        .route(
            "/api/checklist/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn validate_title(title: Option<&str>) -> Result<(), ServiceError> {
    let title = title.unwrap_or_default();
    if title.trim().is_empty() {
        return Err(ServiceError::Invalid("Title cannot be empty"));
    }
    if title.chars().count() < MIN_TITLE_CHARS {
        return Err(ServiceError::Invalid("Title must be at least 3 characters long"));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Empty collections answer 204 with no body.
fn item_list(items: Vec<ChecklistItem>) -> Response {
    if items.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(items).into_response()
}

async fn list_items(State(db): State<Db>) -> Response {
    let store = db.read().await;
    item_list(store.items.values().cloned().collect())
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<ItemInput>,
) -> Result<(StatusCode, Json<ChecklistItem>), ServiceError> {
    validate_title(input.title.as_deref())?;
    let item = db.write().await.insert(input);
    tracing::info!(id = item.id, title = %item.title, "created item");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn create_items(
    State(db): State<Db>,
    Json(inputs): Json<Vec<ItemInput>>,
) -> (StatusCode, Json<Vec<ChecklistItem>>) {
    let mut store = db.write().await;
    let created: Vec<ChecklistItem> = inputs.into_iter().map(|input| store.insert(input)).collect();
    tracing::info!(count = created.len(), "created items in bulk");
    (StatusCode::CREATED, Json(created))
}

async fn get_item(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<ChecklistItem>, ServiceError> {
    let store = db.read().await;
    store.items.get(&id).cloned().map(Json).ok_or(ServiceError::NotFound(id))
}

/// Title and description are replaced only when non-blank; `completed` is
/// always replaced and the stored version moves forward by one.
async fn update_item(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<ItemInput>,
) -> Result<Json<ChecklistItem>, ServiceError> {
    validate_title(input.title.as_deref())?;
    let mut store = db.write().await;
    let item = store.items.get_mut(&id).ok_or(ServiceError::NotFound(id))?;
    if let Some(title) = non_blank(input.title) {
        item.title = title;
    }
    if let Some(description) = non_blank(input.description) {
        item.description = Some(description);
    }
    item.completed = input.completed;
    item.version = item.version.saturating_add(1);
    tracing::info!(id, version = item.version, client_version = ?input.version, "updated item");
    Ok(Json(item.clone()))
}

async fn delete_item(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<&'static str, ServiceError> {
    let mut store = db.write().await;
    store.items.remove(&id).ok_or(ServiceError::NotFound(id))?;
    tracing::info!(id, "deleted item");
    Ok("Item deleted successfully!")
}

/// Case-insensitive substring match on the title.
async fn search_items(State(db): State<Db>, Query(params): Query<SearchParams>) -> Response {
    let needle = params.keyword.to_lowercase();
    let store = db.read().await;
    item_list(
        store
            .items
            .values()
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}
