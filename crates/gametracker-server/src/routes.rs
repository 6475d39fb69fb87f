//! HTTP routes over the entry store

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use gametracker_collection::EntryDraft;
use gametracker_store::{EntryStore, StoreError, User};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

/// Shared handler state
///
/// The SQLite connection is not Sync, so the store sits behind an async
/// mutex; every operation on it is short-lived.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<EntryStore>>,
}

impl AppState {
    pub fn new(store: EntryStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

/// Build the service router
///
/// CORS is unrestricted: the store serves whatever local client asks.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/games", get(list_games).post(create_game))
        .route("/games/{id}", put(update_game).delete(delete_game))
        .route("/user", get(list_users).post(create_user))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Any store failure surfaces as a generic 500 with an error body
fn persistence_error(err: StoreError) -> Response {
    tracing::error!("store operation failed: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}

async fn health() -> &'static str {
    "ok"
}

async fn create_game(
    State(state): State<AppState>,
    Json(draft): Json<EntryDraft>,
) -> Response {
    let store = state.store.lock().await;
    match store.create_entry(&draft) {
        Ok(entry) => Json(entry).into_response(),
        Err(err) => persistence_error(err),
    }
}

async fn list_games(State(state): State<AppState>) -> Response {
    let store = state.store.lock().await;
    match store.list_entries() {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => persistence_error(err),
    }
}

async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<EntryDraft>,
) -> Response {
    let store = state.store.lock().await;
    match store.update_entry(&id, &draft) {
        Ok(Some(entry)) => Json(entry).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("no entry with id {id}") })),
        )
            .into_response(),
        Err(err) => persistence_error(err),
    }
}

async fn delete_game(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let store = state.store.lock().await;
    // Deleting an unknown id is a no-op, not an error
    match store.delete_entry(&id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => persistence_error(err),
    }
}

async fn create_user(State(state): State<AppState>, Json(user): Json<User>) -> Response {
    let store = state.store.lock().await;
    match store.create_user(&user) {
        Ok(stored) => Json(json!({ "mensaje": "Usuario creado", "data": stored })).into_response(),
        Err(err) => persistence_error(err),
    }
}

async fn list_users(State(state): State<AppState>) -> Response {
    let store = state.store.lock().await;
    match store.list_users() {
        Ok(users) => Json(users).into_response(),
        Err(err) => persistence_error(err),
    }
}
