//! Inventory HTTP handlers
//!
//! Each handler runs its store call on the blocking pool and maps the
//! outcome to a status code. No business logic lives here.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{EstoreError, Result};
use crate::model::{Product, ProductId};
use crate::storage::InventoryStore;

/// Shared application state passed to all handlers via `State` extraction.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InventoryStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Run a store call on the blocking pool
    ///
    /// Store operations hold a lock across file I/O, so they never run on
    /// the async executor threads.
    async fn with_store<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn InventoryStore) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| EstoreError::Worker(e.to_string()))?
    }
}

/// Query string for `GET /inventory/?name=...`
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

/// Map a store error to a status code, logging it
fn failure_status(action: &str, err: EstoreError) -> StatusCode {
    match err {
        EstoreError::Conflict(id) => {
            tracing::warn!("Failed to {}: product {} already exists", action, id);
            StatusCode::CONFLICT
        }
        e => {
            tracing::error!("Failed to {}: {}", action, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// POST /inventory
pub async fn create_product(
    State(state): State<AppState>,
    Json(draft): Json<Product>,
) -> std::result::Result<(StatusCode, Json<Product>), StatusCode> {
    tracing::info!("POST /inventory {}", draft);

    state
        .with_store(move |store| store.create(&draft))
        .await
        .map(|created| (StatusCode::CREATED, Json(created)))
        .map_err(|e| failure_status("create product", e))
}

/// GET /inventory
pub async fn get_products(
    State(state): State<AppState>,
) -> std::result::Result<Json<Vec<Product>>, StatusCode> {
    tracing::info!("GET /inventory");

    state
        .with_store(|store| store.get_all())
        .await
        .map(Json)
        .map_err(|e| failure_status("list products", e))
}

/// GET /inventory/?name={text}
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> std::result::Result<Json<Vec<Product>>, StatusCode> {
    tracing::info!("GET /inventory/?name={:?}", params.name);

    state
        .with_store(move |store| store.find(params.name.as_deref()))
        .await
        .map(Json)
        .map_err(|e| failure_status("search products", e))
}

/// GET /inventory/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> std::result::Result<Json<Product>, StatusCode> {
    tracing::info!("GET /inventory/{}", id);

    match state.with_store(move |store| store.get(id)).await {
        Ok(Some(product)) => Ok(Json(product)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(failure_status("get product", e)),
    }
}

/// PUT /inventory
pub async fn update_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> std::result::Result<Json<Product>, StatusCode> {
    tracing::info!("PUT /inventory {}", product);

    match state.with_store(move |store| store.update(&product)).await {
        Ok(Some(updated)) => Ok(Json(updated)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(failure_status("update product", e)),
    }
}

/// DELETE /inventory/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> std::result::Result<Json<bool>, StatusCode> {
    tracing::info!("DELETE /inventory/{}", id);

    match state.with_store(move |store| store.delete(id)).await {
        Ok(true) => Ok(Json(true)),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(failure_status("delete product", e)),
    }
}
