//! HTTP Server
//!
//! Binds the listener and serves the inventory routes until shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_product, delete_product, get_product, get_products, search_products, update_product,
    AppState,
};
use crate::config::Config;
use crate::error::{EstoreError, Result};
use crate::storage::InventoryStore;

/// Assemble the inventory router
///
/// Routes (base path `/inventory`):
/// - `POST   /inventory`             -- create
/// - `GET    /inventory`             -- list all
/// - `GET    /inventory/?name={txt}` -- substring search
/// - `GET    /inventory/{id}`        -- get one
/// - `PUT    /inventory`             -- update
/// - `DELETE /inventory/{id}`        -- delete
///
/// There is no request timeout: a store call always runs to completion and
/// its outcome is what the client sees.
pub fn build_router(store: Arc<dyn InventoryStore>) -> Router {
    Router::new()
        .route(
            "/inventory",
            get(get_products).post(create_product).put(update_product),
        )
        .route("/inventory/", get(search_products))
        .route("/inventory/{id}", get(get_product).delete(delete_product))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(store))
}

/// HTTP server for estore
///
/// Requests are dispatched on the tokio runtime; store calls run on its
/// blocking pool.
pub struct Server {
    config: Config,
    store: Arc<dyn InventoryStore>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Create a new server with the given config and store
    pub fn new(config: Config, store: Arc<dyn InventoryStore>) -> Self {
        Self {
            config,
            store,
            listener: None,
        }
    }

    /// Bind the listen address
    ///
    /// Returns the bound address, which differs from the configured one
    /// when port 0 is used.
    pub async fn bind(&mut self) -> Result<SocketAddr> {
        let listener = TcpListener::bind(&self.config.listen_addr).await?;
        let addr = listener.local_addr()?;

        tracing::info!("Listening on {}", addr);

        self.listener = Some(listener);
        Ok(addr)
    }

    /// Serve requests until `shutdown` resolves
    ///
    /// Binds first if `bind()` was not called.
    pub async fn run(mut self, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
        if self.listener.is_none() {
            self.bind().await?;
        }
        let listener = self
            .listener
            .take()
            .ok_or_else(|| EstoreError::Config("listener not bound".to_string()))?;

        let router = build_router(self.store);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped accepting connections");
        Ok(())
    }
}
