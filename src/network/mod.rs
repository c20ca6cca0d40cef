//! Network Module
//!
//! HTTP surface for the inventory.
//!
//! ## Architecture
//! - axum router on the tokio multi-threaded runtime
//! - Handlers translate store results into status codes
//! - Store calls run on the blocking pool and serialize on the store lock

mod handlers;
mod server;

pub use handlers::{
    create_product, delete_product, get_product, get_products, search_products, update_product,
    AppState, SearchParams,
};
pub use server::{build_router, Server};
