//! HTTP API application wiring (Axum router + store wiring).
//!
//! - `services.rs`: store construction (empty or seeded with demo data)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use shopcart_checkout::{SharedStore, Store};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(store: Store) -> Router {
    let shared = SharedStore::new(store);

    Router::new()
        .route("/", get(routes::system::home))
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .layer(Extension(shared)),
        )
}
