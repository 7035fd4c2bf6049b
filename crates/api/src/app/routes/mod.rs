use axum::Router;

pub mod carts;
pub mod inventory;
pub mod system;

/// Router for the catalog and cart endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/inventory", inventory::router())
        .nest("/carts", carts::router())
}
