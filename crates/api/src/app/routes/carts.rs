use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use shopcart_checkout::SharedStore;
use shopcart_core::UserId;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/:user", get(get_cart).post(create_cart))
        .route("/:user/complete", put(complete_cart))
}

pub async fn get_cart(
    Extension(store): Extension<SharedStore>,
    Path(user): Path<String>,
) -> axum::response::Response {
    match store.cart_view(&UserId::from(user)) {
        Ok(view) => (StatusCode::OK, Json(dto::CartResponse::from(view))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Create the cart if missing; an existing cart is returned unchanged.
pub async fn create_cart(
    Extension(store): Extension<SharedStore>,
    Path(user): Path<String>,
) -> axum::response::Response {
    match store.create_cart(&UserId::from(user)) {
        Ok(view) => (StatusCode::CREATED, Json(dto::CartResponse::from(view))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn complete_cart(
    Extension(store): Extension<SharedStore>,
    Path(user): Path<String>,
) -> axum::response::Response {
    match store.checkout(&UserId::from(user)) {
        Ok(receipt) => (StatusCode::OK, Json(dto::CheckoutResponse::from(receipt))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
