use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use shopcart_checkout::{ReserveOutcome, SharedStore};
use shopcart_core::UserId;
use shopcart_inventory::{ItemDraft, StockFilter};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(add_item))
        .route("/:name", get(get_item).put(update_item).delete(delete_item))
        .route("/:name/:user/purchase", put(purchase_item))
}

/// `?available` (with or without a value) hides out-of-stock items.
pub async fn list_items(
    Extension(store): Extension<SharedStore>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    let filter = if params.contains_key("available") {
        StockFilter::AvailableOnly
    } else {
        StockFilter::All
    };
    let items = store.list_items(filter);
    (StatusCode::OK, Json(dto::items_to_json(&items))).into_response()
}

pub async fn add_item(
    Extension(store): Extension<SharedStore>,
    body: Result<Json<dto::ItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let draft = match decode_draft(body) {
        Ok(d) => d,
        Err(response) => return response,
    };
    match store.add_item(draft) {
        Ok(items) => (StatusCode::CREATED, Json(dto::items_to_json(&items))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(store): Extension<SharedStore>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match store.find_item(&name) {
        Ok(item) => (StatusCode::OK, Json(dto::ItemResponse::from(&item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(store): Extension<SharedStore>,
    Path(name): Path<String>,
    body: Result<Json<dto::ItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let draft = match decode_draft(body) {
        Ok(d) => d,
        Err(response) => return response,
    };
    match store.update_item(&name, draft) {
        Ok(item) => (StatusCode::OK, Json(dto::ItemResponse::from(&item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(store): Extension<SharedStore>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match store.remove_item(&name) {
        Ok(item) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": format!("Item {} has been removed from the inventory", item.title()),
                "item": dto::ItemResponse::from(&item),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

fn decode_draft(
    body: Result<Json<dto::ItemRequest>, JsonRejection>,
) -> Result<ItemDraft, axum::response::Response> {
    let Json(body) = body.map_err(errors::json_rejection_to_response)?;
    body.into_draft().map_err(errors::domain_error_to_response)
}

/// Reserve one unit of `name` into `user`'s cart.
pub async fn purchase_item(
    Extension(store): Extension<SharedStore>,
    Path((name, user)): Path<(String, String)>,
) -> axum::response::Response {
    match store.reserve(&UserId::from(user), &name) {
        Ok(ReserveOutcome::Admitted { title, held }) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": format!("{title} added to cart"),
                "title": title,
                "held": held,
            })),
        )
            .into_response(),
        Ok(ReserveOutcome::Rejected { title, .. }) => errors::json_error(
            StatusCode::BAD_REQUEST,
            "rejected",
            format!("You cannot purchase any more {title}"),
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}
