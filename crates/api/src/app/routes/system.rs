use axum::http::StatusCode;

pub async fn home() -> &'static str {
    "shopcart: inventory and cart service. See /inventory and /carts/{user}."
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
