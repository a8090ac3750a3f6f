use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use creamcart_service::{carts::CartOverview, Carts, LoadLine};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{auth::AdminUser, error::ApiJson, ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct AssignRequest {
    cart_id: i32,
    employee_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct LoadInventoryRequest {
    cart_id: i32,
    items: Vec<LoadLine>,
}

async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CartOverview>>, ApiError> {
    Ok(Json(Carts::list_with_assignments(&state.conn).await?))
}

async fn assign(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AssignRequest>,
) -> Result<Json<Value>, ApiError> {
    Carts::assign_cart(&state.conn, body.cart_id, body.employee_id).await?;
    Ok(Json(json!({ "message": "cart assigned" })))
}

async fn load_inventory(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoadInventoryRequest>,
) -> Result<Json<Value>, ApiError> {
    Carts::load_inventory(&state.conn, body.cart_id, body.items).await?;
    Ok(Json(json!({ "message": "inventory loaded" })))
}

async fn close(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(cart_id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    Carts::close_cart(&state.conn, cart_id).await?;
    Ok(Json(json!({ "message": "cart closed" })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/assign", post(assign))
        .route("/load-inventory", post(load_inventory))
        .route("/close/{cart_id}", post(close))
}
