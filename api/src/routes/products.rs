use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use creamcart_service::{
    products::{ProductInput, VendorStock},
    Products,
};
use entity::product;
use serde_json::{json, Value};

use crate::{
    auth::{AdminUser, AuthUser},
    error::ApiJson,
    ApiError, AppState,
};

async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<product::Model>>, ApiError> {
    Ok(Json(Products::list(&state.conn).await?))
}

async fn get_one(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<product::Model>, ApiError> {
    Ok(Json(Products::get(&state.conn, id).await?))
}

async fn create(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProductInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let product_id = Products::create(&state.conn, body).await?;
    Ok((StatusCode::CREATED, Json(json!({ "productId": product_id }))))
}

async fn update(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(body): ApiJson<ProductInput>,
) -> Result<Json<Value>, ApiError> {
    Products::update(&state.conn, id, body).await?;
    Ok(Json(json!({ "message": "product updated" })))
}

async fn delete(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    Products::delete(&state.conn, id).await?;
    Ok(Json(json!({ "message": "product deleted" })))
}

/// What the employee's cart still carries; the POS sells from this list.
async fn my_inventory(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
) -> Result<Json<Vec<VendorStock>>, ApiError> {
    Ok(Json(Products::my_inventory(&state.conn, employee_id).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/my-inventory/{employee_id}", get(my_inventory))
        .route("/{id}", get(get_one).put(update).delete(delete))
}
