use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use creamcart_service::{
    employees::{CreatedEmployee, EmployeeOverview, NewEmployee},
    Employees,
};
use entity::{employee, position};
use serde_json::{json, Value};

use crate::{auth::AdminUser, error::ApiJson, ApiError, AppState};

async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeOverview>>, ApiError> {
    Ok(Json(Employees::list(&state.conn).await?))
}

async fn get_one(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<employee::Model>, ApiError> {
    Ok(Json(Employees::get(&state.conn, id).await?))
}

/// Creates the employee plus their vendor login and returns the generated
/// credentials so the admin can hand them over. They are shown only here.
async fn create(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewEmployee>,
) -> Result<(StatusCode, Json<CreatedEmployee>), ApiError> {
    let created = Employees::create(&state.conn, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(body): ApiJson<NewEmployee>,
) -> Result<Json<Value>, ApiError> {
    Employees::update(&state.conn, id, body).await?;
    Ok(Json(json!({ "message": "employee updated" })))
}

async fn deactivate(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    Employees::deactivate(&state.conn, id).await?;
    Ok(Json(json!({ "message": "employee deactivated" })))
}

async fn positions(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<position::Model>>, ApiError> {
    Ok(Json(Employees::positions(&state.conn).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/positions/list", get(positions))
        .route("/{id}", get(get_one).put(update).delete(deactivate))
}
