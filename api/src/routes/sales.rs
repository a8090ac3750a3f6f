use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use creamcart_service::{
    sales::{SaleDetailLine, SaleSummary},
    NewSale, Sales,
};
use serde_json::{json, Value};

use crate::{auth::AuthUser, error::ApiJson, ApiError, AppState};

async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewSale>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let sale_id = Sales::record_sale(&state.conn, body).await?;
    Ok((StatusCode::CREATED, Json(json!({ "saleId": sale_id }))))
}

async fn my_sales(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
) -> Result<Json<Vec<SaleSummary>>, ApiError> {
    Ok(Json(
        Sales::sales_for_employee_today(&state.conn, employee_id).await?,
    ))
}

async fn detail(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<SaleDetailLine>>, ApiError> {
    Ok(Json(Sales::sale_detail(&state.conn, id).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/my-sales/{employee_id}", get(my_sales))
        .route("/{id}", get(detail))
}
