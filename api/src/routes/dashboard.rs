use axum::{extract::State, routing::get, Json, Router};
use creamcart_service::{
    dashboard::{CartOnRoute, DashboardStats, RecentSale},
    Dashboard,
};

use crate::{auth::AuthUser, ApiError, AppState};

async fn stats(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(Dashboard::stats(&state.conn).await?))
}

async fn recent_sales(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<RecentSale>>, ApiError> {
    Ok(Json(Dashboard::recent_sales(&state.conn).await?))
}

async fn active_carts(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CartOnRoute>>, ApiError> {
    Ok(Json(Dashboard::active_carts(&state.conn).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/recent-sales", get(recent_sales))
        .route("/active-carts", get(active_carts))
}
