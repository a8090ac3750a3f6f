use axum::{extract::State, routing::post, Json, Router};
use creamcart_service::{Auth, AuthenticatedUser};
use serde::{Deserialize, Serialize};

use crate::{error::ApiJson, ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    user: AuthenticatedUser,
}

async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = Auth::verify_credentials(&state.conn, &body.username, &body.password).await?;
    let token = state.auth.sign(&user)?;

    Ok(Json(LoginResponse { token, user }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
