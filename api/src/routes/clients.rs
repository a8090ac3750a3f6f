use axum::{extract::State, routing::post, Json, Router};
use creamcart_service::{clients::ClientInput, Clients};
use serde_json::{json, Value};

use crate::{auth::AuthUser, error::ApiJson, ApiError, AppState};

/// The POS sends whatever the vendor typed; an existing client with the same
/// name is reused.
async fn find_or_create(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ClientInput>,
) -> Result<Json<Value>, ApiError> {
    let client_id = Clients::find_or_create(&state.conn, body).await?;
    Ok(Json(json!({ "clientId": client_id })))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(find_or_create))
}
