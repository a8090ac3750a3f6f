use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use creamcart_service::ServiceError;
use serde_json::json;

/// Maps service errors onto HTTP responses. Every failure body has the shape
/// `{"error": "<message>"}`; storage failures are logged in full but leave
/// only a generic message in the response.
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ServiceError::Unauthenticated => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            ServiceError::Forbidden => (StatusCode::FORBIDDEN, self.0.to_string()),
            ServiceError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            ServiceError::InsufficientStock { .. } | ServiceError::Conflict(_) => {
                (StatusCode::CONFLICT, self.0.to_string())
            }
            ServiceError::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
            ServiceError::Db(err) => {
                tracing::error!(error = %err, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// `axum::Json` with the rejection folded into the standard error body, so a
/// malformed or unknown-field request comes back as a plain 400.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServiceError::InvalidInput(rejection.body_text()))?;
        Ok(ApiJson(value))
    }
}
