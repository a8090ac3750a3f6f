use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use chrono::{Duration, Utc};
use creamcart_service::{AuthenticatedUser, ServiceError};
use entity::role;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, AppState};

/// Sessions last a working day plus slack; a vendor logs in in the morning
/// and the token survives until after cart closure.
const TOKEN_TTL_HOURS: i64 = 8;

/// What the bearer token carries about its holder.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i32,
    pub username: String,
    pub role: String,
    pub employee_id: Option<i32>,
    pub full_name: String,
    pub exp: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == role::ADMIN
    }
}

/// HS256 signing with a shared secret from the environment.
#[derive(Clone)]
pub struct AuthConfig {
    secret: String,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn sign(&self, user: &AuthenticatedUser) -> Result<String, ServiceError> {
        let claims = Claims {
            user_id: user.user_id,
            username: user.username.clone(),
            role: user.role.clone(),
            employee_id: user.employee_id,
            full_name: user.full_name.clone(),
            exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ServiceError::Internal(format!("token signing failed: {e}")))
    }

    /// Missing, malformed and expired tokens all come back as
    /// `Unauthenticated`; the caller learns nothing else.
    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| ServiceError::Unauthenticated)
    }
}

/// Any authenticated caller. Resolving this extractor is the identity check
/// that runs before every protected handler.
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ServiceError::Unauthenticated)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ServiceError::Unauthenticated)?;

        let claims = state.auth.verify(token)?;
        Ok(AuthUser(claims))
    }
}

/// An authenticated caller holding the Admin role.
pub struct AdminUser(pub Claims);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if !claims.is_admin() {
            return Err(ServiceError::Forbidden.into());
        }
        Ok(AdminUser(claims))
    }
}
