// handlers/public/auth.rs - POST /auth/register, POST /auth/login

use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{generate_jwt, Claims};
use crate::config;
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::user_service::{NewUser, UserService};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account name or email.
    pub user: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub expires_in: u64,
    pub user: User,
}

fn session_for(user: User) -> Result<SessionResponse, ApiError> {
    let token = generate_jwt(&Claims::new(user.user_id, user.name.clone()))?;
    Ok(SessionResponse {
        token,
        expires_in: config::config().security.jwt_expiry_hours * 3600,
        user,
    })
}

/// POST /auth/register - Create an account and return a session for it
pub async fn register(
    Extension(pool): Extension<PgPool>,
    Json(payload): Json<NewUser>,
) -> ApiResult<SessionResponse> {
    let user = UserService::new(pool).register(&payload).await?;
    Ok(ApiResponse::created(session_for(user)?))
}

/// POST /auth/login - Exchange credentials for a JWT
pub async fn login(
    Extension(pool): Extension<PgPool>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<SessionResponse> {
    if payload.user.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("user and password are required"));
    }

    let user = UserService::new(pool)
        .authenticate(&payload.user, &payload.password)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Failed login for '{}'", payload.user.trim());
            ApiError::unauthorized("Invalid credentials")
        })?;

    tracing::info!("User {} logged in", user.user_id);
    Ok(ApiResponse::success(session_for(user)?))
}
