use axum::extract::{Extension, Json};
use serde::Deserialize;
use sqlx::PgPool;

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::UserService;

#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub name: String,
}

/// GET /api/user/profile
pub async fn get(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<User> {
    let user = UserService::new(pool).profile(auth_user.user_id).await?;
    Ok(ApiResponse::success(user))
}

/// PUT /api/user/profile - Rename the caller. Existing tokens keep the old name
/// until they expire.
pub async fn put(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfile>,
) -> ApiResult<User> {
    let user = UserService::new(pool).rename(auth_user.user_id, &payload.name).await?;
    Ok(ApiResponse::success(user))
}
