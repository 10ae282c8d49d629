use axum::extract::{Extension, Json, Path};
use futures::future::try_join;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::database::models::{Permission, Pet, PetSummary};
use crate::error::ApiError;
use crate::gamification::{CareEvent, EventOutcome, GamificationService};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::pet_service::NewPet;
use crate::services::PetService;

#[derive(Debug, Serialize)]
pub struct PetDetail {
    #[serde(flatten)]
    pub pet: Pet,
    pub permission: Permission,
    /// `None` while the points store is unreachable.
    pub points: Option<i64>,
    pub badges: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct TrustRequest {
    pub target_user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct TrustResponse {
    pub pet_id: i64,
    pub target_user_id: i64,
    pub permission: Permission,
    pub gamification: Option<EventOutcome>,
}

/// GET /api/pets - Pets the caller can see, with points
pub async fn list(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<PetSummary>> {
    let pets = PetService::new(pool).list_for_user(auth_user.user_id).await?;
    Ok(ApiResponse::success(pets))
}

/// POST /api/pets - Register a pet; the caller gets edit permission
pub async fn create(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<NewPet>,
) -> ApiResult<Pet> {
    let pet = PetService::new(pool).create(auth_user.user_id, &payload).await?;
    Ok(ApiResponse::created(pet))
}

/// GET /api/pets/:pet_id - Pet with its points and badges
pub async fn get(
    Path(pet_id): Path<i64>,
    Extension(pool): Extension<PgPool>,
    Extension(gamification): Extension<GamificationService>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<PetDetail> {
    let pets = PetService::new(pool);
    let permission = pets.require(pet_id, auth_user.user_id, Permission::View).await?;
    let pet = pets.get(pet_id).await?;

    let (points, badges) = match try_join(gamification.get_points(pet_id), gamification.list_badges(pet_id)).await {
        Ok((points, badges)) => (Some(points), Some(badges)),
        Err(e) => {
            tracing::warn!("Showing pet {} without progress: {}", pet_id, e);
            (None, None)
        }
    };

    Ok(ApiResponse::success(PetDetail {
        pet,
        permission,
        points,
        badges,
    }))
}

/// DELETE /api/pets/:pet_id - Edit permission required
pub async fn delete(
    Path(pet_id): Path<i64>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Value> {
    let pets = PetService::new(pool);
    pets.require(pet_id, auth_user.user_id, Permission::Edit).await?;
    pets.delete(pet_id).await?;
    Ok(ApiResponse::success(json!({ "pet_id": pet_id, "deleted": true })))
}

/// POST /api/pets/:pet_id/trust - Share a pet read-only with another user
pub async fn trust(
    Path(pet_id): Path<i64>,
    Extension(pool): Extension<PgPool>,
    Extension(gamification): Extension<GamificationService>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<TrustRequest>,
) -> ApiResult<TrustResponse> {
    if payload.target_user_id == auth_user.user_id {
        return Err(ApiError::field_error("target_user_id", "cannot grant permission to yourself"));
    }

    let pets = PetService::new(pool);
    pets.require(pet_id, auth_user.user_id, Permission::Edit).await?;
    pets.grant_view(pet_id, payload.target_user_id).await?;
    let permission = pets
        .permission(pet_id, payload.target_user_id)
        .await?
        .unwrap_or(Permission::View);

    let gamification = gamification.reward(pet_id, CareEvent::TrustGrant).await;

    Ok(ApiResponse::success(TrustResponse {
        pet_id,
        target_user_id: payload.target_user_id,
        permission,
        gamification,
    }))
}

/// GET /api/pets/:pet_id/points
pub async fn points(
    Path(pet_id): Path<i64>,
    Extension(pool): Extension<PgPool>,
    Extension(gamification): Extension<GamificationService>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Value> {
    PetService::new(pool).require(pet_id, auth_user.user_id, Permission::View).await?;
    let points = gamification.get_points(pet_id).await?;
    Ok(ApiResponse::success(json!({ "pet_id": pet_id, "points": points })))
}

/// GET /api/pets/:pet_id/badges - Badge names in the order they were earned
pub async fn badges(
    Path(pet_id): Path<i64>,
    Extension(pool): Extension<PgPool>,
    Extension(gamification): Extension<GamificationService>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Value> {
    PetService::new(pool).require(pet_id, auth_user.user_id, Permission::View).await?;
    let badges = gamification.list_badges(pet_id).await?;
    Ok(ApiResponse::success(json!({ "pet_id": pet_id, "badges": badges })))
}
