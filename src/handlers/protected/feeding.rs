use axum::extract::{Extension, Json, Path};
use serde::Serialize;
use sqlx::PgPool;

use crate::database::models::{FeedingRecord, Permission};
use crate::gamification::{CareEvent, EventOutcome, GamificationService};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::care_service::NewFeeding;
use crate::services::{CareService, PetService};

#[derive(Debug, Serialize)]
pub struct FeedingResponse {
    pub feeding: FeedingRecord,
    pub gamification: Option<EventOutcome>,
}

/// POST /api/pets/:pet_id/feed - Log a meal (edit permission)
pub async fn post(
    Path(pet_id): Path<i64>,
    Extension(pool): Extension<PgPool>,
    Extension(gamification): Extension<GamificationService>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<NewFeeding>,
) -> ApiResult<FeedingResponse> {
    PetService::new(pool.clone()).require(pet_id, auth_user.user_id, Permission::Edit).await?;
    let feeding = CareService::new(pool).add_feeding(pet_id, &payload).await?;

    let gamification = gamification.reward(pet_id, CareEvent::Feeding).await;

    Ok(ApiResponse::created(FeedingResponse { feeding, gamification }))
}

/// GET /api/pets/:pet_id/feed - Feeding history, newest first
pub async fn list(
    Path(pet_id): Path<i64>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<FeedingRecord>> {
    PetService::new(pool.clone()).require(pet_id, auth_user.user_id, Permission::View).await?;
    let records = CareService::new(pool).list_feeding(pet_id).await?;
    Ok(ApiResponse::success(records))
}
