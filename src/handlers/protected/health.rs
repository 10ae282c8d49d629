use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::database::models::{HealthQuestion, Permission};
use crate::gamification::{CareEvent, EventOutcome, GamificationService};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{CareService, PetService};

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    pub pet_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub question: HealthQuestion,
    pub gamification: Option<EventOutcome>,
}

/// POST /api/health/question - Record a health question, optionally about a pet
///
/// Only questions tied to a pet earn points, and the caller must be able to
/// view that pet.
pub async fn question(
    Extension(pool): Extension<PgPool>,
    Extension(gamification): Extension<GamificationService>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<QuestionRequest>,
) -> ApiResult<QuestionResponse> {
    if let Some(pet_id) = payload.pet_id {
        PetService::new(pool.clone()).require(pet_id, auth_user.user_id, Permission::View).await?;
    }

    let question = CareService::new(pool)
        .add_question(auth_user.user_id, payload.pet_id, &payload.question)
        .await?;

    let gamification = match payload.pet_id {
        Some(pet_id) => gamification.reward(pet_id, CareEvent::HealthQuestion).await,
        None => None,
    };

    Ok(ApiResponse::created(QuestionResponse { question, gamification }))
}
