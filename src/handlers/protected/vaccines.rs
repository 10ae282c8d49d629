use axum::extract::{Extension, Json, Path};
use serde::Serialize;
use sqlx::PgPool;

use crate::database::models::{Permission, VaccineRecord};
use crate::gamification::{CareEvent, EventOutcome, GamificationService};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::care_service::NewVaccine;
use crate::services::{CareService, PetService};

#[derive(Debug, Serialize)]
pub struct VaccinationResponse {
    pub vaccine: VaccineRecord,
    pub gamification: Option<EventOutcome>,
}

/// POST /api/pets/:pet_id/vaccination (edit permission)
pub async fn post(
    Path(pet_id): Path<i64>,
    Extension(pool): Extension<PgPool>,
    Extension(gamification): Extension<GamificationService>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<NewVaccine>,
) -> ApiResult<VaccinationResponse> {
    PetService::new(pool.clone()).require(pet_id, auth_user.user_id, Permission::Edit).await?;
    let vaccine = CareService::new(pool).add_vaccine(pet_id, &payload).await?;

    let gamification = gamification.reward(pet_id, CareEvent::Vaccination).await;

    Ok(ApiResponse::created(VaccinationResponse { vaccine, gamification }))
}

/// GET /api/pets/:pet_id/vaccines
pub async fn list(
    Path(pet_id): Path<i64>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<VaccineRecord>> {
    PetService::new(pool.clone()).require(pet_id, auth_user.user_id, Permission::View).await?;
    let records = CareService::new(pool).list_vaccines(pet_id).await?;
    Ok(ApiResponse::success(records))
}
