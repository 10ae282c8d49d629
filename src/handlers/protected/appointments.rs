use axum::extract::{Extension, Json, Path};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::database::models::{Appointment, Permission};
use crate::gamification::{CareEvent, EventOutcome, GamificationService};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::appointment_service::NewAppointment;
use crate::services::{AppointmentService, PetService};

#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    pub new_appointment_date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub appointment: Appointment,
    pub gamification: Option<EventOutcome>,
}

/// POST /api/appointments - Book a vet visit for a pet the caller can see
pub async fn create(
    Extension(pool): Extension<PgPool>,
    Extension(gamification): Extension<GamificationService>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<NewAppointment>,
) -> ApiResult<BookingResponse> {
    PetService::new(pool.clone())
        .require(payload.pet_id, auth_user.user_id, Permission::View)
        .await?;
    let appointment = AppointmentService::new(pool).create(auth_user.user_id, &payload).await?;

    let gamification = gamification.reward(appointment.pet_id, CareEvent::Appointment).await;

    Ok(ApiResponse::created(BookingResponse { appointment, gamification }))
}

/// GET /api/appointments - The caller's bookings
pub async fn list(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<Appointment>> {
    let appointments = AppointmentService::new(pool).list_for_user(auth_user.user_id).await?;
    Ok(ApiResponse::success(appointments))
}

/// GET /api/appointments/:appointment_id
pub async fn get(
    Path(appointment_id): Path<i64>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Appointment> {
    let appointment = AppointmentService::new(pool)
        .get_owned(appointment_id, auth_user.user_id)
        .await?;
    Ok(ApiResponse::success(appointment))
}

/// POST /api/appointments/:appointment_id/reschedule
pub async fn reschedule(
    Path(appointment_id): Path<i64>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<RescheduleRequest>,
) -> ApiResult<Appointment> {
    let appointment = AppointmentService::new(pool)
        .reschedule(appointment_id, auth_user.user_id, payload.new_appointment_date)
        .await?;
    Ok(ApiResponse::success(appointment))
}

/// GET /api/appointments/:appointment_id/status
pub async fn status(
    Path(appointment_id): Path<i64>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Value> {
    let appointment = AppointmentService::new(pool)
        .get_owned(appointment_id, auth_user.user_id)
        .await?;
    Ok(ApiResponse::success(json!({
        "appointment_id": appointment.appointment_id,
        "status": appointment.status,
        "appointment_date": appointment.appointment_date,
    })))
}
