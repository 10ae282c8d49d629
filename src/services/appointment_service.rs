use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;

use super::{required_text, ServiceError};
use crate::database::models::Appointment;

pub const STATUS_SCHEDULED: &str = "scheduled";
pub const STATUS_RESCHEDULED: &str = "rescheduled";

#[derive(Debug, Clone, Deserialize)]
pub struct NewAppointment {
    pub pet_id: i64,
    pub appointment_type: String,
    pub appointment_date: DateTime<Utc>,
}

fn require_future(field: &'static str, at: DateTime<Utc>) -> Result<(), ServiceError> {
    if at <= Utc::now() {
        return Err(ServiceError::invalid(field, "must be in the future"));
    }
    Ok(())
}

/// Vet appointments. Only the booking user can read or change one.
pub struct AppointmentService {
    pool: PgPool,
}

impl AppointmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: i64, new: &NewAppointment) -> Result<Appointment, ServiceError> {
        let appointment_type = required_text("appointment_type", &new.appointment_type)?;
        require_future("appointment_date", new.appointment_date)?;

        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (pet_id, user_id, appointment_type, appointment_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING appointment_id, pet_id, user_id, appointment_type, appointment_date,
                      status, created_at, updated_at
            "#,
        )
        .bind(new.pet_id)
        .bind(user_id)
        .bind(&appointment_type)
        .bind(new.appointment_date)
        .bind(STATUS_SCHEDULED)
        .fetch_one(&self.pool)
        .await?;

        Ok(appointment)
    }

    /// Upcoming first.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Appointment>, ServiceError> {
        let appointments = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT appointment_id, pet_id, user_id, appointment_type, appointment_date,
                   status, created_at, updated_at
            FROM appointments
            WHERE user_id = $1
            ORDER BY appointment_date ASC, appointment_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }

    pub async fn get_owned(&self, appointment_id: i64, user_id: i64) -> Result<Appointment, ServiceError> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT appointment_id, pet_id, user_id, appointment_type, appointment_date,
                   status, created_at, updated_at
            FROM appointments
            WHERE appointment_id = $1
            "#,
        )
        .bind(appointment_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("appointment {}", appointment_id)))?;

        if appointment.user_id != user_id {
            return Err(ServiceError::Forbidden(format!(
                "appointment {} belongs to another user",
                appointment_id
            )));
        }
        Ok(appointment)
    }

    pub async fn reschedule(
        &self,
        appointment_id: i64,
        user_id: i64,
        new_date: DateTime<Utc>,
    ) -> Result<Appointment, ServiceError> {
        require_future("new_appointment_date", new_date)?;
        self.get_owned(appointment_id, user_id).await?;

        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments
            SET appointment_date = $2, status = $3, updated_at = NOW()
            WHERE appointment_id = $1
            RETURNING appointment_id, pet_id, user_id, appointment_type, appointment_date,
                      status, created_at, updated_at
            "#,
        )
        .bind(appointment_id)
        .bind(new_date)
        .bind(STATUS_RESCHEDULED)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("appointment {}", appointment_id)))?;

        tracing::info!("Appointment {} moved to {}", appointment_id, new_date);
        Ok(appointment)
    }
}
