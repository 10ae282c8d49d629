use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::PgPool;

use super::{required_text, ServiceError};
use crate::database::models::{FeedingRecord, HealthQuestion, VaccineRecord};

#[derive(Debug, Clone, Deserialize)]
pub struct NewFeeding {
    pub food_type: String,
    pub quantity: i32,
    /// Defaults to now.
    pub feeding_time: Option<DateTime<Utc>>,
}

impl NewFeeding {
    fn validate(&self) -> Result<(String, i32, DateTime<Utc>), ServiceError> {
        let food_type = required_text("food_type", &self.food_type)?;
        if self.quantity <= 0 {
            return Err(ServiceError::invalid("quantity", "must be positive"));
        }
        Ok((food_type, self.quantity, self.feeding_time.unwrap_or_else(Utc::now)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVaccine {
    pub vaccine_name: String,
    pub vaccine_date: NaiveDate,
    pub expiration_date: Option<NaiveDate>,
}

impl NewVaccine {
    fn validate(&self) -> Result<String, ServiceError> {
        let vaccine_name = required_text("vaccine_name", &self.vaccine_name)?;
        if let Some(expires) = self.expiration_date {
            if expires < self.vaccine_date {
                return Err(ServiceError::invalid(
                    "expiration_date",
                    "must not be before vaccine_date",
                ));
            }
        }
        Ok(vaccine_name)
    }
}

/// Feeding, vaccination and health-question records.
pub struct CareService {
    pool: PgPool,
}

impl CareService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn add_feeding(&self, pet_id: i64, feeding: &NewFeeding) -> Result<FeedingRecord, ServiceError> {
        let (food_type, quantity, feeding_time) = feeding.validate()?;

        let record = sqlx::query_as::<_, FeedingRecord>(
            r#"
            INSERT INTO pet_feeding (pet_id, food_type, quantity, feeding_time)
            VALUES ($1, $2, $3, $4)
            RETURNING feeding_id, pet_id, food_type, quantity, feeding_time
            "#,
        )
        .bind(pet_id)
        .bind(&food_type)
        .bind(quantity)
        .bind(feeding_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Newest first.
    pub async fn list_feeding(&self, pet_id: i64) -> Result<Vec<FeedingRecord>, ServiceError> {
        let records = sqlx::query_as::<_, FeedingRecord>(
            r#"
            SELECT feeding_id, pet_id, food_type, quantity, feeding_time
            FROM pet_feeding
            WHERE pet_id = $1
            ORDER BY feeding_time DESC, feeding_id DESC
            "#,
        )
        .bind(pet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn add_vaccine(&self, pet_id: i64, vaccine: &NewVaccine) -> Result<VaccineRecord, ServiceError> {
        let vaccine_name = vaccine.validate()?;

        let record = sqlx::query_as::<_, VaccineRecord>(
            r#"
            INSERT INTO pet_vaccines (pet_id, vaccine_name, vaccine_date, expiration_date)
            VALUES ($1, $2, $3, $4)
            RETURNING vaccine_id, pet_id, vaccine_name, vaccine_date, expiration_date
            "#,
        )
        .bind(pet_id)
        .bind(&vaccine_name)
        .bind(vaccine.vaccine_date)
        .bind(vaccine.expiration_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn list_vaccines(&self, pet_id: i64) -> Result<Vec<VaccineRecord>, ServiceError> {
        let records = sqlx::query_as::<_, VaccineRecord>(
            r#"
            SELECT vaccine_id, pet_id, vaccine_name, vaccine_date, expiration_date
            FROM pet_vaccines
            WHERE pet_id = $1
            ORDER BY vaccine_date DESC, vaccine_id DESC
            "#,
        )
        .bind(pet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn add_question(
        &self,
        user_id: i64,
        pet_id: Option<i64>,
        question: &str,
    ) -> Result<HealthQuestion, ServiceError> {
        let question = required_text("question", question)?;

        let record = sqlx::query_as::<_, HealthQuestion>(
            r#"
            INSERT INTO health_questions (user_id, pet_id, question)
            VALUES ($1, $2, $3)
            RETURNING question_id, user_id, pet_id, question, asked_at
            "#,
        )
        .bind(user_id)
        .bind(pet_id)
        .bind(&question)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }
}
