use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FeedingRecord {
    pub feeding_id: i64,
    pub pet_id: i64,
    pub food_type: String,
    pub quantity: i32,
    pub feeding_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VaccineRecord {
    pub vaccine_id: i64,
    pub pet_id: i64,
    pub vaccine_name: String,
    pub vaccine_date: NaiveDate,
    pub expiration_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HealthQuestion {
    pub question_id: i64,
    pub user_id: i64,
    pub pet_id: Option<i64>,
    pub question: String,
    pub asked_at: DateTime<Utc>,
}
