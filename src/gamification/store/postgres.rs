use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::GamificationStore;
use crate::gamification::error::GamificationError;
use crate::gamification::models::{BadgeGrant, PetId};

// SQLSTATE for foreign_key_violation: the pet row is gone.
const FOREIGN_KEY_VIOLATION: &str = "23503";
// numeric_value_out_of_range: the bigint total would overflow.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// `pet_points` / `pet_badges` backed by PostgreSQL.
#[derive(Clone)]
pub struct PgGamificationStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgGamificationStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Bounds a single statement; an elapsed deadline is reported like any
    /// other unreachable store.
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, sqlx::Error>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                debug!("{} exceeded {:?}", op, self.timeout);
                Err(sqlx::Error::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("{} timed out after {:?}", op, self.timeout),
                )))
            }
        }
    }
}

fn has_code(err: &sqlx::Error, code: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(code),
        _ => false,
    }
}

fn is_missing_pet(err: &sqlx::Error) -> bool {
    has_code(err, FOREIGN_KEY_VIOLATION)
}

#[async_trait]
impl GamificationStore for PgGamificationStore {
    async fn add_points(&self, pet_id: PetId, delta: i64) -> Result<Option<i64>, GamificationError> {
        let result = self
            .bounded(
                "add_points",
                sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO pet_points (pet_id, points)
                    VALUES ($1, $2)
                    ON CONFLICT (pet_id)
                    DO UPDATE SET points = pet_points.points + EXCLUDED.points, updated_at = NOW()
                    RETURNING points
                    "#,
                )
                .bind(pet_id.get())
                .bind(delta)
                .fetch_one(&self.pool),
            )
            .await;

        match result {
            Ok(total) => Ok(Some(total)),
            Err(e) if is_missing_pet(&e) => Ok(None),
            Err(e) if has_code(&e, NUMERIC_OUT_OF_RANGE) => {
                Err(GamificationError::invalid_input("points total would overflow"))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn points(&self, pet_id: PetId) -> Result<i64, GamificationError> {
        let total = self
            .bounded(
                "points",
                sqlx::query_scalar::<_, i64>("SELECT points FROM pet_points WHERE pet_id = $1")
                    .bind(pet_id.get())
                    .fetch_optional(&self.pool),
            )
            .await?;

        Ok(total.unwrap_or(0))
    }

    async fn grant_badge(&self, pet_id: PetId, badge_name: &str) -> Result<bool, GamificationError> {
        let result = self
            .bounded(
                "grant_badge",
                sqlx::query(
                    r#"
                    INSERT INTO pet_badges (pet_id, badge_name)
                    VALUES ($1, $2)
                    ON CONFLICT (pet_id, badge_name) DO NOTHING
                    "#,
                )
                .bind(pet_id.get())
                .bind(badge_name)
                .execute(&self.pool),
            )
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(e) if is_missing_pet(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn badges(&self, pet_id: PetId) -> Result<Vec<BadgeGrant>, GamificationError> {
        let grants = self
            .bounded(
                "badges",
                sqlx::query_as::<_, BadgeGrant>(
                    r#"
                    SELECT pet_id, badge_name, granted_at
                    FROM pet_badges
                    WHERE pet_id = $1
                    ORDER BY granted_at ASC, grant_id ASC
                    "#,
                )
                .bind(pet_id.get())
                .fetch_all(&self.pool),
            )
            .await?;

        Ok(grants)
    }
}
