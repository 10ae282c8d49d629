use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::PgPool;

use super::{has_code, required_text, ServiceError, FOREIGN_KEY_VIOLATION};
use crate::database::models::{Permission, Pet, PetSummary};

#[derive(Debug, Clone, Deserialize)]
pub struct NewPet {
    pub name: String,
    pub breed: String,
    pub birthdate: NaiveDate,
    pub gender: String,
}

impl NewPet {
    pub fn validate(&self) -> Result<NewPet, ServiceError> {
        if self.birthdate > Utc::now().date_naive() {
            return Err(ServiceError::invalid("birthdate", "must not be in the future"));
        }
        Ok(NewPet {
            name: required_text("name", &self.name)?,
            breed: required_text("breed", &self.breed)?,
            birthdate: self.birthdate,
            gender: required_text("gender", &self.gender)?,
        })
    }
}

/// Pet records and the per-user permission table guarding them.
pub struct PetService {
    pool: PgPool,
}

impl PetService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Pets the user holds any permission on, with their current totals.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<PetSummary>, ServiceError> {
        let pets = sqlx::query_as::<_, PetSummary>(
            r#"
            SELECT p.pet_id, p.name, p.breed, p.birthdate, p.gender,
                   pp.permission_type,
                   COALESCE(pts.points, 0) AS points
            FROM pets p
            JOIN pet_permissions pp ON pp.pet_id = p.pet_id
            LEFT JOIN pet_points pts ON pts.pet_id = p.pet_id
            WHERE pp.user_id = $1
            ORDER BY p.pet_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(pets)
    }

    /// Creates the pet and gives its creator `edit` in one transaction.
    pub async fn create(&self, user_id: i64, new_pet: &NewPet) -> Result<Pet, ServiceError> {
        let new_pet = new_pet.validate()?;
        let mut tx = self.pool.begin().await?;

        let pet = sqlx::query_as::<_, Pet>(
            r#"
            INSERT INTO pets (name, breed, birthdate, gender)
            VALUES ($1, $2, $3, $4)
            RETURNING pet_id, name, breed, birthdate, gender, created_at
            "#,
        )
        .bind(&new_pet.name)
        .bind(&new_pet.breed)
        .bind(new_pet.birthdate)
        .bind(&new_pet.gender)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO pet_permissions (pet_id, user_id, permission_type) VALUES ($1, $2, $3)",
        )
        .bind(pet.pet_id)
        .bind(user_id)
        .bind(Permission::Edit.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("User {} created pet {}", user_id, pet.pet_id);
        Ok(pet)
    }

    pub async fn permission(&self, pet_id: i64, user_id: i64) -> Result<Option<Permission>, ServiceError> {
        let raw = sqlx::query_scalar::<_, String>(
            "SELECT permission_type FROM pet_permissions WHERE pet_id = $1 AND user_id = $2",
        )
        .bind(pet_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match raw {
            Some(raw) => raw
                .parse::<Permission>()
                .map(Some)
                .map_err(|e| ServiceError::Database(sqlx::Error::Decode(e.into()))),
            None => Ok(None),
        }
    }

    /// Succeeds when the user's permission covers `required`. A user with no
    /// permission at all gets `NotFound`, so pet ids are not probeable.
    pub async fn require(&self, pet_id: i64, user_id: i64, required: Permission) -> Result<Permission, ServiceError> {
        match self.permission(pet_id, user_id).await? {
            Some(held) if held.allows(required) => Ok(held),
            Some(_) => Err(ServiceError::Forbidden(format!(
                "{} permission required on pet {}",
                required.as_str(),
                pet_id
            ))),
            None => Err(ServiceError::NotFound(format!("pet {}", pet_id))),
        }
    }

    pub async fn get(&self, pet_id: i64) -> Result<Pet, ServiceError> {
        sqlx::query_as::<_, Pet>(
            "SELECT pet_id, name, breed, birthdate, gender, created_at FROM pets WHERE pet_id = $1",
        )
        .bind(pet_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("pet {}", pet_id)))
    }

    /// Removes the pet; permissions, points, badges and care records cascade.
    pub async fn delete(&self, pet_id: i64) -> Result<(), ServiceError> {
        let done = sqlx::query("DELETE FROM pets WHERE pet_id = $1")
            .bind(pet_id)
            .execute(&self.pool)
            .await?;

        if done.rows_affected() == 0 {
            return Err(ServiceError::NotFound(format!("pet {}", pet_id)));
        }
        tracing::info!("Deleted pet {}", pet_id);
        Ok(())
    }

    /// Grants `view` to another user. An existing `edit` grant is kept.
    pub async fn grant_view(&self, pet_id: i64, target_user_id: i64) -> Result<(), ServiceError> {
        let result = sqlx::query(
            r#"
            INSERT INTO pet_permissions (pet_id, user_id, permission_type)
            VALUES ($1, $2, 'view')
            ON CONFLICT (pet_id, user_id) DO UPDATE SET granted_at = NOW()
            "#,
        )
        .bind(pet_id)
        .bind(target_user_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if has_code(&e, FOREIGN_KEY_VIOLATION) => Err(ServiceError::NotFound(format!(
                "user {} or pet {}",
                target_user_id, pet_id
            ))),
            Err(e) => Err(e.into()),
        }
    }
}
