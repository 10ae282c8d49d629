use serde::Deserialize;
use sqlx::PgPool;

use super::{has_code, required_text, ServiceError, UNIQUE_VIOLATION};
use crate::auth::{hash_password, verify_password};
use crate::database::models::User;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl NewUser {
    /// Returns the normalised (email, name) pair.
    pub fn validate(&self) -> Result<(String, String), ServiceError> {
        let email = required_text("email", &self.email)?.to_lowercase();
        // Shape check only.
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => return Err(ServiceError::invalid("email", "must be an email address")),
        }

        let name = validate_name(&self.name)?;

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServiceError::invalid(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }

        Ok((email, name))
    }
}

fn validate_name(raw: &str) -> Result<String, ServiceError> {
    let name = required_text("name", raw)?;
    if name.len() > 100 {
        return Err(ServiceError::invalid("name", "must be less than 100 characters"));
    }
    if name.contains('@') {
        return Err(ServiceError::invalid("name", "must not contain '@'"));
    }
    Ok(name)
}

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, new_user: &NewUser) -> Result<User, ServiceError> {
        let (email, name) = new_user.validate()?;
        let password_hash = hash_password(&new_user.password)?;

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING user_id, email, name, password_hash, created_at, updated_at
            "#,
        )
        .bind(&email)
        .bind(&name)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => {
                tracing::info!("Registered user {} ({})", user.name, user.user_id);
                Ok(user)
            }
            Err(e) if has_code(&e, UNIQUE_VIOLATION) => {
                Err(ServiceError::Conflict("email or name already registered".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// `login` may be the account name or its email. `None` on any mismatch.
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<Option<User>, ServiceError> {
        let login = login.trim();
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, email, name, password_hash, created_at, updated_at
            FROM users
            WHERE name = $1 OR email = lower($1)
            "#,
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        match user {
            Some(user) if verify_password(password, &user.password_hash)? => Ok(Some(user)),
            _ => Ok(None),
        }
    }

    pub async fn profile(&self, user_id: i64) -> Result<User, ServiceError> {
        sqlx::query_as::<_, User>(
            "SELECT user_id, email, name, password_hash, created_at, updated_at FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("user {}", user_id)))
    }

    pub async fn rename(&self, user_id: i64, name: &str) -> Result<User, ServiceError> {
        let name = validate_name(name)?;

        let result = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET name = $2, updated_at = NOW()
            WHERE user_id = $1
            RETURNING user_id, email, name, password_hash, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&name)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(ServiceError::NotFound(format!("user {}", user_id))),
            Err(e) if has_code(&e, UNIQUE_VIOLATION) => {
                Err(ServiceError::Conflict(format!("name '{}' is taken", name)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str, name: &str, password: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn normalises_email_and_name() {
        let (email, name) = new_user(" Ana@Example.com ", " ana ", "long-enough").validate().unwrap();
        assert_eq!(email, "ana@example.com");
        assert_eq!(name, "ana");
    }

    #[test]
    fn rejects_bad_registration_fields() {
        assert!(matches!(
            new_user("nope", "ana", "long-enough").validate(),
            Err(ServiceError::InvalidInput { field: "email", .. })
        ));
        assert!(matches!(
            new_user("ana@example.com", "a@b", "long-enough").validate(),
            Err(ServiceError::InvalidInput { field: "name", .. })
        ));
        assert!(matches!(
            new_user("ana@example.com", "ana", "short").validate(),
            Err(ServiceError::InvalidInput { field: "password", .. })
        ));
    }
}
