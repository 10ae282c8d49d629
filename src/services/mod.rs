pub mod appointment_service;
pub mod care_service;
pub mod pet_service;
pub mod user_service;

pub use appointment_service::AppointmentService;
pub use care_service::CareService;
pub use pet_service::PetService;
pub use user_service::UserService;

use crate::auth::PasswordError;

// SQLSTATE codes the services translate into domain errors.
pub(crate) const UNIQUE_VIOLATION: &str = "23505";
pub(crate) const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: &'static str, message: String },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl ServiceError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ServiceError::InvalidInput { field, message: message.into() }
    }
}

pub(crate) fn has_code(err: &sqlx::Error, code: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(code),
        _ => false,
    }
}

/// Rejects empty or whitespace-only text and returns it trimmed.
pub(crate) fn required_text(field: &'static str, value: &str) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::invalid(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}
