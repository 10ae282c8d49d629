use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Pet {
    pub pet_id: i64,
    pub name: String,
    pub breed: String,
    pub birthdate: NaiveDate,
    pub gender: String,
    pub created_at: DateTime<Utc>,
}

/// A pet as seen by one user: the caller's permission and the current total.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PetSummary {
    pub pet_id: i64,
    pub name: String,
    pub breed: String,
    pub birthdate: NaiveDate,
    pub gender: String,
    pub permission_type: String,
    pub points: i64,
}

/// Access level stored in `pet_permissions.permission_type`. `Edit` implies `View`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    View,
    Edit,
}

impl Permission {
    pub fn allows(self, required: Permission) -> bool {
        self >= required
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::View => "view",
            Permission::Edit => "edit",
        }
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "view" => Ok(Permission::View),
            "edit" => Ok(Permission::Edit),
            other => Err(format!("unknown permission type '{}'", other)),
        }
    }
}
