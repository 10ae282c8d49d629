use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::GamificationError;
use crate::config::EventPoints;

/// Identifier of a pet owned by the pet-management side of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(i64);

impl PetId {
    /// Pet ids are generated by a serial column, so anything below 1 is malformed.
    pub fn new(raw: i64) -> Result<Self, GamificationError> {
        if raw <= 0 {
            return Err(GamificationError::invalid_input(format!(
                "pet id must be positive, got {}",
                raw
            )));
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for PetId {
    type Error = GamificationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

/// A single badge earned by a single pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BadgeGrant {
    pub pet_id: i64,
    pub badge_name: String,
    pub granted_at: DateTime<Utc>,
}

/// Care actions that earn points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareEvent {
    Feeding,
    Vaccination,
    HealthQuestion,
    Appointment,
    TrustGrant,
}

impl CareEvent {
    pub fn points(self, table: &EventPoints) -> i64 {
        match self {
            CareEvent::Feeding => table.feeding,
            CareEvent::Vaccination => table.vaccination,
            CareEvent::HealthQuestion => table.health_question,
            CareEvent::Appointment => table.appointment,
            CareEvent::TrustGrant => table.trust_grant,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CareEvent::Feeding => "feeding",
            CareEvent::Vaccination => "vaccination",
            CareEvent::HealthQuestion => "health_question",
            CareEvent::Appointment => "appointment",
            CareEvent::TrustGrant => "trust_grant",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_pet_ids() {
        assert!(PetId::new(1).is_ok());
        assert!(matches!(PetId::new(0), Err(GamificationError::InvalidInput(_))));
        assert!(matches!(PetId::try_from(-7), Err(GamificationError::InvalidInput(_))));
    }

    #[test]
    fn care_events_use_configured_points() {
        let table = EventPoints::default();
        assert_eq!(CareEvent::Feeding.points(&table), 20);
        assert_eq!(CareEvent::Vaccination.points(&table), 30);
        assert_eq!(CareEvent::HealthQuestion.points(&table), 10);
        assert_eq!(CareEvent::Appointment.points(&table), 15);
        assert_eq!(CareEvent::TrustGrant.points(&table), 50);
    }
}
