use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, error, warn};

use super::catalog::{BadgeCatalog, CatalogError};
use super::error::GamificationError;
use super::evaluator::BadgeEvaluator;
use super::ledger::PointLedger;
use super::models::{CareEvent, PetId};
use super::store::{GamificationStore, PgGamificationStore};
use crate::config::{EventPoints, GamificationConfig};

/// Result of a point award that reached the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EventOutcome {
    /// Points applied and the catalog re-checked.
    Awarded { total: i64, new_badges: Vec<String> },
    /// Points applied but badge evaluation failed. The next award for the pet
    /// re-checks every rule, so nothing is lost for good.
    BadgesDeferred { total: i64 },
    /// The pet was deleted before the award landed.
    PetMissing,
}

impl EventOutcome {
    pub fn total(&self) -> Option<i64> {
        match self {
            EventOutcome::Awarded { total, .. } | EventOutcome::BadgesDeferred { total } => Some(*total),
            EventOutcome::PetMissing => None,
        }
    }
}

/// Entry point used by every care-event handler.
#[derive(Clone)]
pub struct GamificationService {
    ledger: PointLedger,
    evaluator: BadgeEvaluator,
    event_points: EventPoints,
}

impl GamificationService {
    pub fn new(store: Arc<dyn GamificationStore>, catalog: BadgeCatalog) -> Self {
        Self {
            ledger: PointLedger::new(store.clone()),
            evaluator: BadgeEvaluator::new(Arc::new(catalog), store),
            event_points: EventPoints::default(),
        }
    }

    pub fn with_event_points(mut self, event_points: EventPoints) -> Self {
        self.event_points = event_points;
        self
    }

    pub fn from_config(
        store: Arc<dyn GamificationStore>,
        config: &GamificationConfig,
    ) -> Result<Self, CatalogError> {
        let catalog = BadgeCatalog::from_config(config)?;
        let invalid = config.event_points.entries().into_iter().find(|(_, points)| *points <= 0);
        if let Some((event, points)) = invalid {
            return Err(CatalogError::NonPositiveEventPoints { event, points });
        }
        Ok(Self::new(store, catalog).with_event_points(config.event_points.clone()))
    }

    /// Service over the `pet_points` / `pet_badges` tables.
    pub fn postgres(pool: PgPool, config: &GamificationConfig) -> Result<Self, CatalogError> {
        let store = PgGamificationStore::new(pool, Duration::from_millis(config.store_timeout_ms));
        Self::from_config(Arc::new(store), config)
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        self.evaluator.catalog()
    }

    pub fn event_points(&self) -> &EventPoints {
        &self.event_points
    }

    /// Awards `points` to the pet, then re-evaluates its badges.
    ///
    /// Fails only when the input is invalid or the increment itself could not
    /// be applied; an evaluation failure after a successful increment is
    /// reported as [`EventOutcome::BadgesDeferred`].
    pub async fn record_event(&self, pet_id: i64, points: i64) -> Result<EventOutcome, GamificationError> {
        if points <= 0 {
            return Err(GamificationError::invalid_input(format!(
                "points must be positive, got {}",
                points
            )));
        }
        let pet_id = PetId::new(pet_id)?;

        let total = match self.ledger.award_points(pet_id, points).await? {
            Some(total) => total,
            None => {
                debug!(pet_id = %pet_id, points, "award skipped, pet no longer exists");
                return Ok(EventOutcome::PetMissing);
            }
        };

        match self.evaluator.evaluate(pet_id, total).await {
            Ok(new_badges) => Ok(EventOutcome::Awarded { total, new_badges }),
            Err(e) => {
                warn!(
                    pet_id = %pet_id,
                    total,
                    error = %e,
                    "points applied but badge evaluation failed; next award re-checks"
                );
                Ok(EventOutcome::BadgesDeferred { total })
            }
        }
    }

    /// Best-effort award for a care event whose primary record is already
    /// committed. Failures are logged and swallowed.
    pub async fn reward(&self, pet_id: i64, event: CareEvent) -> Option<EventOutcome> {
        let points = event.points(&self.event_points);
        match self.record_event(pet_id, points).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!(pet_id, event = event.as_str(), points, error = %e, "gamification unavailable");
                None
            }
        }
    }

    pub async fn get_points(&self, pet_id: i64) -> Result<i64, GamificationError> {
        self.ledger.get_points(PetId::new(pet_id)?).await
    }

    pub async fn list_badges(&self, pet_id: i64) -> Result<Vec<String>, GamificationError> {
        self.evaluator.list_badges(PetId::new(pet_id)?).await
    }
}
