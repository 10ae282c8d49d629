use std::sync::Arc;

use super::error::GamificationError;
use super::models::PetId;
use super::store::GamificationStore;

/// Durable per-pet point accumulator. Totals only grow.
#[derive(Clone)]
pub struct PointLedger {
    store: Arc<dyn GamificationStore>,
}

impl PointLedger {
    pub fn new(store: Arc<dyn GamificationStore>) -> Self {
        Self { store }
    }

    /// Adds `delta` and returns the new total, or `None` if the pet is gone.
    pub async fn award_points(&self, pet_id: PetId, delta: i64) -> Result<Option<i64>, GamificationError> {
        if delta <= 0 {
            return Err(GamificationError::invalid_input(format!(
                "points must be positive, got {}",
                delta
            )));
        }
        self.store.add_points(pet_id, delta).await
    }

    pub async fn get_points(&self, pet_id: PetId) -> Result<i64, GamificationError> {
        self.store.points(pet_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamification::store::MemoryStore;

    fn ledger() -> PointLedger {
        PointLedger::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn first_award_creates_balance() {
        let ledger = ledger();
        let pet = PetId::new(3).unwrap();

        assert_eq!(ledger.get_points(pet).await.unwrap(), 0);
        assert_eq!(ledger.award_points(pet, 30).await.unwrap(), Some(30));
        assert_eq!(ledger.award_points(pet, 20).await.unwrap(), Some(50));
        assert_eq!(ledger.get_points(pet).await.unwrap(), 50);
    }

    #[tokio::test]
    async fn rejects_non_positive_deltas() {
        let ledger = ledger();
        let pet = PetId::new(3).unwrap();

        for delta in [0, -1, i64::MIN] {
            assert!(matches!(
                ledger.award_points(pet, delta).await,
                Err(GamificationError::InvalidInput(_))
            ));
        }
        assert_eq!(ledger.get_points(pet).await.unwrap(), 0);
    }
}
