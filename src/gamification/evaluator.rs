use std::sync::Arc;

use tracing::info;

use super::catalog::BadgeCatalog;
use super::error::GamificationError;
use super::models::PetId;
use super::store::GamificationStore;

/// Grants every badge whose rule a pet's total satisfies.
#[derive(Clone)]
pub struct BadgeEvaluator {
    catalog: Arc<BadgeCatalog>,
    store: Arc<dyn GamificationStore>,
}

impl BadgeEvaluator {
    pub fn new(catalog: Arc<BadgeCatalog>, store: Arc<dyn GamificationStore>) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        &self.catalog
    }

    /// Re-checks the whole catalog against `total` and returns the badges this
    /// call created. A grant lost to a concurrent evaluator is not reported and
    /// is not an error.
    pub async fn evaluate(&self, pet_id: PetId, total: i64) -> Result<Vec<String>, GamificationError> {
        let mut granted = Vec::new();
        for rule in self.catalog.qualified(total) {
            if self.store.grant_badge(pet_id, rule.name()).await? {
                info!(pet_id = %pet_id, badge = rule.name(), total, "badge granted");
                granted.push(rule.name().to_string());
            }
        }
        Ok(granted)
    }

    /// Badge names in grant order.
    pub async fn list_badges(&self, pet_id: PetId) -> Result<Vec<String>, GamificationError> {
        let grants = self.store.badges(pet_id).await?;
        Ok(grants.into_iter().map(|grant| grant.badge_name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamification::store::MemoryStore;

    fn evaluator() -> BadgeEvaluator {
        BadgeEvaluator::new(Arc::new(BadgeCatalog::standard(300)), Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn grants_every_crossed_threshold_at_once() {
        let evaluator = evaluator();
        let pet = PetId::new(1).unwrap();

        let granted = evaluator.evaluate(pet, 320).await.unwrap();
        assert_eq!(granted, vec!["Super Pet", "Veteran Pet", "Ultimate Pet"]);
        assert_eq!(evaluator.list_badges(pet).await.unwrap(), granted);
    }

    #[tokio::test]
    async fn re_evaluation_never_re_reports() {
        let evaluator = evaluator();
        let pet = PetId::new(1).unwrap();

        assert_eq!(evaluator.evaluate(pet, 100).await.unwrap(), vec!["Super Pet"]);
        assert!(evaluator.evaluate(pet, 100).await.unwrap().is_empty());
        assert_eq!(evaluator.evaluate(pet, 210).await.unwrap(), vec!["Veteran Pet"]);
        assert!(evaluator.evaluate(pet, 250).await.unwrap().is_empty());

        assert_eq!(
            evaluator.list_badges(pet).await.unwrap(),
            vec!["Super Pet", "Veteran Pet"]
        );
    }

    #[tokio::test]
    async fn below_every_threshold_grants_nothing() {
        let evaluator = evaluator();
        let pet = PetId::new(1).unwrap();

        assert!(evaluator.evaluate(pet, 99).await.unwrap().is_empty());
        assert!(evaluator.list_badges(pet).await.unwrap().is_empty());
    }
}
