use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::GamificationStore;
use crate::gamification::error::GamificationError;
use crate::gamification::models::{BadgeGrant, PetId};

#[derive(Default)]
struct MemoryState {
    points: HashMap<PetId, i64>,
    grants: Vec<BadgeGrant>,
    granted: HashSet<(PetId, String)>,
    known_pets: Option<HashSet<PetId>>,
    removed_pets: HashSet<PetId>,
}

/// Process-local store for tests and local experiments.
///
/// Each trait method takes the lock once, so every write is atomic with
/// respect to concurrent callers, the same guarantee the SQL statements give.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the store to the given pets; writes for any other pet behave
    /// like writes for a deleted pet.
    pub fn with_pets(pets: impl IntoIterator<Item = PetId>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                known_pets: Some(pets.into_iter().collect()),
                ..MemoryState::default()
            }),
        }
    }

    /// Drops a pet together with its balance and grants.
    pub async fn remove_pet(&self, pet_id: PetId) {
        let mut state = self.state.lock().await;
        state.points.remove(&pet_id);
        state.grants.retain(|grant| grant.pet_id != pet_id.get());
        state.granted.retain(|(pet, _)| *pet != pet_id);
        state.removed_pets.insert(pet_id);
    }
}

impl MemoryState {
    fn pet_exists(&self, pet_id: PetId) -> bool {
        !self.removed_pets.contains(&pet_id)
            && self.known_pets.as_ref().map_or(true, |known| known.contains(&pet_id))
    }
}

#[async_trait]
impl GamificationStore for MemoryStore {
    async fn add_points(&self, pet_id: PetId, delta: i64) -> Result<Option<i64>, GamificationError> {
        let mut state = self.state.lock().await;
        if !state.pet_exists(pet_id) {
            return Ok(None);
        }
        let total = state.points.entry(pet_id).or_insert(0);
        *total = total
            .checked_add(delta)
            .ok_or_else(|| GamificationError::invalid_input("points total would overflow"))?;
        Ok(Some(*total))
    }

    async fn points(&self, pet_id: PetId) -> Result<i64, GamificationError> {
        let state = self.state.lock().await;
        Ok(state.points.get(&pet_id).copied().unwrap_or(0))
    }

    async fn grant_badge(&self, pet_id: PetId, badge_name: &str) -> Result<bool, GamificationError> {
        let mut state = self.state.lock().await;
        if !state.pet_exists(pet_id) {
            return Ok(false);
        }
        if !state.granted.insert((pet_id, badge_name.to_string())) {
            return Ok(false);
        }
        state.grants.push(BadgeGrant {
            pet_id: pet_id.get(),
            badge_name: badge_name.to_string(),
            granted_at: Utc::now(),
        });
        Ok(true)
    }

    async fn badges(&self, pet_id: PetId) -> Result<Vec<BadgeGrant>, GamificationError> {
        let state = self.state.lock().await;
        Ok(state
            .grants
            .iter()
            .filter(|grant| grant.pet_id == pet_id.get())
            .cloned()
            .collect())
    }
}
