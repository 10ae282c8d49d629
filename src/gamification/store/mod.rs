mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgGamificationStore;

use async_trait::async_trait;

use super::error::GamificationError;
use super::models::{BadgeGrant, PetId};

/// Persistence seam for balances and grants.
///
/// Both writes must be single atomic primitives of the backing store; callers
/// never compose them from a read followed by a write.
#[async_trait]
pub trait GamificationStore: Send + Sync {
    /// Insert-or-add: creates the balance at `delta` or adds `delta` to it and
    /// returns the resulting total. `None` when the pet does not exist (any more).
    async fn add_points(&self, pet_id: PetId, delta: i64) -> Result<Option<i64>, GamificationError>;

    /// Current total, `0` when the pet has never earned points.
    async fn points(&self, pet_id: PetId) -> Result<i64, GamificationError>;

    /// Insert-if-absent. `true` only for the call that created the grant.
    async fn grant_badge(&self, pet_id: PetId, badge_name: &str) -> Result<bool, GamificationError>;

    /// All grants for the pet, oldest first.
    async fn badges(&self, pet_id: PetId) -> Result<Vec<BadgeGrant>, GamificationError>;
}
