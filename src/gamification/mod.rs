//! Per-pet gamification: a point ledger that only ever grows, and badges
//! derived from point thresholds that are granted at most once.
//!
//! Every care-event handler goes through [`GamificationService::record_event`]
//! (or the [`GamificationService::reward`] convenience wrapper). Coordination
//! between concurrent callers is left entirely to the store: the ledger
//! increment is a single upsert-add and a badge grant is a single
//! insert-if-absent.

pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod ledger;
pub mod models;
pub mod service;
pub mod store;

pub use catalog::{BadgeCatalog, BadgeCriterion, BadgeRule, CatalogError};
pub use error::GamificationError;
pub use evaluator::BadgeEvaluator;
pub use ledger::PointLedger;
pub use models::{BadgeGrant, CareEvent, PetId};
pub use service::{EventOutcome, GamificationService};
pub use store::{GamificationStore, MemoryStore, PgGamificationStore};
