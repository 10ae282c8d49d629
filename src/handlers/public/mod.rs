// handlers/public/mod.rs - Token acquisition, no authentication required
pub mod auth;

pub use auth::{login, register};
