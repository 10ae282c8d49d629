// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth, /auth/*) and Protected (JWT bearer, /api/*).
pub mod protected;
pub mod public;
