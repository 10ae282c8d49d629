// handlers/protected/mod.rs - JWT-authenticated /api/* handlers
//
// Every handler here runs after jwt_auth_middleware, so `AuthUser` is always
// present in request extensions. Care-event handlers commit their record first
// and only then award points; a gamification failure never fails the request.
pub mod appointments;
pub mod feeding;
pub mod health;
pub mod pets;
pub mod profile;
pub mod vaccines;
