/// Health check payload.
pub mod health;
/// User record payload.
pub mod user;
