//! Library crate for user-api, exposing modules for binaries and integration tests.

/// Typed client generation from a published OpenAPI document.
pub mod codegen;
/// Service configuration.
pub mod config;
/// Request and response payloads.
pub mod dto;
/// HTTP error mapping.
pub mod error;
/// Route registry shared by the router and the OpenAPI document.
pub mod registry;
/// HTTP routes.
pub mod routes;
/// Business logic behind the routes.
pub mod services;
/// Shared application state.
pub mod state;
