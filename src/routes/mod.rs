use axum::Router;

use crate::{registry::ApiRegistry, state::AppState};

/// OpenAPI document and Swagger UI routes.
pub mod docs;
/// Health check route.
pub mod health;
/// User lookup route.
pub mod user;

/// Registry holding every operation the service exposes.
pub fn registry() -> ApiRegistry {
    let registry = ApiRegistry::new();
    let registry = health::register(registry);
    user::register(registry)
}

/// Compose the API routes of `registry` with the documentation routes and wire in shared state.
pub fn router(registry: ApiRegistry, swagger_ui: bool) -> Router<()> {
    let (api_router, routes) = registry.into_parts();
    let state = AppState::new(routes);

    api_router.merge(docs::router(swagger_ui)).with_state(state)
}
