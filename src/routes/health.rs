use axum::Json;

use crate::{
    dto::health::HealthResponse,
    registry::{ApiRegistry, ResponseSpec, RouteDescriptor},
    services::health_service,
};

/// Register the health routes.
pub fn register(registry: ApiRegistry) -> ApiRegistry {
    registry.route(
        RouteDescriptor::get("/healthcheck", "healthcheck")
            .summary("Report service health")
            .tag("health")
            .response(ResponseSpec::json::<HealthResponse>(200, "Service is healthy")),
        healthcheck,
    )
}

/// Return the current health status of the service.
pub async fn healthcheck() -> Json<HealthResponse> {
    Json(health_service::health_status())
}
