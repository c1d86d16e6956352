use crate::dto::health::HealthResponse;

/// Respond with a static health payload; the service has no backing dependencies.
pub fn health_status() -> HealthResponse {
    HealthResponse::ok()
}
