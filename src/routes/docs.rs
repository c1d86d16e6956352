use axum::{Json, Router, extract::State, routing::get};
use utoipa_swagger_ui::{Config, SwaggerUi};

use crate::{
    services::documentation::{self, OPENAPI_JSON_PATH},
    state::SharedState,
};

/// Path the Swagger UI is mounted under.
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Serve the OpenAPI document and, optionally, the Swagger UI reading it.
pub fn router(swagger_ui: bool) -> Router<SharedState> {
    let router = Router::new().route(OPENAPI_JSON_PATH, get(openapi_json));
    if !swagger_ui {
        return router;
    }

    let ui: Router<SharedState> = SwaggerUi::new(SWAGGER_UI_PATH)
        .config(Config::from(OPENAPI_JSON_PATH))
        .into();
    router.merge(ui)
}

/// Serialize the live route table; rebuilt on every request.
pub async fn openapi_json(State(state): State<SharedState>) -> Json<utoipa::openapi::OpenApi> {
    Json(documentation::document(state.routes()))
}
