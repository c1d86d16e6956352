use axum::{Json, extract::Path, extract::rejection::PathRejection};

use crate::{
    dto::user::User,
    error::{AppError, ErrorBody},
    registry::{ApiRegistry, ParamSpec, ResponseSpec, RouteDescriptor},
    services::user_service,
};

/// Register the user lookup operation.
pub fn register(registry: ApiRegistry) -> ApiRegistry {
    registry.route(
        RouteDescriptor::get("/api/user/{id}", "get_user")
            .summary("Fetch the user with the given identifier")
            .tag("user")
            .param(ParamSpec::path::<i64>("id", "Identifier of the user"))
            .response(ResponseSpec::json::<User>(200, "User record"))
            .response(ResponseSpec::json::<ErrorBody>(400, "Identifier is not an integer")),
        get_user,
    )
}

/// Return the user for `id`. Identifiers that do not parse as `i64` never reach the service.
pub async fn get_user(id: Result<Path<i64>, PathRejection>) -> Result<Json<User>, AppError> {
    let Path(id) = id?;
    Ok(Json(user_service::get_user(id)))
}
