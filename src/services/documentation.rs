use std::collections::BTreeMap;

use utoipa::{
    OpenApi,
    openapi::{
        Required,
        content::ContentBuilder,
        path::{
            Operation, OperationBuilder, ParameterBuilder, ParameterIn, PathItemBuilder,
            PathsBuilder,
        },
        response::{Response, ResponseBuilder},
        schema::{ComponentsBuilder, Ref},
    },
};

use crate::registry::{ParamLocation, ParamSpec, ResponseSpec, RouteDescriptor, RouteTable};

/// Path the OpenAPI document is published under.
pub const OPENAPI_JSON_PATH: &str = "/swagger/v1/swagger.json";

#[derive(OpenApi)]
/// Static part of the document; paths and components come from the route table.
#[openapi(
    info(
        title = "User API",
        version = "v1",
        description = "Synthetic user lookup service"
    ),
    tags(
        (name = "user", description = "User lookup"),
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

/// Serialize `table` into a complete OpenAPI document.
///
/// An empty table yields an empty `paths` object and no components.
pub fn document(table: &RouteTable) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();

    let mut items: BTreeMap<&str, PathItemBuilder> = BTreeMap::new();
    for route in table.operations() {
        let item = items
            .remove(route.path)
            .unwrap_or_else(PathItemBuilder::new);
        items.insert(
            route.path,
            item.operation(route.method.openapi(), operation(route)),
        );
    }
    doc.paths = items
        .into_iter()
        .fold(PathsBuilder::new(), |paths, (path, item)| {
            paths.path(path, item.build())
        })
        .build();

    let schemas = table.schemas();
    doc.components = (!schemas.is_empty()).then(|| {
        schemas
            .into_iter()
            .fold(ComponentsBuilder::new(), |components, (name, schema)| {
                components.schema(name, schema)
            })
            .build()
    });

    doc
}

fn operation(route: &RouteDescriptor) -> Operation {
    let builder = OperationBuilder::new()
        .operation_id(Some(route.operation_id))
        .summary((!route.summary.is_empty()).then_some(route.summary))
        .tag(route.tag);

    let builder = route
        .params
        .iter()
        .fold(builder, |builder, param| builder.parameter(parameter(param)));

    route
        .responses
        .iter()
        .fold(builder, |builder, spec| {
            builder.response(spec.status.to_string(), response(spec))
        })
        .build()
}

fn parameter(param: &ParamSpec) -> utoipa::openapi::path::Parameter {
    let location = match param.location {
        ParamLocation::Path => ParameterIn::Path,
        ParamLocation::Query => ParameterIn::Query,
    };
    let required = if param.required {
        Required::True
    } else {
        Required::False
    };

    ParameterBuilder::new()
        .name(param.name)
        .parameter_in(location)
        .required(required)
        .description(Some(param.description))
        .schema(Some(param.schema.clone()))
        .build()
}

fn response(spec: &ResponseSpec) -> Response {
    let builder = ResponseBuilder::new().description(spec.description);
    match &spec.body {
        Some(name) => builder
            .content(
                "application/json",
                ContentBuilder::new()
                    .schema(Some(Ref::from_schema_name(name.clone())))
                    .build(),
            )
            .build(),
        None => builder.build(),
    }
}
