//! Explicit route registry.
//!
//! Every operation is registered once with a [`RouteDescriptor`] and its axum handler. The
//! registry then splits into the HTTP [`Router`] and a [`RouteTable`] of descriptors, which is
//! what the OpenAPI document is serialized from. Both views therefore always list the same
//! operations.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Router,
    handler::Handler,
    routing::{MethodFilter, on},
};
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{RefOr, path::HttpMethod, schema::Schema},
};

use crate::state::SharedState;

/// HTTP verbs an operation can be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl HttpVerb {
    fn filter(self) -> MethodFilter {
        match self {
            HttpVerb::Get => MethodFilter::GET,
            HttpVerb::Post => MethodFilter::POST,
            HttpVerb::Put => MethodFilter::PUT,
            HttpVerb::Patch => MethodFilter::PATCH,
            HttpVerb::Delete => MethodFilter::DELETE,
        }
    }

    /// Matching OpenAPI method.
    pub fn openapi(self) -> HttpMethod {
        match self {
            HttpVerb::Get => HttpMethod::Get,
            HttpVerb::Post => HttpMethod::Post,
            HttpVerb::Put => HttpMethod::Put,
            HttpVerb::Patch => HttpMethod::Patch,
            HttpVerb::Delete => HttpMethod::Delete,
        }
    }
}

/// Where a parameter value is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// Segment of the path template.
    Path,
    /// Query string entry.
    Query,
}

/// Description of a single operation parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Parameter name, as written in the path template or query string.
    pub name: &'static str,
    /// Parameter location.
    pub location: ParamLocation,
    /// Whether callers must supply the parameter. Path parameters always are.
    pub required: bool,
    /// Short description published in the document.
    pub description: &'static str,
    /// Inline schema of the parameter value.
    pub schema: RefOr<Schema>,
}

impl ParamSpec {
    /// Path parameter typed as `T`.
    pub fn path<T: PartialSchema>(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            location: ParamLocation::Path,
            required: true,
            description,
            schema: T::schema(),
        }
    }

    /// Query parameter typed as `T`.
    pub fn query<T: PartialSchema>(
        name: &'static str,
        description: &'static str,
        required: bool,
    ) -> Self {
        Self {
            name,
            location: ParamLocation::Query,
            required,
            description,
            schema: T::schema(),
        }
    }
}

/// Description of one response of an operation.
#[derive(Debug, Clone)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Short description published in the document.
    pub description: &'static str,
    /// Name of the component schema of the JSON body, if any.
    pub body: Option<String>,
    schemas: Vec<(String, RefOr<Schema>)>,
}

impl ResponseSpec {
    /// Response carrying a JSON body of type `T`.
    pub fn json<T: ToSchema>(status: u16, description: &'static str) -> Self {
        let name = T::name().into_owned();
        let mut schemas = vec![(name.clone(), T::schema())];
        T::schemas(&mut schemas);
        Self {
            status,
            description,
            body: Some(name),
            schemas,
        }
    }

    /// Response without a body.
    pub fn empty(status: u16, description: &'static str) -> Self {
        Self {
            status,
            description,
            body: None,
            schemas: Vec::new(),
        }
    }
}

/// Everything the document needs to know about one operation.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    /// Stable operation identifier; generated clients name their methods after it.
    pub operation_id: &'static str,
    /// HTTP verb.
    pub method: HttpVerb,
    /// Path template using `{name}` placeholders.
    pub path: &'static str,
    /// One-line summary.
    pub summary: &'static str,
    /// Tag used to group the operation.
    pub tag: &'static str,
    /// Parameters in declaration order.
    pub params: Vec<ParamSpec>,
    /// Responses in declaration order.
    pub responses: Vec<ResponseSpec>,
}

impl RouteDescriptor {
    /// Start describing an operation.
    pub fn new(method: HttpVerb, path: &'static str, operation_id: &'static str) -> Self {
        Self {
            operation_id,
            method,
            path,
            summary: "",
            tag: "default",
            params: Vec::new(),
            responses: Vec::new(),
        }
    }

    /// Shorthand for a `GET` operation.
    pub fn get(path: &'static str, operation_id: &'static str) -> Self {
        Self::new(HttpVerb::Get, path, operation_id)
    }

    /// Set the summary.
    pub fn summary(mut self, summary: &'static str) -> Self {
        self.summary = summary;
        self
    }

    /// Set the tag.
    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    /// Append a parameter.
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Append a response.
    pub fn response(mut self, response: ResponseSpec) -> Self {
        self.responses.push(response);
        self
    }
}

/// Builder collecting handlers and descriptors side by side.
pub struct ApiRegistry {
    router: Router<SharedState>,
    routes: Vec<RouteDescriptor>,
}

impl ApiRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            routes: Vec::new(),
        }
    }

    /// Register `handler` under the method and path of `descriptor`.
    pub fn route<H, T>(mut self, descriptor: RouteDescriptor, handler: H) -> Self
    where
        H: Handler<T, SharedState>,
        T: 'static,
    {
        self.router = self
            .router
            .route(descriptor.path, on(descriptor.method.filter(), handler));
        self.routes.push(descriptor);
        self
    }

    /// Split into the router serving requests and the table describing it.
    pub fn into_parts(self) -> (Router<SharedState>, RouteTable) {
        let table = RouteTable {
            routes: self.routes.into(),
        };
        (self.router, table)
    }
}

impl Default for ApiRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the registered operations.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Arc<[RouteDescriptor]>,
}

impl RouteTable {
    /// Registered operations in registration order.
    pub fn operations(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Every component schema referenced by a response, keyed by name.
    pub fn schemas(&self) -> BTreeMap<String, RefOr<Schema>> {
        self.routes
            .iter()
            .flat_map(|route| route.responses.iter())
            .flat_map(|response| response.schemas.iter().cloned())
            .collect()
    }
}
