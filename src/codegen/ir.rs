//! Intermediate representation of the client to emit.
//!
//! [`ClientSpec::from_document`] resolves every OpenAPI concern (references, nullability,
//! naming, parameter placement) so the emitter only has to print.

use std::collections::{BTreeMap, BTreeSet};

use super::{
    error::{GeneratorError, GeneratorResult},
    model::{Document, Operation, Parameter, Schema},
    naming::{pascal_case, snake_case, unraw},
};

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";
const JSON_MEDIA_TYPE: &str = "application/json";
/// Names the generated module already uses for its own items.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "ClientError",
    "Result",
    "Option",
    "String",
    "Vec",
    "Box",
];
/// Methods every generated client defines besides its operations.
const RESERVED_METHOD_NAMES: &[&str] = &["new", "base_url", "endpoint", "check", "decode"];
/// Locals and arguments of generated method bodies.
const RESERVED_ARGUMENT_NAMES: &[&str] = &["url", "request", "response", "body"];

/// Rust type of a value crossing the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RustType {
    I32,
    I64,
    F32,
    F64,
    Bool,
    String,
    /// Free-form JSON.
    Json,
    Vec(Box<RustType>),
    /// Generated component type.
    Named(String),
}

impl RustType {
    /// Owned spelling, used for fields and return types.
    pub fn owned(&self) -> String {
        match self {
            RustType::I32 => "i32".into(),
            RustType::I64 => "i64".into(),
            RustType::F32 => "f32".into(),
            RustType::F64 => "f64".into(),
            RustType::Bool => "bool".into(),
            RustType::String => "String".into(),
            RustType::Json => "serde_json::Value".into(),
            RustType::Vec(inner) => format!("Vec<{}>", inner.owned()),
            RustType::Named(name) => name.clone(),
        }
    }

    /// Argument spelling: scalars by value, everything else borrowed.
    pub fn borrowed(&self) -> String {
        match self {
            RustType::String => "&str".into(),
            RustType::Vec(inner) => format!("&[{}]", inner.owned()),
            RustType::Json | RustType::Named(_) => format!("&{}", self.owned()),
            _ => self.owned(),
        }
    }

    /// Number, string or boolean.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            RustType::I32
                | RustType::I64
                | RustType::F32
                | RustType::F64
                | RustType::Bool
                | RustType::String
        )
    }
}

/// Whole client: types first, then operations.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSpec {
    pub title: String,
    pub version: String,
    pub module_name: String,
    pub client_name: String,
    /// Sorted by name.
    pub types: Vec<TypeDef>,
    /// Sorted by method name.
    pub operations: Vec<OperationSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    Struct {
        name: String,
        doc: Option<String>,
        fields: Vec<FieldDef>,
    },
    Enum {
        name: String,
        doc: Option<String>,
        variants: Vec<VariantDef>,
    },
    Alias {
        name: String,
        doc: Option<String>,
        target: RustType,
    },
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Struct { name, .. }
            | TypeDef::Enum { name, .. }
            | TypeDef::Alias { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub wire_name: String,
    pub ty: RustType,
    pub optional: bool,
    /// Stored behind a `Box` because the field's type contains the struct again.
    pub boxed: bool,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantDef {
    pub name: String,
    pub wire_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDef {
    pub name: String,
    pub wire_name: String,
    pub ty: RustType,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    Literal(String),
    /// Segment containing placeholders, e.g. `{id}` or `{name}.json`.
    Template {
        format: String,
        params: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyDef {
    pub ty: RustType,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperationSpec {
    pub method_name: String,
    pub operation_id: String,
    /// Upper-case HTTP method.
    pub http_method: &'static str,
    pub path: String,
    pub doc: Option<String>,
    pub segments: Vec<PathSegment>,
    pub path_params: Vec<ParamDef>,
    pub query_params: Vec<ParamDef>,
    pub header_params: Vec<ParamDef>,
    pub body: Option<BodyDef>,
    /// `None` when the success response has no JSON body.
    pub response: Option<RustType>,
}

impl ClientSpec {
    /// Resolve `doc` into a client named `client_name` inside module `module_name`.
    pub fn from_document(
        doc: &Document,
        module_name: &str,
        client_name: &str,
    ) -> GeneratorResult<Self> {
        if !doc.openapi.starts_with("3.") {
            return Err(GeneratorError::UnsupportedVersion(doc.openapi.clone()));
        }

        let resolver = TypeResolver::new(doc, client_name)?;

        let mut types = doc
            .components
            .schemas
            .iter()
            .map(|(raw_name, schema)| resolver.type_def(raw_name, schema))
            .collect::<GeneratorResult<Vec<_>>>()?;
        types.sort_by(|a, b| a.name().cmp(b.name()));
        box_recursive_fields(&mut types)?;

        let mut operations = Vec::new();
        for (path, item) in &doc.paths {
            for (method, operation) in item.operations() {
                operations.push(resolver.operation(path, method, operation, &item.parameters)?);
            }
        }
        operations.sort_by(|a, b| a.method_name.cmp(&b.method_name));
        ensure_unique(
            "client method",
            operations.iter().map(|op| op.method_name.as_str()),
        )?;

        Ok(Self {
            title: doc.info.title.clone(),
            version: doc.info.version.clone(),
            module_name: module_name.to_owned(),
            client_name: client_name.to_owned(),
            types,
            operations,
        })
    }
}

/// Box every struct field whose type leads back to the struct without passing through a `Vec`.
///
/// Aliases that only lead back to themselves cannot be given a finite size and are rejected.
fn box_recursive_fields(types: &mut [TypeDef]) -> GeneratorResult<()> {
    let edges: BTreeMap<String, Vec<String>> = types
        .iter()
        .map(|ty| (ty.name().to_owned(), direct_references(ty)))
        .collect();
    let aliases: BTreeMap<&str, &str> = types
        .iter()
        .filter_map(|ty| match ty {
            TypeDef::Alias {
                name,
                target: RustType::Named(target),
                ..
            } => Some((name.as_str(), target.as_str())),
            _ => None,
        })
        .collect();

    for &start in aliases.keys() {
        let mut current = start;
        for _ in 0..aliases.len() {
            match aliases.get(current) {
                Some(&next) if next == start => {
                    return Err(GeneratorError::UnsupportedSchema {
                        location: format!("type `{start}`"),
                        reason: "alias refers back to itself".into(),
                    });
                }
                Some(&next) => current = next,
                None => break,
            }
        }
    }

    for ty in types.iter_mut() {
        if let TypeDef::Struct { name, fields, .. } = ty {
            for field in fields.iter_mut() {
                if let RustType::Named(target) = &field.ty {
                    field.boxed = reaches(&edges, target, name);
                }
            }
        }
    }
    Ok(())
}

/// Component types stored inline, without indirection, by `ty`.
fn direct_references(ty: &TypeDef) -> Vec<String> {
    match ty {
        TypeDef::Struct { fields, .. } => fields
            .iter()
            .filter_map(|field| match &field.ty {
                RustType::Named(name) => Some(name.clone()),
                _ => None,
            })
            .collect(),
        TypeDef::Alias {
            target: RustType::Named(name),
            ..
        } => vec![name.clone()],
        _ => Vec::new(),
    }
}

fn reaches<'a>(edges: &'a BTreeMap<String, Vec<String>>, from: &'a str, to: &str) -> bool {
    let mut stack = vec![from];
    let mut seen = BTreeSet::new();
    while let Some(current) = stack.pop() {
        if current == to {
            return true;
        }
        if !seen.insert(current) {
            continue;
        }
        if let Some(next) = edges.get(current) {
            stack.extend(next.iter().map(String::as_str));
        }
    }
    false
}

fn ensure_unique<'a>(
    what: &'static str,
    names: impl Iterator<Item = &'a str>,
) -> GeneratorResult<()> {
    let mut seen = BTreeSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(GeneratorError::DuplicateName {
                what,
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}

/// Maps component names to Rust type names and schemas to [`RustType`]s.
struct TypeResolver {
    names: BTreeMap<String, String>,
}

impl TypeResolver {
    fn new(doc: &Document, client_name: &str) -> GeneratorResult<Self> {
        let mut names = BTreeMap::new();
        for raw_name in doc.components.schemas.keys() {
            let mut name = pascal_case(raw_name);
            if name.is_empty() {
                return Err(GeneratorError::UnsupportedSchema {
                    location: format!("{SCHEMA_REF_PREFIX}{raw_name}"),
                    reason: "component name has no identifier characters".into(),
                });
            }
            if RESERVED_TYPE_NAMES.contains(&name.as_str()) || name == client_name {
                name.push_str("Model");
            }
            names.insert(raw_name.clone(), name);
        }
        ensure_unique("component type", names.values().map(String::as_str))?;
        Ok(Self { names })
    }

    fn type_def(&self, raw_name: &str, schema: &Schema) -> GeneratorResult<TypeDef> {
        let location = format!("{SCHEMA_REF_PREFIX}{raw_name}");
        let name = self.names[raw_name].clone();
        let doc = schema.description.clone();

        if let Some(values) = &schema.enum_values {
            let variants = enum_variants(values, &location)?;
            return Ok(TypeDef::Enum {
                name,
                doc,
                variants,
            });
        }

        let is_object = schema.reference.is_none()
            && !schema.properties.is_empty()
            && schema
                .schema_type
                .as_ref()
                .is_none_or(|ty| ty.split_null().0 == ["object"]);
        if !is_object {
            let (target, _) = self.resolve(schema, &location)?;
            return Ok(TypeDef::Alias { name, doc, target });
        }

        let required: BTreeSet<&str> = schema.required.iter().map(String::as_str).collect();
        let mut fields = Vec::with_capacity(schema.properties.len());
        for (wire_name, property) in &schema.properties {
            let field_location = format!("{location}/properties/{wire_name}");
            let (ty, nullable) = self.resolve(property, &field_location)?;
            let field_name = snake_case(wire_name);
            if field_name.is_empty() {
                return Err(GeneratorError::UnsupportedSchema {
                    location: field_location,
                    reason: "property name has no identifier characters".into(),
                });
            }
            fields.push(FieldDef {
                name: field_name,
                wire_name: wire_name.clone(),
                ty,
                optional: nullable || !required.contains(wire_name.as_str()),
                boxed: false,
                doc: property.description.clone(),
            });
        }
        ensure_unique("field", fields.iter().map(|field| field.name.as_str()))?;

        Ok(TypeDef::Struct { name, doc, fields })
    }

    /// Rust type of `schema` and whether it admits `null`.
    fn resolve(&self, schema: &Schema, location: &str) -> GeneratorResult<(RustType, bool)> {
        if let Some(reference) = &schema.reference {
            let name = reference
                .strip_prefix(SCHEMA_REF_PREFIX)
                .and_then(|raw| self.names.get(raw))
                .ok_or_else(|| GeneratorError::UnknownReference(reference.clone()))?;
            return Ok((RustType::Named(name.clone()), schema.nullable));
        }

        for variants in [&schema.one_of, &schema.any_of] {
            if variants.is_empty() {
                continue;
            }
            let non_null: Vec<&Schema> = variants.iter().filter(|s| !s.is_null()).collect();
            let nullable = non_null.len() < variants.len();
            return match non_null.as_slice() {
                [single] => {
                    let (ty, inner_nullable) = self.resolve(single, location)?;
                    Ok((ty, nullable || inner_nullable))
                }
                _ => Ok((RustType::Json, nullable)),
            };
        }

        if let [single] = schema.all_of.as_slice() {
            return self.resolve(single, location);
        }
        if !schema.all_of.is_empty() {
            return Ok((RustType::Json, schema.nullable));
        }

        let Some(schema_type) = &schema.schema_type else {
            return Ok((RustType::Json, schema.nullable));
        };
        let (names, listed_null) = schema_type.split_null();
        let nullable = listed_null || schema.nullable;
        let ty = match names.as_slice() {
            ["integer"] => match schema.format.as_deref() {
                Some("int32") => RustType::I32,
                _ => RustType::I64,
            },
            ["number"] => match schema.format.as_deref() {
                Some("float") => RustType::F32,
                _ => RustType::F64,
            },
            ["string"] => RustType::String,
            ["boolean"] => RustType::Bool,
            ["array"] => match &schema.items {
                Some(items) => {
                    let (inner, _) = self.resolve(items, &format!("{location}/items"))?;
                    RustType::Vec(Box::new(inner))
                }
                None => RustType::Vec(Box::new(RustType::Json)),
            },
            ["object"] | [] => RustType::Json,
            [other] => {
                return Err(GeneratorError::UnsupportedSchema {
                    location: location.to_owned(),
                    reason: format!("unknown type `{other}`"),
                });
            }
            _ => RustType::Json,
        };
        Ok((ty, nullable))
    }

    fn param(&self, param: &Parameter, operation_id: &str) -> GeneratorResult<ParamDef> {
        let location = format!("operation `{operation_id}` parameter `{}`", param.name);
        let (ty, _) = match &param.schema {
            Some(schema) => self.resolve(schema, &location)?,
            None => (RustType::String, false),
        };
        let mut name = snake_case(&param.name);
        if name.is_empty() {
            return Err(GeneratorError::UnsupportedSchema {
                location,
                reason: "parameter name has no identifier characters".into(),
            });
        }
        if RESERVED_ARGUMENT_NAMES.contains(&name.as_str()) {
            name.push_str("_param");
        }
        Ok(ParamDef {
            name,
            wire_name: param.name.clone(),
            ty,
            required: param.required || param.location == "path",
        })
    }

    fn operation(
        &self,
        path: &str,
        method: &'static str,
        operation: &Operation,
        shared_params: &[Parameter],
    ) -> GeneratorResult<OperationSpec> {
        let operation_id = operation
            .operation_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| GeneratorError::MissingOperationId {
                method,
                path: path.to_owned(),
            })?;
        let mut method_name = snake_case(&operation_id);
        if method_name.is_empty() {
            return Err(GeneratorError::MissingOperationId {
                method,
                path: path.to_owned(),
            });
        }
        if RESERVED_METHOD_NAMES.contains(&method_name.as_str()) {
            method_name.push_str("_operation");
        }

        // Operation-level parameters override path-level ones with the same name and location.
        let mut merged: Vec<&Parameter> = shared_params
            .iter()
            .filter(|shared| {
                !operation
                    .parameters
                    .iter()
                    .any(|own| own.name == shared.name && own.location == shared.location)
            })
            .collect();
        merged.extend(operation.parameters.iter());

        let mut path_params = Vec::new();
        let mut query_params = Vec::new();
        let mut header_params = Vec::new();
        for param in merged {
            let def = self.param(param, &operation_id)?;
            match param.location.as_str() {
                "path" => path_params.push(def),
                "query" => query_params.push(def),
                "header" => header_params.push(def),
                other => {
                    tracing::warn!(
                        operation_id = %operation_id,
                        parameter = %param.name,
                        location = other,
                        "skipping parameter with unsupported location"
                    );
                }
            }
        }

        let non_scalar = path_params
            .iter()
            .chain(&header_params)
            .find(|p| !p.ty.is_scalar())
            .or_else(|| {
                query_params
                    .iter()
                    .find(|p| !p.ty.is_scalar() && !matches!(p.ty, RustType::Named(_)))
            });
        if let Some(param) = non_scalar {
            return Err(GeneratorError::UnsupportedSchema {
                location: format!("operation `{operation_id}` parameter `{}`", param.wire_name),
                reason: format!("`{}` cannot be sent in a URL or header", param.ty.owned()),
            });
        }

        let segments = path_segments(path, &path_params, &operation_id)?;
        path_params.sort_by_key(|p| path.find(&format!("{{{}}}", p.wire_name)));

        let body = match &operation.request_body {
            Some(body) => match body.content.get(JSON_MEDIA_TYPE).and_then(|m| m.schema.as_ref()) {
                Some(schema) => {
                    let location = format!("operation `{operation_id}` request body");
                    let (ty, _) = self.resolve(schema, &location)?;
                    Some(BodyDef {
                        ty,
                        required: body.required,
                    })
                }
                None => None,
            },
            None => None,
        };

        let response = operation
            .responses
            .iter()
            .find(|(status, _)| status.starts_with('2'))
            .and_then(|(_, response)| response.content.get(JSON_MEDIA_TYPE))
            .and_then(|media| media.schema.as_ref())
            .map(|schema| {
                let location = format!("operation `{operation_id}` response");
                self.resolve(schema, &location).map(|(ty, _)| ty)
            })
            .transpose()?;

        let mut arg_names: Vec<&str> = path_params
            .iter()
            .chain(&query_params)
            .chain(&header_params)
            .map(|p| unraw(&p.name))
            .collect();
        if body.is_some() {
            arg_names.push("body");
        }
        ensure_unique("parameter", arg_names.into_iter())?;

        let doc = operation
            .summary
            .clone()
            .or_else(|| operation.description.clone())
            .filter(|doc| !doc.trim().is_empty());

        Ok(OperationSpec {
            method_name,
            operation_id,
            http_method: method,
            path: path.to_owned(),
            doc,
            segments,
            path_params,
            query_params,
            header_params,
            body,
            response,
        })
    }
}

fn enum_variants(
    values: &[serde_json::Value],
    location: &str,
) -> GeneratorResult<Vec<VariantDef>> {
    let variants = values
        .iter()
        .map(|value| {
            let wire_name = value
                .as_str()
                .ok_or_else(|| GeneratorError::UnsupportedSchema {
                    location: location.to_owned(),
                    reason: format!("non-string enum value `{value}`"),
                })?;
            let mut name = pascal_case(wire_name);
            if name.is_empty() {
                name = "Empty".into();
            } else if name.starts_with('_') {
                name = format!("V{name}");
            }
            Ok(VariantDef {
                name,
                wire_name: wire_name.to_owned(),
            })
        })
        .collect::<GeneratorResult<Vec<_>>>()?;
    ensure_unique("enum variant", variants.iter().map(|v| v.name.as_str()))?;
    Ok(variants)
}

/// Split `path` into URL segments and check it against the declared path parameters.
fn path_segments(
    path: &str,
    params: &[ParamDef],
    operation_id: &str,
) -> GeneratorResult<Vec<PathSegment>> {
    let mut used = BTreeSet::new();
    let mut segments = Vec::new();

    for raw in path.split('/').filter(|segment| !segment.is_empty()) {
        if !raw.contains('{') {
            segments.push(PathSegment::Literal(raw.to_owned()));
            continue;
        }

        let mut format = String::new();
        let mut names = Vec::new();
        let mut rest = raw;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                return Err(GeneratorError::PathParameter {
                    operation_id: operation_id.to_owned(),
                    name: rest[start..].to_owned(),
                    problem: "is not closed in the path template",
                });
            };
            let wire_name = &rest[start + 1..start + len];
            let param = params.iter().find(|p| p.wire_name == wire_name).ok_or_else(|| {
                GeneratorError::PathParameter {
                    operation_id: operation_id.to_owned(),
                    name: wire_name.to_owned(),
                    problem: "appears in the path template but is not declared",
                }
            })?;
            format.push_str(&rest[..start]);
            format.push_str("{}");
            names.push(param.name.clone());
            used.insert(wire_name.to_owned());
            rest = &rest[start + len + 1..];
        }
        format.push_str(rest);
        segments.push(PathSegment::Template {
            format,
            params: names,
        });
    }

    if let Some(unused) = params.iter().find(|p| !used.contains(&p.wire_name)) {
        return Err(GeneratorError::PathParameter {
            operation_id: operation_id.to_owned(),
            name: unused.wire_name.clone(),
            problem: "is declared but missing from the path template",
        });
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::error::ErrorKind;

    fn spec(json: &str) -> GeneratorResult<ClientSpec> {
        let doc = Document::from_json(json).unwrap();
        ClientSpec::from_document(&doc, "api", "Client")
    }

    const USER_DOC: &str = r##"{
        "openapi": "3.1.0",
        "info": {"title": "User API", "version": "v1"},
        "paths": {
            "/api/user/{id}": {
                "get": {
                    "operationId": "get_user",
                    "summary": "Fetch a user",
                    "parameters": [
                        {"name": "id", "in": "path", "required": true,
                         "schema": {"type": "integer", "format": "int64"}}
                    ],
                    "responses": {
                        "200": {"description": "ok", "content": {"application/json":
                            {"schema": {"$ref": "#/components/schemas/User"}}}},
                        "400": {"description": "bad", "content": {"application/json":
                            {"schema": {"$ref": "#/components/schemas/ErrorBody"}}}}
                    }
                }
            }
        },
        "components": {"schemas": {
            "User": {"type": "object", "required": ["id", "name"], "properties": {
                "id": {"type": "integer", "format": "int64"},
                "name": {"type": "string"}
            }},
            "ErrorBody": {"type": "object", "required": ["message"], "properties": {
                "message": {"type": "string"}
            }}
        }}
    }"##;

    #[test]
    fn user_document_resolves() {
        let spec = spec(USER_DOC).unwrap();
        assert_eq!(spec.title, "User API");
        assert_eq!(spec.operations.len(), 1);

        let op = &spec.operations[0];
        assert_eq!(op.method_name, "get_user");
        assert_eq!(op.http_method, "GET");
        assert_eq!(op.path_params[0].ty, RustType::I64);
        assert_eq!(op.response, Some(RustType::Named("User".into())));
        assert_eq!(
            op.segments,
            vec![
                PathSegment::Literal("api".into()),
                PathSegment::Literal("user".into()),
                PathSegment::Template {
                    format: "{}".into(),
                    params: vec!["id".into()]
                },
            ]
        );

        let names: Vec<_> = spec.types.iter().map(TypeDef::name).collect();
        assert_eq!(names, ["ErrorBody", "User"]);
    }

    #[test]
    fn optional_and_nullable_fields() {
        let spec = spec(
            r#"{"openapi":"3.1.0","info":{"title":"T","version":"1"},"paths":{},
                "components":{"schemas":{"Pet":{"type":"object","required":["name"],"properties":{
                    "name":{"type":"string"},
                    "nickname":{"type":["string","null"]},
                    "weight":{"type":"number"},
                    "tags":{"type":"array","items":{"type":"string"}}
                }}}}}"#,
        )
        .unwrap();
        let TypeDef::Struct { fields, .. } = &spec.types[0] else {
            panic!("expected struct");
        };
        let by_name: BTreeMap<_, _> = fields.iter().map(|f| (f.name.as_str(), f)).collect();
        assert!(!by_name["name"].optional);
        assert!(by_name["nickname"].optional);
        assert!(by_name["weight"].optional);
        assert_eq!(by_name["weight"].ty, RustType::F64);
        assert_eq!(by_name["tags"].ty, RustType::Vec(Box::new(RustType::String)));
    }

    #[test]
    fn string_enums_become_enums() {
        let spec = spec(
            r#"{"openapi":"3.1.0","info":{"title":"T","version":"1"},"paths":{},
                "components":{"schemas":{"status":{"type":"string","enum":["in_progress","done"]}}}}"#,
        )
        .unwrap();
        let TypeDef::Enum { name, variants, .. } = &spec.types[0] else {
            panic!("expected enum");
        };
        assert_eq!(name, "Status");
        assert_eq!(variants[0].name, "InProgress");
        assert_eq!(variants[0].wire_name, "in_progress");
    }

    #[test]
    fn reserved_type_names_are_suffixed() {
        let spec = spec(
            r#"{"openapi":"3.1.0","info":{"title":"T","version":"1"},"paths":{},
                "components":{"schemas":{"Result":{"type":"string"}}}}"#,
        )
        .unwrap();
        assert_eq!(spec.types[0].name(), "ResultModel");
    }

    #[test]
    fn missing_operation_id_is_a_parse_error() {
        let err = spec(
            r#"{"openapi":"3.1.0","info":{"title":"T","version":"1"},
                "paths":{"/a":{"get":{"responses":{}}}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GeneratorError::MissingOperationId { .. }));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn unknown_reference_is_rejected() {
        let err = spec(
            r##"{"openapi":"3.1.0","info":{"title":"T","version":"1"},
                "paths":{"/a":{"get":{"operationId":"a","responses":{"200":{"description":"x",
                "content":{"application/json":{"schema":{"$ref":"#/components/schemas/Nope"}}}}}}}}}"##,
        )
        .unwrap_err();
        assert!(matches!(err, GeneratorError::UnknownReference(r) if r.ends_with("Nope")));
    }

    #[test]
    fn undeclared_path_parameter_is_rejected() {
        let err = spec(
            r#"{"openapi":"3.1.0","info":{"title":"T","version":"1"},
                "paths":{"/a/{id}":{"get":{"operationId":"a","responses":{}}}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GeneratorError::PathParameter { name, .. } if name == "id"));
    }

    #[test]
    fn swagger_2_is_rejected() {
        let err = spec(r#"{"openapi":"2.0","info":{"title":"T","version":"1"},"paths":{}}"#)
            .unwrap_err();
        assert!(matches!(err, GeneratorError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn duplicate_method_names_are_rejected() {
        let err = spec(
            r#"{"openapi":"3.1.0","info":{"title":"T","version":"1"},"paths":{
                "/a":{"get":{"operationId":"getThing","responses":{}}},
                "/b":{"get":{"operationId":"get_thing","responses":{}}}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GeneratorError::DuplicateName { name, .. } if name == "get_thing"));
    }

    #[test]
    fn query_and_body_parameters() {
        let spec = spec(
            r#"{"openapi":"3.1.0","info":{"title":"T","version":"1"},"paths":{
                "/items":{"post":{"operationId":"createItem",
                    "parameters":[{"name":"dryRun","in":"query","schema":{"type":"boolean"}}],
                    "requestBody":{"required":true,"content":{"application/json":{"schema":{"type":"object"}}}},
                    "responses":{"204":{"description":"created"}}}}}}"#,
        )
        .unwrap();
        let op = &spec.operations[0];
        assert_eq!(op.method_name, "create_item");
        assert_eq!(op.query_params[0].name, "dry_run");
        assert!(!op.query_params[0].required);
        assert_eq!(
            op.body,
            Some(BodyDef {
                ty: RustType::Json,
                required: true
            })
        );
        assert_eq!(op.response, None);
    }

    #[test]
    fn operation_ids_clashing_with_client_methods_are_suffixed() {
        let spec = spec(
            r#"{"openapi":"3.1.0","info":{"title":"T","version":"1"},"paths":{
                "/check":{"get":{"operationId":"check","responses":{}}},
                "/new":{"post":{"operationId":"New","responses":{}}}}}"#,
        )
        .unwrap();
        let names: Vec<_> = spec.operations.iter().map(|op| op.method_name.as_str()).collect();
        assert_eq!(names, ["check_operation", "new_operation"]);
        assert_eq!(spec.operations[0].operation_id, "check");
    }

    #[test]
    fn parameters_clashing_with_method_locals_are_renamed() {
        let spec = spec(
            r#"{"openapi":"3.1.0","info":{"title":"T","version":"1"},"paths":{
                "/s/{request}":{"post":{"operationId":"shorten","parameters":[
                    {"name":"request","in":"path","required":true,"schema":{"type":"string"}},
                    {"name":"url","in":"query","required":true,"schema":{"type":"string"}},
                    {"name":"Response","in":"header","schema":{"type":"string"}}],
                    "responses":{}}}}}"#,
        )
        .unwrap();
        let op = &spec.operations[0];
        assert_eq!(op.path_params[0].name, "request_param");
        assert_eq!(op.query_params[0].name, "url_param");
        assert_eq!(op.query_params[0].wire_name, "url");
        assert_eq!(op.header_params[0].name, "response_param");
        assert_eq!(
            op.segments[1],
            PathSegment::Template {
                format: "{}".into(),
                params: vec!["request_param".into()]
            }
        );
    }

    #[test]
    fn self_referencing_fields_are_boxed() {
        let spec = spec(
            r##"{"openapi":"3.1.0","info":{"title":"T","version":"1"},"paths":{},
                "components":{"schemas":{"Node":{"type":"object","required":["value"],"properties":{
                    "value":{"type":"integer"},
                    "child":{"$ref":"#/components/schemas/Node"},
                    "children":{"type":"array","items":{"$ref":"#/components/schemas/Node"}}
                }}}}}"##,
        )
        .unwrap();
        let TypeDef::Struct { fields, .. } = &spec.types[0] else {
            panic!("expected struct");
        };
        let boxed: BTreeMap<_, _> = fields.iter().map(|f| (f.name.as_str(), f.boxed)).collect();
        assert!(boxed["child"]);
        assert!(!boxed["children"]);
        assert!(!boxed["value"]);
    }

    #[test]
    fn mutually_recursive_fields_are_boxed() {
        let spec = spec(
            r##"{"openapi":"3.1.0","info":{"title":"T","version":"1"},"paths":{},
                "components":{"schemas":{
                    "Author":{"type":"object","properties":{"latest":{"$ref":"#/components/schemas/Book"}}},
                    "Book":{"type":"object","properties":{"author":{"$ref":"#/components/schemas/Author"},
                        "title":{"type":"string"}}},
                    "Shelf":{"type":"object","properties":{"book":{"$ref":"#/components/schemas/Book"}}}
                }}}"##,
        )
        .unwrap();
        let boxed_fields: Vec<(&str, &str)> = spec
            .types
            .iter()
            .flat_map(|ty| match ty {
                TypeDef::Struct { name, fields, .. } => fields
                    .iter()
                    .filter(|f| f.boxed)
                    .map(|f| (name.as_str(), f.name.as_str()))
                    .collect::<Vec<_>>(),
                _ => Vec::new(),
            })
            .collect();
        assert_eq!(boxed_fields, [("Author", "latest"), ("Book", "author")]);
    }

    #[test]
    fn alias_cycles_are_rejected() {
        let err = spec(
            r##"{"openapi":"3.1.0","info":{"title":"T","version":"1"},"paths":{},
                "components":{"schemas":{
                    "A":{"$ref":"#/components/schemas/B"},
                    "B":{"$ref":"#/components/schemas/A"}
                }}}"##,
        )
        .unwrap_err();
        assert!(matches!(err, GeneratorError::UnsupportedSchema { .. }));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
