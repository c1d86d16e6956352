//! Rendering of a [`ClientSpec`] as Rust source.
//!
//! The output only depends on the spec, so equal documents render byte-identical files.

use super::{
    ir::{ClientSpec, OperationSpec, ParamDef, PathSegment, RustType, TypeDef},
    naming::unraw,
};

const INDENT: &str = "    ";

const CLIENT_ERROR: &str = r#"#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The base URL cannot be extended with a path.
    #[error("invalid base URL `{0}`")]
    BaseUrl(String),
    /// Sending the request or decoding the response failed.
    #[error("request failed")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// Status returned by the server.
        status: reqwest::StatusCode,
        /// Raw response body.
        body: String,
    },
}"#;

const ENDPOINT_HELPER: &str = r#"fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, ClientError> {
    let invalid = || ClientError::BaseUrl(self.base_url.clone());
    let mut url = reqwest::Url::parse(&self.base_url).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}"#;

const CHECK_HELPER: &str = r#"async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}"#;

const DECODE_HELPER: &str = r#"async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let response = Self::check(response).await?;
    Ok(response.json::<T>().await?)
}"#;

/// Line-oriented writer keeping track of indentation.
struct SourceWriter {
    out: String,
    depth: usize,
}

impl SourceWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write a multi-line block at the current depth.
    fn block(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    fn open(&mut self, text: &str) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self, text: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    fn doc(&mut self, text: &str) {
        for line in text.lines().map(str::trim_end) {
            if line.is_empty() {
                self.line("///");
            } else {
                self.line(&format!("/// {line}"));
            }
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Collapse whitespace so untrusted text fits on a single comment line.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render the whole client file.
pub fn render(spec: &ClientSpec) -> String {
    let mut w = SourceWriter::new();
    let api = format!("{} {}", single_line(&spec.title), single_line(&spec.version));

    w.line(&format!(
        "// Generated by client-generator from {api}. Do not edit by hand."
    ));
    w.blank();
    w.open(&format!("pub mod {} {{", spec.module_name));

    w.doc(&format!("Errors returned by [`{}`].", spec.client_name));
    w.block(CLIENT_ERROR);

    for ty in &spec.types {
        w.blank();
        render_type(&mut w, ty);
    }

    w.blank();
    w.doc(&format!("Typed client for {api}."));
    w.line("#[derive(Debug, Clone)]");
    w.open(&format!("pub struct {} {{", spec.client_name));
    w.line("base_url: String,");
    w.line("http: reqwest::Client,");
    w.close("}");
    w.blank();

    w.open(&format!("impl {} {{", spec.client_name));
    w.doc("Create a client sending requests to `base_url` through `http`.");
    w.open("pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {");
    w.open("Self {");
    w.line("base_url: base_url.into(),");
    w.line("http,");
    w.close("}");
    w.close("}");
    w.blank();
    w.doc("Base URL every request is resolved against.");
    w.open("pub fn base_url(&self) -> &str {");
    w.line("&self.base_url");
    w.close("}");

    for op in &spec.operations {
        w.blank();
        render_operation(&mut w, op);
    }

    if !spec.operations.is_empty() {
        w.blank();
        w.block(ENDPOINT_HELPER);
        w.blank();
        w.block(CHECK_HELPER);
    }
    if spec.operations.iter().any(|op| op.response.is_some()) {
        w.blank();
        w.block(DECODE_HELPER);
    }

    w.close("}");
    w.close("}");
    w.finish()
}

fn render_type(w: &mut SourceWriter, ty: &TypeDef) {
    match ty {
        TypeDef::Struct { name, doc, fields } => {
            if let Some(doc) = doc {
                w.doc(doc);
            }
            w.line("#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]");
            w.open(&format!("pub struct {name} {{"));
            for field in fields {
                if let Some(doc) = &field.doc {
                    w.doc(doc);
                }
                if unraw(&field.name) != field.wire_name {
                    w.line(&format!("#[serde(rename = {:?})]", field.wire_name));
                }
                let ty = if field.boxed {
                    format!("Box<{}>", field.ty.owned())
                } else {
                    field.ty.owned()
                };
                if field.optional {
                    w.line(r#"#[serde(default, skip_serializing_if = "Option::is_none")]"#);
                    w.line(&format!("pub {}: Option<{ty}>,", field.name));
                } else {
                    w.line(&format!("pub {}: {ty},", field.name));
                }
            }
            w.close("}");
        }
        TypeDef::Enum {
            name,
            doc,
            variants,
        } => {
            if let Some(doc) = doc {
                w.doc(doc);
            }
            w.line(
                "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]",
            );
            w.open(&format!("pub enum {name} {{"));
            for variant in variants {
                w.line(&format!("#[serde(rename = {:?})]", variant.wire_name));
                w.line(&format!("{},", variant.name));
            }
            w.close("}");
        }
        TypeDef::Alias { name, doc, target } => {
            if let Some(doc) = doc {
                w.doc(doc);
            }
            w.line(&format!("pub type {name} = {};", target.owned()));
        }
    }
}

fn argument(param: &ParamDef) -> String {
    if param.required {
        format!("{}: {}", param.name, param.ty.borrowed())
    } else {
        format!("{}: Option<{}>", param.name, param.ty.borrowed())
    }
}

fn segment_expr(segment: &PathSegment, op: &OperationSpec) -> String {
    match segment {
        PathSegment::Literal(text) => format!("{text:?}"),
        PathSegment::Template { format, params } => match params.as_slice() {
            [param] if format == "{}" => {
                let is_str = op
                    .path_params
                    .iter()
                    .any(|p| &p.name == param && p.ty == RustType::String);
                if is_str {
                    param.clone()
                } else {
                    format!("&{param}.to_string()")
                }
            }
            _ => format!("&format!({format:?}, {})", params.join(", ")),
        },
    }
}

fn render_operation(w: &mut SourceWriter, op: &OperationSpec) {
    if let Some(doc) = &op.doc {
        w.doc(doc);
        w.line("///");
    }
    w.doc(&format!("`{} {}`", op.http_method, op.path));

    let mut args = vec!["&self".to_owned()];
    args.extend(
        op.path_params
            .iter()
            .chain(&op.query_params)
            .chain(&op.header_params)
            .map(argument),
    );
    if let Some(body) = &op.body {
        if body.required {
            args.push(format!("body: {}", body.ty.borrowed()));
        } else {
            args.push(format!("body: Option<{}>", body.ty.borrowed()));
        }
    }
    let output = op.response.as_ref().map_or("()".to_owned(), RustType::owned);

    w.open(&format!(
        "pub async fn {}({}) -> Result<{output}, ClientError> {{",
        op.method_name,
        args.join(", ")
    ));

    let segments: Vec<String> = op.segments.iter().map(|s| segment_expr(s, op)).collect();
    w.line(&format!(
        "let url = self.endpoint(&[{}])?;",
        segments.join(", ")
    ));

    let mutated = !op.query_params.is_empty() || !op.header_params.is_empty() || op.body.is_some();
    let binding = if mutated { "let mut request" } else { "let request" };
    w.line(&format!(
        "{binding} = self.http.request(reqwest::Method::{}, url);",
        op.http_method
    ));

    for param in &op.query_params {
        let apply = format!("request = request.query(&[({:?}, {})]);", param.wire_name, param.name);
        optional_apply(w, param, &apply);
    }
    for param in &op.header_params {
        let apply = format!(
            "request = request.header({:?}, {}.to_string());",
            param.wire_name, param.name
        );
        optional_apply(w, param, &apply);
    }
    if let Some(body) = &op.body {
        if body.required {
            w.line("request = request.json(&body);");
        } else {
            w.open("if let Some(body) = body {");
            w.line("request = request.json(&body);");
            w.close("}");
        }
    }

    w.line("let response = request.send().await?;");
    if op.response.is_some() {
        w.line("Self::decode(response).await");
    } else {
        w.line("Self::check(response).await?;");
        w.line("Ok(())");
    }
    w.close("}");
}

fn optional_apply(w: &mut SourceWriter, param: &ParamDef, apply: &str) {
    if param.required {
        w.line(apply);
    } else {
        w.open(&format!("if let Some({0}) = {0} {{", param.name));
        w.line(apply);
        w.close("}");
    }
}
