//! Typed client generation from a live OpenAPI document.
//!
//! The pipeline is fetch → parse → resolve → emit → write. Every step either succeeds or
//! returns a [`GeneratorError`]; the output file is only touched once the source is complete.

mod emit;
pub mod error;
pub mod fetch;
mod ir;
mod model;
pub mod naming;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use error::{ErrorKind, GeneratorError, GeneratorResult};

use self::{ir::ClientSpec, model::Document};

/// Document URL used when none is configured.
pub const DEFAULT_SPEC_URL: &str = "http://localhost:5000/swagger/v1/swagger.json";
/// Output file used when none is configured.
pub const DEFAULT_OUTPUT_PATH: &str = "generated_api_client.rs";
/// Client struct name used when none is configured.
pub const DEFAULT_CLASS_NAME: &str = "CustomApiClient";
/// Module name used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "my_generated_api_client";

/// Inputs of a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// URL of the OpenAPI JSON document.
    pub spec_url: String,
    /// File the generated source is written to; overwritten if present.
    pub output_path: PathBuf,
    /// Name of the generated client struct, converted to `PascalCase`.
    pub class_name: String,
    /// Name of the module wrapping the generated items, converted to `snake_case`.
    pub namespace: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            spec_url: DEFAULT_SPEC_URL.to_owned(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            class_name: DEFAULT_CLASS_NAME.to_owned(),
            namespace: DEFAULT_NAMESPACE.to_owned(),
        }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    /// Client methods generated.
    pub operations: usize,
    /// Component types generated.
    pub types: usize,
    /// Size of the written file.
    pub bytes: usize,
}

/// Fetch the document at `config.spec_url`, generate the client and write it to
/// `config.output_path`.
pub async fn generate_client(config: &GeneratorConfig) -> GeneratorResult<GenerationReport> {
    let (module_name, client_name) = identifiers(config)?;

    let client = fetch::http_client()?;
    info!(url = %config.spec_url, "fetching OpenAPI document");
    let document = fetch::fetch_document(&client, &config.spec_url).await?;
    debug!(bytes = document.len(), "fetched OpenAPI document");

    let spec = resolve(&document, &module_name, &client_name)?;
    let source = emit::render(&spec);

    write_output(&config.output_path, &source).await?;

    let report = GenerationReport {
        operations: spec.operations.len(),
        types: spec.types.len(),
        bytes: source.len(),
    };
    info!(
        path = %config.output_path.display(),
        operations = report.operations,
        types = report.types,
        "client code generated"
    );
    Ok(report)
}

/// Generate client source from an already fetched document.
pub fn generate_source(
    document: &str,
    class_name: &str,
    namespace: &str,
) -> GeneratorResult<String> {
    let config = GeneratorConfig {
        class_name: class_name.to_owned(),
        namespace: namespace.to_owned(),
        ..GeneratorConfig::default()
    };
    let (module_name, client_name) = identifiers(&config)?;
    let spec = resolve(document, &module_name, &client_name)?;
    Ok(emit::render(&spec))
}

fn identifiers(config: &GeneratorConfig) -> GeneratorResult<(String, String)> {
    let module_name = naming::snake_case(&config.namespace);
    if module_name.is_empty() {
        return Err(GeneratorError::InvalidIdentifier {
            what: "namespace",
            value: config.namespace.clone(),
        });
    }
    let client_name = naming::pascal_case(&config.class_name);
    if client_name.is_empty() {
        return Err(GeneratorError::InvalidIdentifier {
            what: "class name",
            value: config.class_name.clone(),
        });
    }
    Ok((module_name, client_name))
}

fn resolve(document: &str, module_name: &str, client_name: &str) -> GeneratorResult<ClientSpec> {
    let document = Document::from_json(document).map_err(GeneratorError::InvalidDocument)?;
    ClientSpec::from_document(&document, module_name, client_name)
}

async fn write_output(path: &Path, source: &str) -> GeneratorResult<()> {
    tokio::fs::write(path, source)
        .await
        .map_err(|source| GeneratorError::Write {
            path: path.to_path_buf(),
            source,
        })
}
