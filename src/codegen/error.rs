//! Error types shared by the client generator pipeline.

use std::{path::PathBuf, time::Duration};

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`GeneratorError`] failures.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Pipeline stage a [`GeneratorError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The generator was configured with unusable names.
    Config,
    /// The document could not be retrieved.
    Fetch,
    /// The document is not a usable OpenAPI description.
    Parse,
    /// The generated source could not be written.
    Write,
}

/// Failures that can occur while generating a client.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A configured name does not contain any identifier characters.
    #[error("{what} `{value}` does not yield a valid Rust identifier")]
    InvalidIdentifier { what: &'static str, value: String },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build HTTP client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The document endpoint could not be reached or its body could not be read.
    #[error("failed to fetch OpenAPI document from `{url}`")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The document endpoint answered with a non-success status.
    #[error("unexpected status {status} fetching `{url}`")]
    FetchStatus { url: String, status: StatusCode },
    /// The endpoint did not answer successfully before the deadline.
    #[error("`{url}` did not become ready within {timeout:?}")]
    NotReady { url: String, timeout: Duration },
    /// The body is not JSON or does not have the shape of an OpenAPI document.
    #[error("invalid OpenAPI document")]
    InvalidDocument(#[source] serde_json::Error),
    /// Only OpenAPI 3.x documents are understood.
    #[error("unsupported OpenAPI version `{0}`")]
    UnsupportedVersion(String),
    /// Every operation needs an id to name its client method.
    #[error("operation {method} {path} has no operationId")]
    MissingOperationId { method: &'static str, path: String },
    /// Path template and declared path parameters disagree.
    #[error("operation `{operation_id}`: path parameter `{name}` {problem}")]
    PathParameter {
        operation_id: String,
        name: String,
        problem: &'static str,
    },
    /// A `$ref` points outside `#/components/schemas` or to a missing entry.
    #[error("unresolved schema reference `{0}`")]
    UnknownReference(String),
    /// A schema uses a construct the generator cannot map to Rust.
    #[error("unsupported schema at {location}: {reason}")]
    UnsupportedSchema { location: String, reason: String },
    /// Two generated items end up with the same Rust name.
    #[error("duplicate generated name `{name}` ({what})")]
    DuplicateName { what: &'static str, name: String },
    /// The output file could not be written.
    #[error("failed to write generated client to `{path}`")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GeneratorError {
    /// Stage of the pipeline that failed.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GeneratorError::InvalidIdentifier { .. } => ErrorKind::Config,
            GeneratorError::ClientBuilder { .. }
            | GeneratorError::Fetch { .. }
            | GeneratorError::FetchStatus { .. }
            | GeneratorError::NotReady { .. } => ErrorKind::Fetch,
            GeneratorError::InvalidDocument(_)
            | GeneratorError::UnsupportedVersion(_)
            | GeneratorError::MissingOperationId { .. }
            | GeneratorError::PathParameter { .. }
            | GeneratorError::UnknownReference(_)
            | GeneratorError::UnsupportedSchema { .. }
            | GeneratorError::DuplicateName { .. } => ErrorKind::Parse,
            GeneratorError::Write { .. } => ErrorKind::Write,
        }
    }
}
