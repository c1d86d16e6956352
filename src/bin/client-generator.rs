//! Fetch the service's OpenAPI document and write a typed Rust client generated from it.

use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_api::codegen::{
    self, DEFAULT_CLASS_NAME, DEFAULT_NAMESPACE, DEFAULT_OUTPUT_PATH, DEFAULT_SPEC_URL,
    GeneratorConfig, fetch,
};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// URL of the OpenAPI JSON document
    #[arg(long, env = "CLIENT_GEN_SPEC_URL", default_value = DEFAULT_SPEC_URL)]
    spec_url: String,
    /// File the generated client is written to (overwritten)
    #[arg(long, short, env = "CLIENT_GEN_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,
    /// Name of the generated client struct
    #[arg(long, env = "CLIENT_GEN_CLASS_NAME", default_value = DEFAULT_CLASS_NAME)]
    class_name: String,
    /// Name of the module wrapping the generated code
    #[arg(long, env = "CLIENT_GEN_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    namespace: String,
    /// Poll the document URL for up to this many seconds before generating
    #[arg(long, env = "CLIENT_GEN_WAIT_TIMEOUT_SECS")]
    wait_timeout_secs: Option<u64>,
}

impl From<&Cli> for GeneratorConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            spec_url: cli.spec_url.clone(),
            output_path: cli.output.clone(),
            class_name: cli.class_name.clone(),
            namespace: cli.namespace.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if let Some(secs) = cli.wait_timeout_secs {
        let client = fetch::http_client().context("building HTTP client")?;
        info!(url = %cli.spec_url, secs, "waiting for document endpoint");
        fetch::wait_for_ready(&client, &cli.spec_url, Duration::from_secs(secs))
            .await
            .context("waiting for document endpoint")?;
    }

    let report = codegen::generate_client(&GeneratorConfig::from(&cli))
        .await
        .inspect_err(|err| error!(kind = ?err.kind(), "client generation failed: {err:#}"))
        .with_context(|| format!("generating client into `{}`", cli.output.display()))?;
    info!(bytes = report.bytes, "client code generated successfully");
    Ok(())
}

fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
