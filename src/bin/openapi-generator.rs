//! Print the service's OpenAPI document without starting the server.

use anyhow::Context;
use user_api::{routes, services::documentation};

fn main() -> anyhow::Result<()> {
    let (_, table) = routes::registry().into_parts();
    let doc = documentation::document(&table);
    println!("{}", doc.to_pretty_json().context("serializing OpenAPI document")?);
    Ok(())
}
