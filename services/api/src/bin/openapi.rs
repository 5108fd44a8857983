//! services/api/src/bin/openapi.rs
//!
//! Writes the journal service's OpenAPI document to disk.
//!
//! Usage: `openapi [OUTPUT_PATH]` (defaults to `openapi.json`).

use journal_api::web::rest::ApiDoc;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn output_path(mut args: impl Iterator<Item = String>) -> String {
    args.nth(1).unwrap_or_else(|| DEFAULT_OUTPUT.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = output_path(std::env::args());
    let spec_json = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(&path, spec_json)?;
    println!("OpenAPI document for the journal API written to {}", path);
    Ok(())
}
