//! Print the OpenAPI document as JSON.
//!
//! # Examples
//! ```sh
//! cargo run --manifest-path backend/Cargo.toml --bin openapi-dump -- --output openapi.json
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use microloan_backend::doc::ApiDoc;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Print the microloan backend OpenAPI document",
    version
)]
struct CliArgs {
    /// Write the document to this file instead of standard output.
    #[arg(long, short, value_name = "path")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();

    let document = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("serialise OpenAPI document")?;

    match args.output {
        Some(path) => std::fs::write(&path, document)
            .wrap_err_with(|| format!("write OpenAPI document to {}", path.display()))?,
        None => writeln!(std::io::stdout().lock(), "{document}")
            .wrap_err("write OpenAPI document to standard output")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&["openapi-dump"], None)]
    #[case(&["openapi-dump", "--output", "api.json"], Some("api.json"))]
    #[case(&["openapi-dump", "-o", "out/api.json"], Some("out/api.json"))]
    fn parses_output_flag(#[case] argv: &[&str], #[case] expected: Option<&str>) {
        let args = CliArgs::try_parse_from(argv).expect("arguments parse");
        assert_eq!(args.output, expected.map(PathBuf::from));
    }
}
