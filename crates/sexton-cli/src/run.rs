//! Loading inputs, running the pipeline and rendering the page.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as Json;
use sexton_query::{json_accessor, process, PageResult, QueryOptions};
use tracing::{debug, info};

use crate::cli::{Cli, Format};

pub fn run(cli: &Cli) -> Result<String> {
    let base = match &cli.options {
        Some(path) => load_options(path)?,
        None => QueryOptions::default(),
    };
    let options = cli.query_options(base);
    options.validate().context("invalid query options")?;
    debug!(?options, "resolved query options");

    let raw = match cli.input_path() {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    let items = parse_collection(&raw)?;

    let page = process(&items, &options, json_accessor)?;
    info!(
        total_items = page.pagination.total_items,
        current_page = page.pagination.current_page,
        total_pages = page.pagination.total_pages,
        "query complete"
    );

    render(&page, cli.format)
}

/// Reads a query options document; YAML when the extension says so.
pub fn load_options(path: &Path) -> Result<QueryOptions> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let options = if is_yaml {
        QueryOptions::from_yaml_str(&text)
    } else {
        QueryOptions::from_json_str(&text)
    };
    options.with_context(|| format!("failed to parse options from {}", path.display()))
}

pub fn parse_collection(raw: &str) -> Result<Vec<Json>> {
    let doc: Json = serde_json::from_str(raw).context("input is not valid JSON")?;
    match doc {
        Json::Array(items) => Ok(items),
        other => bail!("input must be a JSON array, got {}", kind_of(&other)),
    }
}

fn render(page: &PageResult<&Json>, format: Format) -> Result<String> {
    let out = match format {
        Format::Json => serde_json::to_string_pretty(page)?,
        Format::Yaml => serde_yaml::to_string(page)?,
    };
    Ok(out)
}

fn kind_of(doc: &Json) -> &'static str {
    match doc {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
