//! Renderer module — trait-based output format dispatch.

pub mod json;
pub mod ndjson;

use anyhow::{anyhow, Result};
use docname::DocComment;

/// Trait for writing processed comments in a specific output format.
pub trait Renderer {
    fn render(&self, comments: &[DocComment]) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        "ndjson" | "jsonl" => Ok(Box::new(ndjson::NdjsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use json or ndjson", format)),
    }
}
