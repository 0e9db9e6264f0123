//! JSON renderer — the whole batch as one pretty-printed array.

use crate::render::Renderer;
use anyhow::{Context, Result};
use docname::DocComment;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, comments: &[DocComment]) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(comments).context("failed to serialize comments")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
