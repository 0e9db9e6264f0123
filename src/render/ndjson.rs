//! NDJSON renderer — one compact record per line, for streaming consumers.

use crate::render::Renderer;
use anyhow::{Context, Result};
use docname::DocComment;

pub struct NdjsonRenderer;

impl Renderer for NdjsonRenderer {
    fn render(&self, comments: &[DocComment]) -> Result<String> {
        let mut out = String::new();
        for (i, comment) in comments.iter().enumerate() {
            let line = serde_json::to_string(comment)
                .with_context(|| format!("failed to serialize comment #{}", i + 1))?;
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "ndjson"
    }
}
