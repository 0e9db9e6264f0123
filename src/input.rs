//! Input reader — JSON comment records, as an array or a stream.
//!
//! serde_json's own recursion cap (128) would reject ASTs long before
//! `--max-depth` does, so it is switched off and nesting is bounded here
//! from the configured limits instead.

use anyhow::{Context, Result};
use docname::{DocComment, InferError, Limits};
use serde::Deserialize;
use std::path::Path;

/// File extensions recognized as comment record files.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "jsonl", "ndjson"];

/// Parse comment records.
///
/// Accepts a JSON array of records, a single record, or records separated by
/// whitespace (one per line for NDJSON). Input nested deeper than `limits`
/// allows fails with [`InferError::LimitExceeded`].
pub fn parse_records(content: &str, limits: &Limits) -> Result<Vec<DocComment>> {
    let limit = nesting_limit(limits);
    if json_nesting(content) > limit {
        return Err(InferError::LimitExceeded {
            what: "JSON nesting",
            limit,
        }
        .into());
    }

    let mut de = serde_json::Deserializer::from_str(content);
    de.disable_recursion_limit();

    if content.trim_start().starts_with('[') {
        let records = Vec::<DocComment>::deserialize(&mut de)
            .context("invalid JSON array of comment records")?;
        de.end().context("trailing data after comment records")?;
        return Ok(records);
    }

    de.into_iter::<DocComment>()
        .enumerate()
        .map(|(i, record)| record.with_context(|| format!("invalid comment record #{}", i + 1)))
        .collect()
}

/// JSON levels a record may use for an AST of `max_depth` levels.
///
/// An ESTree level takes at most an object plus an array; the slack covers the
/// enclosing array, record and `context`, and plain objects like `loc.start`.
fn nesting_limit(limits: &Limits) -> usize {
    limits.max_depth.saturating_mul(2).saturating_add(8)
}

/// Deepest `{`/`[` nesting outside of strings.
fn json_nesting(content: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for b in content.bytes() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}
