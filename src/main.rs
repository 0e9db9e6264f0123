//! docname — fill in `name` on documentation comment records.
//!
//! Reads JSON comment records produced by a parser/tag extractor, infers a
//! name for each unnamed comment, and writes the records back out in order.
//!
//! - **stdin mode**: `docname < comments.json`
//! - **file mode**: `docname -o named/ build/comments/*.ndjson`

mod input;
mod render;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use docname::{infer_with, DocComment, InferError, InferNamesExt, Limits};
use std::collections::HashMap;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docname",
    about = "Infer names for documentation comments from their attached syntax tree"
)]
struct Cli {
    /// Input files (glob patterns and directories supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), ndjson
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// Deepest AST level to walk before giving up
    #[arg(long, default_value_t = Limits::default().max_depth)]
    max_depth: usize,

    /// Most AST nodes to visit per comment
    #[arg(long, default_value_t = Limits::default().max_nodes)]
    max_nodes: usize,

    /// Leave a comment unnamed and continue when inference fails on it
    #[arg(long)]
    keep_going: bool,

    /// More logging (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn limits(&self) -> Limits {
        Limits {
            max_depth: self.max_depth,
            max_nodes: self.max_nodes,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,docname={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// stdin mode: read records from stdin, write named records to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("failed to read stdin")?;

    let renderer = render::create_renderer(&cli.format)?;
    let comments = input::parse_records(&content, &cli.limits())?;
    let named = name_all(comments, cli, "<stdin>")?;
    print!("{}", renderer.render(&named)?);
    Ok(())
}

/// file mode: process each input file into the output directory.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    let renderer = render::create_renderer(&cli.format)?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let input_files = expand_globs(&cli.files)?;
    let jobs = plan_outputs(&input_files, output_dir, renderer.file_extension())?;

    for (path, out_path) in jobs {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let comments = match input::parse_records(&content, &cli.limits()) {
            Ok(comments) => comments,
            // Too deep is a limits problem, not an unreadable file
            Err(e) if e.is::<InferError>() => {
                return Err(e.context(format!("{}", path.display())));
            }
            Err(e) => {
                warn!(path = %path.display(), "skipping: {:#}", e);
                continue;
            }
        };

        let origin = path.to_string_lossy();
        let named = name_all(comments, cli, &origin)?;

        fs::write(&out_path, renderer.render(&named)?)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

/// Pair each input with its output path, refusing two inputs that would
/// write the same file (e.g. `a.json` and `a.ndjson`).
fn plan_outputs<'a>(
    inputs: &'a [PathBuf],
    output_dir: &Path,
    ext: &str,
) -> Result<Vec<(&'a Path, PathBuf)>> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    let mut jobs = Vec::with_capacity(inputs.len());
    for path in inputs {
        let out_path = output_dir.join(format!("{}.{}", derive_output_name(path), ext));
        if let Some(previous) = claimed.insert(out_path.clone(), path.as_path()) {
            bail!(
                "{} and {} would both write {}",
                previous.display(),
                path.display(),
                out_path.display()
            );
        }
        jobs.push((path.as_path(), out_path));
    }
    Ok(jobs)
}

/// Run inference over a batch, keeping order. Without `--keep-going` the first
/// failure aborts the batch.
fn name_all(comments: Vec<DocComment>, cli: &Cli, origin: &str) -> Result<Vec<DocComment>> {
    let limits = cli.limits();

    if !cli.keep_going {
        return comments
            .into_iter()
            .infer_names(limits)
            .enumerate()
            .map(|(i, result)| {
                result.with_context(|| format!("{}: comment #{}", origin, i + 1))
            })
            .collect();
    }

    let mut named = Vec::with_capacity(comments.len());
    for (i, comment) in comments.into_iter().enumerate() {
        let original = comment.clone();
        match infer_with(comment, &limits) {
            Ok(comment) => named.push(comment),
            Err(e) => {
                warn!(
                    origin,
                    comment = i + 1,
                    file = original.source_file(),
                    "leaving comment unnamed: {}",
                    e
                );
                named.push(original);
            }
        }
    }
    Ok(named)
}

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && input::is_supported(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!(pattern = pattern.as_str(), "no files matched");
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// "build/comments/math.ndjson" → "math"
fn derive_output_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
