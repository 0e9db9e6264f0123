//! docname — infer names for documentation comments.
//!
//! Sits between tag extraction and rendering in a documentation pipeline:
//! each comment record arrives with its extracted tags and the syntax node it
//! annotates, and leaves with `name` filled in when one can be decided.

pub mod ast;
pub mod error;
pub mod infer;
pub mod limits;
pub mod model;
pub mod pipeline;

pub use ast::{Node, NodeKind};
pub use error::{InferError, Result};
pub use infer::{infer, infer_node_name, infer_with, Rule};
pub use limits::Limits;
pub use model::DocComment;
pub use pipeline::{InferNames, InferNamesExt};
