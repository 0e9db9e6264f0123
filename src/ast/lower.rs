//! ESTree JSON → [`Node`].

use super::{GenericNode, MemberExpr, Node, NodeKind};
use crate::error::{InferError, Result};
use crate::limits::{Budget, Limits};
use serde_json::{Map, Value};

/// Position and comment bookkeeping that never holds child syntax.
const METADATA_KEYS: &[&str] = &[
    "type",
    "loc",
    "range",
    "start",
    "end",
    "leadingComments",
    "trailingComments",
    "innerComments",
    "comments",
    "extra",
];

impl Node {
    /// Lower an ESTree-shaped JSON value.
    ///
    /// The root must be an object with a string `type`. Nested values that are
    /// not nodes (nulls, literals, plain objects) are skipped.
    pub fn from_json(value: &Value, limits: &Limits) -> Result<Node> {
        let mut budget = Budget::new(limits);
        lower(value, 0, &mut budget)?
            .ok_or_else(|| InferError::malformed("`context.ast` is not a syntax node"))
    }
}

fn lower(value: &Value, depth: usize, budget: &mut Budget) -> Result<Option<Node>> {
    let Some(obj) = value.as_object() else {
        return Ok(None);
    };
    let Some(ty) = obj.get("type").and_then(Value::as_str) else {
        return Ok(None);
    };
    budget.enter(depth)?;

    let kind = NodeKind::from_type(ty);
    if kind.is_member() {
        let object = lower_slot(obj.get("object"), depth + 1, budget)?;
        let property = lower_slot(obj.get("property"), depth + 1, budget)?;
        return Ok(Some(Node::Member(MemberExpr {
            kind,
            object: object.map(Box::new),
            property: property.map(Box::new),
        })));
    }

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let mut children = Vec::new();
    match kind.child_fields() {
        Some(fields) => {
            for field in fields {
                if let Some(v) = obj.get(*field) {
                    lower_into(v, depth + 1, budget, &mut children)?;
                }
            }
        }
        None => lower_fields(obj, depth + 1, budget, &mut children)?,
    }

    Ok(Some(Node::Generic(GenericNode {
        kind,
        name,
        children,
    })))
}

/// Unknown layout: every node-valued field, in key order.
fn lower_fields(
    obj: &Map<String, Value>,
    depth: usize,
    budget: &mut Budget,
    out: &mut Vec<Node>,
) -> Result<()> {
    for (key, v) in obj {
        if METADATA_KEYS.contains(&key.as_str()) {
            continue;
        }
        lower_into(v, depth, budget, out)?;
    }
    Ok(())
}

fn lower_slot(value: Option<&Value>, depth: usize, budget: &mut Budget) -> Result<Option<Node>> {
    match value {
        Some(v) => lower(v, depth, budget),
        None => Ok(None),
    }
}

fn lower_into(value: &Value, depth: usize, budget: &mut Budget, out: &mut Vec<Node>) -> Result<()> {
    match value {
        Value::Array(items) => {
            for item in items {
                if let Some(node) = lower(item, depth, budget)? {
                    out.push(node);
                }
            }
        }
        other => {
            if let Some(node) = lower(other, depth, budget)? {
                out.push(node);
            }
        }
    }
    Ok(())
}
