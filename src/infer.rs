//! Name inference for documentation comments.
//!
//! A comment that already has a name passes through untouched, and so does a
//! comment no rule can name. Otherwise the name comes from the first of these
//! that applies:
//!
//! 1. `@event`
//! 2. `@callback`
//! 3. `@class` with a name
//! 4. `@typedef` (even when its name is missing)
//! 5. a depth-first, pre-order walk of the attached AST that stops at the first
//!    node carrying a name. Member access (`foo.bar`) answers with its
//!    property, never its object.

use crate::ast::Node;
use crate::error::{InferError, Result};
use crate::limits::{Budget, Limits};
use crate::model::DocComment;
use tracing::{debug, trace};

/// What decided a comment's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Event,
    Callback,
    Class,
    Typedef,
    Ast,
}

/// Infer a name with the default traversal limits.
pub fn infer(comment: DocComment) -> Result<DocComment> {
    infer_with(comment, &Limits::default())
}

/// Infer a name for `comment`. Only `name` is ever written, and only when a
/// rule yields one.
///
/// Fails with [`InferError::MalformedInput`] when the AST walk is needed but
/// the record has no `context.ast`. Finding no name is not a failure.
pub fn infer_with(mut comment: DocComment, limits: &Limits) -> Result<DocComment> {
    if comment.is_named() {
        return Ok(comment);
    }

    if let Some((rule, name)) = shortcut(&comment) {
        let name = name.map(str::to_string);
        debug!(?rule, name = name.as_deref(), "name from tag");
        if let Some(name) = name {
            comment.set_name(name);
        }
        return Ok(comment);
    }

    if comment.context().is_none() {
        return Err(InferError::malformed("comment has no `context`"));
    }
    let ast = comment
        .ast()
        .ok_or_else(|| InferError::malformed("comment context has no `ast`"))?;

    let root = Node::from_json(ast, limits)?;
    let name = infer_node_name(&root, limits)?;
    debug!(rule = ?Rule::Ast, name = name.as_deref(), "name from syntax");
    if let Some(name) = name {
        comment.set_name(name);
    }
    Ok(comment)
}

/// Tag-declared name, checked in priority order. The typedef rule matches on
/// the tag alone, so its name may be absent.
fn shortcut(comment: &DocComment) -> Option<(Rule, Option<&str>)> {
    if let Some(event) = comment.event() {
        return Some((Rule::Event, Some(event)));
    }
    if let Some(callback) = comment.callback() {
        return Some((Rule::Callback, Some(callback)));
    }
    if let Some(class) = comment.class_name() {
        return Some((Rule::Class, Some(class)));
    }
    if let Some(typedef) = comment.typedef() {
        return Some((Rule::Typedef, typedef));
    }
    None
}

/// Structural phase on its own: the first name found walking `root`.
pub fn infer_node_name(root: &Node, limits: &Limits) -> Result<Option<String>> {
    let mut budget = Budget::new(limits);
    Ok(visit(root, 0, &mut budget)?.map(str::to_string))
}

fn visit<'a>(node: &'a Node, depth: usize, budget: &mut Budget) -> Result<Option<&'a str>> {
    budget.enter(depth)?;
    trace!(kind = %node.kind(), depth, "visit");

    let own = match node {
        // `foo.bar = ...` documents `bar`
        Node::Member(member) => member.property.as_deref().and_then(Node::name),
        Node::Generic(generic) => generic.name.as_deref(),
    };
    if own.is_some() {
        return Ok(own);
    }

    for child in node.children() {
        if let Some(found) = visit(child, depth + 1, budget)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}
