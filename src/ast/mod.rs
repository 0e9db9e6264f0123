//! Typed syntax tree used for structural name inference.
//!
//! Upstream parsers hand over ESTree-shaped JSON. [`Node::from_json`] lowers it
//! into this tree; the inference walk only needs two shapes: member access
//! (`object.property`), which gets its own handling, and everything else.

mod lower;

use std::fmt;

/// Syntax node kinds the lowering step knows the child layout of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    ExpressionStatement,
    AssignmentExpression,
    VariableDeclaration,
    VariableDeclarator,
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunctionExpression,
    ClassDeclaration,
    ClassExpression,
    ClassBody,
    MethodDefinition,
    PropertyDefinition,
    ObjectExpression,
    Property,
    CallExpression,
    NewExpression,
    ReturnStatement,
    BlockStatement,
    ExportNamedDeclaration,
    ExportDefaultDeclaration,
    Identifier,
    Literal,
    MemberExpression,
    OptionalMemberExpression,
    JSXMemberExpression,
    /// Any other `type`; children are taken in field order.
    Other(String),
}

impl NodeKind {
    pub fn from_type(ty: &str) -> Self {
        match ty {
            "Program" => NodeKind::Program,
            "ExpressionStatement" => NodeKind::ExpressionStatement,
            "AssignmentExpression" => NodeKind::AssignmentExpression,
            "VariableDeclaration" => NodeKind::VariableDeclaration,
            "VariableDeclarator" => NodeKind::VariableDeclarator,
            "FunctionDeclaration" => NodeKind::FunctionDeclaration,
            "FunctionExpression" => NodeKind::FunctionExpression,
            "ArrowFunctionExpression" => NodeKind::ArrowFunctionExpression,
            "ClassDeclaration" => NodeKind::ClassDeclaration,
            "ClassExpression" => NodeKind::ClassExpression,
            "ClassBody" => NodeKind::ClassBody,
            "MethodDefinition" => NodeKind::MethodDefinition,
            "PropertyDefinition" => NodeKind::PropertyDefinition,
            "ObjectExpression" => NodeKind::ObjectExpression,
            "Property" => NodeKind::Property,
            "CallExpression" => NodeKind::CallExpression,
            "NewExpression" => NodeKind::NewExpression,
            "ReturnStatement" => NodeKind::ReturnStatement,
            "BlockStatement" => NodeKind::BlockStatement,
            "ExportNamedDeclaration" => NodeKind::ExportNamedDeclaration,
            "ExportDefaultDeclaration" => NodeKind::ExportDefaultDeclaration,
            "Identifier" => NodeKind::Identifier,
            "Literal" => NodeKind::Literal,
            "MemberExpression" => NodeKind::MemberExpression,
            "OptionalMemberExpression" => NodeKind::OptionalMemberExpression,
            "JSXMemberExpression" => NodeKind::JSXMemberExpression,
            other => NodeKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Program => "Program",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::AssignmentExpression => "AssignmentExpression",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::VariableDeclarator => "VariableDeclarator",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
            NodeKind::FunctionExpression => "FunctionExpression",
            NodeKind::ArrowFunctionExpression => "ArrowFunctionExpression",
            NodeKind::ClassDeclaration => "ClassDeclaration",
            NodeKind::ClassExpression => "ClassExpression",
            NodeKind::ClassBody => "ClassBody",
            NodeKind::MethodDefinition => "MethodDefinition",
            NodeKind::PropertyDefinition => "PropertyDefinition",
            NodeKind::ObjectExpression => "ObjectExpression",
            NodeKind::Property => "Property",
            NodeKind::CallExpression => "CallExpression",
            NodeKind::NewExpression => "NewExpression",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::BlockStatement => "BlockStatement",
            NodeKind::ExportNamedDeclaration => "ExportNamedDeclaration",
            NodeKind::ExportDefaultDeclaration => "ExportDefaultDeclaration",
            NodeKind::Identifier => "Identifier",
            NodeKind::Literal => "Literal",
            NodeKind::MemberExpression => "MemberExpression",
            NodeKind::OptionalMemberExpression => "OptionalMemberExpression",
            NodeKind::JSXMemberExpression => "JSXMemberExpression",
            NodeKind::Other(ty) => ty,
        }
    }

    /// Property access kinds: `object.property`, `object?.property`, `<a.b>`.
    pub fn is_member(&self) -> bool {
        matches!(
            self,
            NodeKind::MemberExpression
                | NodeKind::OptionalMemberExpression
                | NodeKind::JSXMemberExpression
        )
    }

    /// Child slots in document order, or `None` when the layout is unknown.
    ///
    /// Orders follow the ESTree field definitions in the `ast-types` package
    /// (`def("Function").field("id").field("params").field("body")`, ...).
    pub(crate) fn child_fields(&self) -> Option<&'static [&'static str]> {
        let fields: &'static [&'static str] = match self {
            NodeKind::Program | NodeKind::BlockStatement | NodeKind::ClassBody => &["body"],
            NodeKind::ExpressionStatement => &["expression"],
            NodeKind::AssignmentExpression => &["left", "right"],
            NodeKind::VariableDeclaration => &["declarations"],
            NodeKind::VariableDeclarator => &["id", "init"],
            NodeKind::FunctionDeclaration | NodeKind::FunctionExpression => {
                &["id", "params", "body"]
            }
            NodeKind::ArrowFunctionExpression => &["params", "body"],
            NodeKind::ClassDeclaration | NodeKind::ClassExpression => {
                &["id", "body", "superClass"]
            }
            NodeKind::MethodDefinition | NodeKind::PropertyDefinition | NodeKind::Property => {
                &["key", "value"]
            }
            NodeKind::ObjectExpression => &["properties"],
            NodeKind::CallExpression | NodeKind::NewExpression => &["callee", "arguments"],
            NodeKind::ReturnStatement => &["argument"],
            NodeKind::ExportNamedDeclaration => &["declaration", "specifiers", "source"],
            NodeKind::ExportDefaultDeclaration => &["declaration"],
            NodeKind::Identifier | NodeKind::Literal => &[],
            NodeKind::MemberExpression
            | NodeKind::OptionalMemberExpression
            | NodeKind::JSXMemberExpression => &["object", "property"],
            NodeKind::Other(_) => return None,
        };
        Some(fields)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lowered syntax node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Property access.
    Member(MemberExpr),
    /// Every other node kind.
    Generic(GenericNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub kind: NodeKind,
    pub object: Option<Box<Node>>,
    pub property: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenericNode {
    pub kind: NodeKind,
    /// Declared identifier carried by the node itself.
    pub name: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn identifier(name: impl Into<String>) -> Node {
        Node::named(NodeKind::Identifier, name, Vec::new())
    }

    pub fn member(object: Node, property: Node) -> Node {
        Node::Member(MemberExpr {
            kind: NodeKind::MemberExpression,
            object: Some(Box::new(object)),
            property: Some(Box::new(property)),
        })
    }

    pub fn generic(kind: NodeKind, children: Vec<Node>) -> Node {
        Node::Generic(GenericNode {
            kind,
            name: None,
            children,
        })
    }

    pub fn named(kind: NodeKind, name: impl Into<String>, children: Vec<Node>) -> Node {
        Node::Generic(GenericNode {
            kind,
            name: Some(name.into()),
            children,
        })
    }

    pub fn kind(&self) -> &NodeKind {
        match self {
            Node::Member(member) => &member.kind,
            Node::Generic(node) => &node.kind,
        }
    }

    /// The node's own name, if it declares one. Member access never does.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Member(_) => None,
            Node::Generic(node) => node.name.as_deref(),
        }
    }

    /// Direct children in document order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Member(member) => member
                .object
                .iter()
                .chain(member.property.iter())
                .map(|child| &**child)
                .collect(),
            Node::Generic(node) => node.children.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for ty in ["Program", "MemberExpression", "JSXMemberExpression", "TSEnumDeclaration"] {
            assert_eq!(NodeKind::from_type(ty).as_str(), ty);
        }
    }

    #[test]
    fn member_kinds() {
        assert!(NodeKind::from_type("OptionalMemberExpression").is_member());
        assert!(!NodeKind::from_type("CallExpression").is_member());
    }

    #[test]
    fn unknown_kind_has_no_layout() {
        assert!(NodeKind::from_type("ImportDeclaration").child_fields().is_none());
        assert_eq!(
            NodeKind::FunctionDeclaration.child_fields(),
            Some(&["id", "params", "body"][..])
        );
    }

    #[test]
    fn member_children_are_object_then_property() {
        let node = Node::member(Node::identifier("foo"), Node::identifier("bar"));
        let names: Vec<_> = node.children().iter().filter_map(|c| c.name()).collect();
        assert_eq!(names, ["foo", "bar"]);
        assert_eq!(node.name(), None);
    }
}
