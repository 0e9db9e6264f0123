//! Data model for documentation comment records.
//!
//! Records are produced upstream (one per parsed comment) and carry whatever
//! the tag extractor found. A record is kept as its ordered JSON object so it
//! is written back out exactly as it came in; the fields name inference reads
//! are exposed through typed accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A documentation comment paired with the syntax it annotates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocComment {
    fields: Map<String, Value>,
}

impl DocComment {
    pub fn new() -> Self {
        DocComment::default()
    }

    /// A comment with only an attached AST.
    pub fn with_ast(ast: Value) -> Self {
        let mut context = Map::new();
        context.insert("ast".to_string(), ast);
        DocComment::new().with("context", Value::Object(context))
    }

    /// Builder-style field setter.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Explicit or inferred name, if set.
    pub fn name(&self) -> Option<&str> {
        present(self.fields.get("name"))
    }

    pub fn is_named(&self) -> bool {
        self.name().is_some()
    }

    /// Write `name`. An existing `name` key keeps its position.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.fields
            .insert("name".to_string(), Value::String(name.into()));
    }

    /// @event
    pub fn event(&self) -> Option<&str> {
        present(self.fields.get("event"))
    }

    /// @callback
    pub fn callback(&self) -> Option<&str> {
        present(self.fields.get("callback"))
    }

    /// Name declared by @class.
    pub fn class_name(&self) -> Option<&str> {
        present(self.fields.get("class").and_then(|class| class.get("name")))
    }

    /// @typedef: `Some` whenever the tag is there, holding its name if any.
    pub fn typedef(&self) -> Option<Option<&str>> {
        match self.fields.get("typedef") {
            None | Some(Value::Null) => None,
            Some(typedef) => Some(present(typedef.get("name"))),
        }
    }

    /// `context`, when it is an object.
    pub fn context(&self) -> Option<&Map<String, Value>> {
        self.fields.get("context").and_then(Value::as_object)
    }

    /// `context.ast`, when present and not null.
    pub fn ast(&self) -> Option<&Value> {
        self.context()
            .and_then(|ctx| ctx.get("ast"))
            .filter(|ast| !ast.is_null())
    }

    /// Source file recorded by the parser, if any.
    pub fn source_file(&self) -> Option<&str> {
        self.context()
            .and_then(|ctx| ctx.get("file"))
            .and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for DocComment {
    fn from(fields: Map<String, Value>) -> Self {
        DocComment { fields }
    }
}

/// Tag values count as set only when they are non-empty strings.
fn present(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
