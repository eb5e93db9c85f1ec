//! Core domain models for the workflow engine.
//!
//! A workflow is a flat, insertion-ordered list of nodes plus a flat list of
//! edges.  The engine never mutates either; every call receives a fresh
//! snapshot from the editor.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use nodes::{NodeConfig, NodeKind};

use crate::EngineError;

/// Input values a dry run is started with.
pub type Context = serde_json::Map<String, Value>;

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A single step in the workflow graph.
///
/// Serialised as `{ "id": "t1", "kind": "task", "config": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier within this workflow (referenced by edges).
    pub id: String,
    /// Kind-tagged configuration; the tag determines [`Node::kind`].
    #[serde(flatten)]
    pub config: NodeConfig,
}

impl Node {
    pub fn new(id: impl Into<String>, config: impl Into<NodeConfig>) -> Self {
        Self {
            id: id.into(),
            config: config.into(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.config.kind()
    }

    /// Name used in validation messages.
    pub fn label(&self) -> String {
        self.config.label(&self.id)
    }
}

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// Directed edge from one node to another.
///
/// The position of an edge in the workflow's edge list is significant: the
/// first outgoing edge of a node is the one a dry run follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// A complete workflow document as saved by the designer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Workflow {
    pub fn new(name: impl Into<String>, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let name = name.into();
        Self {
            id: name.to_lowercase().replace(' ', "_"),
            name,
            nodes,
            edges,
        }
    }

    /// Parse a workflow document from JSON text.
    ///
    /// # Errors
    /// [`EngineError::InvalidDefinition`] if the text is not a well-formed
    /// workflow document.
    pub fn from_json_str(text: &str) -> Result<Self, EngineError> {
        serde_json::from_str(text).map_err(EngineError::InvalidDefinition)
    }
}

/// Parse a dry-run context; it must be a JSON object.
///
/// # Errors
/// [`EngineError::InvalidContext`] for malformed JSON or a non-object value.
pub fn parse_context(text: &str) -> Result<Context, EngineError> {
    let value: Value = serde_json::from_str(text).map_err(|e| EngineError::InvalidContext {
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(EngineError::InvalidContext {
            reason: format!("expected a JSON object, found {}", json_type_name(&other)),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
