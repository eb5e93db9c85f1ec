//! Engine-level error types.

use thiserror::Error;

/// Structural defects found by the validator.
///
/// These are data, not failures: the validator collects all of them and the
/// `Display` text is what gets shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    /// The workflow has no nodes at all.
    #[error("Workflow is empty.")]
    EmptyWorkflow,

    #[error("Workflow must have a Start node.")]
    MissingStart,

    #[error("Workflow can only have one Start node.")]
    MultipleStarts,

    #[error("Workflow should have at least one End node.")]
    MissingEnd,

    #[error("Start node cannot have incoming connections.")]
    StartHasIncoming,

    /// A non-End node with nowhere to go.
    #[error("Node \"{label}\" has no outgoing connections.")]
    NoOutgoing { label: String },

    #[error("Node \"{label}\" is unreachable from the Start node.")]
    Unreachable { label: String },

    /// Reported at most once, however many cycles exist.
    #[error("Workflow contains at least one cycle.")]
    CycleDetected,

    /// Two or more nodes share the same ID.
    #[error("Duplicate node id \"{0}\".")]
    DuplicateNodeId(String),

    /// An edge references a node ID that doesn't exist in the workflow.
    #[error("Connection references unknown node \"{node_id}\".")]
    UnknownNodeReference { node_id: String },
}

/// Errors produced while loading engine inputs.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The workflow document is not valid JSON or has the wrong shape.
    #[error("invalid workflow definition: {0}")]
    InvalidDefinition(#[source] serde_json::Error),

    /// The dry-run context is not a JSON object.
    #[error("invalid simulation context: {reason}")]
    InvalidContext { reason: String },
}
