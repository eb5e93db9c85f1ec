//! Per-kind node configuration.
//!
//! A node's configuration is a tagged union: the tag *is* the node kind, so
//! a task can never carry an approval's fields.  On the wire it looks like
//!
//! ```json
//! { "kind": "task", "config": { "name": "Review", "assignee": "Bob" } }
//! ```
//!
//! Every field is optional; the editor fills them in incrementally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::NodeKind;

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// A free-form key/value row (start metadata, task custom fields).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One branch of a condition node as modelled by the editor.
///
/// Branches are stored and round-tripped but never consulted when walking
/// the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionBranch {
    pub label: Option<String>,
    pub expression: Option<String>,
}

// ---------------------------------------------------------------------------
// Kind-specific configs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StartConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub metadata: Vec<KeyValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    /// Kept as the editor's raw date string; never parsed.
    pub due_date: Option<String>,
    pub custom_fields: Vec<KeyValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApprovalConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub approver_role: Option<String>,
    pub auto_approve_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutomatedConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Identifier from the action catalog; opaque to the core.
    pub action_id: Option<String>,
    pub action_params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConditionConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub branches: Vec<ConditionBranch>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EndConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub summary_flag: bool,
}

// ---------------------------------------------------------------------------
// NodeConfig
// ---------------------------------------------------------------------------

/// Configuration of a single node, keyed by its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "config", rename_all = "snake_case")]
pub enum NodeConfig {
    Start(StartConfig),
    Task(TaskConfig),
    Approval(ApprovalConfig),
    Automated(AutomatedConfig),
    Condition(ConditionConfig),
    End(EndConfig),
}

impl NodeConfig {
    /// The configuration a freshly dropped node of `kind` starts with.
    pub fn default_for(kind: NodeKind) -> Self {
        let name = |s: &str| Some(s.to_owned());
        match kind {
            NodeKind::Start => NodeConfig::Start(StartConfig {
                name: name("Start"),
                ..Default::default()
            }),
            NodeKind::Task => NodeConfig::Task(TaskConfig {
                name: name("Task"),
                ..Default::default()
            }),
            NodeKind::Approval => NodeConfig::Approval(ApprovalConfig {
                name: name("Approval"),
                ..Default::default()
            }),
            NodeKind::Automated => NodeConfig::Automated(AutomatedConfig {
                name: name("Automated step"),
                ..Default::default()
            }),
            NodeKind::Condition => NodeConfig::Condition(ConditionConfig {
                name: name("Condition"),
                ..Default::default()
            }),
            NodeKind::End => NodeConfig::End(EndConfig {
                name: name("End"),
                ..Default::default()
            }),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeConfig::Start(_) => NodeKind::Start,
            NodeConfig::Task(_) => NodeKind::Task,
            NodeConfig::Approval(_) => NodeKind::Approval,
            NodeConfig::Automated(_) => NodeKind::Automated,
            NodeConfig::Condition(_) => NodeKind::Condition,
            NodeConfig::End(_) => NodeKind::End,
        }
    }

    /// The configured display name, treating an empty string as unset.
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            NodeConfig::Start(c) => &c.name,
            NodeConfig::Task(c) => &c.name,
            NodeConfig::Approval(c) => &c.name,
            NodeConfig::Automated(c) => &c.name,
            NodeConfig::Condition(c) => &c.name,
            NodeConfig::End(c) => &c.name,
        };
        non_empty(name)
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
