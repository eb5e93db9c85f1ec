//! The closed set of step kinds a workflow graph can contain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::NodeError;

/// The type of a workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Entry point; exactly one per workflow.
    Start,
    /// Human task assigned to someone.
    Task,
    /// Sign-off by an approver role.
    Approval,
    /// System action picked from the action catalog.
    Automated,
    /// Branch point.
    Condition,
    /// Terminal step.
    End,
}

impl NodeKind {
    /// All kinds, in palette order.
    pub const ALL: [NodeKind; 6] = [
        NodeKind::Start,
        NodeKind::Task,
        NodeKind::Approval,
        NodeKind::Automated,
        NodeKind::Condition,
        NodeKind::End,
    ];

    /// Lower-case wire name (`"start"`, `"task"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::Task => "task",
            NodeKind::Approval => "approval",
            NodeKind::Automated => "automated",
            NodeKind::Condition => "condition",
            NodeKind::End => "end",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NodeError::UnknownKind(s.to_owned()))
    }
}
