//! Human-readable rendering of nodes: validation labels and trace messages.
//!
//! One match arm per kind; each kind owns its message template.

use crate::config::non_empty;
use crate::NodeConfig;

impl NodeConfig {
    /// Label used in validation messages: the display name, or
    /// `"<kind> (<id>)"` when the node is unnamed.
    pub fn label(&self, node_id: &str) -> String {
        match self.name() {
            Some(name) => name.to_owned(),
            None => format!("{} ({})", self.kind(), node_id),
        }
    }

    /// The trace message produced when a dry run visits this node.
    pub fn describe(&self, node_id: &str) -> String {
        let name = self.name().unwrap_or(node_id);

        match self {
            NodeConfig::Start(_) => format!("Starting workflow at \"{name}\"."),
            NodeConfig::Task(c) => format!(
                "Task: \"{name}\" assigned to {} (due: {})",
                non_empty(&c.assignee).unwrap_or("N/A"),
                non_empty(&c.due_date).unwrap_or("N/A"),
            ),
            NodeConfig::Approval(c) => {
                let threshold = c
                    .auto_approve_threshold
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "none".to_owned());
                format!(
                    "Approval: \"{name}\" by {} (auto-threshold: {threshold})",
                    non_empty(&c.approver_role).unwrap_or("Unknown"),
                )
            }
            NodeConfig::Automated(c) => format!(
                "Automated step: \"{name}\" using action \"{}\"",
                non_empty(&c.action_id).unwrap_or("none"),
            ),
            NodeConfig::Condition(_) => format!("Evaluating condition \"{name}\""),
            NodeConfig::End(c) => format!(
                "Reached end: \"{name}\". Summary flag: {}",
                if c.summary_flag { "ON" } else { "OFF" },
            ),
        }
    }
}
