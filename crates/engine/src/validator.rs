//! Graph validation — run this before simulating a workflow.
//!
//! Rules enforced, in reporting order:
//! 1. The workflow has at least one node (otherwise nothing else is checked).
//! 2. Exactly one Start node.
//! 3. At least one End node.
//! 4. The Start node has no incoming edges.
//! 5. Every non-End node has an outgoing edge.
//! 6. Every node is reachable from Start.
//! 7. The graph is acyclic (one message at most).
//! 8. Node IDs are unique.
//! 9. Every edge references existing nodes.
//!
//! All checks run; the caller gets the complete list of problems at once.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use nodes::NodeKind;

use crate::graph::GraphIndex;
use crate::models::{Edge, Node};
use crate::ValidationIssue;

/// Validate the graph and return human-readable error messages.
///
/// An empty list means the graph is structurally valid.
pub fn validate(nodes: &[Node], edges: &[Edge]) -> Vec<String> {
    validate_graph(nodes, edges)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Typed form of [`validate`].
pub fn validate_graph(nodes: &[Node], edges: &[Edge]) -> Vec<ValidationIssue> {
    if nodes.is_empty() {
        return vec![ValidationIssue::EmptyWorkflow];
    }

    let index = GraphIndex::build(nodes, edges);
    let mut issues = Vec::new();

    // -----------------------------------------------------------------------
    // Start / End cardinality
    // -----------------------------------------------------------------------
    let starts: Vec<&Node> = index.nodes_of_kind(NodeKind::Start).collect();
    match starts.len() {
        0 => issues.push(ValidationIssue::MissingStart),
        1 => {}
        _ => issues.push(ValidationIssue::MultipleStarts),
    }

    if index.nodes_of_kind(NodeKind::End).next().is_none() {
        issues.push(ValidationIssue::MissingEnd);
    }

    let single_start = match starts.as_slice() {
        [start] => Some(*start),
        _ => None,
    };

    if let Some(start) = single_start {
        if edges.iter().any(|e| e.target == start.id) {
            issues.push(ValidationIssue::StartHasIncoming);
        }
    }

    // -----------------------------------------------------------------------
    // Dead ends
    // -----------------------------------------------------------------------
    for node in nodes {
        if node.kind() != NodeKind::End && index.outgoing(&node.id).is_empty() {
            issues.push(ValidationIssue::NoOutgoing { label: node.label() });
        }
    }

    // -----------------------------------------------------------------------
    // Reachability from Start
    // -----------------------------------------------------------------------
    if let Some(start) = single_start {
        let reached = reachable_from(&index, &start.id);
        for node in nodes {
            if !reached.contains(node.id.as_str()) {
                issues.push(ValidationIssue::Unreachable { label: node.label() });
            }
        }
    }

    // -----------------------------------------------------------------------
    // Cycles, over every node rather than only the reachable ones
    // -----------------------------------------------------------------------
    if has_cycle(&index) {
        issues.push(ValidationIssue::CycleDetected);
    }

    // -----------------------------------------------------------------------
    // Identity and edge endpoints
    // -----------------------------------------------------------------------
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut reported: HashSet<&str> = HashSet::new();
    for node in nodes {
        let id = node.id.as_str();
        if !seen_ids.insert(id) && reported.insert(id) {
            issues.push(ValidationIssue::DuplicateNodeId(node.id.clone()));
        }
    }

    let mut unknown: HashSet<&str> = HashSet::new();
    for edge in edges {
        for endpoint in [edge.source.as_str(), edge.target.as_str()] {
            if !index.contains(endpoint) && unknown.insert(endpoint) {
                issues.push(ValidationIssue::UnknownNodeReference {
                    node_id: endpoint.to_owned(),
                });
            }
        }
    }

    debug!(
        "validated {} nodes / {} edges: {} issue(s)",
        nodes.len(),
        edges.len(),
        issues.len()
    );

    issues
}

/// Breadth-first walk along outgoing edges.
fn reachable_from<'a>(index: &GraphIndex<'a>, start_id: &'a str) -> HashSet<&'a str> {
    let mut visited: HashSet<&str> = HashSet::from([start_id]);
    let mut queue: VecDeque<&str> = VecDeque::from([start_id]);

    while let Some(current) = queue.pop_front() {
        for &edge in index.outgoing(current) {
            let target = edge.target.as_str();
            if visited.insert(target) {
                queue.push_back(target);
            }
        }
    }

    visited
}

/// Depth-first search tracking the nodes on the current path; an edge back
/// onto that path is a cycle.
///
/// Iterative so that long chains cannot overflow the call stack.
fn has_cycle(index: &GraphIndex<'_>) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_path: HashSet<&str> = HashSet::new();

    for root in index.nodes() {
        let root = root.id.as_str();
        if !visited.insert(root) {
            continue;
        }
        on_path.insert(root);

        // (node, index of the next outgoing edge to explore)
        let mut stack: Vec<(&str, usize)> = vec![(root, 0)];

        while let Some(&(node_id, next)) = stack.last() {
            match index.outgoing(node_id).get(next).copied() {
                Some(edge) => {
                    let top = stack.len() - 1;
                    stack[top].1 += 1;

                    let target = edge.target.as_str();
                    if on_path.contains(target) {
                        return true;
                    }
                    if visited.insert(target) {
                        on_path.insert(target);
                        stack.push((target, 0));
                    }
                }
                None => {
                    on_path.remove(node_id);
                    stack.pop();
                }
            }
        }
    }

    false
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use nodes::config::{EndConfig, TaskConfig};
    use nodes::NodeConfig;

    fn make_node(id: &str, kind: NodeKind) -> Node {
        Node::new(id, NodeConfig::default_for(kind))
    }

    fn unnamed(id: &str, kind: NodeKind) -> Node {
        let config = match kind {
            NodeKind::Task => NodeConfig::Task(TaskConfig::default()),
            NodeKind::End => NodeConfig::End(EndConfig::default()),
            other => NodeConfig::default_for(other),
        };
        Node::new(id, config)
    }

    fn edge(from: &str, to: &str) -> Edge {
        Edge::new(from, to)
    }

    #[test]
    fn empty_workflow_short_circuits() {
        assert_eq!(validate(&[], &[]), vec!["Workflow is empty."]);
        assert_eq!(validate(&[], &[edge("a", "b")]), vec!["Workflow is empty."]);
    }

    #[test]
    fn valid_linear_workflow_has_no_errors() {
        let nodes = vec![
            make_node("s1", NodeKind::Start),
            make_node("t1", NodeKind::Task),
            make_node("e1", NodeKind::End),
        ];
        let edges = vec![edge("s1", "t1"), edge("t1", "e1")];
        assert!(validate(&nodes, &edges).is_empty());
    }

    #[test]
    fn valid_diamond_workflow_has_no_errors() {
        //     s
        //     |
        //     c
        //    / \
        //   a   b
        //    \ /
        //     e
        let nodes = vec![
            make_node("s", NodeKind::Start),
            make_node("c", NodeKind::Condition),
            make_node("a", NodeKind::Approval),
            make_node("b", NodeKind::Automated),
            make_node("e", NodeKind::End),
        ];
        let edges = vec![
            edge("s", "c"),
            edge("c", "a"),
            edge("c", "b"),
            edge("a", "e"),
            edge("b", "e"),
        ];
        assert!(validate(&nodes, &edges).is_empty());
    }

    #[test]
    fn missing_start_and_end_are_both_reported() {
        let nodes = vec![make_node("t1", NodeKind::Task)];
        let issues = validate_graph(&nodes, &[]);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::MissingStart,
                ValidationIssue::MissingEnd,
                ValidationIssue::NoOutgoing { label: "Task".into() },
            ]
        );
    }

    #[test]
    fn two_starts_still_run_remaining_checks() {
        let nodes = vec![
            make_node("s1", NodeKind::Start),
            make_node("s2", NodeKind::Start),
            unnamed("t1", NodeKind::Task),
            make_node("e1", NodeKind::End),
        ];
        let edges = vec![edge("s1", "e1"), edge("s2", "e1"), edge("t1", "t1")];

        let errors = validate(&nodes, &edges);
        assert!(errors.contains(&"Workflow can only have one Start node.".to_string()));
        // No single start, so reachability is skipped, but the cycle check runs.
        assert!(errors.contains(&"Workflow contains at least one cycle.".to_string()));
        assert!(!errors.iter().any(|e| e.contains("unreachable")));
    }

    #[test]
    fn back_edge_into_start_reports_incoming_and_cycle() {
        let nodes = vec![
            make_node("s", NodeKind::Start),
            make_node("a", NodeKind::Task),
            make_node("e", NodeKind::End),
        ];
        let edges = vec![edge("s", "a"), edge("a", "s"), edge("a", "e")];

        let issues = validate_graph(&nodes, &edges);
        assert!(issues.contains(&ValidationIssue::StartHasIncoming));
        assert!(issues.contains(&ValidationIssue::CycleDetected));
    }

    #[test]
    fn dead_end_is_named_but_end_nodes_are_exempt() {
        let nodes = vec![
            make_node("s", NodeKind::Start),
            unnamed("t1", NodeKind::Task),
            unnamed("e1", NodeKind::End),
        ];
        let edges = vec![edge("s", "t1"), edge("s", "e1")];

        assert_eq!(
            validate(&nodes, &edges),
            vec!["Node \"task (t1)\" has no outgoing connections."]
        );
    }

    #[test]
    fn each_unreachable_node_is_reported_once() {
        let nodes = vec![
            make_node("s", NodeKind::Start),
            make_node("e", NodeKind::End),
            unnamed("x", NodeKind::Task),
            unnamed("y", NodeKind::End),
        ];
        let edges = vec![edge("s", "e"), edge("x", "y"), edge("x", "e")];

        let issues = validate_graph(&nodes, &edges);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::Unreachable { label: "task (x)".into() },
                ValidationIssue::Unreachable { label: "end (y)".into() },
            ]
        );
    }

    #[test]
    fn many_cycles_yield_a_single_message() {
        let nodes = vec![
            make_node("s", NodeKind::Start),
            make_node("a", NodeKind::Task),
            make_node("b", NodeKind::Task),
            make_node("c", NodeKind::Task),
            make_node("e", NodeKind::End),
        ];
        let edges = vec![
            edge("s", "a"),
            edge("a", "b"),
            edge("b", "a"),
            edge("b", "c"),
            edge("c", "c"),
            edge("c", "e"),
        ];

        let cycles = validate_graph(&nodes, &edges)
            .into_iter()
            .filter(|i| *i == ValidationIssue::CycleDetected)
            .count();
        assert_eq!(cycles, 1);
    }

    #[test]
    fn cycle_outside_reachable_region_is_detected() {
        let nodes = vec![
            make_node("s", NodeKind::Start),
            make_node("e", NodeKind::End),
            make_node("x", NodeKind::Task),
            make_node("y", NodeKind::Task),
        ];
        let edges = vec![edge("s", "e"), edge("x", "y"), edge("y", "x")];

        let issues = validate_graph(&nodes, &edges);
        assert!(issues.contains(&ValidationIssue::CycleDetected));
    }

    #[test]
    fn shared_descendant_is_not_a_cycle() {
        // Two paths into the same node revisit it but never loop.
        let nodes = vec![
            make_node("s", NodeKind::Start),
            make_node("a", NodeKind::Task),
            make_node("e", NodeKind::End),
        ];
        let edges = vec![edge("s", "a"), edge("s", "e"), edge("a", "e")];
        assert!(validate_graph(&nodes, &edges).is_empty());
    }

    #[test]
    fn duplicate_ids_and_unknown_endpoints_are_reported() {
        let nodes = vec![
            make_node("s", NodeKind::Start),
            make_node("e", NodeKind::End),
            make_node("e", NodeKind::End),
        ];
        let edges = vec![edge("s", "e"), edge("s", "ghost")];

        let issues = validate_graph(&nodes, &edges);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::DuplicateNodeId("e".into()),
                ValidationIssue::UnknownNodeReference { node_id: "ghost".into() },
            ]
        );
    }

    #[test]
    fn incoming_edge_check_is_skipped_with_several_starts() {
        let nodes = vec![
            make_node("s1", NodeKind::Start),
            make_node("s2", NodeKind::Start),
            make_node("e", NodeKind::End),
        ];
        // s2 has an incoming edge, but with two starts there is no single one to check.
        let edges = vec![edge("s1", "s2"), edge("s2", "e")];

        let issues = validate_graph(&nodes, &edges);
        assert_eq!(issues, vec![ValidationIssue::MultipleStarts]);
        assert!(!validate(&nodes, &edges)
            .contains(&"Start node cannot have incoming connections.".to_string()));
    }

    #[test]
    fn core_checks_are_reported_before_identity_checks() {
        let nodes = vec![
            make_node("s", NodeKind::Start),
            unnamed("t", NodeKind::Task),
            unnamed("t", NodeKind::Task),
        ];
        let edges = vec![edge("s", "t"), edge("t", "ghost")];

        assert_eq!(
            validate(&nodes, &edges),
            vec![
                "Workflow should have at least one End node.",
                "Duplicate node id \"t\".",
                "Connection references unknown node \"ghost\".",
            ]
        );

        let orphan = vec![
            make_node("s", NodeKind::Start),
            make_node("e", NodeKind::End),
            unnamed("x", NodeKind::Task),
        ];
        let edges = vec![edge("s", "e"), edge("x", "missing")];
        assert_eq!(
            validate_graph(&orphan, &edges),
            vec![
                ValidationIssue::Unreachable { label: "task (x)".into() },
                ValidationIssue::UnknownNodeReference { node_id: "missing".into() },
            ]
        );
    }

    #[test]
    fn validation_is_deterministic() {
        let nodes = vec![
            unnamed("t1", NodeKind::Task),
            unnamed("t2", NodeKind::Task),
            make_node("s1", NodeKind::Start),
            make_node("s2", NodeKind::Start),
        ];
        let edges = vec![edge("t1", "t2"), edge("t2", "t1")];

        let first = validate(&nodes, &edges);
        for _ in 0..10 {
            assert_eq!(validate(&nodes, &edges), first);
        }
    }

    #[test]
    fn long_chain_does_not_overflow() {
        let mut nodes = vec![make_node("n0", NodeKind::Start)];
        let mut edges = Vec::new();
        for i in 1..50_000 {
            nodes.push(make_node(&format!("n{i}"), NodeKind::Task));
            edges.push(edge(&format!("n{}", i - 1), &format!("n{i}")));
        }
        nodes.push(make_node("end", NodeKind::End));
        edges.push(edge("n49999", "end"));

        assert!(validate(&nodes, &edges).is_empty());
    }
}
