//! Per-call adjacency index over a workflow snapshot.
//!
//! Nodes and edges stay in their flat, insertion-ordered slices; the index
//! only borrows them, so it is built once per validate/simulate call and
//! dropped with it.

use std::collections::HashMap;

use nodes::NodeKind;

use crate::models::{Edge, Node};

pub struct GraphIndex<'a> {
    nodes: &'a [Node],
    by_id: HashMap<&'a str, &'a Node>,
    outgoing: HashMap<&'a str, Vec<&'a Edge>>,
}

impl<'a> GraphIndex<'a> {
    pub fn build(nodes: &'a [Node], edges: &'a [Edge]) -> Self {
        // Later duplicates shadow earlier ones, as in a plain id → node map.
        let by_id = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

        let mut outgoing: HashMap<&str, Vec<&Edge>> = HashMap::new();
        for edge in edges {
            outgoing.entry(edge.source.as_str()).or_default().push(edge);
        }

        Self {
            nodes,
            by_id,
            outgoing,
        }
    }

    pub fn nodes(&self) -> &'a [Node] {
        self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&'a Node> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Outgoing edges of `id` in insertion order.
    pub fn outgoing(&self, id: &str) -> &[&'a Edge] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &'a Node> {
        self.nodes.iter().filter(move |n| n.kind() == kind)
    }
}
