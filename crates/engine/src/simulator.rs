//! Workflow dry-run simulator.
//!
//! `WorkflowSimulator` walks the graph once, from the Start node, and
//! records a human-readable [`Step`] for every node it visits:
//! 1. Each node contributes the message its kind renders.
//! 2. The walk always follows a node's *first* outgoing edge; conditions are
//!    announced but never evaluated against the context.
//! 3. Reaching an End node completes the run; every other stop (no start,
//!    dead end, dangling edge, step ceiling) is recorded as a trace entry
//!    and reported as `completed: false`.
//!
//! Nothing here fails: anomalies are data in the trace.

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::{debug, info, instrument, warn};

use nodes::NodeKind;

use crate::graph::GraphIndex;
use crate::models::{Context, Edge, Node};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning knobs for the simulator.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Upper bound on visited nodes; guards against cyclic graphs that were
    /// never validated.  Graphs with more nodes than this get a ceiling
    /// equal to their node count.
    pub max_steps: usize,
}

impl SimulatorConfig {
    pub const DEFAULT_MAX_STEPS: usize = 1000;
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }
}

// ---------------------------------------------------------------------------
// Trace entries
// ---------------------------------------------------------------------------

/// One line of simulated-execution output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// `"-"` when the entry is not tied to a node.
    pub node_id: String,
    /// `None` when the entry is not tied to a node; serialised as `"-"`.
    #[serde(serialize_with = "kind_or_dash")]
    pub node_kind: Option<NodeKind>,
    pub message: String,
}

impl Step {
    fn at(node: &Node, message: impl Into<String>) -> Self {
        Self {
            node_id: node.id.clone(),
            node_kind: Some(node.kind()),
            message: message.into(),
        }
    }

    fn visit(node: &Node) -> Self {
        Self::at(node, node.config.describe(&node.id))
    }

    fn detached(message: impl Into<String>) -> Self {
        Self {
            node_id: "-".to_owned(),
            node_kind: None,
            message: message.into(),
        }
    }
}

/// Renders the way the simulation panel lists steps:
/// `[TASK] Task: "Review" assigned to Bob (due: N/A) (node: t1)`.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self
            .node_kind
            .map(|k| k.as_str().to_uppercase())
            .unwrap_or_else(|| "-".to_owned());
        write!(f, "[{kind}] {} (node: {})", self.message, self.node_id)
    }
}

fn kind_or_dash<S>(kind: &Option<NodeKind>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match kind {
        Some(kind) => kind.serialize(serializer),
        None => serializer.serialize_str("-"),
    }
}

/// The outcome of a dry run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub steps: Vec<Step>,
    /// True only when the walk reached an End node.
    pub completed: bool,
}

impl SimulationResult {
    fn stopped(steps: Vec<Step>) -> Self {
        Self {
            steps,
            completed: false,
        }
    }
}

// ---------------------------------------------------------------------------
// WorkflowSimulator
// ---------------------------------------------------------------------------

/// Stateless walker; one instance can serve any number of runs.
#[derive(Debug, Clone, Default)]
pub struct WorkflowSimulator {
    config: SimulatorConfig,
}

impl WorkflowSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Walk the graph from its Start node and return the trace.
    ///
    /// `context` is accepted for future condition evaluation; branching does
    /// not read it.
    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn run(&self, nodes: &[Node], edges: &[Edge], context: &Context) -> SimulationResult {
        debug!("context carries {} key(s); not consulted for branching", context.len());

        let index = GraphIndex::build(nodes, edges);
        let mut steps = Vec::new();

        let Some(start) = nodes.iter().find(|n| n.kind() == NodeKind::Start) else {
            warn!("no start node defined");
            steps.push(Step::detached("No start node defined."));
            return SimulationResult::stopped(steps);
        };

        // An acyclic walk visits each node at most once, so the ceiling
        // never drops below the node count.
        let ceiling = self.config.max_steps.max(nodes.len());
        let mut current = start;

        loop {
            let kind = current.kind();
            let step = Step::visit(current);
            debug!("{step}");
            steps.push(step);

            if kind == NodeKind::End {
                info!("workflow completed at '{}' after {} step(s)", current.id, steps.len());
                return SimulationResult {
                    steps,
                    completed: true,
                };
            }

            let Some(&edge) = index.outgoing(&current.id).first() else {
                warn!("node '{}' has no outgoing edge", current.id);
                // A condition with no branch just stops; other kinds say why.
                if kind != NodeKind::Condition {
                    steps.push(Step::at(current, "No outgoing edge – stopping."));
                }
                return SimulationResult::stopped(steps);
            };

            let Some(next) = index.node(&edge.target) else {
                warn!("edge from '{}' targets missing node '{}'", current.id, edge.target);
                steps.push(Step::at(
                    current,
                    format!("Next node \"{}\" does not exist – stopping.", edge.target),
                ));
                return SimulationResult::stopped(steps);
            };

            if steps.len() >= ceiling {
                warn!(
                    "step ceiling of {ceiling} reached at '{}'; graph is probably cyclic",
                    current.id
                );
                steps.push(Step::at(
                    current,
                    format!("Exceeded maximum of {ceiling} steps – stopping."),
                ));
                return SimulationResult::stopped(steps);
            }

            current = next;
        }
    }
}

/// Dry-run the graph with the default configuration.
pub fn simulate(nodes: &[Node], edges: &[Edge], context: &Context) -> SimulationResult {
    WorkflowSimulator::default().run(nodes, edges, context)
}
