//! Validate-then-simulate, as one call.
//!
//! A structurally invalid workflow is never walked: the report carries the
//! validation errors and an empty trace instead.

use serde::Serialize;
use tracing::{info, warn};

use crate::models::{Context, Workflow};
use crate::simulator::{SimulatorConfig, Step, WorkflowSimulator};
use crate::validator::validate;

/// Combined result of validation and simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    /// False when validation failed and nothing was simulated.
    pub ok: bool,
    pub structure_errors: Vec<String>,
    pub steps: Vec<Step>,
    pub completed: bool,
}

/// Validate `workflow` and, if it is sound, simulate it.
pub fn dry_run(
    workflow: &Workflow,
    context: &Context,
    config: &SimulatorConfig,
) -> SimulationReport {
    let structure_errors = validate(&workflow.nodes, &workflow.edges);

    if !structure_errors.is_empty() {
        warn!(
            "workflow '{}' failed validation with {} error(s); skipping simulation",
            workflow.name,
            structure_errors.len()
        );
        return SimulationReport {
            ok: false,
            structure_errors,
            steps: Vec::new(),
            completed: false,
        };
    }

    let result =
        WorkflowSimulator::new(config.clone()).run(&workflow.nodes, &workflow.edges, context);
    info!(
        "workflow '{}' simulated: {} step(s), completed = {}",
        workflow.name,
        result.steps.len(),
        result.completed
    );

    SimulationReport {
        ok: true,
        structure_errors,
        steps: result.steps,
        completed: result.completed,
    }
}
