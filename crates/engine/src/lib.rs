//! `engine` crate — workflow graph model, structural validation, and the
//! dry-run simulator.
//!
//! Both entry points are pure functions over a caller-owned snapshot:
//! run [`validate`] first, and only [`simulate`] a graph it accepts.

pub mod models;
pub mod error;
pub mod graph;
pub mod validator;
pub mod simulator;
pub mod dry_run;

pub use models::{parse_context, Context, Edge, Node, Workflow};
pub use error::{EngineError, ValidationIssue};
pub use validator::{validate, validate_graph};
pub use simulator::{simulate, SimulationResult, SimulatorConfig, Step, WorkflowSimulator};
pub use dry_run::{dry_run, SimulationReport};
pub use nodes::{NodeConfig, NodeKind};
