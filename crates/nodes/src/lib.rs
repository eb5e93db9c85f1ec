//! `nodes` crate — the vocabulary of workflow steps.
//!
//! Every step in a workflow graph is one of six [`NodeKind`]s, each carrying
//! its own [`NodeConfig`] shape.  Kind-specific behaviour (default
//! configuration, labels, trace messages) is a match over that union.

pub mod config;
pub mod describe;
pub mod error;
pub mod kind;

pub use config::NodeConfig;
pub use error::NodeError;
pub use kind::NodeKind;
