//! Error types for the blitz-agents crate.
//!
//! The roster is fixed at world creation, so every lookup failure here is a
//! programming error. Callers propagate it and the runner stops the run.

use blitz_types::AgentId;

/// Errors that can occur during agent operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AgentError {
    /// Agent with the given ID is not in the roster.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// The roster does not contain a human-controlled agent.
    #[error("roster has no human agent")]
    NoHumanAgent,
}
