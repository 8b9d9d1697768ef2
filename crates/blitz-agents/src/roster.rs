//! The fixed three-agent roster and its starting layout.
//!
//! Homes sit on an equilateral triangle roughly 38 units from the arena
//! center: the human at the bottom, the two bots at the upper left and
//! upper right.

use blitz_types::{Agent, AgentId, AgentKind, Position};

use crate::error::AgentError;

/// The human player's slot.
pub const HUMAN_ID: AgentId = AgentId(1);

/// First bot; also the scripted thief in the tutorial.
pub const ALPHA_ID: AgentId = AgentId(2);

/// Second bot.
pub const SIGMA_ID: AgentId = AgentId(3);

/// Human home, bottom of the triangle.
pub const HUMAN_HOME: Position = Position::new(50.0, 88.0);

/// Bot Alpha home, upper left.
pub const ALPHA_HOME: Position = Position::new(17.0, 31.0);

/// Bot Sigma home, upper right.
pub const SIGMA_HOME: Position = Position::new(83.0, 31.0);

/// Build the starting roster for a run. `player_name` labels the human.
pub fn starting_roster(player_name: &str) -> Vec<Agent> {
    vec![
        Agent::new(
            HUMAN_ID,
            player_name.to_owned(),
            "#3b82f6".to_owned(),
            AgentKind::Human,
            HUMAN_HOME,
        ),
        Agent::new(
            ALPHA_ID,
            "Bot Alpha".to_owned(),
            "#ef4444".to_owned(),
            AgentKind::Bot,
            ALPHA_HOME,
        ),
        Agent::new(
            SIGMA_ID,
            "Bot Sigma".to_owned(),
            "#a855f7".to_owned(),
            AgentKind::Bot,
            SIGMA_HOME,
        ),
    ]
}

/// Look up an agent by id.
pub fn find(agents: &[Agent], id: AgentId) -> Result<&Agent, AgentError> {
    agents
        .iter()
        .find(|a| a.id == id)
        .ok_or(AgentError::AgentNotFound(id))
}

/// Look up an agent by id for mutation.
pub fn find_mut(agents: &mut [Agent], id: AgentId) -> Result<&mut Agent, AgentError> {
    agents
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or(AgentError::AgentNotFound(id))
}

/// The human-controlled agent.
pub fn human(agents: &[Agent]) -> Result<&Agent, AgentError> {
    agents
        .iter()
        .find(|a| a.kind == AgentKind::Human)
        .ok_or(AgentError::NoHumanAgent)
}

/// The leader: the agent whose score is strictly higher than every other
/// agent's. Ties mean nobody leads.
pub fn leader(agents: &[Agent]) -> Option<AgentId> {
    let top = agents.iter().max_by_key(|a| a.score)?;
    let tied = agents.iter().filter(|a| a.score == top.score).count();
    (tied == 1).then_some(top.id)
}
