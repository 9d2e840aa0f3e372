#[derive(thiserror::Error, Debug)]
pub enum LockstepError {
    #[error("Barrier: party count must be at least 1")]
    ZeroParties,

    #[error("Team: barrier expects {parties} parties but {agents} agents were added")]
    PartyMismatch { parties: usize, agents: usize },

    #[error("Team: exactly one agent must own the step clock, found {0}")]
    ClockOwners(usize),

    #[error("Team: agent {0} panicked")]
    AgentPanicked(String),

    #[error("Team: failed to spawn thread for agent {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
