/// Per-agent result of a dispatch. An agent produces exactly one outcome per
/// query; a failure carries a short user-safe message instead of the raw
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentOutcome {
    Success(String),
    Failure(String),
}

impl AgentOutcome {
    /// The user-facing text of the outcome, whether it succeeded or not.
    pub fn text(&self) -> &str {
        match self {
            AgentOutcome::Success(text) => text,
            AgentOutcome::Failure(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AgentOutcome::Success(_))
    }
}
