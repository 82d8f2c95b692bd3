use rapport_core::Provider;
use thiserror::Error;

/// Where a reconciliation session stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// Both providers are in flight.
    Fetching,
    /// Both providers have answered.
    Settled,
    ComparisonPending,
    ComparisonReady,
    /// No comparison will arrive this round: a provider failed or the
    /// comparison service did.
    ComparisonSkipped,
    Selected,
}

impl Phase {
    /// True once both results are in, including every later phase.
    pub fn is_settled(self) -> bool {
        !matches!(self, Phase::Idle | Phase::Fetching)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("provider results are not settled yet")]
    NotSettled,
    #[error("{provider} has no result to select: {reason}")]
    NoPayload { provider: Provider, reason: String },
    #[error("a provider was already selected; regenerate to choose again")]
    AlreadySelected,
}
