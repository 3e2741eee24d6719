//! Explicit lifecycle state for an acquisition session.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a bound acquisition session.
///
/// Sessions move `Configured -> Started -> Stopped -> Closed`. `Closed` is
/// terminal: the task handle has been released and no operation is valid
/// afterwards. Illegal transitions are rejected with
/// [`AcquireError::InvalidTransition`](crate::error::AcquireError) instead of
/// reaching the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Channel group bound and timing configured; sampling not yet running.
    Configured,
    /// Driver-side sampling is running; reads are valid.
    Started,
    /// Sampling halted; can be restarted.
    Stopped,
    /// Task handle released. Terminal.
    Closed,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SessionState::Configured => "configured",
            SessionState::Started => "started",
            SessionState::Stopped => "stopped",
            SessionState::Closed => "closed",
        };
        write!(f, "{}", label)
    }
}
