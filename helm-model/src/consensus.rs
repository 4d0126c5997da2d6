//! ConsensusEngine - contract with the external consensus protocol
//!
//! The engine owns leader election, log replication, and quorum commitment.
//! The dispatch layer consumes it through this trait: leadership queries in
//! the transport namespace and bounded-wait submission of serialized entries.

use crate::transport::TransportId;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Submission failure: the entry is guaranteed not committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("not the leader")]
    NotLeader,

    #[error("submission timed out")]
    Timeout,

    #[error("consensus engine shut down")]
    Shutdown,

    #[error("consensus engine error: {0}")]
    Engine(String),
}

/// Semantic failure reported by the state machine's apply step.
///
/// The entry was durably committed and applied; the command itself was
/// rejected. Distinct from `SubmitError` so callers can tell a
/// never-ordered command from an ordered-but-refused one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ApplyError(pub String);

/// Outcome of a committed entry's application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Applied without a semantic error.
    Applied,
    /// Committed and applied, but rejected by the state machine.
    Rejected(ApplyError),
}

/// External consensus protocol, consumed through its contract only.
pub trait ConsensusEngine: Send + Sync {
    /// Transport identity of the current leader, `None` when no leader is
    /// established (e.g. during an election). A normal transient state.
    fn leader_id(&self) -> Option<TransportId>;

    /// Transport identity of the local node.
    fn local_id(&self) -> TransportId;

    /// Submit a serialized entry for ordered replication, waiting up to
    /// `timeout` for commitment. `Err` means the entry was never committed;
    /// `Ok` carries the apply outcome of the committed entry.
    fn submit(
        &self,
        entry: Vec<u8>,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<ApplyOutcome, SubmitError>> + Send + '_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_error_display() {
        assert_eq!(SubmitError::NotLeader.to_string(), "not the leader");
        assert_eq!(
            SubmitError::Engine("quorum lost".into()).to_string(),
            "consensus engine error: quorum lost"
        );
    }

    #[test]
    fn test_apply_error_display() {
        let err = ApplyError("key not found".into());
        assert_eq!(err.to_string(), "key not found");
    }
}
