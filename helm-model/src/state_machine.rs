//! StateMachine - contract with the replicated state machine
//!
//! The state machine materializes committed commands and executes local
//! queries. It is agnostic to the log envelope: both paths deal in opaque
//! payload bytes and write results into a caller-visible output stream.

use crate::stream::WriteStream;
use std::sync::Arc;

/// What the apply step did with the output stream it was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamDisposition {
    /// Output for this command is complete; the registration can be
    /// released immediately.
    Complete,
    /// The state machine retained the stream for further asynchronous
    /// output; completion is signalled later through the `StreamTable`
    /// capability it holds.
    Retained,
}

/// A replicated state machine consumed through its contract.
///
/// `apply` runs on every replica when an entry commits; `query` runs
/// locally, bypassing consensus entirely.
pub trait StateMachine: Send + Sync {
    /// The specific error type reported by this state machine.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Apply a committed command, writing results into `stream`.
    ///
    /// An `Err` is a semantic rejection of a durably ordered command; it is
    /// surfaced to the submitting caller as an application-level failure.
    fn apply(
        &self,
        payload: &[u8],
        stream: Arc<dyn WriteStream>,
    ) -> Result<StreamDisposition, Self::Error>;

    /// Execute a read-only query against current local state, writing
    /// results into `stream`. Stream lifecycle for queries belongs to the
    /// state machine, not the dispatch layer.
    fn query(&self, payload: &[u8], stream: Arc<dyn WriteStream>) -> Result<(), Self::Error>;
}
