//! Error types for the dispatch write path

use crate::codec::EncodeError;
use helm_model::{ApplyError, SubmitError};
use thiserror::Error;

/// Failure of one write submission, surfaced synchronously to the caller.
///
/// The variants stay distinguishable on purpose: `Submission` means the
/// command was never durably ordered, `Application` means it was committed
/// and applied but semantically rejected. Only the caller knows whether
/// re-submission of its payload is safe, so no variant is retried here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("encoding failed: {0}")]
    Encoding(#[from] EncodeError),

    #[error("submission failed: {0}")]
    Submission(#[from] SubmitError),

    #[error("command rejected: {0}")]
    Application(#[from] ApplyError),
}
