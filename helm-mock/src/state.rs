//! EchoState - a minimal state machine for dispatch tests
//!
//! Applies commands by echoing the payload back on the output stream and
//! keeps a log of everything applied. Payloads starting with `reject:` are
//! semantically rejected; queries echo the payload prefixed with `query:`.

use helm_model::{StateMachine, StreamDisposition, WriteStream};
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EchoStateError {
    #[error("command rejected: {0}")]
    Rejected(String),
}

/// State machine that echoes payloads and records what it applied.
#[derive(Default)]
pub struct EchoState {
    applied: Mutex<Vec<Vec<u8>>>,
}

impl EchoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads applied so far, in commit order.
    pub fn applied(&self) -> Vec<Vec<u8>> {
        self.applied.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl StateMachine for EchoState {
    type Error = EchoStateError;

    fn apply(
        &self,
        payload: &[u8],
        stream: Arc<dyn WriteStream>,
    ) -> Result<StreamDisposition, Self::Error> {
        if let Some(reason) = payload.strip_prefix(b"reject:") {
            return Err(EchoStateError::Rejected(
                String::from_utf8_lossy(reason).into_owned(),
            ));
        }

        if let Ok(mut applied) = self.applied.lock() {
            applied.push(payload.to_vec());
        }
        stream.send(payload.to_vec());
        Ok(StreamDisposition::Complete)
    }

    fn query(&self, payload: &[u8], stream: Arc<dyn WriteStream>) -> Result<(), Self::Error> {
        if let Some(reason) = payload.strip_prefix(b"reject:") {
            return Err(EchoStateError::Rejected(
                String::from_utf8_lossy(reason).into_owned(),
            ));
        }

        let mut result = b"query:".to_vec();
        result.extend_from_slice(payload);
        stream.send(result);
        stream.close();
        Ok(())
    }
}
