//! EntryApplier - routes committed log entries into registered streams
//!
//! Every replica applies committed entries, but only the node that
//! submitted a command holds a stream registration for it. The applier
//! decodes the envelope, finds the registered stream (or a discarding sink
//! on every other replica), and hands the payload to the state machine.
//! It sits on the apply side of the seam: the consensus engine's apply
//! hook calls into it, and its outcome is what `submit` resolves with.

use crate::registry::StreamRegistry;
use helm_model::{
    ApplyError, ApplyOutcome, NullStream, StateMachine, StreamDisposition, StreamId, StreamTable,
    WriteStream,
};
use helm_proto::log::Entry;
use prost::Message;
use std::sync::Arc;
use tracing::{debug, warn};

/// Apply-side router from committed entries to state machine and streams.
pub struct EntryApplier<S> {
    streams: Arc<StreamRegistry>,
    state: Arc<S>,
}

impl<S: StateMachine> EntryApplier<S> {
    pub fn new(streams: Arc<StreamRegistry>, state: Arc<S>) -> Self {
        Self { streams, state }
    }

    /// Apply one committed entry.
    ///
    /// A decode failure means the log carries bytes this layer never
    /// produced; it is surfaced, not guessed at. A registration miss is
    /// normal (non-submitting replica, or output already completed) and
    /// falls back to `NullStream`.
    pub fn apply(&self, committed: &[u8]) -> Result<ApplyOutcome, prost::DecodeError> {
        let entry = Entry::decode(committed)?;
        let id = StreamId(entry.stream_id);

        let stream: Arc<dyn WriteStream> = match self.streams.lookup(id) {
            Some(stream) => stream,
            None => Arc::new(NullStream),
        };

        match self.state.apply(&entry.payload, stream) {
            Ok(StreamDisposition::Complete) => {
                self.streams.release(id);
                Ok(ApplyOutcome::Applied)
            }
            Ok(StreamDisposition::Retained) => {
                debug!(stream_id = %id, "State machine retained stream for async output");
                Ok(ApplyOutcome::Applied)
            }
            Err(e) => {
                // Semantic rejection of a committed command. The registration
                // stays; completion is still the state machine's to signal.
                warn!(stream_id = %id, error = %e, "Committed command rejected by state machine");
                Ok(ApplyOutcome::Rejected(ApplyError(e.to_string())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use std::sync::Mutex;

    struct RecordingState {
        applied: Mutex<Vec<Vec<u8>>>,
        disposition: StreamDisposition,
        reject: bool,
    }

    impl RecordingState {
        fn new(disposition: StreamDisposition) -> Self {
            Self {
                applied: Mutex::new(Vec::new()),
                disposition,
                reject: false,
            }
        }

        fn rejecting() -> Self {
            Self {
                applied: Mutex::new(Vec::new()),
                disposition: StreamDisposition::Complete,
                reject: true,
            }
        }
    }

    impl StateMachine for RecordingState {
        type Error = std::io::Error;

        fn apply(
            &self,
            payload: &[u8],
            stream: Arc<dyn WriteStream>,
        ) -> Result<StreamDisposition, Self::Error> {
            if self.reject {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "rejected",
                ));
            }
            self.applied.lock().unwrap().push(payload.to_vec());
            stream.send(payload.to_vec());
            Ok(self.disposition)
        }

        fn query(&self, _payload: &[u8], _stream: Arc<dyn WriteStream>) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn encoded(payload: &[u8], id: StreamId) -> Vec<u8> {
        codec::encode(payload.to_vec(), id, 0).unwrap()
    }

    #[test]
    fn test_apply_routes_payload_and_releases_on_complete() {
        let registry = Arc::new(StreamRegistry::new());
        let state = Arc::new(RecordingState::new(StreamDisposition::Complete));
        let applier = EntryApplier::new(registry.clone(), state.clone());

        let (stream, _rx) = crate::stream::ChannelStream::unbounded();
        let id = registry.register(stream);

        let outcome = applier.apply(&encoded(b"cmd", id)).unwrap();
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(state.applied.lock().unwrap().as_slice(), &[b"cmd".to_vec()]);
        assert!(registry.lookup(id).is_none());
    }

    #[test]
    fn test_retained_stream_stays_registered() {
        let registry = Arc::new(StreamRegistry::new());
        let state = Arc::new(RecordingState::new(StreamDisposition::Retained));
        let applier = EntryApplier::new(registry.clone(), state);

        let (stream, _rx) = crate::stream::ChannelStream::unbounded();
        let id = registry.register(stream);

        applier.apply(&encoded(b"cmd", id)).unwrap();
        assert!(registry.lookup(id).is_some());
    }

    #[test]
    fn test_rejection_leaves_registration_untouched() {
        let registry = Arc::new(StreamRegistry::new());
        let applier = EntryApplier::new(registry.clone(), Arc::new(RecordingState::rejecting()));

        let (stream, _rx) = crate::stream::ChannelStream::unbounded();
        let id = registry.register(stream);

        let outcome = applier.apply(&encoded(b"cmd", id)).unwrap();
        assert!(matches!(outcome, ApplyOutcome::Rejected(_)));
        assert!(registry.lookup(id).is_some());
    }

    #[test]
    fn test_unregistered_stream_id_still_applies() {
        let registry = Arc::new(StreamRegistry::new());
        let state = Arc::new(RecordingState::new(StreamDisposition::Complete));
        let applier = EntryApplier::new(registry, state.clone());

        let outcome = applier.apply(&encoded(b"cmd", StreamId(404))).unwrap();
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(state.applied.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_garbage_bytes_fail_decode() {
        let registry = Arc::new(StreamRegistry::new());
        let state = Arc::new(RecordingState::new(StreamDisposition::Complete));
        let applier = EntryApplier::new(registry, state);

        assert!(applier.apply(&[0xff, 0xff, 0xff, 0xff]).is_err());
    }
}
