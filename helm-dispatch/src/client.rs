//! DispatchClient - the client-facing façade
//!
//! Combines the stream registry, entry codec, and leader resolver to
//! implement write submission through consensus, read execution against
//! local state, and identity/role queries for a calling router.

use crate::codec;
use crate::config::DispatchConfig;
use crate::error::WriteError;
use crate::leader::LeaderResolver;
use crate::registry::StreamRegistry;
use helm_model::{
    ApplyOutcome, Clock, ConsensusEngine, StateMachine, StreamTable, SystemClock, TransportId,
    WriteStream,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Client-facing dispatch layer for one node.
///
/// Writes are ordered through the consensus engine; reads go straight to
/// the state machine. Holds no global state: the stream registry is owned
/// per instance, so clients in the same process never interfere.
pub struct DispatchClient<S> {
    local_id: TransportId,
    engine: Arc<dyn ConsensusEngine>,
    state: Arc<S>,
    streams: Arc<StreamRegistry>,
    resolver: LeaderResolver,
    clock: Arc<dyn Clock>,
    submit_timeout: Duration,
}

impl<S: StateMachine> DispatchClient<S> {
    /// Build a client attached to `engine` and `state`.
    ///
    /// The local transport identity is snapshotted here and immutable for
    /// the life of the client, as is the cluster address table.
    pub fn new(config: DispatchConfig, engine: Arc<dyn ConsensusEngine>, state: Arc<S>) -> Self {
        Self {
            local_id: engine.local_id(),
            engine,
            state,
            streams: Arc::new(StreamRegistry::new()),
            resolver: LeaderResolver::new(config.members.clone()),
            clock: Arc::new(SystemClock),
            submit_timeout: config.submit_timeout(),
        }
    }

    /// Replace the wall clock used for entry timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The registry's lookup/release capability, for wiring the state
    /// machine's apply and completion path.
    pub fn stream_table(&self) -> Arc<StreamRegistry> {
        self.streams.clone()
    }

    /// Submit a write command for ordered replication.
    ///
    /// Resolves once the entry is committed and applied, or once submission
    /// fails; a clean return does not mean `stream` has finished emitting,
    /// only that the command is durable. On submission failure the stream
    /// is force-released (closed); on an application-level rejection the
    /// registration is left for the state machine's completion signal.
    pub async fn write(
        &self,
        payload: Vec<u8>,
        stream: Arc<dyn WriteStream>,
    ) -> Result<(), WriteError> {
        let stream_id = self.streams.register(stream);

        let entry = match codec::encode(payload, stream_id, self.clock.now_ms()) {
            Ok(entry) => entry,
            Err(e) => {
                self.streams.release(stream_id);
                return Err(e.into());
            }
        };

        match self.engine.submit(entry, self.submit_timeout).await {
            Ok(ApplyOutcome::Applied) => {
                debug!(stream_id = %stream_id, "Write committed");
                Ok(())
            }
            Ok(ApplyOutcome::Rejected(e)) => {
                debug!(stream_id = %stream_id, error = %e, "Write committed but rejected");
                Err(e.into())
            }
            Err(e) => {
                // Never ordered: no output can arrive, close the stream now.
                self.streams.release(stream_id);
                warn!(stream_id = %stream_id, error = %e, "Write submission failed");
                Err(e.into())
            }
        }
    }

    /// Execute a read-only query against local state, bypassing consensus.
    ///
    /// The caller's stream goes straight through; no registry entry is
    /// allocated and the query error type is the state machine's own.
    pub fn read(&self, payload: &[u8], stream: Arc<dyn WriteStream>) -> Result<(), S::Error> {
        self.state.query(payload, stream)
    }

    /// Whether this node is currently the leader.
    ///
    /// Both identities are in the transport namespace, so this is a direct
    /// comparison with no address translation.
    pub fn is_leader(&self) -> bool {
        self.engine.leader_id().as_ref() == Some(&self.local_id)
    }

    /// Writes must be routed to a leader-capable path. Always true for
    /// this layer; a calling router uses it to forward non-leader requests
    /// without attempting a doomed submission.
    pub fn requires_leader(&self) -> bool {
        true
    }

    /// Client-facing address of the current leader, `None` while no leader
    /// is established or when the address table does not cover it.
    pub async fn leader_address(&self) -> Option<String> {
        let leader = self.engine.leader_id()?;
        self.resolver.client_address(&leader).await
    }

    /// The local transport identity this client was constructed with.
    pub fn local_id(&self) -> &TransportId {
        &self.local_id
    }
}
