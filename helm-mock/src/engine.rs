//! MockEngine - scriptable in-process consensus engine
//!
//! Leadership is a settable field; submission either routes the entry
//! through a commit sink (normally the dispatch applier, simulating
//! quorum commitment followed by local apply) or fails according to a
//! queued script.

use helm_model::{ApplyOutcome, ConsensusEngine, SubmitError, TransportId};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

/// Receives committed entry bytes and produces the apply outcome.
pub type CommitSink = Arc<dyn Fn(&[u8]) -> ApplyOutcome + Send + Sync>;

/// Behavior of the next `submit` call. The default, once the script queue
/// is drained, is `Commit`.
#[derive(Debug, Clone)]
pub enum SubmitScript {
    /// Commit the entry through the sink and resolve with its outcome.
    Commit,
    /// Fail without committing.
    Fail(SubmitError),
}

/// In-process `ConsensusEngine` for tests.
pub struct MockEngine {
    local: TransportId,
    leader: RwLock<Option<TransportId>>,
    script: Mutex<VecDeque<SubmitScript>>,
    committed: Mutex<Vec<Vec<u8>>>,
    sink: RwLock<CommitSink>,
}

impl MockEngine {
    /// Engine with no sink: committed entries are recorded and applied as
    /// a clean no-op.
    pub fn new(local: impl Into<TransportId>) -> Self {
        Self {
            local: local.into(),
            leader: RwLock::new(None),
            script: Mutex::new(VecDeque::new()),
            committed: Mutex::new(Vec::new()),
            sink: RwLock::new(Arc::new(|_: &[u8]| ApplyOutcome::Applied)),
        }
    }

    /// Route commits through `sink` (normally the dispatch applier).
    /// Settable after construction since the applier is usually built from
    /// the client this engine is handed to.
    pub fn set_sink(&self, sink: CommitSink) {
        if let Ok(mut guard) = self.sink.write() {
            *guard = sink;
        }
    }

    /// Set (or clear) the current leader.
    pub fn set_leader(&self, leader: Option<TransportId>) {
        if let Ok(mut guard) = self.leader.write() {
            *guard = leader;
        }
    }

    /// Queue a behavior for an upcoming `submit` call.
    pub fn push_script(&self, script: SubmitScript) {
        if let Ok(mut guard) = self.script.lock() {
            guard.push_back(script);
        }
    }

    /// Entry bytes committed so far, in submission order.
    pub fn committed(&self) -> Vec<Vec<u8>> {
        self.committed
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    fn next_script(&self) -> SubmitScript {
        self.script
            .lock()
            .ok()
            .and_then(|mut s| s.pop_front())
            .unwrap_or(SubmitScript::Commit)
    }
}

impl ConsensusEngine for MockEngine {
    fn leader_id(&self) -> Option<TransportId> {
        self.leader.read().ok().and_then(|l| l.clone())
    }

    fn local_id(&self) -> TransportId {
        self.local.clone()
    }

    fn submit(
        &self,
        entry: Vec<u8>,
        _timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<ApplyOutcome, SubmitError>> + Send + '_>> {
        let script = self.next_script();
        Box::pin(async move {
            match script {
                SubmitScript::Commit => {
                    if let Ok(mut committed) = self.committed.lock() {
                        committed.push(entry.clone());
                    }
                    let Ok(sink) = self.sink.read().map(|s| s.clone()) else {
                        return Ok(ApplyOutcome::Applied);
                    };
                    Ok(sink(&entry))
                }
                SubmitScript::Fail(e) => Err(e),
            }
        })
    }
}
