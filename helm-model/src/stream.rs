//! Output streams and their correlation identifiers
//!
//! A write command's results are delivered on a caller-supplied output
//! stream, potentially across multiple asynchronous pushes after the write
//! call has already returned. Streams are correlated with committed log
//! entries through a `StreamId` allocated at submission time.

use std::fmt;
use std::sync::Arc;

/// Correlation handle tying a submitted command to its output stream.
///
/// Allocated fresh per write from a process-unique counter; never reused
/// while the corresponding channel may still receive output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamId(pub u64);

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A caller-visible output channel for command and query results.
///
/// Implementations must tolerate concurrent `send`/`close` calls: the
/// synchronous failure path and the asynchronous completion path can race.
pub trait WriteStream: Send + Sync {
    /// Deliver one result item. Returns `false` if the receiving side is
    /// gone or the stream has been closed; delivery failure is not an error
    /// the apply path acts on.
    fn send(&self, value: Vec<u8>) -> bool;

    /// Signal end-of-stream to the receiver. Idempotent.
    fn close(&self);
}

/// Lookup/release capability over registered streams.
///
/// This is the only surface the state-machine side of the seam holds: a
/// back-reference for routing committed-entry output and signalling
/// completion, never ownership of the registry itself.
pub trait StreamTable: Send + Sync {
    /// The registered channel for `id`, or `None` if it was already
    /// released or never registered. A miss is non-fatal: duplicate or late
    /// notifications legitimately arrive after normal completion.
    fn lookup(&self, id: StreamId) -> Option<Arc<dyn WriteStream>>;

    /// Remove the registration for `id` and close its channel. Idempotent.
    fn release(&self, id: StreamId);
}

/// A sink that discards everything.
///
/// Stands in for the registered stream on replicas that never held one:
/// every node applies committed entries, only the submitting node has a
/// registration for the entry's stream id.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStream;

impl WriteStream for NullStream {
    fn send(&self, _value: Vec<u8>) -> bool {
        false
    }

    fn close(&self) {}
}
