//! Mock consensus engine and state machines for dispatch tests.
//!
//! Provides `MockEngine` - a scriptable `ConsensusEngine` that commits
//! entries through an injectable sink (normally the dispatch layer's
//! applier) or fails on cue - plus `EchoState`, a state machine that
//! echoes payloads back on the output stream, and `RecordingStream`, a
//! `WriteStream` that captures everything for assertions.

mod engine;
mod state;
mod stream;

pub use engine::{CommitSink, MockEngine, SubmitScript};
pub use state::{EchoState, EchoStateError};
pub use stream::RecordingStream;
