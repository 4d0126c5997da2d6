//! Helm Model
//!
//! Pure data types and traits for the helm dispatch layer, decoupled from
//! the consensus engine, the state machine, and any runtime. The dispatch
//! crate and its collaborators meet through the contracts defined here.

pub mod clock;
pub mod consensus;
pub mod state_machine;
pub mod stream;
pub mod transport;

// Re-exports
pub use clock::{Clock, MockClock, SystemClock};
pub use consensus::{ApplyError, ApplyOutcome, ConsensusEngine, SubmitError};
pub use state_machine::{StateMachine, StreamDisposition};
pub use stream::{NullStream, StreamId, StreamTable, WriteStream};
pub use transport::TransportId;
