//! Helm Dispatch
//!
//! Client-facing dispatch layer sitting in front of a replicated state
//! machine driven by an external consensus engine. Provides:
//! - Write submission: payloads wrapped into timestamped, stream-tagged
//!   entries, ordered through consensus, outcome resolved synchronously
//! - Read execution: queries forwarded straight to the state machine
//! - Leader discovery: transport identities translated to client-facing
//!   addresses
//! - Stream correlation: output channels registered per write so results
//!   can keep arriving after the acknowledgment

pub mod applier;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod leader;
pub mod registry;
pub mod stream;

// Re-exports
pub use applier::EntryApplier;
pub use client::DispatchClient;
pub use codec::{EncodeError, MAX_PAYLOAD_BYTES};
pub use config::{ClusterMembers, DispatchConfig};
pub use error::WriteError;
pub use leader::LeaderResolver;
pub use registry::StreamRegistry;
pub use stream::ChannelStream;
