//! Entry codec - envelope construction and serialization
//!
//! Builds the `Entry` envelope for one write command and serializes it for
//! the consensus log. Pure and deterministic; the only failure is a payload
//! the wire format will not carry.

use helm_model::StreamId;
use helm_proto::log::Entry;
use prost::Message;
use thiserror::Error;

/// Upper bound on a single command payload.
///
/// Consensus engines replicate entries whole; an unbounded payload would be
/// ordered and fanned out to every replica in one piece.
pub const MAX_PAYLOAD_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("payload of {len} bytes exceeds the {max} byte entry limit")]
    PayloadTooLarge { len: usize, max: usize },
}

/// Serialize one write command into its log envelope.
///
/// `timestamp_ms` is advisory submission metadata; it never participates in
/// ordering. Errors are surfaced to the caller, never retried here.
pub fn encode(
    payload: Vec<u8>,
    stream_id: StreamId,
    timestamp_ms: u64,
) -> Result<Vec<u8>, EncodeError> {
    if payload.len() > MAX_PAYLOAD_BYTES {
        return Err(EncodeError::PayloadTooLarge {
            len: payload.len(),
            max: MAX_PAYLOAD_BYTES,
        });
    }

    let entry = Entry {
        payload,
        stream_id: stream_id.0,
        timestamp_ms,
    };
    Ok(entry.encode_to_vec())
}
