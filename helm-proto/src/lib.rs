//! Protobuf definitions for the helm consensus log
//!
//! The messages here are hand-maintained prost types rather than
//! build-script output: the envelope is two fields and a timestamp, and
//! keeping the definitions in-tree avoids a protoc toolchain requirement
//! for every consumer.

/// Log types: the envelope submitted to the consensus log
pub mod log {
    /// Envelope for one write command in the consensus log.
    ///
    /// Created once per write, serialized immediately, never mutated.
    /// `timestamp_ms` is advisory metadata stamped at submission; it is not
    /// monotonic across the cluster and is never used for ordering.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Entry {
        /// Opaque caller-defined command payload.
        #[prost(bytes = "vec", tag = "1")]
        pub payload: Vec<u8>,
        /// Correlation handle for the submitting caller's output stream.
        #[prost(uint64, tag = "2")]
        pub stream_id: u64,
        /// Submission wall clock, milliseconds since the Unix epoch.
        #[prost(uint64, tag = "3")]
        pub timestamp_ms: u64,
    }
}

#[cfg(test)]
mod tests {
    use super::log::Entry;
    use prost::Message;

    #[test]
    fn test_entry_roundtrip() {
        let entry = Entry {
            payload: b"set x = 7".to_vec(),
            stream_id: 19,
            timestamp_ms: 1_720_000_000_123,
        };

        let bytes = entry.encode_to_vec();
        let decoded = Entry::decode(&bytes[..]).unwrap();

        assert_eq!(decoded.payload, b"set x = 7");
        assert_eq!(decoded.stream_id, 19);
        assert_eq!(decoded.timestamp_ms, 1_720_000_000_123);
    }

    #[test]
    fn test_entry_default_fields() {
        let decoded = Entry::decode(&[][..]).unwrap();
        assert!(decoded.payload.is_empty());
        assert_eq!(decoded.stream_id, 0);
    }
}
