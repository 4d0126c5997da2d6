//! StreamRegistry - in-flight output channels keyed by stream id
//!
//! Tracks the output channel of every outstanding write so that results
//! produced after submission can be routed back to the correct caller.
//! The registry is the only shared mutable state in the dispatch layer;
//! each `DispatchClient` owns its own instance, so multiple clients in one
//! process never interfere.

use helm_model::{StreamId, StreamTable, WriteStream};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Registry of in-flight output streams.
///
/// `register` and `release` may race from independent callers and from the
/// asynchronous completion path; both are safe concurrently, and `release`
/// is idempotent so a double-close race resolves to a single close.
pub struct StreamRegistry {
    streams: RwLock<HashMap<StreamId, Arc<dyn WriteStream>>>,
    next_id: AtomicU64,
}

impl StreamRegistry {
    pub fn new() -> Self {
        Self {
            streams: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Record `stream` under a fresh, process-unique identifier.
    ///
    /// Identifiers are never reused while the corresponding channel may
    /// still receive output, so concurrent writes cannot cross-talk.
    pub fn register(&self, stream: Arc<dyn WriteStream>) -> StreamId {
        let id = StreamId(self.next_id.fetch_add(1, Ordering::Relaxed));
        {
            let Ok(mut streams) = self.streams.write() else {
                // Poisoned map: close immediately, the id is unusable anyway.
                stream.close();
                return id;
            };
            streams.insert(id, stream);
        }
        debug!(stream_id = %id, "Registered output stream");
        id
    }

    /// Number of currently registered streams.
    pub fn len(&self) -> usize {
        self.streams.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StreamRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamTable for StreamRegistry {
    fn lookup(&self, id: StreamId) -> Option<Arc<dyn WriteStream>> {
        let Ok(streams) = self.streams.read() else {
            return None;
        };
        let found = streams.get(&id).cloned();
        if found.is_none() {
            // Late or duplicate notification after release: expected, not an error.
            debug!(stream_id = %id, "Lookup miss for stream");
        }
        found
    }

    fn release(&self, id: StreamId) {
        let removed = {
            let Ok(mut streams) = self.streams.write() else {
                return;
            };
            streams.remove(&id)
        };
        // Close outside the lock; a slow receiver must not block the map.
        if let Some(stream) = removed {
            stream.close();
            debug!(stream_id = %id, "Released output stream");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    struct FlagStream {
        closed: AtomicBool,
    }

    impl FlagStream {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                closed: AtomicBool::new(false),
            })
        }

        fn is_closed(&self) -> bool {
            self.closed.load(Ordering::SeqCst)
        }
    }

    impl WriteStream for FlagStream {
        fn send(&self, _value: Vec<u8>) -> bool {
            !self.is_closed()
        }

        fn close(&self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = StreamRegistry::new();
        let stream = FlagStream::new();
        let id = registry.register(stream);

        assert!(registry.lookup(id).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_release_closes_and_removes() {
        let registry = StreamRegistry::new();
        let stream = FlagStream::new();
        let id = registry.register(stream.clone());

        registry.release(id);
        assert!(stream.is_closed());
        assert!(registry.lookup(id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_release_is_idempotent() {
        let registry = StreamRegistry::new();
        let stream = FlagStream::new();
        let id = registry.register(stream);

        registry.release(id);
        registry.release(id);
        registry.release(StreamId(9999));
    }

    #[test]
    fn test_lookup_unknown_id_is_none() {
        let registry = StreamRegistry::new();
        assert!(registry.lookup(StreamId(7)).is_none());
    }

    #[test]
    fn test_concurrent_registration_ids_are_unique() {
        let registry = Arc::new(StreamRegistry::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = registry.clone();
            handles.push(std::thread::spawn(move || {
                (0..100)
                    .map(|_| registry.register(FlagStream::new()).0)
                    .collect::<Vec<u64>>()
            }));
        }

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), total);
        assert_eq!(registry.len(), total);
    }

    #[test]
    fn test_separate_registries_do_not_interfere() {
        let a = StreamRegistry::new();
        let b = StreamRegistry::new();
        let id = a.register(FlagStream::new());
        assert!(b.lookup(id).is_none());
    }
}
