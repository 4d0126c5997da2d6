//! RecordingStream - captures stream output for assertions

use helm_model::WriteStream;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// `WriteStream` that records every item and counts close calls.
#[derive(Default)]
pub struct RecordingStream {
    items: Mutex<Vec<Vec<u8>>>,
    closed: AtomicBool,
    close_calls: AtomicUsize,
}

impl RecordingStream {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn items(&self) -> Vec<Vec<u8>> {
        self.items.lock().map(|i| i.clone()).unwrap_or_default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// How many times `close` was invoked, for double-close assertions.
    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

impl WriteStream for RecordingStream {
    fn send(&self, value: Vec<u8>) -> bool {
        if self.is_closed() {
            return false;
        }
        if let Ok(mut items) = self.items.lock() {
            items.push(value);
        }
        true
    }

    fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.closed.store(true, Ordering::SeqCst);
    }
}
