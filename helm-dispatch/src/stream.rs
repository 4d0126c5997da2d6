//! ChannelStream - tokio mpsc adapter for caller output streams
//!
//! Callers that consume results as an async stream wrap an unbounded
//! channel: the dispatch/apply side holds the `WriteStream` half, the
//! caller reads the receiver until it yields `None` (end-of-stream).

use helm_model::WriteStream;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// `WriteStream` backed by an unbounded tokio channel.
///
/// Closing drops the sender, so the receiver observes end-of-stream once
/// buffered items are drained. Close is idempotent; `send` after close
/// reports delivery failure instead of panicking, since the failure path
/// and the completion path can race.
pub struct ChannelStream {
    tx: Mutex<Option<mpsc::UnboundedSender<Vec<u8>>>>,
}

impl ChannelStream {
    /// Create a stream and the receiver its output arrives on.
    pub fn unbounded() -> (Arc<Self>, mpsc::UnboundedReceiver<Vec<u8>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                tx: Mutex::new(Some(tx)),
            }),
            rx,
        )
    }

    /// Like `unbounded`, but the output side is a futures `Stream` for
    /// callers that consume results through stream combinators.
    pub fn unbounded_stream() -> (
        Arc<Self>,
        Box<dyn futures_core::Stream<Item = Vec<u8>> + Send + Unpin>,
    ) {
        let (stream, rx) = Self::unbounded();
        (
            stream,
            Box::new(tokio_stream::wrappers::UnboundedReceiverStream::new(rx)),
        )
    }
}

impl WriteStream for ChannelStream {
    fn send(&self, value: Vec<u8>) -> bool {
        let Ok(guard) = self.tx.lock() else {
            return false;
        };
        match guard.as_ref() {
            Some(tx) => tx.send(value).is_ok(),
            None => false,
        }
    }

    fn close(&self) {
        if let Ok(mut guard) = self.tx.lock() {
            guard.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_delivers_to_receiver() {
        let (stream, mut rx) = ChannelStream::unbounded();
        assert!(stream.send(b"one".to_vec()));
        assert!(stream.send(b"two".to_vec()));

        assert_eq!(rx.recv().await.unwrap(), b"one");
        assert_eq!(rx.recv().await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_close_is_end_of_stream() {
        let (stream, mut rx) = ChannelStream::unbounded();
        stream.send(b"last".to_vec());
        stream.close();

        assert_eq!(rx.recv().await.unwrap(), b"last");
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_send_after_close_fails() {
        let (stream, _rx) = ChannelStream::unbounded();
        stream.close();
        stream.close();
        assert!(!stream.send(b"late".to_vec()));
    }

    #[tokio::test]
    async fn test_send_after_receiver_dropped_fails() {
        let (stream, rx) = ChannelStream::unbounded();
        drop(rx);
        assert!(!stream.send(b"orphan".to_vec()));
    }

    #[tokio::test]
    async fn test_stream_combinator_output() {
        use futures_util::StreamExt;

        let (stream, rx) = ChannelStream::unbounded_stream();
        stream.send(b"a".to_vec());
        stream.send(b"b".to_vec());
        stream.close();

        let items: Vec<Vec<u8>> = rx.collect().await;
        assert_eq!(items, vec![b"a".to_vec(), b"b".to_vec()]);
    }
}
