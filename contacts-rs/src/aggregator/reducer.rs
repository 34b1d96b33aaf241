//! Single-writer contact reducer
//!
//! Parsing of a wave runs concurrently, but every merge into the shared map
//! goes through one task draining an event queue. That serializes the
//! read-modify-write per key without locking individual contacts.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{ContactAggregator, ContactEvent};
use crate::error::{ContactError, Result};

const EVENT_QUEUE_DEPTH: usize = 1024;

pub struct ContactReducer {
    tx: mpsc::Sender<ContactEvent>,
    handle: JoinHandle<ContactAggregator>,
}

impl ContactReducer {
    /// Spawn the reducer task owning a fresh aggregator for `owner`.
    pub fn spawn(owner: &str) -> Self {
        let (tx, mut rx) = mpsc::channel::<ContactEvent>(EVENT_QUEUE_DEPTH);
        let mut aggregator = ContactAggregator::new(owner);
        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                aggregator.apply(event);
            }
            aggregator
        });
        Self { tx, handle }
    }

    /// Cloneable handle for parser tasks to submit events.
    pub fn sender(&self) -> mpsc::Sender<ContactEvent> {
        self.tx.clone()
    }

    /// Close the queue and hand back the aggregator once drained.
    pub async fn finish(self) -> Result<ContactAggregator> {
        drop(self.tx);
        self.handle.await.map_err(|e| ContactError::Internal(e.to_string()))
    }
}
