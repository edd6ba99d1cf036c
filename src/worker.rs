use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::metrics::{MARKER_DROPPED, MARKER_FAILURES};
use crate::store::DurableStore;

pub const MARKER_VALUE: &str = "1";

// Durable marker for one admitted request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub key: String,
    pub ttl: Duration,
}

// Handle for scheduling marker writes without waiting on them
#[derive(Clone)]
pub struct MarkerQueue {
    tx: mpsc::Sender<Marker>,
}

impl MarkerQueue {
    // Spawns the background worker; needs a running tokio runtime
    pub fn spawn(store: Arc<dyn DurableStore>, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel::<Marker>(capacity.max(1));
        tokio::spawn(marker_worker(rx, store));
        Self { tx }
    }

    /// Queues a marker write. Never waits: a full or closed queue drops the
    /// marker and returns `false`.
    pub fn enqueue(&self, marker: Marker) -> bool {
        match self.tx.try_send(marker) {
            Ok(()) => true,
            Err(TrySendError::Full(marker)) => {
                MARKER_DROPPED.inc();
                debug!(key = %marker.key, "marker queue full, dropping marker");
                false
            }
            Err(TrySendError::Closed(marker)) => {
                MARKER_DROPPED.inc();
                warn!(key = %marker.key, "marker worker gone, dropping marker");
                false
            }
        }
    }
}

// Background worker -> writes markers one by one, failures are swallowed
pub async fn marker_worker(mut rx: mpsc::Receiver<Marker>, store: Arc<dyn DurableStore>) {
    debug!("marker worker started");

    while let Some(marker) = rx.recv().await {
        if let Err(e) = store.put(&marker.key, MARKER_VALUE, marker.ttl).await {
            MARKER_FAILURES.inc();
            debug!(key = %marker.key, error = %e, "marker write failed");
        }
    }

    debug!("marker worker stopped");
}
