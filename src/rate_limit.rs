//! Fixed-window request counter, one entry per client key.
//!
//! A window opens on a client's first request and resets wholesale once it
//! expires; it never rolls. A client can therefore burst up to twice the
//! limit across a window boundary.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::debug;

use crate::clock::Clock;
use crate::metrics::TRACKED_CLIENTS;

// Rate limit entry - requests admitted for a client key in the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub expiry: Instant,
}

impl RateLimitEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expiry
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Rejected,
}

pub struct WindowCounterStore {
    entries: DashMap<String, RateLimitEntry>,
    limit: u32,
    window: Duration,
}

impl WindowCounterStore {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            limit,
            window,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Decides whether `key` may send one more request at `now`.
    ///
    /// Admission counts against the limit immediately, before the request is
    /// forwarded. Rejections leave the entry untouched.
    pub fn admit(&self, key: &str, now: Instant) -> Admission {
        let fresh = RateLimitEntry {
            count: 1,
            expiry: now + self.window,
        };

        // The entry guard holds the shard lock across the read-modify-write,
        // so concurrent requests for one key cannot overshoot the limit.
        // Enforcement is exact on purpose, not the soft racy cap.
        match self.entries.entry(key.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(fresh);
                Admission::Allowed
            }
            Entry::Occupied(mut slot) => {
                let entry = slot.get_mut();
                if !entry.is_live(now) {
                    *entry = fresh;
                    Admission::Allowed
                } else if entry.count >= self.limit {
                    Admission::Rejected
                } else {
                    entry.count += 1;
                    Admission::Allowed
                }
            }
        }
    }

    /// Stored count for `key`, expired or not.
    pub fn count(&self, key: &str) -> Option<u32> {
        self.entries.get(key).map(|entry| entry.count)
    }

    pub fn entry(&self, key: &str) -> Option<RateLimitEntry> {
        self.entries.get(key).map(|entry| *entry)
    }

    /// Drops every entry whose window has passed. Returns how many were removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Eviction loop - keeps the map bounded by the number of live windows
pub async fn sweeper(
    store: Arc<WindowCounterStore>,
    clock: Arc<dyn Clock>,
    every: Duration,
) {
    let mut interval = interval(every);

    debug!(?every, "window sweeper started");

    loop {
        interval.tick().await;

        let evicted = store.sweep(clock.now());
        TRACKED_CLIENTS.set(store.len() as f64);
        if evicted > 0 {
            debug!(evicted, remaining = store.len(), "swept expired windows");
        }
    }
}
