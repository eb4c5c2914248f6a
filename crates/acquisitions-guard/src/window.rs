//! Fixed-duration request windows keyed by [`Fingerprint`].
//!
//! Each fingerprint owns one window: a start instant and a count. A hit
//! landing `window_secs` or more after the start opens a fresh window (the
//! boundary instant belongs to the new window); any other hit increments the
//! current one. Counting happens under the DashMap shard lock for that key,
//! so concurrent hits on one fingerprint never lose an increment while hits
//! on unrelated fingerprints only contend when they share a shard.
//!
//! Time comes from [`tokio::time::Instant`], which lets tests pause and
//! advance the clock.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::fingerprint::Fingerprint;
use crate::tier::RateTier;

#[derive(Debug, Clone, Copy)]
struct WindowState {
    started: Instant,
    count: u64,
    period: Duration,
}

/// Outcome of counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHit {
    /// Requests counted in the current window, this one included.
    pub count: u64,
    /// Time until the current window closes.
    pub reset_after: Duration,
}

impl WindowHit {
    pub fn exceeds(&self, tier: &RateTier) -> bool {
        self.count > tier.max_requests
    }
}

/// Shared, cheaply cloneable window table.
#[derive(Clone, Default)]
pub struct SlidingWindowStore {
    windows: Arc<DashMap<Fingerprint, WindowState>>,
}

impl SlidingWindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one request against `fingerprint` under `tier`'s window length.
    pub fn hit(&self, fingerprint: &Fingerprint, tier: &RateTier) -> WindowHit {
        let now = Instant::now();
        let period = tier.window();

        let mut entry = self
            .windows
            .entry(fingerprint.clone())
            .or_insert(WindowState {
                started: now,
                count: 0,
                period,
            });
        let state = entry.value_mut();

        if now.duration_since(state.started) >= state.period {
            state.started = now;
            state.count = 0;
            state.period = period;
        }
        state.count += 1;

        WindowHit {
            count: state.count,
            reset_after: state
                .period
                .saturating_sub(now.duration_since(state.started)),
        }
    }

    /// Current count for `fingerprint`, or 0 if its window has lapsed.
    pub fn count(&self, fingerprint: &Fingerprint) -> u64 {
        let now = Instant::now();
        self.windows
            .get(fingerprint)
            .filter(|w| now.duration_since(w.started) < w.period)
            .map(|w| w.count)
            .unwrap_or(0)
    }

    /// Drops every window whose period has elapsed. Returns how many went.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.windows.len();
        self.windows
            .retain(|_, w| now.duration_since(w.started) < w.period);
        before.saturating_sub(self.windows.len())
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Spawns a task purging lapsed windows every `interval`.
    pub fn spawn_cleanup_task(&self, interval: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let purged = store.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged, remaining = store.len(), "Purged expired rate windows");
                }
            }
        })
    }
}
