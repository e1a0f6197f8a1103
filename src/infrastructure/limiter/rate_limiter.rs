use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;

#[derive(Debug)]
struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

/// Sliding-window request counter keyed by client IP.
///
/// State is in-memory and per-process: it does not survive a restart and is
/// not shared across instances. Construct one and inject it; clones share
/// the same window map, so swapping in an externally shared store later is
/// a constructor change.
#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    entries: Arc<DashMap<String, RateLimitEntry>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        RateLimiter {
            max_requests,
            window,
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Returns true when the key is over its budget for the current window.
    ///
    /// An allowed call records the request. A rejected call leaves the entry
    /// untouched: refused attempts neither extend nor reset the window. The
    /// per-key read-check-increment runs under the map's entry guard, which
    /// keeps it atomic on a multi-threaded runtime.
    pub fn check_and_record(&self, key: &str) -> bool {
        let now = Instant::now();

        // Expired windows are swept here, on every call; there is no
        // background cleanup task.
        self.entries
            .retain(|_, entry| now.duration_since(entry.window_start) <= self.window);

        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| RateLimitEntry {
                count: 0,
                window_start: now,
            });

        if entry.count >= self.max_requests {
            return true;
        }

        entry.count += 1;
        false
    }
}
