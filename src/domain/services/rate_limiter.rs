use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window request counter kept in process memory.
///
/// Entries are never evicted; a multi-instance deployment needs a shared store
/// with expiry instead.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Counts one request for `key`. Returns `false` when the key is over its limit.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut guard = self.windows.lock();

        let Some(entry) = guard.get_mut(key) else {
            guard.insert(key.to_string(), Window { started: now, count: 1 });
            return true;
        };

        if now.saturating_duration_since(entry.started) > self.window {
            entry.started = now;
            entry.count = 1;
            return true;
        }

        entry.count += 1;
        entry.count <= self.max_requests
    }
}
