use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use anyhow::Result;

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

// The lock is held while `refresh` runs, so callers on a stale key wait for one upstream call.
pub struct TtlCache<V, C = SystemClock> {
    clock: C,
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V, SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<V: Clone> Default for TtlCache<V, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, C: Clock> TtlCache<V, C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// A failed refresh keeps the previous entry and returns the error.
    pub fn get_or_refresh<F>(&self, key: &str, ttl: Duration, refresh: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        // A refresh that panicked leaves the map untouched, so the guard is still usable.
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();
        if let Some(entry) = guard.get(key) {
            if now.saturating_duration_since(entry.fetched_at) < ttl {
                return Ok(entry.value.clone());
            }
        }

        let value = refresh()?;
        guard.insert(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                fetched_at: now,
            },
        );
        Ok(value)
    }

    pub fn invalidate(&self, key: &str) {
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        guard.remove(key);
    }
}
