//! A single-slot cache of the last successful lookup, and the clocks used to
//! decide when it goes stale.

use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use super::InterfaceStats;
use crate::collection::error::{CollectionError, CollectionResult};

/// A source of comparable timestamps, measured from some arbitrary origin.
pub trait Clock: Send + Sync {
    fn now(&self) -> CollectionResult<Duration>;
}

/// Wall-clock time since the Unix epoch. Fails if the system clock is set to
/// before the epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> CollectionResult<Duration> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|err| CollectionError::time_source(err.to_string()))
    }
}

/// Monotonic time since this clock was created.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> CollectionResult<Duration> {
        Ok(self.origin.elapsed())
    }
}

#[derive(Clone, Copy, Debug)]
struct CacheEntry {
    captured_at: Duration,
    stats: InterfaceStats,
}

/// Holds the stats from the last successful lookup.
///
/// There is only one slot, and it isn't keyed by interface; the assumption is
/// that whoever owns the cache always polls the same interface.
#[derive(Debug)]
pub struct StatsCache {
    duration: Duration,
    slot: Mutex<Option<CacheEntry>>,
}

impl StatsCache {
    /// Creates an empty cache whose entries stay fresh for `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached stats regardless of how old they are.
    pub fn peek(&self) -> Option<InterfaceStats> {
        self.lock().entry.as_ref().map(|entry| entry.stats)
    }

    /// Locks the slot. The lock is meant to be held across a whole
    /// check-read-update sequence.
    pub(crate) fn lock(&self) -> CacheSlot<'_> {
        // The slot only ever holds `Copy` data, so even a poisoned lock holds a
        // whole entry.
        let entry = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        CacheSlot {
            entry,
            duration: self.duration,
        }
    }
}

/// A locked view of a [`StatsCache`].
pub(crate) struct CacheSlot<'a> {
    entry: MutexGuard<'a, Option<CacheEntry>>,
    duration: Duration,
}

impl CacheSlot<'_> {
    /// Returns the cached stats if they were captured less than the cache
    /// duration before `now`. An entry exactly at the boundary is stale.
    pub(crate) fn fresh(&self, now: Duration) -> Option<InterfaceStats> {
        let entry = self.entry.as_ref()?;
        let is_fresh = match entry.captured_at.checked_add(self.duration) {
            Some(expiry) => now < expiry,
            None => true,
        };

        is_fresh.then_some(entry.stats)
    }

    pub(crate) fn store(&mut self, captured_at: Duration, stats: InterfaceStats) {
        *self.entry = Some(CacheEntry { captured_at, stats });
    }
}
