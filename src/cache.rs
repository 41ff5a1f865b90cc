//! Memoized lookup tables.
//!
//! Tables are keyed by technique tag plus the parameter in fixed-point
//! hundredths, so continuous slider input collapses onto a bounded set of keys.
//!
//! ## Single-flight
//!
//! Each key owns a slot that is initialized at most once. Concurrent
//! [`LutCache::get_or_build`] calls for the same key block on the one in-flight
//! build instead of running the builder again. The map lock is only held while
//! looking up the slot, so builds for different keys proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::filters::gamma::Gamma;
use crate::filters::lut::Lut;

/// Cache key: technique tag plus fixed-point parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LutKey {
    /// Gamma correction, parameter in hundredths.
    Gamma(u16),
}

impl From<Gamma> for LutKey {
    fn from(gamma: Gamma) -> Self {
        LutKey::Gamma(gamma.hundredths())
    }
}

type Slot = Arc<OnceLock<Arc<Lut>>>;

/// Thread-safe LUT memo with explicit `clear`.
#[derive(Debug, Default)]
pub struct LutCache {
    slots: Mutex<HashMap<LutKey, Slot>>,
}

impl LutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the table for `key`, running `builder` only on a miss.
    pub fn get_or_build<F>(&self, key: LutKey, builder: F) -> Arc<Lut>
    where
        F: FnOnce() -> Lut,
    {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(key).or_default())
        };

        let mut built = false;
        let lut = slot.get_or_init(|| {
            built = true;
            Arc::new(builder())
        });

        if built {
            tracing::debug!(?key, "LUT cache: built table");
        } else {
            tracing::trace!(?key, "LUT cache hit");
        }
        Arc::clone(lut)
    }

    /// Drop every entry.
    ///
    /// Builds already in flight finish and are returned to their callers but
    /// are not kept.
    pub fn clear(&self) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let evicted = slots.len();
        slots.clear();
        tracing::debug!(evicted, "LUT cache cleared");
    }

    /// True if a finished table is stored under `key`.
    pub fn contains(&self, key: LutKey) -> bool {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(&key).is_some_and(|slot| slot.get().is_some())
    }

    /// Number of keys with a finished table.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_hit_skips_builder() {
        let cache = LutCache::new();
        let calls = AtomicUsize::new(0);
        let build = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Lut::identity()
        };

        let first = cache.get_or_build(LutKey::Gamma(100), build);
        let second = cache.get_or_build(LutKey::Gamma(100), build);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.contains(LutKey::Gamma(100)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_keys_build_separately() {
        let cache = LutCache::new();

        cache.get_or_build(LutKey::Gamma(50), Lut::identity);
        cache.get_or_build(LutKey::Gamma(200), || Lut::from_fn(|i| 255 - i));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_or_build(LutKey::Gamma(200), Lut::identity).map(0), 255);
    }

    #[test]
    fn test_clear_forces_rebuild() {
        let cache = LutCache::new();
        let calls = AtomicUsize::new(0);
        let build = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Lut::identity()
        };

        cache.get_or_build(LutKey::Gamma(120), build);
        cache.clear();
        assert!(cache.is_empty());
        cache.get_or_build(LutKey::Gamma(120), build);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_same_key_builds_once() {
        const THREADS: usize = 8;
        let cache = LutCache::new();
        let calls = AtomicUsize::new(0);
        let barrier = Barrier::new(THREADS);

        let tables: Vec<Arc<Lut>> = thread::scope(|s| {
            let (cache, calls, barrier) = (&cache, &calls, &barrier);
            let handles: Vec<_> = (0..THREADS)
                .map(move |_| {
                    s.spawn(move || {
                        barrier.wait();
                        cache.get_or_build(LutKey::Gamma(220), || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(Duration::from_millis(50));
                            Lut::from_fn(|i| i / 2)
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(tables.iter().all(|t| Arc::ptr_eq(t, &tables[0])));
        assert_eq!(tables[0].map(200), 100);
    }

    #[test]
    fn test_key_from_gamma() {
        let key = LutKey::from(Gamma::new(2.204).unwrap());
        assert_eq!(key, LutKey::Gamma(220));
    }
}
