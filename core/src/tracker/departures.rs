//! Location cache for despawned spots
//!
//! The client only renders entities within view range, so walking away from a
//! spot and back produces a despawn followed by a fresh spawn on the same
//! tile. Remembering the departed timer lets it resume instead of restarting.

use hashbrown::HashMap;

use crate::host::Tick;

use super::{CachedDeparture, LocationKey};

/// How long (in ticks) to remember a spot after it despawns.
/// 1500 ticks = 15 minutes.
pub const LOCATION_CACHE_EXPIRY_TICKS: Tick = 1500;

/// Recently departed spots, at most one per `LocationKey`
#[derive(Debug, Clone, Default)]
pub struct DepartureCache {
    entries: HashMap<LocationKey, CachedDeparture>,
}

impl DepartureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a departed spot, replacing any older entry on the same key
    pub fn record(&mut self, key: LocationKey, spawn_tick: Tick, departed_at: Tick) {
        self.entries.insert(
            key,
            CachedDeparture {
                spawn_tick,
                departed_at,
            },
        );
    }

    /// Remove and return the entry for `key`.
    ///
    /// The entry is consumed even when the caller decides not to resume it.
    /// Entries past the retention window are discarded and never returned,
    /// even if this tick's purge has not run yet.
    pub fn take(&mut self, key: &LocationKey, now: Tick) -> Option<CachedDeparture> {
        self.entries
            .remove(key)
            .filter(|entry| !is_expired(entry, now))
    }

    pub fn get(&self, key: &LocationKey) -> Option<&CachedDeparture> {
        self.entries.get(key)
    }

    /// Drop every entry older than the retention window. Returns how many were dropped.
    pub fn purge_expired(&mut self, now: Tick) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !is_expired(entry, now));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LocationKey, &CachedDeparture)> {
        self.entries.iter()
    }
}

fn is_expired(entry: &CachedDeparture, now: Tick) -> bool {
    now.saturating_sub(entry.departed_at) > LOCATION_CACHE_EXPIRY_TICKS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::WorldPoint;

    fn key(x: i32) -> LocationKey {
        LocationKey::new(WorldPoint::new(x, 3200, 0), 1510)
    }

    #[test]
    fn test_record_overwrites_same_key() {
        let mut cache = DepartureCache::new();
        cache.record(key(1), 100, 200);
        cache.record(key(1), 150, 300);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key(1)).map(|e| e.spawn_tick), Some(150));
    }

    #[test]
    fn test_purge_boundary() {
        let mut cache = DepartureCache::new();
        cache.record(key(1), 0, 500);
        cache.record(key(2), 0, 600);

        assert_eq!(cache.purge_expired(2000), 0, "exactly 1500 ticks is kept");
        assert_eq!(cache.purge_expired(2001), 1);
        assert!(cache.get(&key(1)).is_none());
        assert!(cache.get(&key(2)).is_some());
    }

    #[test]
    fn test_take_consumes_and_skips_expired() {
        let mut cache = DepartureCache::new();
        cache.record(key(1), 10, 20);
        assert_eq!(cache.take(&key(1), 30).map(|e| e.spawn_tick), Some(10));
        assert!(cache.is_empty());

        cache.record(key(2), 10, 20);
        assert!(cache.take(&key(2), 20 + LOCATION_CACHE_EXPIRY_TICKS + 1).is_none());
        assert!(cache.is_empty(), "expired entry is still removed");
    }
}
