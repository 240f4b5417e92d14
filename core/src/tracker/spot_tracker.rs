//! Spot tracker
//!
//! Owns every tracked spot and the departure cache. Mutated only by host
//! events; overlays read it after the tick's mutation has finished.

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::game_data::{SpotKind, find_spot};
use crate::host::{Handle, HostView, NpcId, Tick, WorldPoint};

use super::policy::{newest_candidate, next_newest_pick, progress_fraction, resumed_spawn_tick};
use super::{DepartureCache, LocationKey, TrackedSpot};

/// The fishing spot the local player is interacting with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    pub handle: Handle,
    pub kind: &'static SpotKind,
}

/// Tracks fishing spot timers for overlay display.
///
/// Construct one per logged-in session and call [`SpotTracker::reset`] when
/// the session ends.
#[derive(Debug, Default)]
pub struct SpotTracker {
    /// Currently visible spots, keyed by live handle
    tracked: HashMap<Handle, TrackedSpot>,

    /// Recently despawned spots, keyed by tile + NPC type
    departures: DepartureCache,

    /// Latest tick seen from the host
    current_tick: Tick,

    /// Sticky newest-spot pick, recomputed every tick
    newest: Option<Handle>,

    /// Spot the local player is interacting with, recomputed every tick
    interaction: Option<Interaction>,
}

impl SpotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything (logout, world hop, shutdown)
    pub fn reset(&mut self) {
        debug!(
            tracked = self.tracked.len(),
            cached = self.departures.len(),
            "Resetting spot tracker"
        );
        self.tracked.clear();
        self.departures.clear();
        self.newest = None;
        self.interaction = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event Handling
    // ─────────────────────────────────────────────────────────────────────────

    /// A new entity appeared. Returns true if it is a fishing spot and is now tracked.
    pub fn on_entity_appeared(
        &mut self,
        handle: Handle,
        npc_id: NpcId,
        position: WorldPoint,
        tick: Tick,
    ) -> bool {
        // A new entity in this slot is never the spot the pick referred to
        self.forget_pick(handle);
        let Some(kind) = find_spot(npc_id) else {
            // A recycled handle now belongs to something else
            self.tracked.remove(&handle);
            return false;
        };
        self.current_tick = tick;

        let cached = self.departures.take(&LocationKey::new(position, npc_id), tick);
        let spawn_tick = resumed_spawn_tick(cached, tick, kind.max_ticks);
        if cached.is_some() && spawn_tick != tick {
            debug!(%handle, %position, spot = kind.id, spawn_tick, "Resumed cached spot timer");
        } else {
            debug!(%handle, %position, spot = kind.id, "Tracking new spot");
        }

        self.tracked
            .insert(handle, TrackedSpot::new(npc_id, kind, spawn_tick, position));
        true
    }

    /// Track a spot that was already in the scene before tracking started.
    ///
    /// Unlike a spawn, the departure cache is not consulted and an existing
    /// record for the handle is left untouched.
    pub fn track_existing(
        &mut self,
        handle: Handle,
        npc_id: NpcId,
        position: WorldPoint,
        tick: Tick,
    ) -> bool {
        let Some(kind) = find_spot(npc_id) else {
            return false;
        };
        self.current_tick = tick;
        self.tracked
            .entry(handle)
            .or_insert_with(|| TrackedSpot::new(npc_id, kind, tick, position));
        true
    }

    /// An entity vanished. Its timer is parked in the departure cache.
    pub fn on_entity_vanished(&mut self, handle: Handle, tick: Tick) -> bool {
        self.forget_pick(handle);
        let Some(spot) = self.tracked.remove(&handle) else {
            return false;
        };
        self.current_tick = tick;
        self.departures
            .record(spot.location_key(), spot.spawn_tick, tick);
        debug!(%handle, position = %spot.position, spot = spot.kind.id, "Cached departed spot");
        true
    }

    /// Per-tick maintenance. Order matters: relocation and the liveness sweep
    /// settle the tracked set before the newest pick is recomputed.
    pub fn on_tick(&mut self, tick: Tick, host: &dyn HostView) {
        self.current_tick = tick;
        self.detect_relocations(host);
        self.sweep_dead_handles(host);

        let purged = self.departures.purge_expired(tick);
        if purged > 0 {
            trace!(purged, "Expired cached departures");
        }

        self.update_interaction(host);
        self.update_newest();
    }

    /// Restart the timer of any spot that moved to a different tile
    fn detect_relocations(&mut self, host: &dyn HostView) {
        let tick = self.current_tick;
        for (handle, spot) in self.tracked.iter_mut() {
            if host.npc_id(*handle) != Some(spot.npc_id) {
                continue;
            }
            let Some(position) = host.position(*handle) else {
                continue;
            };
            if position != spot.position {
                debug!(%handle, from = %spot.position, to = %position, "Spot relocated");
                spot.relocate(position, tick);
            }
        }
    }

    /// Drop handles the host no longer considers live, or that were recycled
    /// for a different NPC type without a despawn in between
    fn sweep_dead_handles(&mut self, host: &dyn HostView) {
        self.tracked.retain(|handle, spot| {
            let alive = host.npc_id(*handle) == Some(spot.npc_id);
            if !alive {
                debug!(%handle, "Dropped stale spot handle");
            }
            alive
        });
    }

    fn update_interaction(&mut self, host: &dyn HostView) {
        self.interaction = host
            .local_player()
            .and_then(|player| player.interacting)
            .and_then(|handle| {
                let kind = host.npc_id(handle).and_then(find_spot)?;
                Some(Interaction { handle, kind })
            });
    }

    fn forget_pick(&mut self, handle: Handle) {
        if self.newest == Some(handle) {
            trace!(%handle, "Newest spot left its slot");
            self.newest = None;
        }
    }

    fn update_newest(&mut self) {
        let current = self.newest.and_then(|handle| {
            self.tracked
                .get(&handle)
                .filter(|spot| !spot.kind.is_static())
                .map(|spot| (handle, spot.spawn_tick))
        });

        let candidate = newest_candidate(
            self.tracked.iter().map(|(handle, spot)| (*handle, spot)),
            self.current_tick,
        );

        let next = next_newest_pick(current, candidate);
        if next != self.newest {
            trace!(from = ?self.newest, to = ?next, "Newest spot changed");
        }
        self.newest = next;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Latest tick seen from the host
    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// How far through its expected lifetime the spot is, in `[0.0, 1.0]`.
    /// Untracked handles report 0.0.
    pub fn progress(&self, handle: Handle) -> f64 {
        self.tracked
            .get(&handle)
            .map(|spot| progress_fraction(spot.elapsed(self.current_tick), spot.kind.max_ticks))
            .unwrap_or(0.0)
    }

    pub fn spawn_tick(&self, handle: Handle) -> Option<Tick> {
        self.tracked.get(&handle).map(|spot| spot.spawn_tick)
    }

    /// Ticks since the spot's timer began
    pub fn elapsed_ticks(&self, handle: Handle) -> Option<Tick> {
        self.tracked
            .get(&handle)
            .map(|spot| spot.elapsed(self.current_tick))
    }

    /// The most recently spawned non-static spot
    pub fn newest_pick(&self) -> Option<Handle> {
        self.newest
    }

    /// Kind of the spot the local player is fishing at, if any
    pub fn current_interaction_kind(&self) -> Option<&'static SpotKind> {
        self.interaction.map(|i| i.kind)
    }

    pub fn current_interaction(&self) -> Option<Interaction> {
        self.interaction
    }

    pub fn get(&self, handle: Handle) -> Option<&TrackedSpot> {
        self.tracked.get(&handle)
    }

    pub fn is_tracked(&self, handle: Handle) -> bool {
        self.tracked.contains_key(&handle)
    }

    /// All tracked spots (unordered)
    pub fn tracked(&self) -> impl Iterator<Item = (Handle, &TrackedSpot)> {
        self.tracked.iter().map(|(handle, spot)| (*handle, spot))
    }

    /// All tracked `(handle, kind)` pairs (unordered)
    pub fn spots(&self) -> impl Iterator<Item = (Handle, &'static SpotKind)> + '_ {
        self.tracked.iter().map(|(handle, spot)| (*handle, spot.kind))
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    pub fn departures(&self) -> &DepartureCache {
        &self.departures
    }
}
