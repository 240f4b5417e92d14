//! Tracked spot records
//!
//! A `TrackedSpot` exists for every live handle whose NPC type resolves to a
//! known spot kind. When the handle vanishes, its timer is parked in the
//! departure cache as a `CachedDeparture` under its `LocationKey`.

use crate::game_data::SpotKind;
use crate::host::{NpcId, Tick, WorldPoint};

/// Runtime state of one visible fishing spot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedSpot {
    /// NPC type the handle had when first observed
    pub npc_id: NpcId,

    /// Catalog entry for `npc_id`
    pub kind: &'static SpotKind,

    /// Tick at which this spot's timer began
    pub spawn_tick: Tick,

    /// Last tile the spot was seen on
    pub position: WorldPoint,
}

impl TrackedSpot {
    pub fn new(npc_id: NpcId, kind: &'static SpotKind, spawn_tick: Tick, position: WorldPoint) -> Self {
        Self {
            npc_id,
            kind,
            spawn_tick,
            position,
        }
    }

    /// Ticks since the timer began (0 if `now` is before the spawn tick)
    pub fn elapsed(&self, now: Tick) -> Tick {
        now.saturating_sub(self.spawn_tick)
    }

    /// Restart the timer at a new tile
    pub fn relocate(&mut self, position: WorldPoint, now: Tick) {
        self.spawn_tick = now;
        self.position = position;
    }

    pub fn location_key(&self) -> LocationKey {
        LocationKey::new(self.position, self.npc_id)
    }
}

/// Tile + NPC type, so timers are only restored for the same spot type on the same tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationKey {
    pub position: WorldPoint,
    pub npc_id: NpcId,
}

impl LocationKey {
    pub fn new(position: WorldPoint, npc_id: NpcId) -> Self {
        Self { position, npc_id }
    }
}

/// A despawned spot, remembered so its timer can resume if it comes back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedDeparture {
    /// Spawn tick of the spot that vanished
    pub spawn_tick: Tick,

    /// Tick at which it vanished
    pub departed_at: Tick,
}
