//! Simulated host client
//!
//! An in-memory stand-in for the game client, used by the sandbox, the
//! scenario validator, and tests. Entities live in a slot arena and handles
//! are slot indices, so a freed slot is reused by the next spawn exactly the
//! way the real client recycles its NPC references.
//!
//! Every mutating method returns the [`HostEvent`] the real client would
//! deliver, leaving it to the caller to forward (or deliberately drop) it.

use super::{
    AnimationId, GameState, Handle, HostEvent, HostView, LocalPlayer, NpcId, Tick, WorldPoint,
};

/// Animation ID the client reports for an idle player
pub const IDLE_ANIMATION: AnimationId = -1;

#[derive(Debug, Clone, Copy)]
struct SimNpc {
    npc_id: NpcId,
    position: WorldPoint,
}

/// In-memory host with recycled entity slots
#[derive(Debug, Clone, Default)]
pub struct SimulatedHost {
    tick: Tick,
    game_state: GameState,
    slots: Vec<Option<SimNpc>>,
    local_player: Option<LocalPlayer>,
}

impl SimulatedHost {
    /// Create a host sitting at the login screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host that is already logged in with a loaded local player
    pub fn logged_in() -> Self {
        Self {
            game_state: GameState::LoggedIn,
            local_player: Some(LocalPlayer {
                interacting: None,
                animation: IDLE_ANIMATION,
            }),
            ..Self::default()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session & Clock
    // ─────────────────────────────────────────────────────────────────────────

    /// Change session state. Leaving the world drops every entity.
    pub fn set_game_state(&mut self, state: GameState) -> HostEvent {
        self.game_state = state;
        if state.ends_session() {
            self.slots.clear();
            self.local_player = None;
        } else if state.is_logged_in() && self.local_player.is_none() {
            self.local_player = Some(LocalPlayer {
                interacting: None,
                animation: IDLE_ANIMATION,
            });
        }
        HostEvent::SessionStateChanged { state }
    }

    /// Advance one tick
    pub fn advance(&mut self) -> HostEvent {
        self.tick += 1;
        HostEvent::ClockAdvanced { tick: self.tick }
    }

    /// Jump the clock forward to `tick` (no-op if already past it)
    pub fn advance_to(&mut self, tick: Tick) -> HostEvent {
        self.tick = self.tick.max(tick);
        HostEvent::ClockAdvanced { tick: self.tick }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Entities
    // ─────────────────────────────────────────────────────────────────────────

    /// Spawn an NPC into the lowest free slot
    pub fn spawn(&mut self, npc_id: NpcId, position: WorldPoint) -> (Handle, HostEvent) {
        let npc = SimNpc { npc_id, position };
        let slot = match self.slots.iter().position(Option::is_none) {
            Some(idx) => {
                self.slots[idx] = Some(npc);
                idx
            }
            None => {
                self.slots.push(Some(npc));
                self.slots.len() - 1
            }
        };
        let handle = Handle(slot as u32);
        (
            handle,
            HostEvent::EntityAppeared {
                handle,
                npc_id,
                position,
            },
        )
    }

    /// Remove an NPC, returning the despawn event if it was live
    pub fn despawn(&mut self, handle: Handle) -> Option<HostEvent> {
        self.free_slot(handle)
            .map(|_| HostEvent::EntityVanished { handle })
    }

    /// Remove an NPC without producing a despawn event (a missed notification)
    pub fn invalidate(&mut self, handle: Handle) -> bool {
        self.free_slot(handle).is_some()
    }

    /// Teleport a live NPC to a new tile. Real clients deliver no event for this.
    pub fn move_npc(&mut self, handle: Handle, position: WorldPoint) -> bool {
        match self.slot_mut(handle) {
            Some(npc) => {
                npc.position = position;
                true
            }
            None => false,
        }
    }

    /// Number of live NPCs
    pub fn npc_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Local Player
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_local_player(&mut self, player: Option<LocalPlayer>) {
        self.local_player = player;
    }

    /// Set the interaction target (ignored when no local player is loaded)
    pub fn set_interacting(&mut self, target: Option<Handle>) {
        if let Some(player) = self.local_player.as_mut() {
            player.interacting = target;
        }
    }

    /// Set the current animation (ignored when no local player is loaded)
    pub fn set_animation(&mut self, animation: AnimationId) {
        if let Some(player) = self.local_player.as_mut() {
            player.animation = animation;
        }
    }

    fn slot_mut(&mut self, handle: Handle) -> Option<&mut SimNpc> {
        self.slots
            .get_mut(handle.0 as usize)
            .and_then(Option::as_mut)
    }

    fn free_slot(&mut self, handle: Handle) -> Option<SimNpc> {
        self.slots
            .get_mut(handle.0 as usize)
            .and_then(Option::take)
    }

    fn slot(&self, handle: Handle) -> Option<&SimNpc> {
        self.slots.get(handle.0 as usize).and_then(Option::as_ref)
    }
}

impl HostView for SimulatedHost {
    fn tick_count(&self) -> Tick {
        self.tick
    }

    fn game_state(&self) -> GameState {
        self.game_state
    }

    fn npc_id(&self, handle: Handle) -> Option<NpcId> {
        self.slot(handle).map(|npc| npc.npc_id)
    }

    fn position(&self, handle: Handle) -> Option<WorldPoint> {
        self.slot(handle).map(|npc| npc.position)
    }

    fn npcs(&self) -> Vec<Handle> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(idx, _)| Handle(idx as u32))
            .collect()
    }

    fn local_player(&self) -> Option<LocalPlayer> {
        self.local_player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_reuses_freed_slots() {
        let mut host = SimulatedHost::logged_in();
        let (a, _) = host.spawn(1510, WorldPoint::new(1, 1, 0));
        let (b, _) = host.spawn(1510, WorldPoint::new(2, 2, 0));
        assert_ne!(a, b);

        assert!(host.despawn(a).is_some());
        assert!(host.despawn(a).is_none(), "double despawn yields no event");
        assert!(!host.is_alive(a));

        let (c, _) = host.spawn(1511, WorldPoint::new(3, 3, 0));
        assert_eq!(c, a, "freed slot is recycled");
        assert_eq!(host.npc_id(c), Some(1511));
        assert_eq!(host.npc_count(), 2);
    }

    #[test]
    fn test_leaving_world_drops_entities() {
        let mut host = SimulatedHost::logged_in();
        host.spawn(1510, WorldPoint::new(1, 1, 0));
        host.set_game_state(GameState::Hopping);
        assert!(host.npcs().is_empty());
        assert!(host.local_player().is_none());

        host.set_game_state(GameState::LoggedIn);
        assert!(host.local_player().is_some());
    }

    #[test]
    fn test_clock() {
        let mut host = SimulatedHost::logged_in();
        assert_eq!(host.advance(), HostEvent::ClockAdvanced { tick: 1 });
        assert_eq!(host.advance_to(50), HostEvent::ClockAdvanced { tick: 50 });
        assert_eq!(host.advance_to(10), HostEvent::ClockAdvanced { tick: 50 });
    }
}
