use super::{GameState, Handle, HostView, NpcId, Tick, WorldPoint};

/// Discrete events delivered by the host, at most a handful per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A new entity became visible
    EntityAppeared {
        handle: Handle,
        npc_id: NpcId,
        position: WorldPoint,
    },

    /// An entity left the scene (despawned or out of view range)
    EntityVanished { handle: Handle },

    /// One simulation step passed. All per-tick maintenance happens here.
    ClockAdvanced { tick: Tick },

    SessionStateChanged { state: GameState },
}

/// Trait for systems that react to host events.
pub trait HostEventHandler {
    /// Handle a single event. The host view reflects the state after the event.
    fn handle_event(&mut self, event: &HostEvent, host: &dyn HostView);

    /// Handle multiple events (default implementation calls handle_event for each)
    fn handle_events(&mut self, events: &[HostEvent], host: &dyn HostView) {
        for event in events {
            self.handle_event(event, host);
        }
    }
}
