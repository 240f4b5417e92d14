//! Spot tracking session
//!
//! Glues the spot tracker, the idle watcher, and the user's settings to the
//! host event stream. The host drives everything through
//! [`HostEventHandler::handle_event`]; overlays read from
//! [`SpotSession::tracker`] afterwards.

use tracing::{debug, info};

use spotwatch_types::TrackerSettings;

use crate::host::{HostEvent, HostEventHandler, HostView, Tick};
use crate::idle::{IDLE_MESSAGE, IdleWatcher};
use crate::tracker::SpotTracker;

#[derive(Debug, Default)]
pub struct SpotSession {
    tracker: SpotTracker,
    idle: IdleWatcher,
    settings: TrackerSettings,
    /// Chat notifications waiting to be delivered by the host
    notifications: Vec<String>,
}

impl SpotSession {
    pub fn new(settings: TrackerSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Begin tracking. Spots already in the scene are picked up with a fresh
    /// timer, since their real spawn time is unknown.
    pub fn start(&mut self, host: &dyn HostView) {
        if !host.game_state().is_logged_in() {
            debug!("Spot session started before login");
            return;
        }
        let tick = host.tick_count();
        let mut found = 0usize;
        for handle in host.npcs() {
            let (Some(npc_id), Some(position)) = (host.npc_id(handle), host.position(handle)) else {
                continue;
            };
            if self.tracker.track_existing(handle, npc_id, position, tick) {
                found += 1;
            }
        }
        info!(spots = found, tick, "Spot session started");
    }

    /// Stop tracking and forget all state
    pub fn shutdown(&mut self) {
        self.tracker.reset();
        self.idle.reset();
        self.notifications.clear();
        info!("Spot session stopped");
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: TrackerSettings) {
        debug!("Tracker settings updated");
        self.settings = settings;
    }

    pub fn tracker(&self) -> &SpotTracker {
        &self.tracker
    }

    pub fn is_fishing(&self) -> bool {
        self.idle.is_fishing()
    }

    /// Drain queued chat notifications
    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }

    fn on_clock(&mut self, tick: Tick, host: &dyn HostView) {
        if !host.game_state().is_logged_in() {
            return;
        }
        self.tracker.on_tick(tick, host);

        let animation = host.local_player().map(|player| player.animation);
        if self.idle.update(animation) && self.settings.idle_notification {
            info!(tick, "Player stopped fishing");
            self.notifications.push(IDLE_MESSAGE.to_string());
        }
    }
}

impl HostEventHandler for SpotSession {
    fn handle_event(&mut self, event: &HostEvent, host: &dyn HostView) {
        match event {
            HostEvent::EntityAppeared {
                handle,
                npc_id,
                position,
            } => {
                self.tracker
                    .on_entity_appeared(*handle, *npc_id, *position, host.tick_count());
            }
            HostEvent::EntityVanished { handle } => {
                self.tracker.on_entity_vanished(*handle, host.tick_count());
            }
            HostEvent::ClockAdvanced { tick } => self.on_clock(*tick, host),
            HostEvent::SessionStateChanged { state } => {
                if state.ends_session() {
                    debug!(?state, "Session ended, clearing spot state");
                    self.tracker.reset();
                    self.idle.reset();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{GameState, SimulatedHost, WorldPoint};

    const LOBSTER_NPC: i32 = 1510;

    fn idle_settings() -> TrackerSettings {
        TrackerSettings {
            idle_notification: true,
            ..TrackerSettings::default()
        }
    }

    #[test]
    fn test_start_picks_up_existing_spots() {
        let mut host = SimulatedHost::logged_in();
        host.advance_to(40);
        let (spot, _) = host.spawn(LOBSTER_NPC, WorldPoint::new(1, 1, 0));
        host.spawn(3029, WorldPoint::new(2, 2, 0));

        let mut session = SpotSession::default();
        session.start(&host);
        assert_eq!(session.tracker().len(), 1);
        assert_eq!(session.tracker().spawn_tick(spot), Some(40));
    }

    #[test]
    fn test_start_before_login_tracks_nothing() {
        let host = SimulatedHost::new();
        let mut session = SpotSession::default();
        session.start(&host);
        assert!(session.tracker().is_empty());
    }

    #[test]
    fn test_events_drive_tracker() {
        let mut host = SimulatedHost::logged_in();
        let mut session = SpotSession::default();

        let ev = host.advance_to(100);
        session.handle_event(&ev, &host);
        let (spot, ev) = host.spawn(LOBSTER_NPC, WorldPoint::new(1, 1, 0));
        session.handle_event(&ev, &host);
        let ev = host.advance();
        session.handle_event(&ev, &host);

        assert_eq!(session.tracker().spawn_tick(spot), Some(100));
        assert_eq!(session.tracker().newest_pick(), Some(spot));

        let ev = host.despawn(spot).unwrap();
        session.handle_event(&ev, &host);
        assert!(session.tracker().is_empty());
        assert_eq!(session.tracker().departures().len(), 1);
    }

    /// Leave the world with a tracked spot, a cached departure and a pick in place
    fn assert_session_end_resets(state: GameState) {
        let mut host = SimulatedHost::logged_in();
        let mut session = SpotSession::default();
        let (spot, ev) = host.spawn(LOBSTER_NPC, WorldPoint::new(1, 1, 0));
        session.handle_event(&ev, &host);
        let ev = host.despawn(spot).unwrap();
        session.handle_event(&ev, &host);
        let (_, ev) = host.spawn(LOBSTER_NPC, WorldPoint::new(5, 5, 0));
        session.handle_event(&ev, &host);
        let ev = host.advance();
        session.handle_event(&ev, &host);
        assert!(session.tracker().newest_pick().is_some());

        let ev = host.set_game_state(state);
        session.handle_event(&ev, &host);
        assert!(session.tracker().is_empty());
        assert!(session.tracker().departures().is_empty());
        assert_eq!(session.tracker().newest_pick(), None);
    }

    #[test]
    fn test_hop_resets_state() {
        assert_session_end_resets(GameState::Hopping);
    }

    #[test]
    fn test_logout_resets_state() {
        assert_session_end_resets(GameState::LoginScreen);
    }

    #[test]
    fn test_batched_events() {
        let mut host = SimulatedHost::logged_in();
        let mut session = SpotSession::default();
        host.advance_to(30);
        let (a, spawn_a) = host.spawn(LOBSTER_NPC, WorldPoint::new(1, 1, 0));
        let (b, spawn_b) = host.spawn(LOBSTER_NPC, WorldPoint::new(2, 1, 0));
        let clock = host.advance();

        session.handle_events(&[spawn_a, spawn_b, clock], &host);
        assert_eq!(session.tracker().len(), 2);
        assert_eq!(session.tracker().spawn_tick(a), Some(31));
        assert_eq!(session.tracker().elapsed_ticks(b), Some(0));
        assert_eq!(session.tracker().newest_pick(), Some(a));
    }

    #[test]
    fn test_loading_does_not_reset() {
        let mut host = SimulatedHost::logged_in();
        let mut session = SpotSession::default();
        let (_, ev) = host.spawn(LOBSTER_NPC, WorldPoint::new(1, 1, 0));
        session.handle_event(&ev, &host);

        let ev = host.set_game_state(GameState::Loading);
        session.handle_event(&ev, &host);
        assert_eq!(session.tracker().len(), 1);
    }

    #[test]
    fn test_clock_ignored_while_not_logged_in() {
        let mut host = SimulatedHost::logged_in();
        let mut session = SpotSession::default();
        let (spot, ev) = host.spawn(LOBSTER_NPC, WorldPoint::new(1, 1, 0));
        session.handle_event(&ev, &host);

        host.set_game_state(GameState::Loading);
        host.invalidate(spot);
        let ev = host.advance();
        session.handle_event(&ev, &host);
        assert!(session.tracker().is_tracked(spot), "no sweep while loading");
    }

    #[test]
    fn test_idle_notification() {
        let mut host = SimulatedHost::logged_in();
        let mut session = SpotSession::new(idle_settings());

        host.set_animation(621);
        let ev = host.advance();
        session.handle_event(&ev, &host);
        assert!(session.is_fishing());
        assert!(session.take_notifications().is_empty());

        host.set_animation(-1);
        let ev = host.advance();
        session.handle_event(&ev, &host);
        assert_eq!(session.take_notifications(), vec![IDLE_MESSAGE.to_string()]);

        let ev = host.advance();
        session.handle_event(&ev, &host);
        assert!(session.take_notifications().is_empty());
    }

    #[test]
    fn test_idle_notification_disabled() {
        let mut host = SimulatedHost::logged_in();
        let mut session = SpotSession::default();
        host.set_animation(621);
        let ev = host.advance();
        session.handle_event(&ev, &host);
        host.set_animation(-1);
        let ev = host.advance();
        session.handle_event(&ev, &host);
        assert!(session.take_notifications().is_empty());
    }

    #[test]
    fn test_shutdown_clears_everything() {
        let mut host = SimulatedHost::logged_in();
        let mut session = SpotSession::new(idle_settings());
        let (_, ev) = host.spawn(LOBSTER_NPC, WorldPoint::new(1, 1, 0));
        session.handle_event(&ev, &host);
        host.set_animation(621);
        let ev = host.advance();
        session.handle_event(&ev, &host);

        session.shutdown();
        assert!(session.tracker().is_empty());
        assert!(!session.is_fishing());
    }
}
