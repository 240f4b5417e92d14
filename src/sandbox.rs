//! Interactive sandbox state
//!
//! A simulated client plus a spot session, driven one command at a time.
//! Every host mutation is forwarded to the session the way a real client
//! would deliver it.

use std::path::Path;

use spotwatch_core::{
    AnimationId, GameState, Handle, HostEvent, HostEventHandler, HostView, NpcId, SimulatedHost,
    SpotSession, Tick, TrackerSettings, WorldPoint,
};
use spotwatch_overlay::utils::format_elapsed;
use spotwatch_overlay::{OverlayData, RenderError, SceneRenderer, SceneView};
use tracing::debug;

/// Pixels per tile in snapshots
const SNAPSHOT_TILE_SIZE: f32 = 48.0;
const SNAPSHOT_SIZE: u32 = 512;

pub struct Sandbox {
    host: SimulatedHost,
    session: SpotSession,
}

impl Sandbox {
    /// Start logged in, as if the plugin were enabled mid-session
    pub fn new(settings: TrackerSettings) -> Self {
        let host = SimulatedHost::logged_in();
        let mut session = SpotSession::new(settings);
        session.start(&host);
        Self { host, session }
    }

    pub fn session(&self) -> &SpotSession {
        &self.session
    }

    pub fn tick_count(&self) -> Tick {
        self.host.tick_count()
    }

    fn dispatch(&mut self, event: HostEvent) {
        debug!(?event, "Sandbox event");
        self.session.handle_event(&event, &self.host);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────

    pub fn login(&mut self) {
        let event = self.host.set_game_state(GameState::LoggedIn);
        self.dispatch(event);
    }

    pub fn logout(&mut self) {
        let event = self.host.set_game_state(GameState::LoginScreen);
        self.dispatch(event);
    }

    /// Hop worlds: every entity is dropped and the player lands logged in again
    pub fn hop(&mut self) {
        let event = self.host.set_game_state(GameState::Hopping);
        self.dispatch(event);
        self.login();
    }

    pub fn set_settings(&mut self, settings: TrackerSettings) {
        self.session.set_settings(settings);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Entities
    // ─────────────────────────────────────────────────────────────────────────

    pub fn spawn(&mut self, npc_id: NpcId, position: WorldPoint) -> Handle {
        let (handle, event) = self.host.spawn(npc_id, position);
        self.dispatch(event);
        handle
    }

    /// Remove an entity. A silent despawn delivers no event, like a missed
    /// notification from the client.
    pub fn despawn(&mut self, handle: Handle, silent: bool) -> bool {
        if silent {
            return self.host.invalidate(handle);
        }
        match self.host.despawn(handle) {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    pub fn move_npc(&mut self, handle: Handle, position: WorldPoint) -> bool {
        self.host.move_npc(handle, position)
    }

    pub fn target(&mut self, target: Option<Handle>) {
        self.host.set_interacting(target);
    }

    pub fn animate(&mut self, animation: AnimationId) {
        self.host.set_animation(animation);
    }

    /// Advance the clock `ticks` times, returning any notifications raised
    pub fn tick(&mut self, ticks: u32) -> Vec<String> {
        let mut notifications = Vec::new();
        for _ in 0..ticks {
            let event = self.host.advance();
            self.dispatch(event);
            notifications.extend(self.session.take_notifications());
        }
        notifications
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Display
    // ─────────────────────────────────────────────────────────────────────────

    pub fn overlay(&self) -> OverlayData {
        OverlayData::build(self.session.tracker(), self.session.settings())
    }

    /// One line per tracked spot, in handle order
    pub fn status_lines(&self) -> Vec<String> {
        let tracker = self.session.tracker();
        let now = self.host.tick_count();
        let newest = tracker.newest_pick();

        let mut spots: Vec<_> = tracker.tracked().collect();
        spots.sort_by_key(|(handle, _)| *handle);
        spots
            .into_iter()
            .map(|(handle, spot)| {
                let mut line = format!(
                    "{} {} at {} elapsed {} ({:.0}%)",
                    handle,
                    spot.kind.name,
                    spot.position,
                    format_elapsed(spot.elapsed(now)),
                    tracker.progress(handle) * 100.0
                );
                if newest == Some(handle) {
                    line.push_str(" [newest]");
                }
                if tracker.current_interaction().is_some_and(|i| i.handle == handle) {
                    line.push_str(" [fishing]");
                }
                line
            })
            .collect()
    }

    /// Rasterize the current overlay, centered on the first displayed marker
    pub fn snapshot(&self, path: &Path) -> Result<usize, RenderError> {
        let data = self.overlay();
        let center = data
            .markers
            .first()
            .map(|m| m.position)
            .or_else(|| data.dots.first().map(|d| d.position))
            .unwrap_or_default();
        let settings = self.session.settings();
        let mut renderer = SceneRenderer::new(
            SNAPSHOT_SIZE,
            SNAPSHOT_SIZE,
            SceneView::new(center, SNAPSHOT_TILE_SIZE),
            settings.circle_radius,
            settings.stroke_width,
        )?;
        renderer.render(&data);
        renderer.save_png(path)?;
        Ok(data.markers.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotwatch_core::SettingsExt;

    const LOBSTER_NPC: NpcId = 1510;
    const FISHING_ANIMATION: AnimationId = 621;

    fn tile(x: i32) -> WorldPoint {
        WorldPoint::new(x, 3200, 0)
    }

    #[test]
    fn test_spawn_and_status() {
        let mut sandbox = Sandbox::new(TrackerSettings::default());
        sandbox.tick(10);
        let handle = sandbox.spawn(LOBSTER_NPC, tile(1));
        sandbox.tick(100);

        let lines = sandbox.status_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with(&format!("{} Lobster", handle)));
        assert!(lines[0].contains("elapsed 1:00"));
        assert!(lines[0].ends_with("[newest]"));
        assert_eq!(sandbox.overlay().markers.len(), 1);
    }

    #[test]
    fn test_despawn_resume_and_silent_despawn() {
        let mut sandbox = Sandbox::new(TrackerSettings::default());
        sandbox.tick(10);
        let handle = sandbox.spawn(LOBSTER_NPC, tile(1));
        sandbox.tick(50);
        assert!(sandbox.despawn(handle, false));
        assert_eq!(sandbox.session().tracker().departures().len(), 1);

        let resumed = sandbox.spawn(LOBSTER_NPC, tile(1));
        assert_eq!(sandbox.session().tracker().spawn_tick(resumed), Some(10));

        // Silent removal is only noticed by the next tick's sweep
        assert!(sandbox.despawn(resumed, true));
        assert!(sandbox.session().tracker().is_tracked(resumed));
        sandbox.tick(1);
        assert!(!sandbox.session().tracker().is_tracked(resumed));
        assert!(!sandbox.despawn(resumed, false));
    }

    #[test]
    fn test_hop_clears_everything() {
        let mut sandbox = Sandbox::new(TrackerSettings::default());
        sandbox.tick(5);
        sandbox.spawn(LOBSTER_NPC, tile(1));
        sandbox.hop();

        assert!(sandbox.session().tracker().is_empty());
        assert!(sandbox.status_lines().is_empty());
        sandbox.tick(1);
        assert!(sandbox.session().tracker().is_empty());
    }

    #[test]
    fn test_idle_notification() {
        let settings = TrackerSettings {
            idle_notification: true,
            ..TrackerSettings::default()
        };
        let mut sandbox = Sandbox::new(settings);
        sandbox.animate(FISHING_ANIMATION);
        assert!(sandbox.tick(3).is_empty());
        sandbox.animate(-1);
        assert_eq!(sandbox.tick(3), vec!["You have stopped fishing!".to_string()]);
    }

    #[test]
    fn test_settings_file_applies() {
        let dir = std::env::temp_dir().join(format!("spotwatch-sandbox-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        let saved = TrackerSettings {
            show_static_spots: true,
            ..TrackerSettings::default()
        };
        saved.save_to(&path).unwrap();

        let mut sandbox = Sandbox::new(TrackerSettings::default());
        sandbox.set_settings(TrackerSettings::load_from(&path).unwrap());
        assert!(sandbox.session().settings().show_static_spots);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
