//! Tests for overlay data builders

use spotwatch_core::context::{TrackerSettings, spot_colors};
use spotwatch_core::{
    Handle, HostEventHandler, NpcId, SimulatedHost, SpotSession, Tick, WorldPoint,
};

use super::*;

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

const LOBSTER_NPC: NpcId = 1510;
const SHRIMP_NPC: NpcId = 1514;
const ANGLERFISH_NPC: NpcId = 6825;
const KARAMBWAN_NPC: NpcId = 4712;

fn tile(x: i32) -> WorldPoint {
    WorldPoint::new(x, 3200, 0)
}

struct Scene {
    host: SimulatedHost,
    session: SpotSession,
}

impl Scene {
    fn new() -> Self {
        Self {
            host: SimulatedHost::logged_in(),
            session: SpotSession::default(),
        }
    }

    fn tick_to(&mut self, tick: Tick) {
        let ev = self.host.advance_to(tick);
        self.session.handle_event(&ev, &self.host);
    }

    fn spawn(&mut self, npc_id: NpcId, position: WorldPoint) -> Handle {
        let (handle, ev) = self.host.spawn(npc_id, position);
        self.session.handle_event(&ev, &self.host);
        handle
    }

    fn markers(&self, settings: &TrackerSettings) -> Vec<SpotMarker> {
        build_markers(self.session.tracker(), settings)
    }

    fn dots(&self, settings: &TrackerSettings) -> Vec<MinimapDot> {
        build_dots(self.session.tracker(), settings)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Markers
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_marker_colors_and_timer() {
    let mut scene = Scene::new();
    scene.tick_to(100);
    let spot = scene.spawn(LOBSTER_NPC, tile(1));
    scene.tick_to(400);

    let settings = TrackerSettings::default();
    let markers = scene.markers(&settings);
    assert_eq!(markers.len(), 1);
    let marker = &markers[0];

    assert_eq!(marker.handle, spot);
    assert!((marker.progress - 300.0 / 530.0).abs() < 1e-9);
    assert_eq!(
        marker.color,
        crate::colors::blend_colors(spot_colors::FRESH, spot_colors::EXPIRED, marker.progress)
    );
    assert_eq!(marker.stroke_color[3], 128);
    assert_eq!(marker.fill_color.map(|c| c[3]), Some(42));
    assert!((marker.sweep_degrees - 360.0 * (1.0 - marker.progress)).abs() < 1e-9);
    assert!(marker.has_partial_arc());

    // 300 ticks = 180 s; the only spot is also the newest
    assert!(marker.is_newest);
    assert_eq!(marker.timer_text.as_deref(), Some("\u{2605} 3:00"));
    assert_eq!(marker.text_color, [255, 215, 0, 128]);
}

#[test]
fn test_expired_marker_has_no_fill() {
    let mut scene = Scene::new();
    scene.tick_to(100);
    scene.spawn(LOBSTER_NPC, tile(1));
    scene.tick_to(700);

    let markers = scene.markers(&TrackerSettings::default());
    assert_eq!(markers[0].progress, 1.0);
    assert_eq!(markers[0].sweep_degrees, 0.0);
    assert_eq!(markers[0].fill_color, None);
    assert_eq!(markers[0].color, [255, 0, 0, 255]);
    assert!(!markers[0].has_partial_arc());
}

#[test]
fn test_unpredictable_suffix_and_plain_text() {
    let mut scene = Scene::new();
    scene.tick_to(10);
    let angler = scene.spawn(ANGLERFISH_NPC, tile(1));
    scene.tick_to(20);
    let lobster = scene.spawn(LOBSTER_NPC, tile(2));
    scene.tick_to(110);

    let markers = scene.markers(&TrackerSettings::default());
    let text = |handle| {
        markers
            .iter()
            .find(|m| m.handle == handle)
            .and_then(|m| m.timer_text.clone())
    };
    // 100 ticks = 60 s
    assert_eq!(text(angler), Some("1:00 (?)".to_string()));
    assert_eq!(text(lobster), Some("\u{2605} 0:54".to_string()));
}

#[test]
fn test_badge_only_when_timer_hidden() {
    let mut scene = Scene::new();
    scene.tick_to(10);
    let older = scene.spawn(LOBSTER_NPC, tile(1));
    scene.tick_to(20);
    let newest = scene.spawn(LOBSTER_NPC, tile(2));
    scene.tick_to(21);

    let settings = TrackerSettings {
        show_timer: false,
        ..TrackerSettings::default()
    };
    let markers = scene.markers(&settings);
    let find = |handle| markers.iter().find(|m| m.handle == handle).unwrap();
    assert_eq!(find(newest).timer_text.as_deref(), Some("\u{2605}"));
    assert_eq!(find(older).timer_text, None);

    let settings = TrackerSettings {
        show_newest_badge: false,
        ..TrackerSettings::default()
    };
    assert!(scene.markers(&settings).iter().all(|m| !m.is_newest));
}

#[test]
fn test_active_spot_uses_active_color() {
    let mut scene = Scene::new();
    scene.tick_to(10);
    let spot = scene.spawn(LOBSTER_NPC, tile(1));
    scene.host.set_interacting(Some(spot));
    scene.tick_to(200);

    let markers = scene.markers(&TrackerSettings::default());
    assert!(markers[0].is_active);
    assert_eq!(markers[0].color, spot_colors::ACTIVE);
    assert_eq!(markers[0].stroke_color, [0, 200, 0, 128]);
}

#[test]
fn test_static_spots_hidden_by_default() {
    let mut scene = Scene::new();
    scene.tick_to(10);
    scene.spawn(KARAMBWAN_NPC, tile(1));
    scene.spawn(LOBSTER_NPC, tile(2));
    scene.tick_to(11);

    assert_eq!(scene.markers(&TrackerSettings::default()).len(), 1);
    let settings = TrackerSettings {
        show_static_spots: true,
        ..TrackerSettings::default()
    };
    assert_eq!(scene.markers(&settings).len(), 2);
}

#[test]
fn test_one_marker_per_tile() {
    let mut scene = Scene::new();
    scene.tick_to(10);
    let first = scene.spawn(LOBSTER_NPC, tile(1));
    let _second = scene.spawn(SHRIMP_NPC, tile(1));
    scene.tick_to(11);

    let markers = scene.markers(&TrackerSettings::default());
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].handle, first);
}

#[test]
fn test_ignored_fish_filter_and_label() {
    let mut scene = Scene::new();
    scene.tick_to(10);
    scene.spawn(SHRIMP_NPC, tile(1));
    let lobster = scene.spawn(LOBSTER_NPC, tile(2));
    scene.tick_to(11);

    let settings = TrackerSettings {
        ignored_fish: "shrimp, ANCHOVIES, Swordfish".to_string(),
        show_spot_name: true,
        show_fish_icon: true,
        ..TrackerSettings::default()
    };
    let markers = scene.markers(&settings);
    assert_eq!(markers.len(), 1, "spot with every fish ignored is skipped");
    assert_eq!(markers[0].handle, lobster);
    assert_eq!(markers[0].label.as_deref(), Some("Lobster"));
    assert_eq!(markers[0].icon_item_id, Some(377));

    let plain = scene.markers(&TrackerSettings::default());
    assert!(plain.iter().all(|m| m.label.is_none() && m.icon_item_id.is_none()));
}

#[test]
fn test_only_current_type() {
    let mut scene = Scene::new();
    scene.tick_to(10);
    let lobster = scene.spawn(LOBSTER_NPC, tile(1));
    scene.spawn(SHRIMP_NPC, tile(2));
    scene.tick_to(11);

    let settings = TrackerSettings {
        only_current_type: true,
        ..TrackerSettings::default()
    };
    // Not fishing: nothing to narrow down to
    assert_eq!(scene.markers(&settings).len(), 2);

    scene.host.set_interacting(Some(lobster));
    scene.tick_to(12);
    let markers = scene.markers(&settings);
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].handle, lobster);
}

#[test]
fn test_circle_disabled_has_no_fill() {
    let mut scene = Scene::new();
    scene.tick_to(10);
    scene.spawn(LOBSTER_NPC, tile(1));
    scene.tick_to(11);

    let settings = TrackerSettings {
        show_circle: false,
        ..TrackerSettings::default()
    };
    let markers = scene.markers(&settings);
    assert!(!markers[0].show_circle);
    assert_eq!(markers[0].fill_color, None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Minimap Dots
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_minimap_dots() {
    let mut scene = Scene::new();
    scene.tick_to(10);
    scene.spawn(LOBSTER_NPC, tile(1));
    scene.spawn(SHRIMP_NPC, tile(1));
    scene.spawn(KARAMBWAN_NPC, tile(2));
    scene.tick_to(11);

    assert!(scene.dots(&TrackerSettings::default()).is_empty());

    let settings = TrackerSettings {
        show_minimap_dots: true,
        ..TrackerSettings::default()
    };
    let dots = scene.dots(&settings);
    assert_eq!(dots.len(), 2, "stacked spots each get a dot; static spots do not");
    assert!(dots.iter().all(|d| d.color[3] == 255));

    let data = OverlayData::build(scene.session.tracker(), &settings);
    assert_eq!(data.dots, dots);
    assert_eq!(data.markers.len(), 1);
    assert!(!data.is_empty());
}
