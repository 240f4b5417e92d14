//! Spot overlay data
//!
//! Overlays are rebuilt from a tracker snapshot after each tick's mutation.
//! Builders only read the tracker and settings; nothing here draws.

mod minimap;
mod spots;

#[cfg(test)]
mod overlay_tests;

use spotwatch_core::context::TrackerSettings;
use spotwatch_core::{Handle, SpotKind, SpotTracker, TrackedSpot};

pub use minimap::{DOT_SIZE, MinimapDot, build_dots};
pub use spots::{NEWEST_BADGE, SpotMarker, UNPREDICTABLE_SUFFIX, build_markers};

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayData {
    pub markers: Vec<SpotMarker>,
    pub dots: Vec<MinimapDot>,
}

impl OverlayData {
    pub fn build(tracker: &SpotTracker, settings: &TrackerSettings) -> Self {
        Self {
            markers: build_markers(tracker, settings),
            dots: build_dots(tracker, settings),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.dots.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared Filtering
// ─────────────────────────────────────────────────────────────────────────────

/// Kind-level display filter shared by markers and dots
struct SpotFilter {
    show_static: bool,
    /// Kind being fished, when only that kind should be shown
    only_kind: Option<&'static SpotKind>,
}

impl SpotFilter {
    fn new(tracker: &SpotTracker, settings: &TrackerSettings) -> Self {
        let only_kind = if settings.only_current_type {
            tracker.current_interaction_kind()
        } else {
            None
        };
        Self {
            show_static: settings.show_static_spots,
            only_kind,
        }
    }

    fn allows(&self, kind: &'static SpotKind) -> bool {
        if kind.is_static() && !self.show_static {
            return false;
        }
        self.only_kind.is_none_or(|only| only.id == kind.id)
    }
}

/// Tracked spots in handle order, so per-tile deduplication is deterministic
fn sorted_spots(tracker: &SpotTracker) -> Vec<(Handle, &TrackedSpot)> {
    let mut spots: Vec<_> = tracker.tracked().collect();
    spots.sort_by_key(|(handle, _)| *handle);
    spots
}
