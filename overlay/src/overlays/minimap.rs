//! Minimap Dots
//!
//! A small dot per tracked spot, colored by how far through its lifetime it is.

use spotwatch_core::context::{Color, TrackerSettings};
use spotwatch_core::{Handle, SpotTracker, WorldPoint};

use super::{SpotFilter, sorted_spots};
use crate::colors::blend_colors;

/// Dot diameter in pixels
pub const DOT_SIZE: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapDot {
    pub handle: Handle,
    pub position: WorldPoint,
    /// Opaque fresh → expired blend
    pub color: Color,
}

/// Build minimap dots, or nothing when dots are disabled.
///
/// Dots are not deduplicated per tile and ignore the fish filter; stacked
/// spots simply overlap on the minimap.
pub fn build_dots(tracker: &SpotTracker, settings: &TrackerSettings) -> Vec<MinimapDot> {
    if !settings.show_minimap_dots {
        return Vec::new();
    }
    let filter = SpotFilter::new(tracker, settings);
    sorted_spots(tracker)
        .into_iter()
        .filter(|(_, spot)| filter.allows(spot.kind))
        .map(|(handle, spot)| MinimapDot {
            handle,
            position: spot.position,
            color: blend_colors(
                settings.fresh_color,
                settings.expired_color,
                tracker.progress(handle),
            ),
        })
        .collect()
}
