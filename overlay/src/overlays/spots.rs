//! Spot Timer Overlay
//!
//! One pie-timer marker per visible fishing spot: a ring that empties as the
//! spot ages, an elapsed-time label, and a star on the newest spot.

use std::collections::HashSet;

use spotwatch_core::context::{Color, TrackerSettings};
use spotwatch_core::{Handle, SpotKind, SpotTracker, WorldPoint};

use super::{SpotFilter, sorted_spots};
use crate::colors::{badge_color, blend_colors, fill_alpha, with_alpha};
use crate::utils::format_elapsed;

/// Star shown on the newest spot
pub const NEWEST_BADGE: &str = "\u{2605}";

/// Suffix for spots whose lifetime cannot be predicted
pub const UNPREDICTABLE_SUFFIX: &str = " (?)";

/// A single spot marker for display
#[derive(Debug, Clone, PartialEq)]
pub struct SpotMarker {
    pub handle: Handle,
    pub position: WorldPoint,
    pub kind: &'static SpotKind,
    /// Fraction of the expected lifetime that has passed
    pub progress: f64,
    /// Opaque base color (active color, or fresh → expired blend)
    pub color: Color,
    /// Base color at the configured opacity, used for outline and text
    pub stroke_color: Color,
    /// Pie fill, present when filling is enabled and time remains
    pub fill_color: Option<Color>,
    /// Remaining sweep in degrees, counter-clockwise from 12 o'clock
    pub sweep_degrees: f64,
    /// Draw the pie-timer circle at all
    pub show_circle: bool,
    /// Elapsed time text, badge-prefixed on the newest spot
    pub timer_text: Option<String>,
    /// Color for `timer_text` (gold on the newest spot)
    pub text_color: Color,
    pub is_active: bool,
    pub is_newest: bool,
    /// Highest-level unfiltered fish name, or the spot name
    pub label: Option<String>,
    /// Item whose icon represents the spot
    pub icon_item_id: Option<u32>,
}

impl SpotMarker {
    /// Whether the remaining-time arc differs from the full outline
    pub fn has_partial_arc(&self) -> bool {
        self.sweep_degrees > 0.0 && self.sweep_degrees < 360.0
    }
}

/// Build markers for every spot that passes the display filters, ordered by handle.
pub fn build_markers(tracker: &SpotTracker, settings: &TrackerSettings) -> Vec<SpotMarker> {
    let filter = SpotFilter::new(tracker, settings);
    let ignored = settings.ignored_fish_set();
    let active = tracker.current_interaction().map(|i| i.handle);
    let newest = if settings.show_newest_badge {
        tracker.newest_pick()
    } else {
        None
    };

    let mut rendered_tiles = HashSet::new();
    let mut markers = Vec::new();

    for (handle, spot) in sorted_spots(tracker) {
        if !filter.allows(spot.kind) {
            continue;
        }
        if !rendered_tiles.insert(spot.position) {
            continue;
        }
        let display_fish = spot.kind.top_unfiltered(&ignored);
        if !ignored.is_empty() && display_fish.is_none() {
            continue;
        }

        let is_active = active == Some(handle);
        let is_newest = newest == Some(handle);
        let progress = tracker.progress(handle);
        let elapsed = spot.elapsed(tracker.current_tick());

        let color = if is_active {
            settings.active_color
        } else {
            blend_colors(settings.fresh_color, settings.expired_color, progress)
        };
        let alpha = settings.circle_opacity;
        let stroke_color = with_alpha(color, alpha);
        let sweep_degrees = 360.0 * (1.0 - progress);

        let fill_color = (settings.show_circle && settings.fill_circle && sweep_degrees > 0.0)
            .then(|| with_alpha(color, fill_alpha(alpha)));

        let timer_text = match (settings.show_timer, is_newest) {
            (true, newest) => {
                let mut text = format_elapsed(elapsed);
                if spot.kind.is_unpredictable() {
                    text.push_str(UNPREDICTABLE_SUFFIX);
                }
                if newest {
                    text = format!("{NEWEST_BADGE} {text}");
                }
                Some(text)
            }
            (false, true) => Some(NEWEST_BADGE.to_string()),
            (false, false) => None,
        };
        let text_color = if is_newest { badge_color(alpha) } else { stroke_color };

        let label = settings.show_spot_name.then(|| {
            display_fish
                .map(|fish| fish.name)
                .unwrap_or(spot.kind.name)
                .to_string()
        });
        let icon_item_id = if settings.show_fish_icon {
            display_fish.map(|fish| fish.item_id)
        } else {
            None
        };

        markers.push(SpotMarker {
            handle,
            position: spot.position,
            kind: spot.kind,
            progress,
            color,
            stroke_color,
            fill_color,
            sweep_degrees,
            show_circle: settings.show_circle,
            timer_text,
            text_color,
            is_active,
            is_newest,
            label,
            icon_item_id,
        });
    }

    markers
}
