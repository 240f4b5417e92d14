//! Shared configuration types for spotwatch
//!
//! This crate contains serializable settings shared between the tracking core,
//! the overlay data builder, and the command-line tools.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ─────────────────────────────────────────────────────────────────────────────
// Color Type
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color as [r, g, b, a] bytes
pub type Color = [u8; 4];

/// Default colors for spot overlays
pub mod spot_colors {
    use super::Color;

    pub const FRESH: Color = [0, 255, 255, 255]; // Cyan
    pub const EXPIRED: Color = [255, 0, 0, 255]; // Red
    pub const ACTIVE: Color = [0, 200, 0, 255]; // Green
    pub const NEWEST_BADGE: Color = [255, 215, 0, 255]; // Gold
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde Default Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_fresh_color() -> Color {
    spot_colors::FRESH
}
fn default_expired_color() -> Color {
    spot_colors::EXPIRED
}
fn default_active_color() -> Color {
    spot_colors::ACTIVE
}
fn default_circle_opacity() -> u8 {
    128
}
fn default_circle_radius() -> u32 {
    18
}
fn default_stroke_width() -> u32 {
    2
}

// ─────────────────────────────────────────────────────────────────────────────
// Tracker Settings
// ─────────────────────────────────────────────────────────────────────────────

/// User-facing settings for the spot overlays and notifications.
///
/// Every field carries a serde default so older or hand-edited config files
/// load without errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSettings {
    // ─── Colors ─────────────────────────────────────────────────────────────
    /// Circle color when a spot has just appeared
    #[serde(default = "default_fresh_color")]
    pub fresh_color: Color,
    /// Circle color when a spot is about to move
    #[serde(default = "default_expired_color")]
    pub expired_color: Color,
    /// Circle color while actively fishing at the spot
    #[serde(default = "default_active_color")]
    pub active_color: Color,
    /// Opacity for strokes and text (0 = transparent, 255 = solid)
    #[serde(default = "default_circle_opacity")]
    pub circle_opacity: u8,

    // ─── Display ────────────────────────────────────────────────────────────
    #[serde(default = "default_true")]
    pub show_circle: bool,
    #[serde(default = "default_circle_radius")]
    pub circle_radius: u32,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: u32,
    /// Fill the remaining pie slice with a translucent version of the color
    #[serde(default = "default_true")]
    pub fill_circle: bool,
    /// Elapsed time text above the spot
    #[serde(default = "default_true")]
    pub show_timer: bool,
    #[serde(default)]
    pub show_spot_name: bool,
    #[serde(default)]
    pub show_fish_icon: bool,
    /// Mark the most recently spawned spot (least likely to move)
    #[serde(default = "default_true")]
    pub show_newest_badge: bool,

    // ─── Filtering ──────────────────────────────────────────────────────────
    /// Only show spots of the type currently being fished
    #[serde(default)]
    pub only_current_type: bool,
    /// Show spots that never move (Karambwan, Tempoross, ...)
    #[serde(default)]
    pub show_static_spots: bool,
    /// Comma-separated fish names to hide, case-insensitive
    #[serde(default)]
    pub ignored_fish: String,

    // ─── Notifications ──────────────────────────────────────────────────────
    #[serde(default)]
    pub idle_notification: bool,

    // ─── Minimap ────────────────────────────────────────────────────────────
    #[serde(default)]
    pub show_minimap_dots: bool,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            fresh_color: spot_colors::FRESH,
            expired_color: spot_colors::EXPIRED,
            active_color: spot_colors::ACTIVE,
            circle_opacity: 128,
            show_circle: true,
            circle_radius: 18,
            stroke_width: 2,
            fill_circle: true,
            show_timer: true,
            show_spot_name: false,
            show_fish_icon: false,
            show_newest_badge: true,
            only_current_type: false,
            show_static_spots: false,
            ignored_fish: String::new(),
            idle_notification: false,
            show_minimap_dots: false,
        }
    }
}

impl TrackerSettings {
    /// Parse `ignored_fish` into a lower-cased set, skipping blank entries.
    pub fn ignored_fish_set(&self) -> HashSet<String> {
        parse_ignored_fish(&self.ignored_fish)
    }
}

/// Split a comma-separated fish list into trimmed, lower-cased names.
pub fn parse_ignored_fish(value: &str) -> HashSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}
