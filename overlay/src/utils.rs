//! Common utility functions for spot overlays

use spotwatch_core::{TICK_MILLIS, Tick};
use tiny_skia::Color;

/// Convert [u8; 4] RGBA array to tiny_skia Color
#[inline]
pub fn color_from_rgba(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Whole seconds covered by `ticks` game ticks (truncated)
pub fn ticks_to_secs(ticks: Tick) -> u64 {
    u64::from(ticks) * u64::from(TICK_MILLIS) / 1000
}

/// Format a duration in seconds as M:SS
pub fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Format elapsed game ticks as M:SS
pub fn format_elapsed(ticks: Tick) -> String {
    format_time(ticks_to_secs(ticks))
}
