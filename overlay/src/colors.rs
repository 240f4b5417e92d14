//! Spot color helpers

use spotwatch_core::context::{Color, spot_colors};

/// Linear RGB blend from `from` to `to`. `progress` is clamped to `[0, 1]`
/// and channels round half-up. The result is always opaque.
pub fn blend_colors(from: Color, to: Color, progress: f64) -> Color {
    let t = progress.clamp(0.0, 1.0) as f32;
    let channel = |a: u8, b: u8| {
        let (a, b) = (f32::from(a), f32::from(b));
        (a + t * (b - a) + 0.5).floor().clamp(0.0, 255.0) as u8
    };
    [
        channel(from[0], to[0]),
        channel(from[1], to[1]),
        channel(from[2], to[2]),
        255,
    ]
}

/// Replace the alpha channel
#[inline]
pub fn with_alpha(color: Color, alpha: u8) -> Color {
    [color[0], color[1], color[2], alpha]
}

/// Translucent fill used for the remaining-time pie slice
#[inline]
pub fn fill_alpha(alpha: u8) -> u8 {
    alpha / 3
}

/// Gold badge color at the given opacity
#[inline]
pub fn badge_color(alpha: u8) -> Color {
    with_alpha(spot_colors::NEWEST_BADGE, alpha)
}
