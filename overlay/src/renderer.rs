//! Software scene renderer using tiny-skia
//!
//! Rasterizes spot markers and minimap dots into an RGBA pixmap, looking
//! straight down on the scene with north up. Text is left to the host UI;
//! the newest spot gets a small gold badge dot instead of the star glyph.

use std::f32::consts::PI;
use std::path::Path;

use spotwatch_core::WorldPoint;
use thiserror::Error;
use tiny_skia::{Color, FillRule, Paint, Path as SkPath, PathBuilder, Pixmap, Stroke, Transform};
use tracing::debug;

use crate::overlays::{DOT_SIZE, MinimapDot, OverlayData, SpotMarker};
use crate::utils::color_from_rgba;

/// Line segments used to approximate a full circle's arc
const ARC_SEGMENTS: u32 = 64;

/// Badge dot radius in pixels
const BADGE_RADIUS: f32 = 3.0;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Pixmap dimensions were zero or too large
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// PNG encoding or file write failed
    #[error("Encode error: {0}")]
    Encode(String),
}

/// Maps world tiles onto the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneView {
    /// Tile drawn at the canvas center
    pub center: WorldPoint,
    /// Pixels per tile
    pub tile_size: f32,
}

impl SceneView {
    pub fn new(center: WorldPoint, tile_size: f32) -> Self {
        Self { center, tile_size }
    }

    /// Canvas position of a tile's center, or `None` for other planes
    pub fn project(&self, point: WorldPoint, width: u32, height: u32) -> Option<(f32, f32)> {
        if point.plane != self.center.plane {
            return None;
        }
        let dx = (point.x - self.center.x) as f32;
        let dy = (point.y - self.center.y) as f32;
        Some((
            width as f32 / 2.0 + dx * self.tile_size,
            height as f32 / 2.0 - dy * self.tile_size,
        ))
    }
}

/// CPU renderer for a single frame of overlay data
pub struct SceneRenderer {
    pixmap: Pixmap,
    view: SceneView,
    circle_radius: f32,
    stroke_width: f32,
}

impl SceneRenderer {
    pub fn new(
        width: u32,
        height: u32,
        view: SceneView,
        circle_radius: u32,
        stroke_width: u32,
    ) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap,
            view,
            circle_radius: circle_radius as f32,
            stroke_width: stroke_width.max(1) as f32,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Raw premultiplied RGBA bytes
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color);
    }

    /// Draw markers first, then minimap dots on top
    pub fn render(&mut self, data: &OverlayData) {
        for marker in &data.markers {
            self.draw_marker(marker);
        }
        for dot in &data.dots {
            self.draw_dot(dot);
        }
        debug!(
            markers = data.markers.len(),
            dots = data.dots.len(),
            "Rendered spot scene"
        );
    }

    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        self.pixmap
            .save_png(path)
            .map_err(|e| RenderError::Encode(e.to_string()))
    }

    fn project(&self, point: WorldPoint) -> Option<(f32, f32)> {
        self.view
            .project(point, self.pixmap.width(), self.pixmap.height())
    }

    fn draw_marker(&mut self, marker: &SpotMarker) {
        let Some((cx, cy)) = self.project(marker.position) else {
            return;
        };
        let radius = self.circle_radius;

        if marker.show_circle {
            if let Some(fill) = marker.fill_color
                && let Some(pie) = pie_path(cx, cy, radius, marker.sweep_degrees as f32)
            {
                self.fill(&pie, fill);
            }
            if let Some(outline) = PathBuilder::from_circle(cx, cy, radius) {
                self.stroke(&outline, marker.stroke_color);
            }
            if marker.has_partial_arc()
                && let Some(pie) = pie_path(cx, cy, radius, marker.sweep_degrees as f32)
            {
                self.stroke(&pie, marker.stroke_color);
            }
        }

        if marker.is_newest
            && let Some(badge) = PathBuilder::from_circle(cx, cy - radius - 8.0, BADGE_RADIUS)
        {
            self.fill(&badge, marker.text_color);
        }
    }

    fn draw_dot(&mut self, dot: &MinimapDot) {
        let Some((cx, cy)) = self.project(dot.position) else {
            return;
        };
        if let Some(path) = PathBuilder::from_circle(cx, cy, DOT_SIZE as f32 / 2.0) {
            self.fill(&path, dot.color);
        }
    }

    fn fill(&mut self, path: &SkPath, color: [u8; 4]) {
        let mut paint = Paint::default();
        paint.set_color(color_from_rgba(color));
        paint.anti_alias = true;
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn stroke(&mut self, path: &SkPath, color: [u8; 4]) {
        let mut paint = Paint::default();
        paint.set_color(color_from_rgba(color));
        paint.anti_alias = true;
        let stroke = Stroke {
            width: self.stroke_width,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(path, &paint, &stroke, Transform::identity(), None);
    }
}

/// Closed pie slice starting at 12 o'clock and sweeping counter-clockwise
fn pie_path(cx: f32, cy: f32, radius: f32, sweep_degrees: f32) -> Option<SkPath> {
    if sweep_degrees <= 0.0 {
        return None;
    }
    let sweep = sweep_degrees.min(360.0).to_radians();
    let segments = ((ARC_SEGMENTS as f32 * sweep / (2.0 * PI)).ceil() as u32).max(1);
    let start = PI / 2.0;

    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy);
    for i in 0..=segments {
        let angle = start + sweep * i as f32 / segments as f32;
        pb.line_to(cx + radius * angle.cos(), cy - radius * angle.sin());
    }
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_centers_view() {
        let view = SceneView::new(WorldPoint::new(100, 200, 0), 10.0);
        assert_eq!(view.project(WorldPoint::new(100, 200, 0), 64, 64), Some((32.0, 32.0)));
        assert_eq!(view.project(WorldPoint::new(101, 201, 0), 64, 64), Some((42.0, 22.0)));
        assert_eq!(view.project(WorldPoint::new(100, 200, 1), 64, 64), None);
    }

    #[test]
    fn test_invalid_size() {
        let view = SceneView::new(WorldPoint::default(), 8.0);
        assert!(matches!(
            SceneRenderer::new(0, 10, view, 18, 2),
            Err(RenderError::InvalidSize { .. })
        ));
        let err = RenderError::InvalidSize {
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "Invalid canvas size: 0x10");
    }

    #[test]
    fn test_pie_path_empty_sweep() {
        assert!(pie_path(10.0, 10.0, 5.0, 0.0).is_none());
        assert!(pie_path(10.0, 10.0, 5.0, 90.0).is_some());
        assert!(pie_path(10.0, 10.0, 5.0, 360.0).is_some());
    }
}
