//! Spotwatch Overlay Library
//!
//! Turns tracker state into drawable overlay data.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    overlays/                        │
//! │        SpotMarker, MinimapDot, OverlayData          │
//! │       (per-frame data built from the tracker)       │
//! ├─────────────────────────────────────────────────────┤
//! │                 colors, utils                       │
//! │        color blending, elapsed-time text            │
//! ├─────────────────────────────────────────────────────┤
//! │                    renderer                         │
//! │                    tiny-skia                        │
//! │          (optional CPU rasterization)               │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod colors;
pub mod overlays;
pub mod renderer;
pub mod utils;

// Re-export commonly used types
pub use colors::blend_colors;
pub use overlays::{MinimapDot, OverlayData, SpotMarker, build_dots, build_markers};
pub use renderer::{RenderError, SceneRenderer, SceneView};
