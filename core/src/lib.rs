pub mod context;
pub mod game_data;
pub mod host;
pub mod idle;
pub mod session;
pub mod tracker;

// Re-exports for convenience
pub use context::{ConfigError, SettingsExt, TrackerSettings};
pub use game_data::*;
pub use host::{
    AnimationId, GameState, Handle, HostEvent, HostEventHandler, HostView, LocalPlayer, NpcId,
    SimulatedHost, TICK_MILLIS, Tick, WorldPoint,
};
pub use idle::{FISHING_ANIMATIONS, IDLE_MESSAGE, IdleWatcher, is_fishing_animation};
pub use session::SpotSession;
pub use tracker::{DepartureCache, LOCATION_CACHE_EXPIRY_TICKS, SpotTracker, TrackedSpot};
