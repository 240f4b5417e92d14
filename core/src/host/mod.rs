//! Host client abstraction
//!
//! The game client owns every entity. The tracker only ever sees opaque,
//! recyclable handles and asks the host about them through [`HostView`].
//! A handle is meaningful only while the host still reports it as live, so
//! consumers re-validate instead of trusting despawn notifications.

mod event;
pub mod sim;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use event::{HostEvent, HostEventHandler};
pub use sim::SimulatedHost;

/// Game tick count (one simulation step, 600 ms)
pub type Tick = u32;

/// NPC type/template ID as reported by the client
pub type NpcId = i32;

/// Animation ID as reported by the client
pub type AnimationId = i32;

/// Length of one game tick in milliseconds
pub const TICK_MILLIS: u32 = 600;

/// Opaque handle to a live entity.
///
/// Handles are recycled by the host once an entity is gone, so two equal
/// handles only refer to the same entity while both are live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u32);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete world tile coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub plane: i32,
}

impl WorldPoint {
    pub const fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.plane)
    }
}

/// Client session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    #[default]
    LoginScreen,
    LoggingIn,
    Loading,
    LoggedIn,
    ConnectionLost,
    Hopping,
}

impl GameState {
    /// Leaving the world (back to login or hopping worlds) invalidates every handle
    pub fn ends_session(self) -> bool {
        matches!(self, GameState::LoginScreen | GameState::Hopping)
    }

    pub fn is_logged_in(self) -> bool {
        self == GameState::LoggedIn
    }
}

/// What the local player is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalPlayer {
    /// Entity the player is interacting with, if any
    pub interacting: Option<Handle>,
    /// Current animation (-1 when idle)
    pub animation: AnimationId,
}

/// Read-only view of the host client, polled once per tick.
pub trait HostView {
    /// Current tick count
    fn tick_count(&self) -> Tick;

    fn game_state(&self) -> GameState;

    /// NPC type ID for a live handle. `None` once the handle is invalid.
    fn npc_id(&self, handle: Handle) -> Option<NpcId>;

    /// Current tile of a live handle
    fn position(&self, handle: Handle) -> Option<WorldPoint>;

    /// All live NPC handles in the scene
    fn npcs(&self) -> Vec<Handle>;

    /// The local player, if one is loaded
    fn local_player(&self) -> Option<LocalPlayer>;

    fn is_alive(&self, handle: Handle) -> bool {
        self.npc_id(handle).is_some()
    }
}
