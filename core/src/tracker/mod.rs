//! Fishing spot tracking
//!
//! This module provides:
//! - **Tracked spots**: Runtime state for every visible fishing spot
//! - **Departure cache**: Memory of recently vanished spots, keyed by tile
//! - **Policy**: Pure progress and newest-spot selection rules
//! - **Tracker**: Owner of all of the above, driven once per tick
//!
//! # Lifecycle
//!
//! ```text
//!   EntityAppeared ──► tracked ──(position changed)──► tracked, timer restarts
//!         ▲               │
//!         │        EntityVanished            liveness sweep
//!         │               ▼                         │
//!         └─(same tile, ─ cached ──(1500 ticks)──► purged ◄─┘
//!            same type,
//!            within max lifetime)
//! ```

mod departures;
pub mod policy;
mod spot;
mod spot_tracker;


pub use departures::{DepartureCache, LOCATION_CACHE_EXPIRY_TICKS};
pub use spot::{CachedDeparture, LocationKey, TrackedSpot};
pub use spot_tracker::{Interaction, SpotTracker};
