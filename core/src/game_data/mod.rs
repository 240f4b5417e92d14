//! Static game reference data

pub mod fishing_spots;

pub use fishing_spots::{
    ALL_SPOT_KINDS, Fish, SPOTS_BY_NPC, STATIC_THRESHOLD_TICKS, SpotKind, find_spot,
    is_fishing_spot,
};
