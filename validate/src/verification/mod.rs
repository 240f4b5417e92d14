//! Checkpoint verification for scenario replay
//!
//! Defines expected tracker states and verifies them against actual behavior.

pub mod checkpoint;

pub use checkpoint::{
    Checkpoint, CheckpointResult, CheckpointVerifier, Observation, ObservedSpot,
    VerificationResult,
};
