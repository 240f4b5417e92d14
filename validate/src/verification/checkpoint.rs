//! Checkpoint-based tracker verification
//!
//! Allows defining expected tracker state at specific ticks
//! and verifying that actual behavior matches expectations.

use std::collections::HashMap;

use serde::Deserialize;
use spotwatch_core::Tick;

/// Value of `newest` meaning "no newest spot"
pub const NO_SPOT: &str = "none";

/// Expected state of one labeled spot
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedSpot {
    pub label: String,

    /// Whether the spot should currently be tracked (default: not checked)
    #[serde(default)]
    pub tracked: Option<bool>,

    #[serde(default)]
    pub spawn_tick: Option<Tick>,

    /// Expected progress range [min, max]
    #[serde(default)]
    pub progress: Option<(f64, f64)>,
}

/// Expected tracker state at a specific tick
#[derive(Debug, Clone, Deserialize)]
pub struct Checkpoint {
    /// Tick at which to check, after that tick's maintenance
    pub at: Tick,

    /// Optional description for debugging
    #[serde(default)]
    pub description: Option<String>,

    /// Number of tracked spots
    #[serde(default)]
    pub tracked: Option<usize>,

    /// Number of cached departures
    #[serde(default)]
    pub cached: Option<usize>,

    /// Label of the newest spot, or "none"
    #[serde(default)]
    pub newest: Option<String>,

    /// Total idle notifications delivered so far
    #[serde(default)]
    pub notifications: Option<usize>,

    #[serde(default)]
    pub fishing: Option<bool>,

    #[serde(default)]
    pub spots: Vec<ExpectedSpot>,
}

/// What the replay actually saw for one labeled spot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedSpot {
    pub tracked: bool,
    pub spawn_tick: Option<Tick>,
    pub progress: f64,
}

/// Tracker state captured at the end of a tick
#[derive(Debug, Clone, Default)]
pub struct Observation {
    pub tick: Tick,
    pub tracked: usize,
    pub cached: usize,
    pub newest: Option<String>,
    pub notifications: usize,
    pub fishing: bool,
    pub spots: HashMap<String, ObservedSpot>,
}

/// Result of verifying a single checkpoint
#[derive(Debug, Clone)]
pub struct CheckpointResult {
    pub checkpoint_idx: usize,
    pub at: Tick,
    pub description: Option<String>,
    pub passed: bool,
    pub failures: Vec<String>,
}

/// Overall verification result
#[derive(Debug, Clone)]
pub struct VerificationResult {
    pub checkpoints_passed: u32,
    pub checkpoints_total: u32,
    pub results: Vec<CheckpointResult>,
}

impl VerificationResult {
    pub fn passed(&self) -> bool {
        self.checkpoints_passed == self.checkpoints_total
    }
}

/// Verifies tracker behavior against expected checkpoints
#[derive(Debug)]
pub struct CheckpointVerifier {
    checkpoints: Vec<Checkpoint>,
    current_checkpoint_idx: usize,
    results: Vec<CheckpointResult>,
}

impl CheckpointVerifier {
    pub fn new(checkpoints: Vec<Checkpoint>) -> Self {
        Self {
            checkpoints,
            current_checkpoint_idx: 0,
            results: Vec::new(),
        }
    }

    /// Verify every pending checkpoint due at or before the observed tick
    pub fn check_tick(&mut self, observed: &Observation) -> Vec<CheckpointResult> {
        let mut due = Vec::new();
        while let Some(checkpoint) = self.checkpoints.get(self.current_checkpoint_idx) {
            if checkpoint.at > observed.tick {
                break;
            }
            let failures = verify(checkpoint, observed);
            let result = CheckpointResult {
                checkpoint_idx: self.current_checkpoint_idx,
                at: checkpoint.at,
                description: checkpoint.description.clone(),
                passed: failures.is_empty(),
                failures,
            };
            self.results.push(result.clone());
            self.current_checkpoint_idx += 1;
            due.push(result);
        }
        due
    }

    /// Get final verification result
    pub fn finalize(self) -> VerificationResult {
        let passed = self.results.iter().filter(|r| r.passed).count() as u32;
        let total = self.checkpoints.len() as u32;

        VerificationResult {
            checkpoints_passed: passed,
            checkpoints_total: total,
            results: self.results,
        }
    }

    /// Check if all checkpoints have been processed
    pub fn is_complete(&self) -> bool {
        self.current_checkpoint_idx >= self.checkpoints.len()
    }
}

fn verify(checkpoint: &Checkpoint, observed: &Observation) -> Vec<String> {
    let mut failures = Vec::new();

    if let Some(expected) = checkpoint.tracked
        && expected != observed.tracked
    {
        failures.push(format!(
            "Tracked count {} but expected {}",
            observed.tracked, expected
        ));
    }

    if let Some(expected) = checkpoint.cached
        && expected != observed.cached
    {
        failures.push(format!(
            "Cached departures {} but expected {}",
            observed.cached, expected
        ));
    }

    if let Some(expected) = &checkpoint.newest {
        let actual = observed.newest.as_deref().unwrap_or(NO_SPOT);
        if actual != expected {
            failures.push(format!("Newest spot '{}' but expected '{}'", actual, expected));
        }
    }

    if let Some(expected) = checkpoint.notifications
        && expected != observed.notifications
    {
        failures.push(format!(
            "{} notifications but expected {}",
            observed.notifications, expected
        ));
    }

    if let Some(expected) = checkpoint.fishing
        && expected != observed.fishing
    {
        failures.push(format!(
            "Fishing state {} but expected {}",
            observed.fishing, expected
        ));
    }

    for expected in &checkpoint.spots {
        let Some(spot) = observed.spots.get(&expected.label) else {
            failures.push(format!("Spot '{}' was never spawned", expected.label));
            continue;
        };

        if let Some(tracked) = expected.tracked
            && tracked != spot.tracked
        {
            let state = if spot.tracked { "tracked" } else { "not tracked" };
            failures.push(format!("Spot '{}' is {}", expected.label, state));
        }

        if let Some(spawn_tick) = expected.spawn_tick
            && spot.spawn_tick != Some(spawn_tick)
        {
            failures.push(format!(
                "Spot '{}' spawn tick {:?} but expected {}",
                expected.label, spot.spawn_tick, spawn_tick
            ));
        }

        if let Some((min, max)) = expected.progress
            && (spot.progress < min || spot.progress > max)
        {
            failures.push(format!(
                "Spot '{}' progress {:.3} not in expected range [{:.3}, {:.3}]",
                expected.label, spot.progress, min, max
            ));
        }
    }

    failures
}
