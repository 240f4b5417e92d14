//! Scenario replay infrastructure
//!
//! Drives a simulated host through a scenario script, one tick at a time.

pub mod clock;
pub mod runner;

pub use clock::TickClock;
pub use runner::ScenarioRunner;
