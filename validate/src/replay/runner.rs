//! Scenario runner
//!
//! Each tick is replayed the way the game client delivers it: scripted
//! changes first (with their spawn/despawn events), then the clock event that
//! triggers the tracker's per-tick maintenance, then checkpoint verification.

use std::collections::HashMap;

use spotwatch_core::{Handle, HostEventHandler, HostView, SimulatedHost, SpotSession, Tick};
use tracing::debug;

use super::TickClock;
use crate::error::ScenarioError;
use crate::output::CliOutput;
use crate::scenario::{Action, Scenario, Step};
use crate::verification::{CheckpointVerifier, Observation, ObservedSpot};

pub struct ScenarioRunner {
    host: SimulatedHost,
    session: SpotSession,
    /// Label -> handle assigned when the label last spawned
    labels: HashMap<String, Handle>,
    /// Handle -> label that currently owns the slot
    owners: HashMap<Handle, String>,
    notifications: usize,
}

impl ScenarioRunner {
    pub fn new(scenario: &Scenario) -> Self {
        let host = if scenario.meta.logged_in {
            SimulatedHost::logged_in()
        } else {
            SimulatedHost::new()
        };
        let mut session = SpotSession::new(scenario.settings.clone());
        session.start(&host);

        Self {
            host,
            session,
            labels: HashMap::new(),
            owners: HashMap::new(),
            notifications: 0,
        }
    }

    /// Replay the whole scenario, verifying checkpoints as they come due
    pub fn run(
        &mut self,
        scenario: &Scenario,
        verifier: &mut CheckpointVerifier,
        clock: &mut TickClock,
        output: &mut CliOutput,
    ) -> Result<(), ScenarioError> {
        let mut steps = scenario.steps.iter().peekable();

        for tick in 0..=scenario.end_tick() {
            clock.advance_to(tick);
            let clock_event = self.host.advance_to(tick);

            while let Some(step) = steps.next_if(|s| s.at <= tick) {
                self.apply(step, output)?;
            }

            self.session.handle_event(&clock_event, &self.host);
            for message in self.session.take_notifications() {
                self.notifications += 1;
                output.notification(tick, &message);
            }

            if verifier.is_complete() {
                continue;
            }
            let observed = self.observe();
            for result in verifier.check_tick(&observed) {
                output.checkpoint(&result);
            }
            output.flush();
        }

        Ok(())
    }

    fn apply(&mut self, step: &Step, output: &mut CliOutput) -> Result<(), ScenarioError> {
        let at = step.at;
        match &step.action {
            Action::Spawn {
                label,
                npc_id,
                position,
            } => {
                if self.live_handle(label, at).ok().flatten().is_some() {
                    return Err(ScenarioError::DuplicateLabel {
                        label: label.clone(),
                        at,
                    });
                }
                let (handle, event) = self.host.spawn(*npc_id, *position);
                self.labels.insert(label.clone(), handle);
                self.owners.insert(handle, label.clone());
                self.session.handle_event(&event, &self.host);
                debug!(label = %label, %handle, "Scenario spawn");
            }
            Action::Despawn { label } => {
                let Some(handle) = self.live_handle(label, at)? else {
                    output.skipped(at, &step.action);
                    return Ok(());
                };
                if let Some(event) = self.host.despawn(handle) {
                    self.session.handle_event(&event, &self.host);
                }
            }
            Action::Invalidate { label } => {
                let Some(handle) = self.live_handle(label, at)? else {
                    output.skipped(at, &step.action);
                    return Ok(());
                };
                self.host.invalidate(handle);
            }
            Action::Move { label, position } => {
                let Some(handle) = self.live_handle(label, at)? else {
                    output.skipped(at, &step.action);
                    return Ok(());
                };
                self.host.move_npc(handle, *position);
            }
            Action::Session { state } => {
                let event = self.host.set_game_state(*state);
                self.session.handle_event(&event, &self.host);
            }
            Action::Target { label } => {
                let target = match label {
                    Some(label) => self.live_handle(label, at)?,
                    None => None,
                };
                self.host.set_interacting(target);
            }
            Action::Animate { animation } => self.host.set_animation(*animation),
        }
        output.step(at, &step.action);
        Ok(())
    }

    /// Handle for a label that is still live in the host.
    ///
    /// Errors if the label was never spawned; `None` once the entity is gone
    /// or its slot now belongs to another label.
    fn live_handle(&self, label: &str, at: Tick) -> Result<Option<Handle>, ScenarioError> {
        let handle = *self
            .labels
            .get(label)
            .ok_or_else(|| ScenarioError::UnknownLabel {
                label: label.to_string(),
                at,
            })?;
        let owned = self.owners.get(&handle).is_some_and(|owner| owner == label);
        Ok((owned && self.host.is_alive(handle)).then_some(handle))
    }

    /// Capture the tracker state at the current tick
    pub fn observe(&self) -> Observation {
        let tracker = self.session.tracker();
        let spots = self
            .labels
            .iter()
            .map(|(label, handle)| {
                let owned = self.owners.get(handle).is_some_and(|owner| owner == label);
                let tracked = owned && tracker.is_tracked(*handle);
                let spot = ObservedSpot {
                    tracked,
                    spawn_tick: tracked.then(|| tracker.spawn_tick(*handle)).flatten(),
                    progress: if tracked { tracker.progress(*handle) } else { 0.0 },
                };
                (label.clone(), spot)
            })
            .collect();

        Observation {
            tick: self.host.tick_count(),
            tracked: tracker.len(),
            cached: tracker.departures().len(),
            newest: tracker
                .newest_pick()
                .and_then(|handle| self.owners.get(&handle).cloned()),
            notifications: self.notifications,
            fishing: self.session.is_fishing(),
            spots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputLevel;

    fn replay(source: &str) -> crate::verification::VerificationResult {
        let scenario: Scenario = toml::from_str(source).unwrap();
        scenario.validate().unwrap();
        let mut runner = ScenarioRunner::new(&scenario);
        let mut verifier = CheckpointVerifier::new(scenario.checkpoints.clone());
        let mut output = CliOutput::new(OutputLevel::Quiet);
        runner
            .run(&scenario, &mut verifier, &mut TickClock::instant(), &mut output)
            .unwrap();
        let result = verifier.finalize();
        for r in &result.results {
            assert!(r.passed, "checkpoint at {} failed: {:?}", r.at, r.failures);
        }
        result
    }

    #[test]
    fn test_bundled_scenarios_pass() {
        for source in [
            include_str!("../../scenarios/progress.toml"),
            include_str!("../../scenarios/resume.toml"),
            include_str!("../../scenarios/newest.toml"),
            include_str!("../../scenarios/sweep.toml"),
            include_str!("../../scenarios/idle.toml"),
        ] {
            let result = replay(source);
            assert!(result.passed());
            assert!(result.checkpoints_total > 0);
        }
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        let scenario: Scenario = toml::from_str(
            r#"
            [meta]
            name = "bad"

            [[step]]
            at = 5
            action = "despawn"
            label = "ghost"
            "#,
        )
        .unwrap();
        let mut runner = ScenarioRunner::new(&scenario);
        let mut verifier = CheckpointVerifier::new(Vec::new());
        let err = runner
            .run(
                &scenario,
                &mut verifier,
                &mut TickClock::instant(),
                &mut CliOutput::new(OutputLevel::Quiet),
            )
            .unwrap_err();
        assert!(matches!(err, ScenarioError::UnknownLabel { at: 5, .. }));
    }

    #[test]
    fn test_label_respawn_after_despawn() {
        replay(
            r#"
            [meta]
            name = "respawn"

            [[step]]
            at = 10
            action = "spawn"
            label = "a"
            npc_id = 1510
            position = { x = 1, y = 1 }

            [[step]]
            at = 20
            action = "despawn"
            label = "a"

            [[step]]
            at = 30
            action = "spawn"
            label = "a"
            npc_id = 1510
            position = { x = 1, y = 1 }

            [[checkpoint]]
            at = 30
            tracked = 1
            cached = 0
            newest = "a"
            spots = [{ label = "a", tracked = true, spawn_tick = 10 }]
            "#,
        );
    }
}
