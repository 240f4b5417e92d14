//! Scenario files
//!
//! A scenario is a timed script of host events plus the checkpoints to verify
//! along the way. Spots are referred to by label rather than by handle, since
//! handles are assigned (and recycled) by the simulated host.
//!
//! ```toml
//! [meta]
//! name = "resume"
//!
//! [[step]]
//! at = 200
//! action = "spawn"
//! label = "a"
//! npc_id = 1510
//! position = { x = 3200, y = 3200 }
//!
//! [[checkpoint]]
//! at = 400
//! newest = "a"
//! spots = [{ label = "a", spawn_tick = 200 }]
//! ```

use std::path::Path;

use serde::Deserialize;
use spotwatch_core::{AnimationId, GameState, NpcId, Tick, TrackerSettings, WorldPoint};

use crate::error::ScenarioError;
use crate::verification::Checkpoint;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub meta: ScenarioMeta,

    /// Settings overrides (missing keys use defaults)
    #[serde(default)]
    pub settings: TrackerSettings,

    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,

    #[serde(default, rename = "checkpoint")]
    pub checkpoints: Vec<Checkpoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioMeta {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Start logged in with a loaded local player (default true)
    #[serde(default = "default_logged_in")]
    pub logged_in: bool,
}

fn default_logged_in() -> bool {
    true
}

/// One scripted host change
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    /// Tick at which the step is applied, before that tick's maintenance
    pub at: Tick,

    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Spawn {
        label: String,
        npc_id: NpcId,
        position: WorldPoint,
    },
    Despawn {
        label: String,
    },
    /// Remove without a despawn notification
    Invalidate {
        label: String,
    },
    Move {
        label: String,
        position: WorldPoint,
    },
    Session {
        state: GameState,
    },
    /// Interact with a spot, or stop interacting when `label` is omitted
    Target {
        #[serde(default)]
        label: Option<String>,
    },
    Animate {
        animation: AnimationId,
    },
}

impl Action {
    /// Short human-readable description
    pub fn describe(&self) -> String {
        match self {
            Action::Spawn {
                label,
                npc_id,
                position,
            } => format!("spawn '{}' (npc {}) at {}", label, npc_id, position),
            Action::Despawn { label } => format!("despawn '{}'", label),
            Action::Invalidate { label } => format!("invalidate '{}' (no event)", label),
            Action::Move { label, position } => format!("move '{}' to {}", label, position),
            Action::Session { state } => format!("session -> {:?}", state),
            Action::Target { label: Some(label) } => format!("target '{}'", label),
            Action::Target { label: None } => "clear target".to_string(),
            Action::Animate { animation } => format!("animate {}", animation),
        }
    }
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario: Scenario = toml::from_str(&content).map_err(|source| ScenarioError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Steps and checkpoints must be in tick order
    pub fn validate(&self) -> Result<(), ScenarioError> {
        for (index, pair) in self.steps.windows(2).enumerate() {
            if pair[1].at < pair[0].at {
                return Err(ScenarioError::StepsOutOfOrder {
                    index: index + 1,
                    at: pair[1].at,
                });
            }
        }
        for (index, pair) in self.checkpoints.windows(2).enumerate() {
            if pair[1].at < pair[0].at {
                return Err(ScenarioError::CheckpointsOutOfOrder {
                    index: index + 1,
                    at: pair[1].at,
                });
            }
        }
        Ok(())
    }

    /// Last tick the replay needs to reach
    pub fn end_tick(&self) -> Tick {
        let last_step = self.steps.last().map(|s| s.at).unwrap_or(0);
        let last_checkpoint = self.checkpoints.last().map(|c| c.at).unwrap_or(0);
        last_step.max(last_checkpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [meta]
        name = "sample"

        [settings]
        idle_notification = true

        [[step]]
        at = 10
        action = "spawn"
        label = "a"
        npc_id = 1510
        position = { x = 1, y = 2 }

        [[step]]
        at = 20
        action = "session"
        state = "hopping"

        [[step]]
        at = 30
        action = "target"

        [[checkpoint]]
        at = 30
        tracked = 0
    "#;

    #[test]
    fn test_parse_sample() {
        let scenario: Scenario = toml::from_str(SAMPLE).unwrap();
        assert!(scenario.meta.logged_in);
        assert!(scenario.settings.idle_notification);
        assert_eq!(scenario.steps.len(), 3);
        assert_eq!(
            scenario.steps[0].action,
            Action::Spawn {
                label: "a".to_string(),
                npc_id: 1510,
                position: WorldPoint::new(1, 2, 0),
            }
        );
        assert_eq!(
            scenario.steps[1].action,
            Action::Session {
                state: GameState::Hopping
            }
        );
        assert_eq!(scenario.steps[2].action, Action::Target { label: None });
        assert_eq!(scenario.end_tick(), 30);
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_out_of_order_steps_rejected() {
        let mut scenario: Scenario = toml::from_str(SAMPLE).unwrap();
        scenario.steps.swap(0, 2);
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::StepsOutOfOrder { index: 1, at: 20 })
        ));
    }
}
