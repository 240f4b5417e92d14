//! Error types for scenario loading and replay

use std::path::PathBuf;

use spotwatch_core::Tick;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("step {index} at tick {at} comes before the previous step")]
    StepsOutOfOrder { index: usize, at: Tick },

    #[error("checkpoint {index} at tick {at} comes before the previous checkpoint")]
    CheckpointsOutOfOrder { index: usize, at: Tick },

    #[error("unknown spot label '{label}' at tick {at}")]
    UnknownLabel { label: String, at: Tick },

    #[error("spot label '{label}' is already live at tick {at}")]
    DuplicateLabel { label: String, at: Tick },
}
