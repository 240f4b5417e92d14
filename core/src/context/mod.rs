mod config;
mod error;

pub use config::{Color, SettingsExt, TrackerSettings, parse_ignored_fish, spot_colors};
pub use error::ConfigError;
