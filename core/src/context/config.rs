//! Tracker settings persistence
//!
//! Settings live in the platform config directory under
//! `spotwatch/settings.toml`. The types themselves come from spotwatch-types.

use std::path::Path;

use tracing::{debug, warn};

use super::error::ConfigError;

pub use spotwatch_types::{Color, TrackerSettings, parse_ignored_fish, spot_colors};

const APP_NAME: &str = "spotwatch";
const CONFIG_NAME: &str = "settings";

/// Extension trait for TrackerSettings persistence
pub trait SettingsExt: Sized {
    /// Load from the default location, creating it with defaults if missing
    fn load() -> Result<Self, ConfigError>;
    /// Load from the default location, falling back to defaults on any error
    fn load_or_default() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
    fn load_from(path: &Path) -> Result<Self, ConfigError>;
    fn save_to(&self, path: &Path) -> Result<(), ConfigError>;
}

impl SettingsExt for TrackerSettings {
    fn load() -> Result<Self, ConfigError> {
        let settings = confy::load(APP_NAME, CONFIG_NAME)?;
        debug!("Loaded tracker settings");
        Ok(settings)
    }

    fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!(error = %e, "Using default tracker settings");
            Self::default()
        })
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        confy::load_path(path).map_err(|source| ConfigError::LoadPath {
            path: path.to_path_buf(),
            source,
        })
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, self).map_err(|source| ConfigError::SavePath {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("spotwatch-test-{}", std::process::id()));
        dir.join(format!("{name}.toml"))
    }

    #[test]
    fn test_save_and_load_path() {
        let path = temp_config("roundtrip");
        let settings = TrackerSettings {
            show_timer: false,
            ignored_fish: "Shrimp, Anchovies".to_string(),
            fresh_color: [1, 2, 3, 4],
            ..TrackerSettings::default()
        };

        settings.save_to(&path).expect("save");
        let loaded = TrackerSettings::load_from(&path).expect("load");
        assert_eq!(loaded, settings);
        assert!(loaded.ignored_fish_set().contains("shrimp"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = temp_config("missing");
        let _ = std::fs::remove_file(&path);
        let loaded = TrackerSettings::load_from(&path).expect("load");
        assert_eq!(loaded, TrackerSettings::default());
        let _ = std::fs::remove_file(&path);
    }
}
