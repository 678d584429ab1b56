// Settings service
// Loads and saves the week view settings as TOML in the platform config directory

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::WeekViewSettings;

/// Environment variable that points at a settings file to use instead of the default
pub const CONFIG_ENV_VAR: &str = "RUST_CALENDAR_WEEK_CONFIG";

const CONFIG_FILE_NAME: &str = "week_view.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service for the settings file in the default location.
    ///
    /// `RUST_CALENDAR_WEEK_CONFIG` wins over the platform config directory.
    pub fn from_default_location() -> Result<Self> {
        Ok(Self::new(default_settings_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings. A missing file yields the defaults.
    pub fn load(&self) -> Result<WeekViewSettings> {
        if !self.path.exists() {
            log::info!(
                "No settings file at {}, using defaults",
                self.path.display()
            );
            return Ok(WeekViewSettings::default());
        }

        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file at {}", self.path.display()))?;
        let settings: WeekViewSettings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file at {}", self.path.display()))?;

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        Ok(settings)
    }

    pub fn save(&self, settings: &WeekViewSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write settings file at {}", self.path.display()))?;

        log::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

pub fn default_settings_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    let dirs = ProjectDirs::from("com", "KenBoyle", "RustCalendar")
        .ok_or_else(|| anyhow!("Could not determine the config directory"))?;
    Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Load settings from the default location, falling back to defaults on any error.
pub fn load_settings_or_default() -> WeekViewSettings {
    match SettingsService::from_default_location().and_then(|service| service.load()) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings: {:#}, using defaults", e);
            WeekViewSettings::default()
        }
    }
}
