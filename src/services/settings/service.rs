use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::GridSettings;

pub const SETTINGS_FILE: &str = "grid.toml";

/// Loads and stores [`GridSettings`] as TOML.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service backed by the per-user config directory.
    pub fn from_project_dirs() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("com", "FamilyCalendar", "FamilyCalendar") {
            dirs.config_dir().join(SETTINGS_FILE)
        } else {
            log::warn!("Unable to resolve project directory; using current dir for settings");
            PathBuf::from(SETTINGS_FILE)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings. A missing file yields the defaults.
    pub fn load(&self) -> Result<GridSettings> {
        if !self.path.exists() {
            log::info!(
                "No settings at {}, using defaults",
                self.path.display()
            );
            return Ok(GridSettings::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read settings from {}", self.path.display()))?;
        let settings: GridSettings = toml::from_str(&data)
            .with_context(|| format!("failed to parse settings from {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        log::info!("Loaded grid settings from {}", self.path.display());
        Ok(settings)
    }

    /// Like [`load`](Self::load), falling back to defaults on any error.
    pub fn load_or_default(&self) -> GridSettings {
        match self.load() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings: {:#}, using defaults", e);
                GridSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &GridSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create dir {}", parent.display()))?;
            }
        }

        let data = toml::to_string_pretty(settings).context("failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write settings to {}", self.path.display()))?;
        Ok(())
    }
}
