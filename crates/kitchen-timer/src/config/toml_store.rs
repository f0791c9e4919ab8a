//! TOML-backed settings store.
//!
//! Timer records are re-read from disk on every load so edits made while
//! the timer runs are picked up by the next refresh. Every write goes
//! through a temp file and a rename.

use crate::{
    AppError, AppResult,
    config::{APPLICATION, ORGANIZATION, QUALIFIER, SETTINGS_FILE_NAME, SettingsFile},
};

use kitchen_timer_core::{CoreError, CoreResult, Preferences, SettingsStore, StoredTimers};

use std::{
    cell::RefCell,
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

/// Settings store persisted as `settings.toml`.
#[derive(Debug)]
pub struct TomlSettingsStore {
    path: PathBuf,
    preferences: RefCell<Preferences>,
}

impl TomlSettingsStore {
    /// Open the settings file in the platform config directory.
    #[track_caller]
    pub fn open_default() -> AppResult<Self> {
        Self::open(Self::default_path()?)
    }

    /// Open `path`, writing a default settings file if it does not exist.
    #[track_caller]
    #[instrument]
    pub fn open(path: PathBuf) -> AppResult<Self> {
        if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read settings: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let settings: SettingsFile =
                toml::from_str(&contents).map_err(|e| AppError::ConfigError {
                    reason: format!("Failed to parse settings: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            info!(settings_path = ?path, "Settings loaded");

            Ok(Self {
                path,
                preferences: RefCell::new(settings.preferences),
            })
        } else {
            info!(settings_path = ?path, "No settings found, creating default");

            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }

            let settings = SettingsFile::default();
            write_atomic(&path, &settings)?;

            Ok(Self {
                path,
                preferences: RefCell::new(settings.preferences),
            })
        }
    }

    #[track_caller]
    fn default_path() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(proj_dirs.config_dir().join(SETTINGS_FILE_NAME))
    }

    #[track_caller]
    fn read_file(&self) -> CoreResult<SettingsFile> {
        let contents = fs::read_to_string(&self.path).map_err(|e| CoreError::Store {
            reason: format!("Failed to read {:?}: {}", self.path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        toml::from_str(&contents).map_err(|e| CoreError::MalformedRecord {
            reason: format!("Failed to parse {:?}: {}", self.path, e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    fn write_file(&self, settings: &SettingsFile) -> CoreResult<()> {
        write_atomic(&self.path, settings).map_err(|e| CoreError::Store {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl SettingsStore for TomlSettingsStore {
    #[instrument(skip(self))]
    fn read_timers(&self) -> CoreResult<StoredTimers> {
        let settings = self.read_file()?;
        debug!(
            presets = settings.timers.len(),
            quick = settings.quick_timers.as_ref().map_or(0, Vec::len),
            "Timer records read"
        );
        Ok(settings.stored_timers())
    }

    #[instrument(skip(self, timers))]
    fn write_timers(&self, timers: StoredTimers) -> CoreResult<()> {
        let mut settings = self.read_file()?;
        settings.apply(timers);
        self.write_file(&settings)
    }

    fn preferences(&self) -> Preferences {
        self.preferences.borrow().clone()
    }

    #[instrument(skip(self, preferences))]
    fn set_preferences(&self, preferences: Preferences) -> CoreResult<()> {
        let mut settings = self.read_file()?;
        settings.preferences = preferences.clone();
        self.write_file(&settings)?;
        *self.preferences.borrow_mut() = preferences;
        Ok(())
    }
}

/// Serialize `settings` next to `path` and rename over it.
///
/// Writes to a temporary file first so a crash mid-write never leaves a
/// truncated settings file behind.
#[track_caller]
fn write_atomic(path: &Path, settings: &SettingsFile) -> AppResult<()> {
    let contents = toml::to_string_pretty(settings).map_err(|e| AppError::ConfigError {
        reason: format!("Failed to serialize settings: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let temp_path = path.with_extension("toml.tmp");

    let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
        reason: format!("Failed to create temp settings file: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    temp_file
        .write_all(contents.as_bytes())
        .map_err(|e| AppError::ConfigError {
            reason: format!("Failed to write temp settings file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    temp_file.sync_all().map_err(|e| AppError::ConfigError {
        reason: format!("Failed to sync temp settings file: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    fs::rename(&temp_path, path).map_err(|e| AppError::ConfigError {
        reason: format!("Failed to rename temp settings to final: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    debug!(settings_path = ?path, "Settings saved (atomic write)");

    Ok(())
}
