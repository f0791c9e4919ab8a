use kitchen_timer_core::{Preferences, StoredTimers, TimerRecord};

use serde::{Deserialize, Serialize};

/// On-disk layout of `settings.toml`.
///
/// ```toml
/// [preferences]
/// play_sound = true
///
/// [[timers]]
/// id = "5f0c..."
/// name = "tea"
/// duration = 180
/// enabled = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    /// Scalar preferences.
    #[serde(default)]
    pub preferences: Preferences,
    /// Preset timers.
    #[serde(default)]
    pub timers: Vec<TimerRecord>,
    /// Quick timers, only present once quick timers have been saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_timers: Option<Vec<TimerRecord>>,
}

impl SettingsFile {
    /// The record lists as the engine sees them.
    pub fn stored_timers(&self) -> StoredTimers {
        StoredTimers {
            preset: self.timers.clone(),
            quick: self.quick_timers.clone(),
        }
    }

    /// Replace the record lists. A `None` quick list keeps the current one.
    pub fn apply(&mut self, timers: StoredTimers) {
        self.timers = timers.preset;
        if timers.quick.is_some() {
            self.quick_timers = timers.quick;
        }
    }
}
