use serde::{Deserialize, Serialize};

/// Sound played when no sound file is configured.
pub const DEFAULT_SOUND_FILE: &str = "/usr/share/sounds/freedesktop/stereo/complete.oga";

/// Scalar user preferences.
///
/// Missing keys fall back to [`Preferences::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Show a desktop notification on expiry.
    pub notification: bool,
    /// Show the remaining time in the panel.
    pub show_time: bool,
    /// Show the timer name in the panel.
    pub show_label: bool,
    /// Show a progress indicator in the panel.
    pub show_progress: bool,
    /// Play a sound on expiry.
    pub play_sound: bool,
    /// Keep the notification up until dismissed.
    pub modal_notification: bool,
    /// How many times the sound is played.
    pub sound_loops: u32,
    /// Sound file to play.
    pub sound_file: String,
    /// Duration in seconds offered for a new timer.
    pub default_timer: u64,
    /// Order listed timers by duration instead of insertion order.
    pub sort_by_duration: bool,
    /// Longest first when sorting by duration.
    pub sort_descending: bool,
    /// Persist quick timers alongside the presets.
    pub save_quick_timers: bool,
    /// Verbose logging.
    pub debug: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notification: true,
            show_time: true,
            show_label: true,
            show_progress: true,
            play_sound: true,
            modal_notification: false,
            sound_loops: 1,
            sound_file: DEFAULT_SOUND_FILE.to_string(),
            default_timer: 300,
            sort_by_duration: false,
            sort_descending: false,
            save_quick_timers: false,
            debug: false,
        }
    }
}
