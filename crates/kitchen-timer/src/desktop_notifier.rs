//! Expiry announcements: desktop notification plus an optional sound.
//!
//! Both run on the blocking pool so a slow D-Bus call or audio device
//! never stalls the tick loop.

use crate::{AppError, AppResult};

use kitchen_timer_core::{Notifier, Preferences};

use std::{
    fs::File,
    io::BufReader,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use notify_rust::{Notification, Timeout};
use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, error, warn};

const APP_NAME: &str = "kitchen-timer";
const SUMMARY: &str = "Kitchen Timer";
const ICON: &str = "alarm-clock";

/// Notifier backed by the desktop notification service.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    notification: bool,
    modal: bool,
    sound: Option<Sound>,
}

/// Sound played on expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sound {
    pub(crate) file: PathBuf,
    pub(crate) loops: u32,
}

impl DesktopNotifier {
    /// Configure from the user's preferences.
    pub fn new(preferences: &Preferences) -> Self {
        let sound = preferences.play_sound.then(|| Sound {
            file: PathBuf::from(&preferences.sound_file),
            loops: preferences.sound_loops.max(1),
        });

        Self {
            notification: preferences.notification,
            modal: preferences.modal_notification,
            sound,
        }
    }

    /// The sound to play on expiry, if sounds are enabled.
    pub(crate) fn sound(&self) -> Option<&Sound> {
        self.sound.as_ref()
    }

    /// Build the notification bubble for `message`, or `None` when bubbles
    /// are turned off.
    pub(crate) fn bubble(&self, message: &str) -> Option<Notification> {
        if !self.notification {
            return None;
        }

        let mut notification = Notification::new();
        notification
            .summary(SUMMARY)
            .body(message)
            .appname(APP_NAME)
            .icon(ICON);

        if self.modal {
            notification.timeout(Timeout::Never);
            #[cfg(all(unix, not(target_os = "macos")))]
            notification.urgency(notify_rust::Urgency::Critical);
        }

        Some(notification)
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) {
        debug!(%message, "Announcing expiry");

        if let Some(notification) = self.bubble(message) {
            tokio::task::spawn_blocking(move || {
                if let Err(e) = notification.show() {
                    error!(error = ?e, "Failed to show notification");
                }
            });
        }

        if let Some(sound) = self.sound.clone() {
            tokio::task::spawn_blocking(move || {
                if let Err(e) = play_sound(&sound) {
                    warn!(error = %e, "Failed to play sound");
                }
            });
        }
    }
}

/// Play `sound` to the end on the default output device. Blocks.
#[track_caller]
fn play_sound(sound: &Sound) -> AppResult<()> {
    let caller = Location::caller();

    // The stream must outlive the sink or playback stops immediately.
    let (_stream, stream_handle) = OutputStream::try_default().map_err(|e| AppError::SoundError {
        reason: format!("No audio output device: {}", e),
        location: ErrorLocation::from(caller),
    })?;

    let sink = Sink::try_new(&stream_handle).map_err(|e| AppError::SoundError {
        reason: format!("Failed to open audio sink: {}", e),
        location: ErrorLocation::from(caller),
    })?;

    for _ in 0..sound.loops {
        sink.append(decode(&sound.file)?);
    }

    debug!(sound_file = ?sound.file, loops = sound.loops, "Playing sound");
    sink.sleep_until_end();

    Ok(())
}

#[track_caller]
fn decode(file: &Path) -> AppResult<Decoder<BufReader<File>>> {
    let caller = Location::caller();

    let reader = File::open(file)
        .map(BufReader::new)
        .map_err(|e| AppError::SoundError {
            reason: format!("Failed to open {:?}: {}", file, e),
            location: ErrorLocation::from(caller),
        })?;

    Decoder::new(reader).map_err(|e| AppError::SoundError {
        reason: format!("Failed to decode {:?}: {}", file, e),
        location: ErrorLocation::from(caller),
    })
}
