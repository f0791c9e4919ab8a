
use std::path::PathBuf;

use uuid::Uuid;

/// A settings path inside a fresh, not yet created, temp directory.
pub(crate) fn temp_settings_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("kitchen-timer-test-{}", Uuid::new_v4()))
        .join("settings.toml")
}
