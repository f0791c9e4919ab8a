mod memory_store;
mod preferences;
mod stored_timers;

pub use {
    memory_store::MemorySettingsStore,
    preferences::{DEFAULT_SOUND_FILE, Preferences},
    stored_timers::StoredTimers,
};

use crate::{CoreResult, TimerRecord};

/// Persistence for timer records and preferences.
///
/// Implementors provide raw access to the two record lists. The provided
/// [`load`](SettingsStore::load) and [`save`](SettingsStore::save) apply the
/// quick-timer and zero-duration policies on top.
pub trait SettingsStore {
    /// Read both stored lists as they are.
    fn read_timers(&self) -> CoreResult<StoredTimers>;

    /// Replace the stored lists. A `None` quick list leaves it untouched.
    fn write_timers(&self, timers: StoredTimers) -> CoreResult<()>;

    /// Current preferences.
    fn preferences(&self) -> Preferences;

    /// Replace the preferences.
    fn set_preferences(&self, preferences: Preferences) -> CoreResult<()>;

    /// All records to reconcile against, presets first.
    ///
    /// Quick timers are only included when `save_quick_timers` is on. Every
    /// record is validated.
    fn load(&self) -> CoreResult<Vec<TimerRecord>> {
        let save_quick_timers = self.preferences().save_quick_timers;
        self.read_timers()?.into_records(save_quick_timers)
    }

    /// Persist the whole collection, split by the `quick` flag.
    fn save(&self, records: &[TimerRecord]) -> CoreResult<()> {
        let save_quick_timers = self.preferences().save_quick_timers;
        self.write_timers(StoredTimers::partition(records, save_quick_timers))
    }
}
