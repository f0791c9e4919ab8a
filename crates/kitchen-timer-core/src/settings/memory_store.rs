use crate::{
    CoreResult,
    settings::{Preferences, SettingsStore, StoredTimers},
};

use std::cell::RefCell;

/// Settings kept in memory for the lifetime of the session.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    timers: RefCell<StoredTimers>,
    preferences: RefCell<Preferences>,
}

impl MemorySettingsStore {
    /// Empty store with default preferences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with existing lists and preferences.
    pub fn with_contents(timers: StoredTimers, preferences: Preferences) -> Self {
        Self {
            timers: RefCell::new(timers),
            preferences: RefCell::new(preferences),
        }
    }

    /// Snapshot of what is currently stored.
    pub fn stored(&self) -> StoredTimers {
        self.timers.borrow().clone()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn read_timers(&self) -> CoreResult<StoredTimers> {
        Ok(self.stored())
    }

    fn write_timers(&self, timers: StoredTimers) -> CoreResult<()> {
        let mut stored = self.timers.borrow_mut();
        stored.preset = timers.preset;
        if timers.quick.is_some() {
            stored.quick = timers.quick;
        }
        Ok(())
    }

    fn preferences(&self) -> Preferences {
        self.preferences.borrow().clone()
    }

    fn set_preferences(&self, preferences: Preferences) -> CoreResult<()> {
        *self.preferences.borrow_mut() = preferences;
        Ok(())
    }
}
