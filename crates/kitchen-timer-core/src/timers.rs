//! The session's collection of timers.
//!
//! Reconciles in-memory timers against the settings store, hands out the
//! presentation order and is the only writer of persisted records.

use crate::{
    CoreError, CoreResult, LabelSink, Notifier, Preferences, SettingsStore, Timer, TimerRecord,
};

use std::{panic::Location, rc::Rc};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Ordered set of timers, unique by id.
pub struct Timers {
    store: Rc<dyn SettingsStore>,
    notifier: Rc<dyn Notifier>,
    panel_label: Rc<dyn LabelSink>,
    timers: Vec<Timer>,
}

impl Timers {
    /// Create the collection and populate it from `store`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` if a stored record is unusable, or the
    /// store's own error if it cannot be read or written.
    #[track_caller]
    #[instrument(skip_all)]
    pub fn new(
        store: Rc<dyn SettingsStore>,
        notifier: Rc<dyn Notifier>,
        panel_label: Rc<dyn LabelSink>,
    ) -> CoreResult<Self> {
        let mut timers = Self {
            store,
            notifier,
            panel_label,
            timers: Vec::new(),
        };

        timers.refresh()?;

        info!(count = timers.len(), "Timers initialized");

        Ok(timers)
    }

    /// The shared panel label every timer writes its compact time into.
    pub fn panel_label(&self) -> &Rc<dyn LabelSink> {
        &self.panel_label
    }

    /// Current preferences from the store.
    pub fn preferences(&self) -> Preferences {
        self.store.preferences()
    }

    /// Reconcile with the stored records.
    ///
    /// Each record refreshes the first timer with the same id, or becomes a
    /// new timer. Timers whose record disappeared are kept.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn refresh(&mut self) -> CoreResult<()> {
        let records = self.store.load()?;

        for record in &records {
            if let Some(timer) = self.timers.iter().find(|timer| timer.refresh_with(record)) {
                debug!(timer_id = %timer.id(), name = %timer.name(), "Found timer");
                continue;
            }

            debug!(timer_id = %record.id, name = %record.name, "Timer not found, adding");
            self.add(Timer::from_record(record))?;
        }

        Ok(())
    }

    /// Append a timer and persist the whole collection.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when a timer with the same id is already
    /// present, or the store's error if the write fails.
    #[track_caller]
    #[instrument(skip(self, timer), fields(timer_id = %timer.id()))]
    pub fn add(&mut self, timer: Timer) -> CoreResult<()> {
        if self.contains(timer.id()) {
            return Err(CoreError::InvalidArgument {
                reason: format!("timer {} is already in the collection", timer.id()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        timer.attach(Rc::clone(&self.notifier), Rc::clone(&self.panel_label));

        info!(
            name = %timer.name(),
            duration_secs = timer.duration_secs(),
            "Adding timer"
        );
        self.timers.push(timer);

        self.save()
    }

    /// Stop, drop and unpersist the timer with `id`.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: Uuid) -> CoreResult<Option<Timer>> {
        let Some(index) = self.timers.iter().position(|timer| timer.id() == id) else {
            return Ok(None);
        };

        let timer = self.timers.remove(index);
        timer.stop();
        info!(name = %timer.name(), "Removed timer");

        self.save()?;

        Ok(Some(timer))
    }

    /// Write every timer back to the store.
    #[track_caller]
    pub fn save(&self) -> CoreResult<()> {
        let records = self
            .timers
            .iter()
            .map(Timer::to_record)
            .collect::<Vec<TimerRecord>>();

        self.store.save(&records)
    }

    /// Enabled timers in presentation order, as a fresh list.
    pub fn sorted(&self) -> Vec<Timer> {
        let preferences = self.store.preferences();

        let mut sorted = self
            .timers
            .iter()
            .filter(|timer| timer.enabled())
            .cloned()
            .collect::<Vec<_>>();

        if preferences.sort_by_duration {
            if preferences.sort_descending {
                sorted.sort_by_key(|timer| std::cmp::Reverse(timer.duration_secs()));
            } else {
                sorted.sort_by_key(Timer::duration_secs);
            }
        }

        sorted
    }

    /// Look up a timer by id.
    pub fn timer_by_id(&self, id: Uuid) -> Option<Timer> {
        self.timers.iter().find(|timer| timer.id() == id).cloned()
    }

    /// First timer with the given name.
    pub fn timer_by_name(&self, name: &str) -> Option<Timer> {
        self.timers.iter().find(|timer| timer.name() == name).cloned()
    }

    /// Whether a timer with `id` is present.
    pub fn contains(&self, id: Uuid) -> bool {
        self.timers.iter().any(|timer| timer.id() == id)
    }

    /// Timers currently counting down.
    pub fn running(&self) -> Vec<Timer> {
        self.timers
            .iter()
            .filter(|timer| timer.is_running())
            .cloned()
            .collect()
    }

    /// All timers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Timer> {
        self.timers.iter()
    }

    /// Number of timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// True when there are no timers.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
