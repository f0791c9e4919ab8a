use crate::{
    CoreResult, LabelSink, MemorySettingsStore, Notifier, Preferences, SettingsStore,
    StoredTimers, TextLabel, Timers,
};

use std::{
    cell::{Cell, RefCell},
    future::Future,
    rc::Rc,
};

use tokio::task::LocalSet;

/// Notifier that records every message it is given.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// Store wrapper that counts writes and keeps the last one.
#[derive(Default)]
pub(crate) struct CountingStore {
    inner: MemorySettingsStore,
    writes: Cell<usize>,
    last_write: RefCell<Option<StoredTimers>>,
}

impl CountingStore {
    pub(crate) fn new(timers: StoredTimers, preferences: Preferences) -> Self {
        Self {
            inner: MemorySettingsStore::with_contents(timers, preferences),
            ..Self::default()
        }
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.get()
    }

    pub(crate) fn last_write(&self) -> Option<StoredTimers> {
        self.last_write.borrow().clone()
    }
}

impl SettingsStore for CountingStore {
    fn read_timers(&self) -> CoreResult<StoredTimers> {
        self.inner.read_timers()
    }

    fn write_timers(&self, timers: StoredTimers) -> CoreResult<()> {
        self.writes.set(self.writes.get() + 1);
        *self.last_write.borrow_mut() = Some(timers.clone());
        self.inner.write_timers(timers)
    }

    fn preferences(&self) -> Preferences {
        self.inner.preferences()
    }

    fn set_preferences(&self, preferences: Preferences) -> CoreResult<()> {
        self.inner.set_preferences(preferences)
    }
}

/// A collection wired to inspectable collaborators.
pub(crate) struct Fixture {
    pub(crate) timers: Timers,
    pub(crate) store: Rc<CountingStore>,
    pub(crate) notifier: Rc<RecordingNotifier>,
    pub(crate) panel_label: Rc<TextLabel>,
}

#[allow(clippy::unwrap_used)]
pub(crate) fn fixture(stored: StoredTimers, preferences: Preferences) -> Fixture {
    let store = Rc::new(CountingStore::new(stored, preferences));
    let notifier = Rc::new(RecordingNotifier::default());
    let panel_label = Rc::new(TextLabel::new());

    let timers = Timers::new(
        Rc::clone(&store) as Rc<dyn SettingsStore>,
        Rc::clone(&notifier) as Rc<dyn Notifier>,
        Rc::clone(&panel_label) as Rc<dyn LabelSink>,
    )
    .unwrap();

    Fixture {
        timers,
        store,
        notifier,
        panel_label,
    }
}

/// Run `future` on a `LocalSet` so timers can spawn their tick tasks.
pub(crate) async fn on_local_set<F: Future>(future: F) -> F::Output {
    LocalSet::new().run_until(future).await
}
