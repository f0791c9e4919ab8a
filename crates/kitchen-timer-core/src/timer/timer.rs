//! A single named countdown.
//!
//! `Timer` is a cheap handle: clones share the same countdown. All state
//! lives behind an `Rc<RefCell<_>>` and is only touched from the single
//! thread running the `LocalSet`, interleaved at tick boundaries.

use crate::{
    Hms, LabelSink, Notifier,
    timer::{ScheduleHandle, Tick, TimerRecord, TimerState},
};

use std::{cell::RefCell, fmt, rc::Rc, time::Duration};

use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Interval between two ticks of a running countdown.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// A named countdown with an enabled flag and a lifecycle state.
#[derive(Clone)]
pub struct Timer {
    inner: Rc<RefCell<TimerInner>>,
}

pub(crate) struct TimerInner {
    id: Uuid,
    name: String,
    duration_secs: u64,
    enabled: bool,
    quick: bool,
    state: TimerState,
    period: Duration,
    schedule: Option<ScheduleHandle>,
    label: Option<Rc<dyn LabelSink>>,
    panel_label: Option<Rc<dyn LabelSink>>,
    notifier: Option<Rc<dyn Notifier>>,
}

impl TimerInner {
    /// Leave `Running`, dropping the schedule and both instants.
    fn reset(&mut self) {
        self.state = TimerState::Reset;
        self.schedule = None;
    }
}

/// Side effects computed under the borrow and applied after it is released,
/// so sinks may call back into the timer.
enum TickOutput {
    Progress {
        remaining: Hms,
        label: Option<Rc<dyn LabelSink>>,
        panel_label: Option<Rc<dyn LabelSink>>,
    },
    Expired {
        message: String,
        duration: Hms,
        label: Option<Rc<dyn LabelSink>>,
        panel_label: Option<Rc<dyn LabelSink>>,
        notifier: Option<Rc<dyn Notifier>>,
    },
}

impl Timer {
    /// Create an enabled preset timer with a fresh id.
    pub fn new(name: impl AsRef<str>, duration_secs: u64) -> Self {
        debug!(name = name.as_ref(), duration_secs, "Create timer");
        Self::with_id(Uuid::new_v4(), name.as_ref(), duration_secs)
    }

    /// Create an enabled preset timer with a known id.
    pub fn with_id(id: Uuid, name: impl Into<String>, duration_secs: u64) -> Self {
        Self::from_inner(Rc::new(RefCell::new(TimerInner {
            id,
            name: name.into(),
            duration_secs,
            enabled: true,
            quick: false,
            state: TimerState::Reset,
            period: TICK_INTERVAL,
            schedule: None,
            label: None,
            panel_label: None,
            notifier: None,
        })))
    }

    /// Build a timer from its persisted record.
    pub fn from_record(record: &TimerRecord) -> Self {
        let timer = Self::with_id(record.id, record.name.clone(), record.duration_secs);
        {
            let mut inner = timer.inner.borrow_mut();
            inner.enabled = record.enabled;
            inner.quick = record.quick;
        }
        timer
    }

    pub(crate) fn from_inner(inner: Rc<RefCell<TimerInner>>) -> Self {
        Self { inner }
    }

    /// Wire the shared collaborators owned by the collection.
    pub(crate) fn attach(&self, notifier: Rc<dyn Notifier>, panel_label: Rc<dyn LabelSink>) {
        let mut inner = self.inner.borrow_mut();
        inner.notifier = Some(notifier);
        inner.panel_label = Some(panel_label);
    }

    /// Attach the detailed label for this timer.
    pub fn set_label(&self, label: Rc<dyn LabelSink>) {
        self.inner.borrow_mut().label = Some(label);
    }

    /// Stable identity.
    pub fn id(&self) -> Uuid {
        self.inner.borrow().id
    }

    /// Display name.
    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    /// Rename the timer.
    pub fn set_name(&self, name: impl Into<String>) {
        self.inner.borrow_mut().name = name.into();
    }

    /// Countdown length in seconds.
    pub fn duration_secs(&self) -> u64 {
        self.inner.borrow().duration_secs
    }

    /// Change the countdown length. A running countdown keeps its end time.
    pub fn set_duration_secs(&self, duration_secs: u64) {
        self.inner.borrow_mut().duration_secs = duration_secs;
    }

    /// Countdown length.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs())
    }

    /// Whether the timer can be started and is listed.
    pub fn enabled(&self) -> bool {
        self.inner.borrow().enabled
    }

    /// Allow the timer to be started.
    pub fn enable(&self) {
        self.inner.borrow_mut().enabled = true;
    }

    /// Prevent the timer from starting.
    pub fn disable(&self) {
        self.inner.borrow_mut().enabled = false;
    }

    /// Member of the quick-timer list.
    pub fn quick(&self) -> bool {
        self.inner.borrow().quick
    }

    /// Move the timer between the preset and quick lists.
    pub fn set_quick(&self, quick: bool) {
        self.inner.borrow_mut().quick = quick;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TimerState {
        self.inner.borrow().state
    }

    /// True while counting down.
    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// True once the countdown reached zero.
    pub fn is_expired(&self) -> bool {
        self.state() == TimerState::Expired
    }

    /// When the running countdown began.
    pub fn start_time(&self) -> Option<Instant> {
        match self.state() {
            TimerState::Running { started_at, .. } => Some(started_at),
            _ => None,
        }
    }

    /// When the running countdown reaches zero.
    pub fn end_time(&self) -> Option<Instant> {
        match self.state() {
            TimerState::Running { ends_at, .. } => Some(ends_at),
            _ => None,
        }
    }

    /// Time left at `now`, for a running countdown.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.end_time()
            .map(|ends_at| ends_at.saturating_duration_since(now))
    }

    /// Begin the countdown.
    ///
    /// Returns false without side effects when the timer is disabled or its
    /// end lies beyond what the clock can represent. A second start on a
    /// running timer cancels it back to `Reset` and also returns false; the
    /// caller starts again explicitly.
    ///
    /// Must be called inside a `tokio::task::LocalSet`.
    #[instrument(skip(self))]
    pub fn start(&self) -> bool {
        let now = Instant::now();
        let mut inner = self.inner.borrow_mut();

        if !inner.enabled {
            info!(timer_id = %inner.id, name = %inner.name, "Timer is disabled");
            return false;
        }

        if inner.state.is_running() {
            info!(timer_id = %inner.id, name = %inner.name, "Timer already running, resetting");
            inner.reset();
            return false;
        }

        let Some(ends_at) = now.checked_add(Duration::from_secs(inner.duration_secs)) else {
            warn!(
                timer_id = %inner.id,
                name = %inner.name,
                duration_secs = inner.duration_secs,
                "Duration out of clock range, not starting"
            );
            return false;
        };
        let period = inner.period;
        inner.state = TimerState::Running {
            started_at: now,
            ends_at,
        };
        inner.schedule = Some(ScheduleHandle::spawn(Rc::downgrade(&self.inner), period));

        info!(
            timer_id = %inner.id,
            name = %inner.name,
            duration_secs = inner.duration_secs,
            "Timer started"
        );

        true
    }

    /// Cancel a running countdown without notifying.
    ///
    /// Returns whether a countdown was cancelled.
    #[instrument(skip(self))]
    pub fn stop(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        if !inner.state.is_running() {
            return false;
        }
        inner.reset();
        info!(timer_id = %inner.id, name = %inner.name, "Timer stopped");
        true
    }

    /// Force the timer back to `Reset`, cancelling any schedule.
    pub fn reset(&self) {
        self.inner.borrow_mut().reset();
    }

    /// Advance the countdown to `now`.
    ///
    /// Writes the rounded-up remaining time to both labels, or on reaching
    /// zero moves to `Expired`, notifies once and clears the panel label.
    /// A timer that is no longer running just asks the schedule to stop.
    pub fn tick(&self, now: Instant) -> Tick {
        let output = {
            let mut inner = self.inner.borrow_mut();

            let TimerState::Running { ends_at, .. } = inner.state else {
                debug!(timer_id = %inner.id, state = %inner.state, "Stale tick ignored");
                return Tick::Stop;
            };

            let remaining = ends_at.saturating_duration_since(now);
            if remaining.is_zero() {
                inner.state = TimerState::Expired;
                inner.schedule = None;
                info!(timer_id = %inner.id, name = %inner.name, "Timer has ended");

                TickOutput::Expired {
                    message: format!("Timer [{}] completed", inner.name),
                    duration: Hms::new(inner.duration_secs),
                    label: inner.label.clone(),
                    panel_label: inner.panel_label.clone(),
                    notifier: inner.notifier.clone(),
                }
            } else {
                TickOutput::Progress {
                    remaining: Hms::from_remaining(remaining),
                    label: inner.label.clone(),
                    panel_label: inner.panel_label.clone(),
                }
            }
        };

        match output {
            TickOutput::Progress {
                remaining,
                label,
                panel_label,
            } => {
                if let Some(label) = label {
                    label.set_text(&remaining.format());
                }
                if let Some(panel_label) = panel_label {
                    panel_label.set_text(&remaining.compact());
                }
                Tick::Continue
            }
            TickOutput::Expired {
                message,
                duration,
                label,
                panel_label,
                notifier,
            } => {
                match notifier {
                    Some(notifier) => notifier.notify(&message),
                    None => warn!(%message, "No notifier attached"),
                }
                if let Some(label) = label {
                    label.set_text(&duration.format());
                }
                if let Some(panel_label) = panel_label {
                    panel_label.set_text("");
                }
                Tick::Stop
            }
        }
    }

    /// Merge a persisted record into this timer when the ids match.
    ///
    /// Name, duration and enabled flag are overwritten. An expired timer goes
    /// back to `Reset`; a running countdown keeps going.
    pub fn refresh_with(&self, record: &TimerRecord) -> bool {
        let mut inner = self.inner.borrow_mut();
        if record.id != inner.id {
            return false;
        }

        inner.name.clone_from(&record.name);
        inner.duration_secs = record.duration_secs;
        inner.enabled = record.enabled;
        if inner.state == TimerState::Expired {
            inner.state = TimerState::Reset;
        }

        debug!(timer_id = %inner.id, name = %inner.name, "Timer refreshed from record");
        true
    }

    /// Pack the timer into its persisted shape.
    pub fn to_record(&self) -> TimerRecord {
        let inner = self.inner.borrow();
        TimerRecord {
            id: inner.id,
            name: inner.name.clone(),
            duration_secs: inner.duration_secs,
            enabled: inner.enabled,
            quick: inner.quick,
        }
    }

    /// True when both handles refer to the same countdown.
    pub fn ptr_eq(&self, other: &Timer) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Timer")
            .field("id", &inner.id)
            .field("name", &inner.name)
            .field("duration_secs", &inner.duration_secs)
            .field("enabled", &inner.enabled)
            .field("quick", &inner.quick)
            .field("state", &inner.state)
            .finish()
    }
}
