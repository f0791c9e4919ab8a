use std::fmt;

use tokio::time::Instant;

/// Lifecycle of a single countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    /// Idle and ready to start.
    #[default]
    Reset,
    /// Counting down.
    Running {
        /// When the countdown began.
        started_at: Instant,
        /// When the countdown reaches zero.
        ends_at: Instant,
    },
    /// Reached zero and notified.
    Expired,
}

impl TimerState {
    /// True while counting down.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => f.write_str("reset"),
            Self::Running { .. } => f.write_str("running"),
            Self::Expired => f.write_str("expired"),
        }
    }
}

/// What the tick schedule should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Keep ticking.
    Continue,
    /// Halt the schedule.
    Stop,
}
