use crate::timer::{Tick, Timer, TimerInner};

use std::{cell::RefCell, rc::Weak, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::trace;

/// Handle to the repeating tick task of one running timer.
///
/// Dropping the handle aborts the task, so replacing or clearing the
/// handle stored on a timer always cancels the previous schedule.
pub(crate) struct ScheduleHandle {
    task: JoinHandle<()>,
}

impl ScheduleHandle {
    /// Spawn the tick loop on the current `LocalSet`.
    ///
    /// The task holds a weak reference only; once the last `Timer` handle is
    /// gone the loop ends on its next tick.
    pub(crate) fn spawn(timer: Weak<RefCell<TimerInner>>, period: Duration) -> Self {
        let task = tokio::task::spawn_local(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let Some(inner) = timer.upgrade() else {
                    trace!("Timer dropped, tick loop ending");
                    break;
                };

                if Timer::from_inner(inner).tick(Instant::now()) == Tick::Stop {
                    break;
                }
            }
        });

        Self { task }
    }
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
