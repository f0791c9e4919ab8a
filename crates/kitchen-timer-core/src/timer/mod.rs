mod schedule;
#[allow(clippy::module_inception)]
mod timer;
mod timer_record;
mod timer_state;

pub(crate) use {schedule::ScheduleHandle, timer::TimerInner};

pub use {
    timer::{TICK_INTERVAL, Timer},
    timer_record::TimerRecord,
    timer_state::{Tick, TimerState},
};
