//! Kitchen Timer Core Library
//!
//! Countdown engine for a status-area kitchen timer: named timers with a
//! duration, a single-threaded tick schedule per running timer, and a
//! collection reconciled against a settings store.
//!
//! # Example
//!
//! ```no_run
//! use kitchen_timer_core::{CoreResult, MemorySettingsStore, Notifier, TextLabel, Timer, Timers};
//!
//! use std::{rc::Rc, time::Duration};
//!
//! struct Print;
//!
//! impl Notifier for Print {
//!     fn notify(&self, message: &str) {
//!         println!("{message}");
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> CoreResult<()> {
//!     let local = tokio::task::LocalSet::new();
//!     local
//!         .run_until(async {
//!             let mut timers = Timers::new(
//!                 Rc::new(MemorySettingsStore::new()),
//!                 Rc::new(Print),
//!                 Rc::new(TextLabel::new()),
//!             )?;
//!
//!             let tea = Timer::new("tea", 180);
//!             timers.add(tea.clone())?;
//!             tea.start();
//!
//!             tokio::time::sleep(Duration::from_secs(181)).await;
//!             Ok::<(), kitchen_timer_core::CoreError>(())
//!         })
//!         .await
//! }
//! ```

mod error;
mod hms;
mod settings;
mod sink;
mod timer;
mod timers;

pub use {
    error::{CoreError, Result as CoreResult},
    hms::Hms,
    settings::{DEFAULT_SOUND_FILE, MemorySettingsStore, Preferences, SettingsStore, StoredTimers},
    sink::{LabelSink, Notifier, TextLabel},
    timer::{TICK_INTERVAL, Tick, Timer, TimerRecord, TimerState},
    timers::Timers,
};

#[cfg(test)]
mod tests;
