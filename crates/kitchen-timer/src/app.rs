use crate::{AppCommand, AppError, AppResult, LogLabel};

use kitchen_timer_core::{Hms, Timer, Timers};

use std::{panic::Location, rc::Rc, time::Duration};

use error_location::ErrorLocation;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// How often the app checks whether any countdown is still running.
const WATCH_INTERVAL: Duration = Duration::from_millis(250);

/// Main application state.
///
/// Runs inside a `LocalSet` on a single-threaded runtime, the same thread
/// every timer ticks on.
pub struct App {
    pub(crate) timers: Timers,
}

impl App {
    /// Execute the commands, then wait until every started timer is done.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self, commands: Vec<AppCommand>) -> AppResult<()> {
        info!(timers = self.timers.len(), "Kitchen Timer starting");

        let mut started = 0usize;
        for command in commands {
            match command {
                AppCommand::List => self.list(),
                AppCommand::Start { key } => {
                    if self.start(&key)? {
                        started += 1;
                    }
                }
            }
        }

        if started == 0 {
            return Ok(());
        }

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut watch = tokio::time::interval(WATCH_INTERVAL);

        loop {
            tokio::select! {
                _ = watch.tick() => {
                    if self.timers.running().is_empty() {
                        info!("All timers finished");
                        break;
                    }
                }

                result = &mut ctrl_c => {
                    if let Err(e) = result {
                        error!(error = ?e, "Failed to listen for Ctrl-C");
                    }
                    for timer in self.timers.running() {
                        timer.stop();
                    }
                    info!("Interrupted, running timers stopped");
                    break;
                }
            }
        }

        // Leave the panel line before the shell prompt comes back.
        println!();

        Ok(())
    }

    fn list(&self) {
        let timers = self.timers.sorted();
        if timers.is_empty() {
            println!("No timers configured");
            return;
        }

        for timer in timers {
            let kind = if timer.quick() { "quick" } else { "preset" };
            println!(
                "{:>9}  {:<20} {:<6} {}",
                Hms::new(timer.duration_secs()).format(),
                timer.name(),
                kind,
                timer.id()
            );
        }
    }

    /// Start a stored timer by name, falling back to id, then to a quick
    /// timer when `key` reads as a duration.
    #[track_caller]
    #[instrument(skip(self))]
    fn start(&mut self, key: &str) -> AppResult<bool> {
        let caller = Location::caller();

        let stored = self.timers.timer_by_name(key).or_else(|| {
            Uuid::parse_str(key)
                .ok()
                .and_then(|id| self.timers.timer_by_id(id))
        });
        if let Some(timer) = stored {
            return Ok(Self::launch(&timer));
        }

        match key.parse::<Hms>() {
            Ok(duration) => self.start_quick(duration),
            Err(_) => Err(AppError::TimerNotFound {
                key: key.to_string(),
                location: ErrorLocation::from(caller),
            }),
        }
    }

    /// Create a quick timer named after its duration and start it.
    #[instrument(skip(self))]
    fn start_quick(&mut self, duration: Hms) -> AppResult<bool> {
        let timer = Timer::new(duration.format(), duration.total_secs());
        timer.set_quick(true);
        self.timers.add(timer.clone())?;

        Ok(Self::launch(&timer))
    }

    fn launch(timer: &Timer) -> bool {
        timer.set_label(Rc::new(LogLabel::new(timer.name())));

        let started = timer.start();
        if !started {
            warn!(name = %timer.name(), "Timer did not start");
        }
        started
    }
}
