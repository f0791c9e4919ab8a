//! Kitchen Timer: named countdown timers with desktop notifications.

mod app;
mod app_command;
mod config;
mod desktop_notifier;
mod error;
mod labels;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    desktop_notifier::DesktopNotifier,
    error::{AppError, Result as AppResult},
    labels::{LogLabel, TerminalLabel},
};

use crate::config::TomlSettingsStore;

use kitchen_timer_core::{LabelSink, Notifier, SettingsStore, Timers};

use std::rc::Rc;

use tokio::task::LocalSet;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Application entry point.
fn main() {
    let store = TomlSettingsStore::open_default();

    let debug = store
        .as_ref()
        .map(|store| store.preferences().debug)
        .unwrap_or(false);
    init_tracing(debug);

    let store = match store {
        Ok(store) => Rc::new(store),
        Err(e) => {
            error!("Failed to open settings: {:?}", e);
            std::process::exit(1);
        }
    };

    let commands = AppCommand::from_args(std::env::args().skip(1));

    if let Err(e) = run(store, commands) {
        error!(error = ?e, "Kitchen Timer failed");
        std::process::exit(1);
    }
}

/// Install the log subscriber. `RUST_LOG` wins over the debug preference.
fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "kitchen_timer=debug,kitchen_timer_core=debug"
    } else {
        "kitchen_timer=info,kitchen_timer_core=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(store: Rc<TomlSettingsStore>, commands: Vec<AppCommand>) -> AppResult<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    // Every timer ticks on this one thread; `Timer` is !Send by design.
    let local = LocalSet::new();

    local.block_on(&rt, async move {
        let preferences = store.preferences();
        let notifier: Rc<dyn Notifier> = Rc::new(DesktopNotifier::new(&preferences));
        let panel_label: Rc<dyn LabelSink> = Rc::new(TerminalLabel::new(preferences.show_time));

        let timers = Timers::new(store, notifier, panel_label)?;

        App { timers }.run(commands).await
    })
}
