use crate::{
    Tick, TextLabel, Timer, TimerRecord, TimerState,
    tests::support::{RecordingNotifier, on_local_set},
};

use std::{rc::Rc, time::Duration};

use tokio::time::{Instant, sleep};
use uuid::Uuid;

struct Wired {
    timer: Timer,
    notifier: Rc<RecordingNotifier>,
    label: Rc<TextLabel>,
    panel_label: Rc<TextLabel>,
}

fn wired(name: &str, duration_secs: u64) -> Wired {
    let timer = Timer::new(name, duration_secs);
    let notifier = Rc::new(RecordingNotifier::default());
    let label = Rc::new(TextLabel::new());
    let panel_label = Rc::new(TextLabel::new());

    timer.attach(notifier.clone(), panel_label.clone());
    timer.set_label(label.clone());

    Wired {
        timer,
        notifier,
        label,
        panel_label,
    }
}

/// WHAT: A started timer expires, notifies once and clears the panel
/// WHY: The core end-to-end countdown behaviour
#[tokio::test(start_paused = true)]
async fn given_tea_timer_when_five_seconds_elapse_then_expired_and_notified_once() {
    on_local_set(async {
        // Given: A 5 second timer named "tea"
        let w = wired("tea", 5);

        // When: Starting it and letting simulated time pass the end
        assert!(w.timer.start());
        sleep(Duration::from_millis(5_500)).await;

        // Then: Expired, one notification naming the timer, panel cleared
        assert_eq!(w.timer.state(), TimerState::Expired);
        let messages = w.notifier.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("tea"));
        assert_eq!(w.panel_label.text(), "");
        assert_eq!(w.label.text(), "00:05");
    })
    .await;
}

/// WHAT: Ticks push rounded-up remaining time to both labels
/// WHY: Detailed and panel labels show the same quantity differently
#[tokio::test(start_paused = true)]
async fn given_running_timer_when_ticking_then_labels_show_remaining_time() {
    on_local_set(async {
        // Given: A running 65 second timer
        let w = wired("eggs", 65);
        assert!(w.timer.start());

        // When: Just over one second passes
        sleep(Duration::from_millis(1_050)).await;

        // Then: Both labels show 64 seconds left
        assert_eq!(w.label.text(), "01:04");
        assert_eq!(w.panel_label.text(), "1:04");
        assert!(w.timer.is_running());
        assert!(w.notifier.messages().is_empty());
    })
    .await;
}

/// WHAT: Starting a running timer cancels it back to Reset
/// WHY: A double start must never leave two schedules firing
#[tokio::test(start_paused = true)]
async fn given_running_timer_when_started_again_then_reset_without_notification() {
    on_local_set(async {
        // Given: A running timer
        let w = wired("pasta", 2);
        assert!(w.timer.start());

        // When: Starting it a second time
        let restarted = w.timer.start();
        sleep(Duration::from_secs(5)).await;

        // Then: The second start fails, the timer stays Reset and never fires
        assert!(!restarted);
        assert_eq!(w.timer.state(), TimerState::Reset);
        assert!(w.timer.end_time().is_none());
        assert!(w.notifier.messages().is_empty());
    })
    .await;
}

/// WHAT: Disabled timers refuse to start
/// WHY: Disabling is the supported way to turn a timer off
#[tokio::test(start_paused = true)]
async fn given_disabled_timer_when_starting_then_refused() {
    on_local_set(async {
        // Given: A disabled timer
        let w = wired("rice", 1);
        w.timer.disable();

        // When: Starting it
        let started = w.timer.start();
        sleep(Duration::from_secs(2)).await;

        // Then: Nothing happens
        assert!(!started);
        assert_eq!(w.timer.state(), TimerState::Reset);
        assert!(w.notifier.messages().is_empty());
    })
    .await;
}

/// WHAT: Durations past the end of the clock refuse to start
/// WHY: Settings files and arguments may carry any non-negative second count
#[tokio::test(start_paused = true)]
async fn given_duration_beyond_clock_range_when_starting_then_refused() {
    on_local_set(async {
        for duration_secs in [u64::MAX, i64::MAX as u64] {
            // Given: A timer whose end instant cannot be represented
            let w = wired("forever", duration_secs);

            // When: Starting it
            let started = w.timer.start();
            sleep(Duration::from_secs(1)).await;

            // Then: Refused, still Reset, no schedule fired
            assert!(!started, "duration {}", duration_secs);
            assert_eq!(w.timer.state(), TimerState::Reset);
            assert!(w.timer.end_time().is_none());
            assert!(w.notifier.messages().is_empty());
            assert_eq!(w.label.text(), "");
        }
    })
    .await;
}

/// WHAT: Reset clears the start and end instants
/// WHY: A stale end time must not leak into the next countdown
#[tokio::test(start_paused = true)]
async fn given_running_timer_when_reset_then_instants_cleared() {
    on_local_set(async {
        // Given: A running timer with both instants set
        let w = wired("bread", 30);
        assert!(w.timer.start());
        assert!(w.timer.start_time().is_some());
        assert!(w.timer.end_time().is_some());

        // When: Resetting
        w.timer.reset();

        // Then: Both instants are gone with the Running state
        assert_eq!(w.timer.state(), TimerState::Reset);
        assert!(w.timer.start_time().is_none());
        assert!(w.timer.end_time().is_none());
        assert!(w.timer.remaining(Instant::now()).is_none());
    })
    .await;
}

/// WHAT: End time is start time plus the duration
/// WHY: The countdown math depends on it
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_started_timer_when_reading_instants_then_end_is_start_plus_duration() {
    on_local_set(async {
        let w = wired("steak", 90);
        assert!(w.timer.start());

        let started_at = w.timer.start_time().unwrap();
        let ends_at = w.timer.end_time().unwrap();

        assert_eq!(ends_at - started_at, Duration::from_secs(90));
        assert_eq!(w.timer.remaining(started_at), Some(Duration::from_secs(90)));
    })
    .await;
}

/// WHAT: Stop cancels a countdown silently
/// WHY: Cancelling is not completion and must not notify
#[tokio::test(start_paused = true)]
async fn given_running_timer_when_stopped_then_no_notification() {
    on_local_set(async {
        // Given: A running timer
        let w = wired("soup", 1);
        assert!(w.timer.start());

        // When: Stopping it and waiting past its end
        let stopped = w.timer.stop();
        sleep(Duration::from_secs(3)).await;

        // Then: It was stopped and never fired; a second stop is a no-op
        assert!(stopped);
        assert!(!w.timer.stop());
        assert_eq!(w.timer.state(), TimerState::Reset);
        assert!(w.notifier.messages().is_empty());
    })
    .await;
}

/// WHAT: An expired timer can be started again
/// WHY: Kitchen timers are reused
#[tokio::test(start_paused = true)]
async fn given_expired_timer_when_started_then_counts_down_again() {
    on_local_set(async {
        // Given: A timer that already expired
        let w = wired("tea", 1);
        assert!(w.timer.start());
        sleep(Duration::from_secs(2)).await;
        assert!(w.timer.is_expired());

        // When: Starting it again and letting it run out
        assert!(w.timer.start());
        sleep(Duration::from_secs(2)).await;

        // Then: It notified once per run
        assert!(w.timer.is_expired());
        assert_eq!(w.notifier.messages().len(), 2);
    })
    .await;
}

/// WHAT: A zero-length timer expires on its first tick
/// WHY: Remaining time <= 0 is the expiry condition
#[tokio::test(start_paused = true)]
async fn given_zero_duration_when_started_then_expires_immediately() {
    on_local_set(async {
        let w = wired("nothing", 0);
        assert!(w.timer.start());

        sleep(Duration::from_millis(10)).await;

        assert!(w.timer.is_expired());
        assert_eq!(w.notifier.messages().len(), 1);
    })
    .await;
}

/// WHAT: A tick on a timer that is not running halts without side effects
/// WHY: A late tick after cancellation must not report completion
#[test]
fn given_reset_timer_when_ticked_then_stop_without_state_change() {
    // Given: A timer that never started
    let w = wired("late", 10);

    // When: A tick arrives anyway
    let tick = w.timer.tick(Instant::now());

    // Then: The schedule is told to stop and nothing else happens
    assert_eq!(tick, Tick::Stop);
    assert_eq!(w.timer.state(), TimerState::Reset);
    assert!(w.notifier.messages().is_empty());
    assert_eq!(w.panel_label.text(), "");
}

/// WHAT: refresh_with ignores records with another id
/// WHY: Reconciliation relies on id matching only
#[test]
fn given_other_id_when_refreshing_then_untouched_and_false() {
    // Given: A timer and a record for a different timer
    let timer = Timer::new("tea", 180);
    let mut record = TimerRecord::new("coffee", 240);
    record.enabled = false;

    // When: Refreshing with it
    let found = timer.refresh_with(&record);

    // Then: Nothing changed
    assert!(!found);
    assert_eq!(timer.name(), "tea");
    assert_eq!(timer.duration_secs(), 180);
    assert!(timer.enabled());
}

/// WHAT: refresh_with merges a matching record
/// WHY: Settings edits must reach the live timer
#[test]
fn given_matching_id_when_refreshing_then_fields_overwritten() {
    // Given: A timer and an edited record with its id
    let id = Uuid::new_v4();
    let timer = Timer::with_id(id, "tea", 180);
    let record = TimerRecord {
        id,
        name: "green tea".to_string(),
        duration_secs: 120,
        enabled: false,
        quick: false,
    };

    // When: Refreshing
    let found = timer.refresh_with(&record);

    // Then: Name, duration and enabled follow the record
    assert!(found);
    assert_eq!(timer.id(), id);
    assert_eq!(timer.name(), "green tea");
    assert_eq!(timer.duration_secs(), 120);
    assert!(!timer.enabled());
}

/// WHAT: A record round-trips through a timer
/// WHY: Packing for persistence must keep identity and the quick flag
#[test]
fn given_record_when_building_timer_then_packs_back_to_same_record() {
    let record = TimerRecord::new("pizza", 720).into_quick();

    let timer = Timer::from_record(&record);

    assert!(timer.quick());
    assert_eq!(timer.to_record(), record);
}
