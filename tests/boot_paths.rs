mod common;

use common::*;
use zombie_sram::config::{FIRST_WATCHDOG_TIMEOUT, STEADY_WATCHDOG_TIMEOUT};
use zombie_sram::hal::WatchdogTimeout;
use zombie_sram::BootPath;

#[test]
fn reset_cause_picks_the_path() {
    let log = new_log();
    assert_eq!(dispatcher(&log, false).classify(), BootPath::ColdStart);
    assert_eq!(dispatcher(&log, true).classify(), BootPath::WarmWake);
    // classify only looks
    assert!(log.borrow().is_empty());
}

#[test]
fn cold_start_arms_the_watchdog_after_startup() {
    let log = new_log();
    let mut app = App::new(&log);

    run_until_halt(&log, || dispatcher(&log, false).dispatch(&mut app));

    assert_eq!(
        *log.borrow(),
        vec![
            Event::ClearResetCause,
            Event::Startup,
            Event::Timeout(FIRST_WATCHDOG_TIMEOUT),
            Event::Sleep,
        ]
    );
    assert_eq!(FIRST_WATCHDOG_TIMEOUT, WatchdogTimeout::Ms16);
}

#[test]
fn warm_wake_sets_the_steady_timeout_before_the_hook() {
    let log = new_log();
    let mut app = App::new(&log);

    run_until_halt(&log, || dispatcher(&log, true).dispatch(&mut app));

    assert_eq!(
        *log.borrow(),
        vec![
            Event::Timeout(STEADY_WATCHDOG_TIMEOUT),
            Event::ClearResetCause,
            Event::Wake,
            Event::Sleep,
        ]
    );
    assert_ne!(STEADY_WATCHDOG_TIMEOUT, FIRST_WATCHDOG_TIMEOUT);
}

#[test]
fn warm_wake_never_runs_startup() {
    let log = new_log();
    let mut app = App::new(&log);

    run_until_halt(&log, || dispatcher(&log, true).dispatch(&mut app));

    assert_eq!(position(&log, Event::Startup), None);
    assert_eq!(position(&log, Event::Timeout(FIRST_WATCHDOG_TIMEOUT)), None);
}

#[test]
fn wake_hook_can_feed_the_watchdog() {
    let log = new_log();
    let mut app = App::new(&log);
    app.feed_on_wake = true;

    run_until_halt(&log, || dispatcher(&log, true).dispatch(&mut app));

    let wake = position(&log, Event::Wake).unwrap();
    assert_eq!(position(&log, Event::Feed), Some(wake + 1));
}

#[test]
fn custom_timeouts_are_used() {
    let log = new_log();
    let mut app = App::new(&log);

    run_until_halt(&log, || {
        dispatcher(&log, true)
            .with_timeouts(WatchdogTimeout::Ms32, WatchdogTimeout::Ms1000)
            .dispatch(&mut app)
    });
    assert_eq!(log.borrow()[0], Event::Timeout(WatchdogTimeout::Ms1000));

    let log = new_log();
    let mut app = App::new(&log);
    run_until_halt(&log, || {
        dispatcher(&log, false)
            .with_timeouts(WatchdogTimeout::Ms32, WatchdogTimeout::Ms1000)
            .dispatch(&mut app)
    });
    assert_eq!(position(&log, Event::Timeout(WatchdogTimeout::Ms32)), Some(2));
}

#[test]
fn explicit_entry_ignores_the_flag() {
    // The image serves warm wakes early and enters the cold path from main
    let log = new_log();
    let mut app = App::new(&log);

    run_until_halt(&log, || dispatcher(&log, true).enter(BootPath::ColdStart, &mut app));

    assert_eq!(position(&log, Event::Startup), Some(1));
    assert_eq!(position(&log, Event::Wake), None);
}

#[test]
fn power_cycle_then_two_wakes() {
    let log = new_log();
    let mut app = App::new(&log);

    run_until_halt(&log, || dispatcher(&log, false).dispatch(&mut app));
    for _ in 0..2 {
        let wake_log = new_log();
        let mut wake_app = App::new(&wake_log);
        run_until_halt(&wake_log, || dispatcher(&wake_log, true).dispatch(&mut wake_app));
        assert_eq!(wake_log.borrow()[0], Event::Timeout(STEADY_WATCHDOG_TIMEOUT));
        assert_eq!(position(&wake_log, Event::Startup), None);
    }
    assert_eq!(position(&log, Event::Startup), Some(1));
}
