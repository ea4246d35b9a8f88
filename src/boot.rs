//! Boot-path dispatch.
//!
//! Every path ends in power-down sleep and never returns. The only way back
//! in is a reset, which starts over at the reset vector with a fresh stack.
//!
//! Self-test image: every reset runs the retention test, then halts. A
//! watchdog wake first stretches the timeout to cover the cycle.
//!
//! Framework image: the reset cause picks one of two paths.
//! * cold start: user startup hook, arm the watchdog with the shortest
//!   timeout, halt.
//! * warm wake (watchdog reset): program the steady-state timeout, user
//!   wake hook, halt with the watchdog still running.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::config::{FIRST_WATCHDOG_TIMEOUT, SELF_TEST_WATCHDOG_TIMEOUT, STEADY_WATCHDOG_TIMEOUT};
use crate::hal::{DeepSleep, ResetFlags, Transmitter, Watchdog, WatchdogTimeout};
use crate::pattern::PatternEngine;
use crate::selftest::SelfTest;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootPath {
    /// No watchdog flag at entry: power-on, brown-out or external reset
    ColdStart,
    /// The watchdog expired
    WarmWake,
}

/// User code run by the framework image.
///
/// Hooks must finish well within the watchdog timeout. A hook that never
/// returns keeps the chip awake, and one that runs past the timeout gets
/// reset halfway through. Long work should `feed()` the watchdog it is
/// handed.
pub trait Application {
    /// Runs once per power-up, before the watchdog is armed.
    fn startup(&mut self) {}

    /// Runs on every watchdog wake, with the steady-state timeout in effect.
    fn wake<W: Watchdog>(&mut self, watchdog: &mut W);
}

pub struct Dispatcher<W, P> {
    watchdog: W,
    power: P,
    first_timeout: WatchdogTimeout,
    steady_timeout: WatchdogTimeout,
}

impl<W, P: DeepSleep> Dispatcher<W, P> {
    pub fn new(watchdog: W, power: P) -> Self {
        Self {
            watchdog,
            power,
            first_timeout: FIRST_WATCHDOG_TIMEOUT,
            steady_timeout: STEADY_WATCHDOG_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, first: WatchdogTimeout, steady: WatchdogTimeout) -> Self {
        self.first_timeout = first;
        self.steady_timeout = steady;
        self
    }

    /// Terminal state of every path.
    pub fn halt(mut self) -> ! {
        self.power.enter_deepest_sleep()
    }
}

impl<W, P> Dispatcher<W, P>
where
    W: Watchdog + ResetFlags,
    P: DeepSleep,
{
    /// The self-test image's only state: run one cycle, then halt.
    ///
    /// A watchdog reset leaves the watchdog forced on at its shortest
    /// timeout, far shorter than one cycle. The cycle timeout is set before
    /// the flag is cleared, so WDE never drops while the watchdog is live.
    /// After a cold reset the watchdog stays off.
    ///
    /// The outcome has already gone out on the wire and the LEDs, so it
    /// is not needed past this point.
    pub fn self_test<TX, D, OK, FAIL, E, const N: usize>(
        mut self,
        test: &mut SelfTest<TX, D, OK, FAIL>,
        engine: &mut PatternEngine<'_, N>,
    ) -> !
    where
        TX: Transmitter,
        D: DelayMs<u16>,
        OK: OutputPin<Error = E>,
        FAIL: OutputPin<Error = E>,
    {
        if self.classify() == BootPath::WarmWake {
            self.watchdog.set_timeout(SELF_TEST_WATCHDOG_TIMEOUT);
        }
        self.watchdog.clear_reset_cause();

        test.run_cycle(engine).ok();
        self.halt()
    }

    /// Read the reset cause. Does not clear it.
    pub fn classify(&self) -> BootPath {
        if self.watchdog.was_last_reset_watchdog() {
            BootPath::WarmWake
        } else {
            BootPath::ColdStart
        }
    }

    /// Classify and run the matching path.
    pub fn dispatch<A: Application>(self, app: &mut A) -> ! {
        let path = self.classify();
        self.enter(path, app)
    }

    /// Run `path` to its end and halt.
    pub fn enter<A: Application>(mut self, path: BootPath, app: &mut A) -> ! {
        match path {
            BootPath::ColdStart => self.cold_start(app),
            BootPath::WarmWake => self.warm_wake(app),
        }
        self.halt()
    }

    fn cold_start<A: Application>(&mut self, app: &mut A) {
        self.watchdog.clear_reset_cause();
        // Armed only now, so a slow startup hook cannot be cut short
        app.startup();
        self.watchdog.set_timeout(self.first_timeout);
    }

    fn warm_wake<A: Application>(&mut self, app: &mut A) {
        // After a reset the prescaler is back at its shortest setting, which
        // could fire in the middle of the hook. WDE stays forced on while
        // WDRF is set, and set_timeout keeps it on once the flag is cleared.
        self.watchdog.set_timeout(self.steady_timeout);
        self.watchdog.clear_reset_cause();
        app.wake(&mut self.watchdog);
    }
}
