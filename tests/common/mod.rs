//! Recording board double shared by the integration tests.
//!
//! Every capability writes into one event log, so tests can check the
//! relative order of serial traffic, LED changes, delays and watchdog
//! writes. Deep sleep records `Sleep` and then unwinds with [`Halted`],
//! standing in for the reset that would follow on hardware.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::Once;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::serial;

use zombie_sram::drivers::{DiagLeds, Led, Reporter};
use zombie_sram::hal::{DeepSleep, ResetFlags, Transmitter, Watchdog, WatchdogTimeout};
use zombie_sram::{Application, Dispatcher, SelfTest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Configure,
    Tx(u8),
    Flush,
    Shutdown,
    Led(Led, bool),
    Delay(u16),
    Timeout(WatchdogTimeout),
    Feed,
    ClearResetCause,
    Startup,
    Wake,
    Sleep,
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Unwind payload for the end of a cycle.
pub struct Halted;

/// Unwind payload for a reset that cuts a cycle short.
pub struct Reset;

fn quiet_expected_unwinds() {
    static QUIET: Once = Once::new();
    QUIET.call_once(|| {
        let default = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let payload = info.payload();
            if !payload.is::<Halted>() && !payload.is::<Reset>() {
                default(info);
            }
        }));
    });
}

#[derive(Debug, PartialEq, Eq)]
pub enum Stop {
    Halted,
    Reset,
}

/// Run `body` until it halts or is reset. Any other outcome fails the test.
pub fn run_until_stopped(body: impl FnOnce()) -> Stop {
    quiet_expected_unwinds();
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(()) => panic!("returned instead of halting"),
        Err(payload) if payload.is::<Halted>() => Stop::Halted,
        Err(payload) if payload.is::<Reset>() => Stop::Reset,
        Err(payload) => panic::resume_unwind(payload),
    }
}

pub fn run_until_halt(log: &Log, body: impl FnOnce()) {
    assert_eq!(run_until_stopped(body), Stop::Halted);
    assert_eq!(log.borrow().last(), Some(&Event::Sleep), "activity after sleep");
    let sleeps = log.borrow().iter().filter(|e| **e == Event::Sleep).count();
    assert_eq!(sleeps, 1);
}

pub struct Tx {
    log: Log,
    written: usize,
    /// Simulated reset when this many bytes have been written
    pub reset_at: Option<usize>,
}

impl Tx {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            written: 0,
            reset_at: None,
        }
    }
}

impl serial::Write<u8> for Tx {
    type Error = Infallible;

    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        if self.reset_at == Some(self.written) {
            panic::panic_any(Reset);
        }
        self.written += 1;
        self.log.borrow_mut().push(Event::Tx(word));
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

impl Transmitter for Tx {
    fn configure(&mut self) {
        self.log.borrow_mut().push(Event::Configure);
    }

    fn shutdown(&mut self) {
        self.log.borrow_mut().push(Event::Shutdown);
    }
}

pub struct Pin {
    log: Log,
    led: Led,
}

impl OutputPin for Pin {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Led(self.led, true));
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Led(self.led, false));
        Ok(())
    }
}

pub struct Delay {
    log: Log,
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        self.log.borrow_mut().push(Event::Delay(ms));
    }
}

pub struct Chip {
    log: Log,
    watchdog_reset: bool,
}

impl Watchdog for Chip {
    fn set_timeout(&mut self, timeout: WatchdogTimeout) {
        self.log.borrow_mut().push(Event::Timeout(timeout));
    }

    fn feed(&mut self) {
        self.log.borrow_mut().push(Event::Feed);
    }
}

impl ResetFlags for Chip {
    fn was_last_reset_watchdog(&self) -> bool {
        self.watchdog_reset
    }

    fn clear_reset_cause(&mut self) {
        self.watchdog_reset = false;
        self.log.borrow_mut().push(Event::ClearResetCause);
    }
}

pub struct Power {
    log: Log,
}

impl DeepSleep for Power {
    fn enter_deepest_sleep(&mut self) -> ! {
        self.log.borrow_mut().push(Event::Sleep);
        panic::panic_any(Halted)
    }
}

/// Hooks that log themselves; the wake hook optionally feeds the watchdog.
pub struct App {
    log: Log,
    pub feed_on_wake: bool,
}

impl App {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            feed_on_wake: false,
        }
    }
}

impl Application for App {
    fn startup(&mut self) {
        self.log.borrow_mut().push(Event::Startup);
    }

    fn wake<W: Watchdog>(&mut self, watchdog: &mut W) {
        self.log.borrow_mut().push(Event::Wake);
        if self.feed_on_wake {
            watchdog.feed();
        }
    }
}

pub type BoardTest = SelfTest<Tx, Delay, Pin, Pin>;

pub fn self_test(log: &Log, tx: Tx) -> BoardTest {
    SelfTest::new(
        Reporter::new(tx, Delay { log: log.clone() }),
        DiagLeds::new(
            Pin {
                log: log.clone(),
                led: Led::Ok,
            },
            Pin {
                log: log.clone(),
                led: Led::Fail,
            },
        ),
    )
}

pub fn dispatcher(log: &Log, watchdog_reset: bool) -> Dispatcher<Chip, Power> {
    Dispatcher::new(
        Chip {
            log: log.clone(),
            watchdog_reset,
        },
        Power { log: log.clone() },
    )
}

/// Bytes that went out on the wire, in order.
pub fn wire(log: &Log) -> Vec<u8> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Tx(b) => Some(*b),
            _ => None,
        })
        .collect()
}

pub fn position(log: &Log, event: Event) -> Option<usize> {
    log.borrow().iter().position(|e| *e == event)
}
