//! One wake cycle of the retention test.
//!
//! Order on the wire and in memory:
//! configure, start markers, payload with per-byte LED pulses, checksum,
//! rearm, end markers, transmitter off, settle, verdict.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::serial;

use crate::config::{SHUTDOWN_SETTLE_MS, VERDICT_HOLD_MS};
use crate::drivers::{DiagLeds, Reporter};
use crate::hal::Transmitter;
use crate::pattern::{PatternEngine, Verdict};
use crate::protocol::{END_MARKER, MARKER_REPEAT, START_MARKER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<S, P> {
    Serial(S),
    Led(P),
}

pub type SerialError<TX> = <TX as serial::Write<u8>>::Error;

pub type Result<T, TX, E> = core::result::Result<T, Error<SerialError<TX>, E>>;

pub struct SelfTest<TX, D, OK, FAIL> {
    reporter: Reporter<TX, D>,
    leds: DiagLeds<OK, FAIL>,
}

impl<TX, D, OK, FAIL, E> SelfTest<TX, D, OK, FAIL>
where
    TX: Transmitter,
    D: DelayMs<u16>,
    OK: OutputPin<Error = E>,
    FAIL: OutputPin<Error = E>,
{
    pub fn new(reporter: Reporter<TX, D>, leds: DiagLeds<OK, FAIL>) -> Self {
        Self { reporter, leds }
    }

    /// Report the region, rearm it, then show the verdict.
    ///
    /// A failed report still rearms the region and still closes the frame;
    /// the verdict shown for it is a failure.
    pub fn run_cycle<const N: usize>(
        &mut self,
        engine: &mut PatternEngine<'_, N>,
    ) -> Result<Verdict, TX, E> {
        let outcome = self.report(engine);
        let matched = matches!(outcome, Ok(Verdict { all_matched: true, .. }));
        self.conclude(matched);
        outcome
    }

    /// Send one full frame and rearm the region in between.
    pub fn report<const N: usize>(
        &mut self,
        engine: &mut PatternEngine<'_, N>,
    ) -> Result<Verdict, TX, E> {
        self.reporter.configure();

        let scanned = self.send_payload(engine);

        // The payload has been read out completely (or the line is dead),
        // so the old contents are no longer needed.
        engine.rearm();

        // End markers only after rearm: the controller may cut power as
        // soon as it sees them.
        let closed = self.send_marker(END_MARKER);
        self.reporter.shutdown();

        let verdict = scanned?;
        closed?;
        Ok(verdict)
    }

    /// Settle gap, then the verdict on its LED for a while, then dark.
    pub fn conclude(&mut self, matched: bool) {
        self.reporter.pause(SHUTDOWN_SETTLE_MS);
        // Nothing left to report an LED failure to
        self.leds.show(matched).ok();
        self.reporter.pause(VERDICT_HOLD_MS);
        self.leds.clear().ok();
    }

    pub fn release(self) -> (Reporter<TX, D>, DiagLeds<OK, FAIL>) {
        (self.reporter, self.leds)
    }

    fn send_payload<const N: usize>(&mut self, engine: &PatternEngine<'_, N>) -> Result<Verdict, TX, E> {
        self.send_marker(START_MARKER)?;

        let reporter = &mut self.reporter;
        let leds = &mut self.leds;
        let verdict = engine.scan(|byte, matched| -> Result<(), TX, E> {
            leds.show(matched).map_err(Error::Led)?;
            reporter.send_byte_fully(byte).map_err(Error::Serial)?;
            leds.clear().map_err(Error::Led)
        })?;

        self.reporter
            .send_byte_fully(verdict.checksum)
            .map_err(Error::Serial)?;
        Ok(verdict)
    }

    fn send_marker(&mut self, marker: u8) -> Result<(), TX, E> {
        for _ in 0..MARKER_REPEAT {
            self.reporter.send_byte_fully(marker).map_err(Error::Serial)?;
        }
        Ok(())
    }
}
