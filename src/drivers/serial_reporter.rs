//! Fire-and-forget byte reporter on top of a [`Transmitter`].

use embedded_hal::blocking::delay::DelayMs;

use crate::config::INTER_BYTE_DELAY_MS;
use crate::hal::Transmitter;

pub struct Reporter<TX, D> {
    tx: TX,
    delay: D,
    gap_ms: u16,
}

impl<TX, D> Reporter<TX, D>
where
    TX: Transmitter,
    D: DelayMs<u16>,
{
    pub fn new(tx: TX, delay: D) -> Self {
        Self {
            tx,
            delay,
            gap_ms: INTER_BYTE_DELAY_MS,
        }
    }

    /// Override the gap inserted after every byte.
    pub fn with_gap(mut self, gap_ms: u16) -> Self {
        self.gap_ms = gap_ms;
        self
    }

    pub fn configure(&mut self) {
        self.tx.configure();
    }

    /// Wait for room in the transmit buffer, send `byte`, then hold the line
    /// for the inter-byte gap.
    pub fn send_byte(&mut self, byte: u8) -> Result<(), TX::Error> {
        nb::block!(self.tx.write(byte))?;
        self.delay.delay_ms(self.gap_ms);
        Ok(())
    }

    /// Like [`send_byte`](Self::send_byte), but does not return until the
    /// frame has completely left the shift register.
    pub fn send_byte_fully(&mut self, byte: u8) -> Result<(), TX::Error> {
        nb::block!(self.tx.write(byte))?;
        nb::block!(self.tx.flush())?;
        self.delay.delay_ms(self.gap_ms);
        Ok(())
    }

    pub fn shutdown(&mut self) {
        self.tx.shutdown();
    }

    /// Plain blocking delay on the reporter's timer.
    pub fn pause(&mut self, ms: u16) {
        self.delay.delay_ms(ms);
    }

    pub fn release(self) -> (TX, D) {
        (self.tx, self.delay)
    }
}
