use avr_device::atmega328p::TC0;
use embedded_hal::blocking::delay::DelayMs;

use crate::config::CPU_FREQ_HZ;

// CS02:0 = 011, clk/64
const PRESCALER_DIV64: u8 = 0x03;
const TICKS_PER_MS: u8 = (CPU_FREQ_HZ / 64 / 1000) as u8;

/// Busy-wait millisecond delay on Timer0.
///
/// Polls the counter instead of using the overflow interrupt, so it works
/// before the runtime is set up and with interrupts disabled.
pub struct Delay {
    _private: (),
}

impl Delay {
    pub fn new() -> Self {
        unsafe {
            // Normal mode, stopped
            let p = TC0::ptr();
            (*p).tccr0a.write(|w| w.bits(0));
            (*p).tccr0b.write(|w| w.bits(0));
        }
        Self { _private: () }
    }

    #[inline]
    fn counter(&self) -> u8 {
        unsafe { (*TC0::ptr()).tcnt0.read().bits() }
    }

    #[inline]
    fn set_counter(&mut self, value: u8) {
        unsafe {
            (*TC0::ptr()).tcnt0.write(|w| w.bits(value));
        }
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        self.set_counter(0);
        unsafe {
            (*TC0::ptr()).tccr0b.write(|w| w.bits(PRESCALER_DIV64));
        }

        for _ in 0..ms {
            while self.counter() < TICKS_PER_MS {}
            self.set_counter(0);
        }

        unsafe {
            (*TC0::ptr()).tccr0b.write(|w| w.bits(0));
        }
    }
}

impl DelayMs<u8> for Delay {
    fn delay_ms(&mut self, ms: u8) {
        DelayMs::<u16>::delay_ms(self, ms as u16);
    }
}
