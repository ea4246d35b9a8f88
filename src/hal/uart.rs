// UCSR0A
const TXC0: u8 = 1 << 6;
#[cfg_attr(not(target_arch = "avr"), allow(dead_code))]
const UDRE0: u8 = 1 << 5;
const U2X0: u8 = 1 << 1;
const MPCM0: u8 = 1 << 0;
// UCSR0B
#[cfg_attr(not(target_arch = "avr"), allow(dead_code))]
const TXEN0: u8 = 1 << 3;
// UCSR0C: asynchronous, no parity, 1 stop bit, UCSZ01:0 = 11 (8 data bits)
#[cfg_attr(not(target_arch = "avr"), allow(dead_code))]
const FRAME_8N1: u8 = 0x06;

/// UCSR0A value that clears TXC0 and leaves the settings alone.
///
/// FE0, DOR0 and UPE0 must be written as zero, and the other flags are
/// read-only, so only U2X0 and MPCM0 are carried over from `status`.
#[inline]
pub const fn clear_txc(status: u8) -> u8 {
    (status & (U2X0 | MPCM0)) | TXC0
}

#[cfg(target_arch = "avr")]
pub use self::avr::Usart;

#[cfg(target_arch = "avr")]
mod avr {
    use avr_device::atmega328p::USART0;
    use core::convert::Infallible;
    use embedded_hal::serial;

    use super::{clear_txc, FRAME_8N1, TXC0, TXEN0, UDRE0};
    use crate::config::UBRR;

    /// USART0 as a polled, transmit-only port. No interrupts, no buffering.
    pub struct Usart {
        _private: (),
    }

    impl Usart {
        pub fn new() -> Self {
            Self { _private: () }
        }

        #[inline]
        fn status(&self) -> u8 {
            unsafe { (*USART0::ptr()).ucsr0a.read().bits() }
        }
    }

    impl Default for Usart {
        fn default() -> Self {
            Self::new()
        }
    }

    impl serial::Write<u8> for Usart {
        type Error = Infallible;

        /// Load the data register once it is free.
        ///
        /// TXC0 is cleared (by writing a one) right before the load, so a
        /// following `flush` waits for exactly this frame.
        fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
            if self.status() & UDRE0 == 0 {
                return Err(nb::Error::WouldBlock);
            }
            unsafe {
                let p = USART0::ptr();
                (*p).ucsr0a.modify(|r, w| w.bits(clear_txc(r.bits())));
                (*p).udr0.write(|w| w.bits(word));
            }
            Ok(())
        }

        fn flush(&mut self) -> nb::Result<(), Self::Error> {
            let status = self.status();
            if status & UDRE0 != 0 && status & TXC0 != 0 {
                Ok(())
            } else {
                Err(nb::Error::WouldBlock)
            }
        }
    }

    impl crate::hal::Transmitter for Usart {
        fn configure(&mut self) {
            unsafe {
                let p = USART0::ptr();
                (*p).ubrr0.write(|w| w.bits(UBRR));
                (*p).ucsr0c.write(|w| w.bits(FRAME_8N1));
                (*p).ucsr0b.write(|w| w.bits(TXEN0));
            }
        }

        fn shutdown(&mut self) {
            unsafe {
                (*USART0::ptr()).ucsr0b.write(|w| w.bits(0));
            }
        }
    }
}
