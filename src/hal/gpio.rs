use avr_device::atmega328p::{PORTB, PORTD};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::OutputPin;

/// A single push-pull output.
///
/// All I/O registers come back at their reset values after every reset,
/// so a pin has to be made an output again on each wake.
pub struct Pin<PORT, const P: u8> {
    _port: PhantomData<PORT>,
}

macro_rules! impl_port {
    ($PORT:ident, $port:ident, $ddr:ident) => {
        impl<const P: u8> Pin<$PORT, P> {
            /// Drive low and switch to output.
            pub fn new_output() -> Self {
                unsafe {
                    let p = $PORT::ptr();
                    (*p).$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    (*p).$ddr.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Pin { _port: PhantomData }
            }
        }

        impl<const P: u8> OutputPin for Pin<$PORT, P> {
            type Error = Infallible;

            #[inline]
            fn set_high(&mut self) -> Result<(), Self::Error> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Ok(())
            }

            #[inline]
            fn set_low(&mut self) -> Result<(), Self::Error> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                }
                Ok(())
            }
        }
    };
}

impl_port!(PORTB, portb, ddrb);
impl_port!(PORTD, portd, ddrd);

pub mod board {
    use super::*;

    // Diagnostic LEDs on the freed crystal pins (internal RC clock)
    pub type LedOk = Pin<PORTB, 7>;
    pub type LedFail = Pin<PORTB, 6>;

    // Output pulsed by the demo wake hook
    pub type WakePin = Pin<PORTD, 0>;
}
