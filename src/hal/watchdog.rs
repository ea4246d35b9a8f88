/// Watchdog timeout periods, encoded as the WDP3:0 prescaler select.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum WatchdogTimeout {
    Ms16 = 0,
    Ms32 = 1,
    Ms64 = 2,
    Ms125 = 3,
    Ms250 = 4,
    Ms500 = 5,
    Ms1000 = 6,
    Ms2000 = 7,
    Ms4000 = 8,
    Ms8000 = 9,
}

impl WatchdogTimeout {
    /// WDTCSR prescaler bits. WDP3 sits apart from WDP2:0 at bit 5.
    #[inline]
    pub const fn prescaler_bits(self) -> u8 {
        let v = self as u8;
        ((v & 0x08) << 2) | (v & 0x07)
    }

    /// Nominal period at Vcc = 5 V.
    pub const fn millis(self) -> u16 {
        match self {
            WatchdogTimeout::Ms16 => 16,
            WatchdogTimeout::Ms32 => 32,
            WatchdogTimeout::Ms64 => 64,
            WatchdogTimeout::Ms125 => 125,
            WatchdogTimeout::Ms250 => 250,
            WatchdogTimeout::Ms500 => 500,
            WatchdogTimeout::Ms1000 => 1000,
            WatchdogTimeout::Ms2000 => 2000,
            WatchdogTimeout::Ms4000 => 4000,
            WatchdogTimeout::Ms8000 => 8000,
        }
    }
}

#[cfg(target_arch = "avr")]
pub use self::avr::Watchdog;

#[cfg(target_arch = "avr")]
mod avr {
    use super::WatchdogTimeout;
    use avr_device::atmega328p::{CPU, WDT};

    const WDCE: u8 = 1 << 4;
    const WDE: u8 = 1 << 3;
    const WDRF: u8 = 1 << 3;

    pub struct Watchdog {
        _private: (),
    }

    impl Watchdog {
        #[inline]
        pub fn new() -> Self {
            Self { _private: () }
        }
    }

    impl Default for Watchdog {
        fn default() -> Self {
            Self::new()
        }
    }

    impl crate::hal::Watchdog for Watchdog {
        #[inline]
        fn set_timeout(&mut self, timeout: WatchdogTimeout) {
            // Timed sequence: the second write must land within four cycles
            // of the first, so no interrupt may sneak in between.
            avr_device::interrupt::free(|_| unsafe {
                let p = WDT::ptr();
                avr_device::asm::wdr();
                (*p).wdtcsr.write(|w| w.bits(WDCE | WDE));
                (*p).wdtcsr.write(|w| w.bits(WDE | timeout.prescaler_bits()));
            });
        }

        #[inline]
        fn feed(&mut self) {
            avr_device::asm::wdr();
        }
    }

    impl crate::hal::ResetFlags for Watchdog {
        #[inline]
        fn was_last_reset_watchdog(&self) -> bool {
            unsafe { (*CPU::ptr()).mcusr.read().bits() & WDRF != 0 }
        }

        #[inline]
        fn clear_reset_cause(&mut self) {
            unsafe {
                (*CPU::ptr()).mcusr.write(|w| w.bits(0));
            }
        }
    }
}
