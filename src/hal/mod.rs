//! Hardware capabilities used by the boot path and the self-test.
//!
//! The traits are the whole interface between the portable core and the
//! chip. The ATmega328P implementations below them only build for AVR.

pub mod uart;
pub mod watchdog;

#[cfg(target_arch = "avr")]
pub mod gpio;
#[cfg(target_arch = "avr")]
pub mod power;
#[cfg(target_arch = "avr")]
pub mod timer;

pub use watchdog::WatchdogTimeout;

#[cfg(target_arch = "avr")]
pub use gpio::board;
#[cfg(target_arch = "avr")]
pub use power::Power;
#[cfg(target_arch = "avr")]
pub use timer::Delay;
#[cfg(target_arch = "avr")]
pub use uart::Usart;
#[cfg(target_arch = "avr")]
pub use watchdog::Watchdog as HwWatchdog;

/// Lowest-power sleep entry.
pub trait DeepSleep {
    /// Select power-down, enable sleep and halt.
    ///
    /// Execution only resumes through a full reset, which starts over at the
    /// reset vector, so this never returns.
    fn enter_deepest_sleep(&mut self) -> !;
}

/// Watchdog timer control.
pub trait Watchdog {
    /// Program a new timeout. The watchdog stays enabled in system reset mode.
    fn set_timeout(&mut self, timeout: WatchdogTimeout);

    /// Restart the current timeout period (`wdr`).
    fn feed(&mut self);
}

/// The reset status flags (MCUSR on AVR).
pub trait ResetFlags {
    fn was_last_reset_watchdog(&self) -> bool;

    /// Clear the reset cause so the next reset is classified on its own.
    fn clear_reset_cause(&mut self);
}

/// Transmit-only serial port.
///
/// Byte transfer comes from [`embedded_hal::serial::Write`]: `write` loads
/// the next byte once the data register is free, `flush` waits until the
/// last frame has fully left the shift register.
pub trait Transmitter: embedded_hal::serial::Write<u8> {
    /// Program the baud divisor, select 8N1 and enable the transmitter.
    fn configure(&mut self);

    /// Disable the transmitter.
    fn shutdown(&mut self);
}
