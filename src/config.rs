//! Configuration constants for the SRAM retention firmware

use crate::hal::WatchdogTimeout;

/// CPU frequency in Hz (internal RC, no prescaler)
pub const CPU_FREQ_HZ: u32 = 8_000_000;

/// UART baud rate
pub const UART_BAUD: u32 = 9600;

/// USART baud divisor for normal-speed asynchronous mode
pub const UBRR: u16 = (CPU_FREQ_HZ / (16 * UART_BAUD) - 1) as u16;

/// Size of the retained pattern region in bytes
pub const PATTERN_LEN: usize = 256;

/// Gap after every transmitted byte. The receiver is a software-timed
/// serial port and drops bytes sent back to back.
pub const INTER_BYTE_DELAY_MS: u16 = 10;

/// Quiet time after the end markers before the device goes to sleep
pub const SHUTDOWN_SETTLE_MS: u16 = 500;

/// How long the final verdict stays lit
pub const VERDICT_HOLD_MS: u16 = 250;

/// Timeout armed on a cold boot, only used to get into the wake cycle quickly
pub const FIRST_WATCHDOG_TIMEOUT: WatchdogTimeout = WatchdogTimeout::Ms16;

/// Timeout re-armed on every watchdog wake; bounds the wake hook's runtime
pub const STEADY_WATCHDOG_TIMEOUT: WatchdogTimeout = WatchdogTimeout::Ms125;

/// Timeout while a self-test cycle runs after a watchdog wake. One cycle
/// takes about 3.7 s (a frame at 9600 baud plus gaps, settle and hold).
pub const SELF_TEST_WATCHDOG_TIMEOUT: WatchdogTimeout = WatchdogTimeout::Ms8000;
