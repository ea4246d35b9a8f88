pub mod diag_leds;
pub mod serial_reporter;

pub use diag_leds::{DiagLeds, Led};
pub use serial_reporter::Reporter;
