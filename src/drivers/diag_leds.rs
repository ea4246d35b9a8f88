//! Two-LED side channel: green for "ok", red for "fail".

use embedded_hal::digital::v2::OutputPin;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Led {
    Ok,
    Fail,
}

impl Led {
    /// The LED that stands for a match (or mismatch).
    #[inline]
    pub fn for_match(matched: bool) -> Self {
        if matched {
            Led::Ok
        } else {
            Led::Fail
        }
    }
}

/// The two LEDs are never lit together: switching one on switches the
/// other off first.
pub struct DiagLeds<OK, FAIL> {
    ok: OK,
    fail: FAIL,
}

impl<OK, FAIL, E> DiagLeds<OK, FAIL>
where
    OK: OutputPin<Error = E>,
    FAIL: OutputPin<Error = E>,
{
    pub fn new(ok: OK, fail: FAIL) -> Self {
        Self { ok, fail }
    }

    pub fn set(&mut self, which: Led, on: bool) -> Result<(), E> {
        match (which, on) {
            (Led::Ok, true) => {
                self.fail.set_low()?;
                self.ok.set_high()
            }
            (Led::Fail, true) => {
                self.ok.set_low()?;
                self.fail.set_high()
            }
            (Led::Ok, false) => self.ok.set_low(),
            (Led::Fail, false) => self.fail.set_low(),
        }
    }

    /// Light the LED matching `matched`.
    #[inline]
    pub fn show(&mut self, matched: bool) -> Result<(), E> {
        self.set(Led::for_match(matched), true)
    }

    pub fn clear(&mut self) -> Result<(), E> {
        self.ok.set_low()?;
        self.fail.set_low()
    }

    pub fn release(self) -> (OK, FAIL) {
        (self.ok, self.fail)
    }
}
