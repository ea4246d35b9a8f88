//! Writes and checks the retention pattern: byte `i` holds `i mod 256`.
//!
//! Every access is volatile. The region is expected to change behind the
//! compiler's back (it survives, or fails to survive, a power-down), so
//! no read may be folded into a previous write.

use core::convert::Infallible;
use core::ptr;

/// Outcome of one verification pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// Every byte held its expected value.
    pub all_matched: bool,
    /// XOR of the bytes as read, not as expected.
    pub checksum: u8,
}

/// XOR over an intact pattern of `len` bytes.
pub const fn intact_checksum(len: usize) -> u8 {
    let mut checksum = 0u8;
    let mut value = 0u8;
    let mut i = 0;
    while i < len {
        checksum ^= value;
        value = value.wrapping_add(1);
        i += 1;
    }
    checksum
}

pub struct PatternEngine<'a, const N: usize> {
    cells: &'a mut [u8; N],
}

impl<'a, const N: usize> PatternEngine<'a, N> {
    pub fn new(cells: &'a mut [u8; N]) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn read(&self, index: usize) -> u8 {
        // SAFETY: the pointer comes from a live reference into the array
        unsafe { ptr::read_volatile(&self.cells[index]) }
    }

    /// Walk the region left to right, handing each byte and whether it
    /// matched to `visit`.
    ///
    /// The expected value is an 8-bit counter, so it wraps at 256 on its own.
    /// A `visit` error stops the walk and is returned as is.
    pub fn scan<E, F>(&self, mut visit: F) -> Result<Verdict, E>
    where
        F: FnMut(u8, bool) -> Result<(), E>,
    {
        let mut expected = 0u8;
        let mut verdict = Verdict {
            all_matched: true,
            checksum: 0,
        };

        for index in 0..N {
            let byte = self.read(index);
            let matched = byte == expected;

            verdict.all_matched &= matched;
            verdict.checksum ^= byte;
            visit(byte, matched)?;

            expected = expected.wrapping_add(1);
        }

        Ok(verdict)
    }

    pub fn verify(&self) -> Verdict {
        match self.scan::<Infallible, _>(|_, _| Ok(())) {
            Ok(verdict) => verdict,
            Err(never) => match never {},
        }
    }

    /// Rewrite the whole pattern, whatever state the region is in.
    pub fn rearm(&mut self) {
        let mut value = 0u8;
        for cell in self.cells.iter_mut() {
            // SAFETY: `cell` is a valid, exclusive reference
            unsafe { ptr::write_volatile(cell, value) };
            value = value.wrapping_add(1);
        }
    }
}
