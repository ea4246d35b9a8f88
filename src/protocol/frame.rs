//! Receiving side of the report: frame validation and summary.

use ufmt::{uDisplay, uWrite, uwrite, Formatter};

use super::{checksum, FrameError, Result, END_MARKER, MARKER_REPEAT, START_MARKER};
use crate::pattern::Verdict;

const HEADER_SIZE: usize = MARKER_REPEAT;
const FOOTER_SIZE: usize = 1 + MARKER_REPEAT;

/// A validated frame borrowing its payload from the receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    payload: &'a [u8],
    checksum: u8,
}

/// Validate a complete frame: markers, checksum, and room for at least
/// one payload byte.
pub fn decode(data: &[u8]) -> Result<Frame<'_>> {
    if data.len() < HEADER_SIZE + 1 + FOOTER_SIZE {
        return Err(FrameError::InvalidLength);
    }

    if data[..HEADER_SIZE].iter().any(|&b| b != START_MARKER) {
        return Err(FrameError::MissingStartMarker);
    }
    if data[data.len() - MARKER_REPEAT..].iter().any(|&b| b != END_MARKER) {
        return Err(FrameError::MissingEndMarker);
    }

    let payload = &data[HEADER_SIZE..data.len() - FOOTER_SIZE];
    let received = data[data.len() - FOOTER_SIZE];
    let computed = checksum(payload);
    if computed != received {
        return Err(FrameError::InvalidChecksum { computed, received });
    }

    Ok(Frame {
        payload,
        checksum: received,
    })
}

impl<'a> Frame<'a> {
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Indices and values of bytes that differ from `index mod 256`.
    pub fn mismatches(&self) -> impl Iterator<Item = (usize, u8)> + 'a {
        self.payload
            .iter()
            .enumerate()
            .filter(|&(i, &b)| b != i as u8)
            .map(|(i, &b)| (i, b))
    }

    pub fn mismatch_count(&self) -> usize {
        self.mismatches().count()
    }

    pub fn first_mismatch(&self) -> Option<usize> {
        self.mismatches().next().map(|(i, _)| i)
    }

    /// The verdict the sender reached for this frame.
    pub fn verdict(&self) -> Verdict {
        Verdict {
            all_matched: self.first_mismatch().is_none(),
            checksum: self.checksum,
        }
    }
}

fn write_hex<W>(f: &mut Formatter<'_, W>, val: u8) -> core::result::Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    const HEX_CHARS: [u8; 16] = *b"0123456789abcdef";
    f.write_str("0x")?;
    f.write_char(HEX_CHARS[(val >> 4) as usize] as char)?;
    f.write_char(HEX_CHARS[(val & 0xF) as usize] as char)
}

impl uDisplay for Frame<'_> {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> core::result::Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uwrite!(f, "frame: {} bytes, ", self.payload.len())?;
        match self.first_mismatch() {
            None => f.write_str("intact")?,
            Some(first) => uwrite!(
                f,
                "{} mismatches (first at {})",
                self.mismatch_count(),
                first
            )?,
        }
        f.write_str(", checksum ")?;
        write_hex(f, self.checksum)
    }
}
