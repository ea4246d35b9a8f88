//! Report wire format, one frame per wake cycle:
//!
//! ```text
//! EE EE | b0 b1 .. bN-1 | checksum | 55 55
//! ```
//!
//! Payload bytes are the pattern region as read, in index order. The
//! checksum is the XOR of the payload. There is no length field, no
//! acknowledgement and no retransmission.

pub mod frame;

pub use frame::{decode, Frame};

use crate::config::PATTERN_LEN;

pub const START_MARKER: u8 = 0xEE;
pub const END_MARKER: u8 = 0x55;

/// Each marker is sent this many times in a row
pub const MARKER_REPEAT: usize = 2;

pub const fn frame_len(payload_len: usize) -> usize {
    2 * MARKER_REPEAT + payload_len + 1
}

/// Length of a full frame for the configured pattern
pub const FRAME_LEN: usize = frame_len(PATTERN_LEN);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    InvalidLength,
    MissingStartMarker,
    MissingEndMarker,
    InvalidChecksum { computed: u8, received: u8 },
}

pub type Result<T> = core::result::Result<T, FrameError>;

/// XOR of all bytes.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, &b| acc ^ b)
}
