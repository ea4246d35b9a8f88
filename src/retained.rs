//! The memory region under test.
//!
//! This is the only place a `link_section` attribute is used. The arena
//! sits in `.noinit`, which the AVR start-up code neither copies nor
//! clears, so whatever survived the last power-down is still there when
//! the next reset runs.

use core::mem::MaybeUninit;
use core::ptr::addr_of_mut;

use crate::config::PATTERN_LEN;

#[link_section = ".noinit"]
static mut PATTERN: MaybeUninit<[u8; PATTERN_LEN]> = MaybeUninit::uninit();

/// Hand out the retained pattern arena.
///
/// # Safety
///
/// Must be called at most once per reset, and the reference must not be
/// shared with anything besides the pattern engine. After a cold power-up
/// the contents are arbitrary, which for plain bytes only means the first
/// verification reports mismatches.
pub unsafe fn pattern_arena() -> &'static mut [u8; PATTERN_LEN] {
    &mut *addr_of_mut!(PATTERN).cast::<[u8; PATTERN_LEN]>()
}
