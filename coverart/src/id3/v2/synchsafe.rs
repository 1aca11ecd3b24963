//! Utilities for working with unsynchronized ID3v2 content

use crate::error::Result;
use crate::macros::err;

/// Reverses the unsynchronisation scheme
///
/// Every `0x00` directly following a `0xFF` was inserted by the encoder, and is dropped.
pub(crate) fn resynchronise(content: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(content.len());

	let mut previous_was_ff = false;
	for byte in content.iter().copied() {
		if previous_was_ff && byte == 0 {
			previous_was_ff = false;
			continue;
		}

		previous_was_ff = byte == 0xFF;
		out.push(byte);
	}

	out
}

/// Conversions between plain and synchsafe integers
///
/// Synchsafe integers only use the lower 7 bits of each byte, so they can never form a false
/// MPEG frame sync.
pub(crate) trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// The integer doesn't fit into 28 bits
	fn synch(self) -> Result<Self>;

	/// Convert a synchsafe integer back to a plain one
	fn unsynch(self) -> Self;
}

impl SynchsafeInteger for u32 {
	fn synch(self) -> Result<Self> {
		if self > 0x0FFF_FFFF {
			err!(TooMuchData);
		}

		Ok((self & 0x7F)
			| ((self & (0x7F << 7)) << 1)
			| ((self & (0x7F << 14)) << 2)
			| ((self & (0x7F << 21)) << 3))
	}

	fn unsynch(self) -> Self {
		((self & 0x7F00_0000) >> 3)
			| ((self & 0x7F_0000) >> 2)
			| ((self & 0x7F00) >> 1)
			| (self & 0x7F)
	}
}
