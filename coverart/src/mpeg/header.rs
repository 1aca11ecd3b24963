use std::io::Read;

/// Whether two bytes start an MPEG frame header (11 set bits)
pub(crate) fn verify_frame_sync(frame_sync: [u8; 2]) -> bool {
	frame_sync[0] == 0xFF && frame_sync[1] >> 5 == 0b111
}

/// Searches for a frame sync (11 set bits) in the reader.
/// The search starts at the beginning of the reader and returns the index relative to this beginning.
/// This will return the first match, if one is found.
///
/// Note that the search searches in 8 bit steps, i.e. the first 8 bits need to be byte aligned.
pub(crate) fn search_for_frame_sync<R>(input: &mut R) -> std::io::Result<Option<u64>>
where
	R: Read,
{
	let mut iterator = input.bytes();
	let mut buffer = [0u8; 2];

	if let Some(byte) = iterator.next() {
		buffer[0] = byte?;
	}

	// Overlapping pairs, [0x01, 0x02, 0x03] is checked as [0x01, 0x02], [0x02, 0x03]
	for (index, byte) in iterator.enumerate() {
		buffer[1] = byte?;
		if verify_frame_sync(buffer) {
			return Ok(Some(index as u64));
		}

		buffer[0] = buffer[1];
	}

	Ok(None)
}
