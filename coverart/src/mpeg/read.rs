use super::MpegFile;
use super::header::search_for_frame_sync;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::read::parse_id3v2;
use crate::id3::{ID3FindResults, find_id3v2};
use crate::macros::decode_err;

use std::io::{Read, Seek};

pub(super) fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<MpegFile>
where
	R: Read + Seek,
{
	let mut file = MpegFile::default();

	if let ID3FindResults(Some(header), Some(content)) = find_id3v2(reader, true)? {
		file.id3v2_tag = Some(parse_id3v2(
			&content,
			header,
			parse_options.parsing_mode,
		)?);
	}

	// Tags might be followed by junk bytes before the first MPEG frame begins
	let search_window = parse_options.max_junk_bytes as u64 + 2;
	let Some(offset) = search_for_frame_sync(&mut reader.take(search_window))? else {
		decode_err!(@BAIL Mpeg, "File contains an invalid frame");
	};

	log::debug!("MPEG: First frame found after {offset} bytes of junk");

	Ok(file)
}
