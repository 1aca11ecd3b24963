//! ID3 specific items
//!
//! Only ID3v2 is supported, as ID3v1 has no way to store pictures.

pub mod v2;

use crate::error::Result;
use crate::macros::try_vec;
use v2::header::Id3v2Header;

use std::io::{Read, Seek, SeekFrom};

pub(crate) struct ID3FindResults<Header, Content>(pub Option<Header>, pub Content);

/// Looks for an ID3v2 tag at the reader's current position
///
/// On success, the reader is left at the end of the tag (including its footer). Otherwise, it is
/// restored to where it started.
pub(crate) fn find_id3v2<R>(
	data: &mut R,
	read: bool,
) -> Result<ID3FindResults<Id3v2Header, Option<Vec<u8>>>>
where
	R: Read + Seek,
{
	let start = data.stream_position()?;
	log::debug!("Searching for an ID3v2 tag at offset: {start}");

	let mut header = None;
	let mut id3v2 = None;

	if let Ok(id3v2_header) = Id3v2Header::parse(data) {
		log::debug!("Found an ID3v2 tag, parsing");

		let body_start = data.stream_position()?;
		if read {
			let mut tag = try_vec![0; id3v2_header.size as usize];
			data.read_exact(&mut tag)?;

			id3v2 = Some(tag)
		}

		data.seek(SeekFrom::Start(
			body_start + u64::from(id3v2_header.size) + id3v2_header.footer_size(),
		))?;

		header = Some(id3v2_header);
	} else {
		data.seek(SeekFrom::Start(start))?;
	}

	Ok(ID3FindResults(header, id3v2))
}

/// The length of an ID3v2 tag at the start of `bytes`, or 0 if there isn't one
pub(crate) fn leading_id3v2_len(bytes: &[u8]) -> u64 {
	match Id3v2Header::parse(&mut &bytes[..]) {
		Ok(header) => u64::from(header.full_tag_size()).min(bytes.len() as u64),
		Err(_) => 0,
	}
}
