use super::Mp4File;
use super::atom_info::{AtomInfo, find_child_atom, meta_is_full, skip_atom};
use super::ilst::Ilst;
use super::ilst::read::parse_ilst;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::{CoverError, ErrorKind, Result};
use crate::macros::{decode_err, try_vec};
use crate::util::io::stream_len;

use std::io::{Read, Seek, SeekFrom};

fn verify_mp4<R>(reader: &mut R, file_length: u64, parse_mode: ParsingMode) -> Result<String>
where
	R: Read + Seek,
{
	let Some(atom) = AtomInfo::read(reader, file_length, parse_mode)? else {
		decode_err!(@BAIL Mp4, "File missing \"ftyp\" atom");
	};

	if atom.ident != *b"ftyp" {
		decode_err!(@BAIL Mp4, "File missing \"ftyp\" atom");
	}

	// size + identifier + major brand
	// There *should* be more, but this is all we need from it
	if atom.len < 12 {
		decode_err!(@BAIL Mp4, "\"ftyp\" atom too short");
	}

	let mut major_brand = [0u8; 4];
	reader.read_exact(&mut major_brand)?;

	skip_atom(reader, &atom)?;

	let major_brand = std::str::from_utf8(&major_brand)
		.map(ToOwned::to_owned)
		.map_err(|_| {
			CoverError::new(ErrorKind::BadAtom("Unable to parse \"ftyp\"'s major brand"))
		})?;

	log::debug!("Verified to be an MP4 file. Major brand: {}", major_brand);
	Ok(major_brand)
}

pub(super) fn read_from<R>(data: &mut R, parse_options: ParseOptions) -> Result<Mp4File>
where
	R: Read + Seek,
{
	let parse_mode = parse_options.parsing_mode;

	let start = data.stream_position()?;
	let file_length = stream_len(data)? - start;

	let ftyp = verify_mp4(data, file_length, parse_mode)?;

	let remaining = file_length - (data.stream_position()? - start);
	let Some(moov) = find_child_atom(data, remaining, *b"moov", parse_mode)? else {
		decode_err!(@BAIL Mp4, "No \"moov\" atom found");
	};

	let ilst = ilst_from_moov(data, &moov, parse_mode)?;
	if ilst.is_none() {
		log::debug!("MP4: No `ilst` atom found");
	}

	Ok(Mp4File { ftyp, ilst })
}

fn ilst_from_moov<R>(data: &mut R, moov: &AtomInfo, parse_mode: ParsingMode) -> Result<Option<Ilst>>
where
	R: Read + Seek,
{
	let moov_content_len = moov.content_len();
	let Some(udta) = find_child_atom(data, moov_content_len, *b"udta", parse_mode)? else {
		return Ok(None);
	};

	let udta_content_len = udta.content_len();
	let Some(meta) = find_child_atom(data, udta_content_len, *b"meta", parse_mode)? else {
		return Ok(None);
	};

	// It's possible for the `meta` atom to be non-full,
	// so we have to check for that case
	let mut meta_content_len = meta.content_len();
	if meta_content_len < 8 {
		return Ok(None);
	}

	if meta_is_full(data)? {
		data.seek(SeekFrom::Current(4))?;
		meta_content_len = meta_content_len.saturating_sub(4);
	}

	let Some(ilst) = find_child_atom(data, meta_content_len, *b"ilst", parse_mode)? else {
		return Ok(None);
	};

	let mut content = try_vec![0; ilst.content_len() as usize];
	data.read_exact(&mut content)?;

	parse_ilst(&content, parse_mode).map(Some)
}
