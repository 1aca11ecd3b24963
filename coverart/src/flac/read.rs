use super::FlacFile;
use super::block::{Block, BlockType};
use super::picture::FlacPicture;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::id3::v2::read::parse_id3v2;
use crate::id3::{ID3FindResults, find_id3v2};
use crate::macros::decode_err;
use crate::xiph::read::read_comments;

use std::io::{Read, Seek};

// Sample rate, channels, total samples, and friends
const STREAMINFO_LEN: usize = 34;

/// Check for the stream marker, and read the `STREAMINFO` block that must follow it
pub(super) fn verify_flac<R>(data: &mut R) -> Result<Block>
where
	R: Read + Seek,
{
	let mut marker = [0; 4];
	data.read_exact(&mut marker)?;

	if &marker != b"fLaC" {
		decode_err!(@BAIL Flac, "File missing \"fLaC\" stream marker");
	}

	let stream_info = Block::read(data, |_| true)?;
	if stream_info.ty != BlockType::StreamInfo {
		decode_err!(@BAIL Flac, "File missing mandatory STREAMINFO block");
	}

	if stream_info.content.len() < STREAMINFO_LEN {
		decode_err!(@BAIL Flac, "STREAMINFO block is too small");
	}

	Ok(stream_info)
}

pub(super) fn read_from<R>(data: &mut R, parse_options: ParseOptions) -> Result<FlacFile>
where
	R: Read + Seek,
{
	let parse_mode = parse_options.parsing_mode;
	let mut flac_file = FlacFile::default();

	// Not allowed, but some taggers prepend one anyway
	if let ID3FindResults(Some(header), Some(content)) = find_id3v2(data, true)? {
		log::warn!("FLAC: Found an ID3v2 tag before the stream marker");
		flac_file.id3v2_tag = Some(parse_id3v2(&content, header, parse_mode)?);
	}

	let mut is_last = verify_flac(data)?.is_last;
	while !is_last {
		let block = Block::read(data, |ty| {
			matches!(ty, BlockType::VorbisComment | BlockType::Picture)
		})?;
		is_last = block.is_last;

		match block.ty {
			BlockType::VorbisComment if flac_file.xiph_comment.is_some() => {
				if parse_mode == ParsingMode::Strict {
					decode_err!(@BAIL Flac, "Streams are only allowed one VORBIS_COMMENT block");
				}

				log::warn!("FLAC: Ignoring an extra VORBIS_COMMENT block");
			},
			BlockType::VorbisComment => {
				flac_file.xiph_comment = Some(read_comments(&block.content, parse_mode)?);
			},
			BlockType::Picture => match FlacPicture::parse(&block.content, parse_mode) {
				Ok(picture) => flac_file.pictures.push(picture),
				Err(e) if parse_mode == ParsingMode::Strict => return Err(e),
				Err(e) => log::warn!("FLAC: Discarding a malformed PICTURE block: {e}"),
			},
			_ => {},
		}
	}

	log::debug!(
		"FLAC: Found {} picture blocks, Xiph comment: {}, ID3v2: {}",
		flac_file.pictures.len(),
		flac_file.xiph_comment.is_some(),
		flac_file.id3v2_tag.is_some()
	);

	Ok(flac_file)
}
