use super::FlacFile;
use super::block::{Block, BlockType};
use super::read::verify_flac;
use crate::config::WriteOptions;
use crate::error::{CoverError, Result};
use crate::id3::find_id3v2;
use crate::id3::v2::write::create_tag;
use crate::util::io::{FileLike, Length, Truncate, overwrite_all, read_all};
use crate::xiph::write::create_comments;

use std::io::Cursor;

/// Rewrite the metadata of a FLAC stream
///
/// Every metadata block other than `VORBIS_COMMENT`, `PICTURE`, and `PADDING` is kept as-is, in
/// its original order. The Xiph comment and picture blocks are then appended, followed by a fresh
/// `PADDING` block. The audio frames are never touched.
pub(crate) fn write_to<F>(file: &mut F, flac_file: &FlacFile, write_options: WriteOptions) -> Result<()>
where
	F: FileLike,
	CoverError: From<<F as Truncate>::Error>,
	CoverError: From<<F as Length>::Error>,
{
	let file_bytes = read_all(file)?;
	let mut cursor = Cursor::new(file_bytes);

	// We don't need the ID3v2 tag, but reading it will seek to the end of it if it exists
	find_id3v2(&mut cursor, false)?;
	let id3v2_end = cursor.position() as usize;

	let mut stream_info = verify_flac(&mut cursor)?;
	let mut is_last_block = stream_info.is_last;
	stream_info.is_last = false;

	let mut metadata_range = (stream_info.range.start as usize)..(stream_info.range.end as usize);
	let mut blocks = vec![stream_info];
	while !is_last_block {
		let mut block = Block::read(&mut cursor, |ty| !ty.is_rewritten())?;

		is_last_block = block.is_last;
		metadata_range.end = block.range.end as usize;

		if block.ty.is_rewritten() {
			log::trace!("FLAC: Dropping a {:?} block", block.ty);
			continue;
		}

		// The last block is decided once everything is collected
		block.is_last = false;
		blocks.push(block);
	}

	if let Some(xiph_comment) = &flac_file.xiph_comment {
		blocks.push(Block::new(
			BlockType::VorbisComment,
			create_comments(xiph_comment)?,
		));
	}

	for picture in &flac_file.pictures {
		blocks.push(Block::new(BlockType::Picture, picture.as_bytes()?));
	}

	if let Some(preferred_padding) = write_options.preferred_padding {
		log::trace!("Adding {preferred_padding} bytes of padding");
		blocks.push(Block::new(
			BlockType::Padding,
			vec![0; preferred_padding as usize],
		));
	}

	if let Some(last) = blocks.last_mut() {
		last.is_last = true;
	}

	let mut metadata = Vec::new();
	for block in &blocks {
		block.write_to(&mut metadata)?;
	}

	log::debug!(
		"Writing {} FLAC metadata blocks, {} bytes",
		blocks.len(),
		metadata.len()
	);

	let mut file_bytes = cursor.into_inner();

	// The metadata sits after the ID3v2 tag, so it has to be replaced first
	file_bytes.splice(metadata_range, metadata);

	if let Some(id3v2) = &flac_file.id3v2_tag {
		log::debug!("Rewriting the ID3v2 tag of a FLAC file");
		let tag_bytes = create_tag(id3v2, write_options)?;
		file_bytes.splice(..id3v2_end, tag_bytes);
	}

	overwrite_all(file, &file_bytes)
}
