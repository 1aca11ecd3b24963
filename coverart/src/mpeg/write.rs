use super::MpegFile;
use crate::config::WriteOptions;
use crate::error::{CoverError, Result};
use crate::id3::leading_id3v2_len;
use crate::id3::v2::write::create_tag;
use crate::util::io::{FileLike, Length, Truncate, overwrite_all, read_all};

pub(super) fn write_to<F>(file: &mut F, mpeg_file: &MpegFile, write_options: WriteOptions) -> Result<()>
where
	F: FileLike,
	CoverError: From<<F as Truncate>::Error>,
	CoverError: From<<F as Length>::Error>,
{
	let Some(id3v2) = &mpeg_file.id3v2_tag else {
		log::debug!("MPEG: No ID3v2 tag to write");
		return Ok(());
	};

	let mut file_bytes = read_all(file)?;
	let existing_len = leading_id3v2_len(&file_bytes) as usize;

	let tag_bytes = create_tag(id3v2, write_options)?;
	log::debug!(
		"MPEG: Replacing {existing_len} byte ID3v2 tag with {} bytes",
		tag_bytes.len()
	);

	file_bytes.splice(..existing_len, tag_bytes);
	overwrite_all(file, &file_bytes)
}
