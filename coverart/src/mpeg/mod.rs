//! MPEG specific items
//!
//! ## File notes
//!
//! Only a leading ID3v2 tag is considered. ID3v1 and APE tags can't store pictures, and are
//! left untouched along with the audio frames.

pub(crate) mod header;
mod read;
mod write;

use crate::config::{ParseOptions, WriteOptions};
use crate::error::{CoverError, Result};
use crate::file::AudioFile;
use crate::id3::v2::Id3v2Tag;
use crate::util::io::{FileLike, Length, Truncate};

use std::io::{Read, Seek};

/// An MPEG file
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MpegFile {
	pub(crate) id3v2_tag: Option<Id3v2Tag>,
}

impl MpegFile {
	/// The file's ID3v2 tag, if any
	pub fn id3v2(&self) -> Option<&Id3v2Tag> {
		self.id3v2_tag.as_ref()
	}

	/// Mutable access to the ID3v2 tag, creating an empty ID3v2.4 tag if needed
	pub fn id3v2_mut_or_insert(&mut self) -> &mut Id3v2Tag {
		self.id3v2_tag.get_or_insert_with(|| {
			log::debug!("Creating a new ID3v2.4 tag");
			Id3v2Tag::new()
		})
	}
}

impl AudioFile for MpegFile {
	fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
		Self: Sized,
	{
		read::read_from(reader, parse_options)
	}

	fn save_to<F>(&self, file: &mut F, write_options: WriteOptions) -> Result<()>
	where
		F: FileLike,
		CoverError: From<<F as Truncate>::Error>,
		CoverError: From<<F as Length>::Error>,
	{
		write::write_to(file, self, write_options)
	}
}
