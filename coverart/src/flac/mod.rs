//! Items for FLAC
//!
//! ## File notes
//!
//! * See [`FlacFile`]

pub(crate) mod block;
mod picture;
mod read;
pub(crate) mod write;

use crate::config::{ParseOptions, WriteOptions};
use crate::error::{CoverError, Result};
use crate::file::AudioFile;
use crate::id3::v2::Id3v2Tag;
use crate::util::io::{FileLike, Length, Truncate};
use crate::xiph::XiphComment;

use std::io::{Read, Seek};

// Exports
pub use picture::FlacPicture;

/// A FLAC file
///
/// A FLAC file can hold pictures in three places:
///
/// * Dedicated `PICTURE` metadata blocks, stored in the `FlacFile` itself
/// * An ID3v2 tag prepended to the stream. This is discouraged, but common in the wild.
/// * The Xiph comment in the `VORBIS_COMMENT` block
///
/// All three are kept separate, and written back to where they came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlacFile {
	pub(crate) id3v2_tag: Option<Id3v2Tag>,
	pub(crate) xiph_comment: Option<XiphComment>,
	pub(crate) pictures: Vec<FlacPicture>,
}

impl FlacFile {
	/// The pictures stored in `PICTURE` blocks, in block order
	pub fn pictures(&self) -> &[FlacPicture] {
		&self.pictures
	}

	/// Mutable access to the `PICTURE` blocks
	pub fn pictures_mut(&mut self) -> &mut Vec<FlacPicture> {
		&mut self.pictures
	}

	/// The ID3v2 tag prepended to the stream, if any
	pub fn id3v2(&self) -> Option<&Id3v2Tag> {
		self.id3v2_tag.as_ref()
	}

	/// Mutable access to the ID3v2 tag, if any
	///
	/// An ID3v2 tag is never created for a FLAC file.
	pub fn id3v2_mut(&mut self) -> Option<&mut Id3v2Tag> {
		self.id3v2_tag.as_mut()
	}

	/// The Xiph comment, if any
	pub fn xiph_comment(&self) -> Option<&XiphComment> {
		self.xiph_comment.as_ref()
	}

	/// Mutable access to the Xiph comment, creating an empty one if needed
	pub fn xiph_comment_mut_or_insert(&mut self) -> &mut XiphComment {
		self.xiph_comment.get_or_insert_with(|| {
			log::debug!("Creating a new Xiph comment");
			XiphComment::default()
		})
	}
}

impl AudioFile for FlacFile {
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
