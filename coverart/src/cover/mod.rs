//! Format-agnostic cover picture reading and writing
//!
//! This is the main entry point of coverart. A file is opened once, classified into a
//! [`ContainerFamily`], and from then on its cover can be read and written without caring about
//! where it is actually stored.
//!
//! # Reading
//!
//! Reading never fails once a file is open. Every outcome, including the lack of a cover, is
//! described by a [`ReadStatus`]:
//!
//! ```rust,no_run
//! use coverart::cover::{CoverFile, ReadStatus};
//!
//! # fn main() -> coverart::error::Result<()> {
//! let file = CoverFile::open("song.flac")?;
//!
//! let lookup = file.read_cover();
//! match lookup.status() {
//! 	ReadStatus::Found => println!("Found a {} cover", lookup.picture().unwrap().mime_type()),
//! 	status => println!("No cover: {status:?}"),
//! }
//! # Ok(()) }
//! ```
//!
//! # Writing
//!
//! ```rust,no_run
//! use coverart::cover::CoverFile;
//! use coverart::picture::Picture;
//!
//! # fn main() -> coverart::error::Result<()> {
//! let mut file = CoverFile::open("song.mp3")?;
//!
//! let data = std::fs::read("cover.png")?;
//! file.write_cover(Picture::new(data, "image/png"))?;
//! # Ok(()) }
//! ```
//!
//! If the file can't be written, the in-memory state is rolled back, so [`CoverFile::read_cover`]
//! keeps returning the previous cover.

mod codec;
mod resolve;
mod select;
mod write;

use crate::config::{ParseOptions, WriteOptions};
use crate::error::{CoverError, Result};
use crate::file::{ContainerFamily, TaggedMedia};
use crate::picture::Picture;
use crate::probe::read_from_path_with_options;
use crate::util::io::{FileLike, Length, Truncate};
use resolve::PictureContainer;
use select::select;

use std::path::{Path, PathBuf};

/// The container a picture list was read from
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PictureSource {
	/// `APIC` (or `PIC`) frames of an ID3v2 tag
	Id3v2,
	/// FLAC `PICTURE` metadata blocks
	FlacPictureBlock,
	/// `METADATA_BLOCK_PICTURE` fields of a Xiph comment
	XiphComment,
	/// The MP4 `covr` item
	Mp4CoverArt,
	/// ASF `WM/Picture` attributes
	AsfAttribute,
}

/// The outcome of a cover lookup
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ReadStatus {
	/// A cover was found
	Found,
	/// The file can't hold cover art
	UnsupportedFile,
	/// The file has no tag that could hold a cover
	///
	/// This is only used for MPEG files without an ID3v2 tag.
	TagAbsent,
	/// The file has no container that could hold a picture list
	///
	/// This is only used for FLAC files with no picture blocks, ID3v2 tag, or Xiph comment.
	PictureListAbsent(ContainerFamily),
	/// A picture container was found, but it holds no pictures
	PictureListEmpty(PictureSource),
}

/// The result of [`TaggedMedia::read_cover`]
///
/// A picture is present exactly when the status is [`ReadStatus::Found`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CoverLookup {
	status: ReadStatus,
	picture: Option<Picture>,
}

impl CoverLookup {
	fn found(picture: Picture) -> Self {
		Self {
			status: ReadStatus::Found,
			picture: Some(picture),
		}
	}

	fn missing(status: ReadStatus) -> Self {
		Self {
			status,
			picture: None,
		}
	}

	/// The outcome of the lookup
	pub fn status(&self) -> ReadStatus {
		self.status
	}

	/// The cover, if one was found
	pub fn picture(&self) -> Option<&Picture> {
		self.picture.as_ref()
	}

	/// Consumes the lookup, returning the cover
	pub fn into_picture(self) -> Option<Picture> {
		self.picture
	}
}

impl TaggedMedia {
	/// Read the cover picture
	///
	/// If a container holds multiple pictures, the last front cover is used. If there is no front
	/// cover, the first picture is used instead.
	///
	/// The returned picture is a copy, it doesn't borrow from `self`.
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::cover::ReadStatus;
	/// use coverart::file::TaggedMedia;
	///
	/// let media = TaggedMedia::Unsupported(None);
	/// assert_eq!(media.read_cover().status(), ReadStatus::UnsupportedFile);
	/// ```
	pub fn read_cover(&self) -> CoverLookup {
		let container = match resolve::for_read(self) {
			Ok(container) => container,
			Err(status) => {
				log::debug!("No picture container: {status:?}");
				return CoverLookup::missing(status);
			},
		};

		let source = container.source();
		let picture = match container {
			PictureContainer::Id3v2(tag) => select(tag.pictures()).map(codec::from_id3v2),
			PictureContainer::FlacBlocks(blocks) => select(blocks).map(codec::from_flac_block),
			PictureContainer::Xiph(comment) => select(comment.pictures()).map(codec::from_xiph),
			PictureContainer::Mp4(covers) => select(covers).map(codec::from_mp4),
			PictureContainer::Asf(tag) => select(tag.pictures()).map(codec::from_asf),
		};

		match picture {
			Some(picture) => CoverLookup::found(picture),
			None => CoverLookup::missing(ReadStatus::PictureListEmpty(source)),
		}
	}

	/// Attach a cover picture, without writing anything
	///
	/// The picture is always written as a front cover. Where it goes depends on the family:
	///
	/// * MPEG: A new `APIC` frame in the ID3v2 tag, which is created if needed
	/// * FLAC: See [`WriteOptions::use_flac_picture_blocks`]
	/// * MP4: The `covr` item is replaced
	/// * ASF: A new `WM/Picture` attribute
	///
	/// Use [`TaggedMedia::save_to`] or [`TaggedMedia::write_cover_to`] to persist it.
	///
	/// # Errors
	///
	/// * The file is [`TaggedMedia::Unsupported`]
	/// * The tag is ID3v2.2, and the MIME type can't be converted to an image format
	pub fn attach_cover(&mut self, picture: Picture, write_options: WriteOptions) -> Result<()> {
		let snapshot = self.clone();

		write::attach(self, picture, write_options).inspect_err(|_| *self = snapshot)
	}

	/// Attach a cover picture, and write the file
	///
	/// `file` is expected to hold the stream `self` was read from. If anything fails, `self` is
	/// left as it was before the call.
	///
	/// # Errors
	///
	/// * See [`TaggedMedia::attach_cover`]
	/// * See [`TaggedMedia::save_to`]
	pub fn write_cover_to<F>(
		&mut self,
		file: &mut F,
		picture: Picture,
		write_options: WriteOptions,
	) -> Result<()>
	where
		F: FileLike,
		CoverError: From<<F as Truncate>::Error>,
		CoverError: From<<F as Length>::Error>,
	{
		write::attach_and_persist(self, picture, write_options, |media| {
			media.save_to(file, write_options)
		})
	}
}

/// An opened media file
///
/// The file is read once, when opened. The path is kept, and re-opened for writing by
/// [`CoverFile::write_cover`]. No file handle is held in between.
#[derive(Debug, Clone)]
pub struct CoverFile {
	path: PathBuf,
	media: TaggedMedia,
	write_options: WriteOptions,
}

impl CoverFile {
	/// Open a file with the default options
	///
	/// # Errors
	///
	/// See [`CoverFile::open_with`]
	pub fn open<P>(path: P) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		Self::open_with(path, ParseOptions::new(), WriteOptions::new())
	}

	/// Open a file
	///
	/// The file type is guessed from the extension first, then from the content. A file of an
	/// unknown or unsupported type still opens, with the family [`ContainerFamily::Unsupported`].
	///
	/// # Errors
	///
	/// * `path` can't be opened
	/// * The file fails to parse. See [`CoverError`]
	pub fn open_with<P>(path: P, parse_options: ParseOptions, write_options: WriteOptions) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();
		let media = read_from_path_with_options(path, parse_options)?;

		log::debug!("Opened {}, family: {:?}", path.display(), media.family());

		Ok(Self {
			path: path.to_path_buf(),
			media,
			write_options,
		})
	}

	/// The container family of the file
	pub fn family(&self) -> ContainerFamily {
		self.media.family()
	}

	/// The parsed file
	pub fn media(&self) -> &TaggedMedia {
		&self.media
	}

	/// The path the file was opened from
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Read the cover picture
	///
	/// See [`TaggedMedia::read_cover`]
	pub fn read_cover(&self) -> CoverLookup {
		self.media.read_cover()
	}

	/// Attach a cover picture, and write it to the file
	///
	/// See [`TaggedMedia::attach_cover`] for where the picture ends up. If the file can't be
	/// written, the picture is discarded, and [`CoverFile::read_cover`] keeps returning the
	/// previous cover.
	///
	/// # Errors
	///
	/// * See [`TaggedMedia::attach_cover`]
	/// * The file can no longer be opened for writing
	/// * See [`TaggedMedia::save_to`]
	pub fn write_cover(&mut self, picture: Picture) -> Result<()> {
		let Self {
			path,
			media,
			write_options,
		} = self;

		write::attach_and_persist(media, picture, *write_options, |media| {
			media.save_to_path(&*path, *write_options)
		})
	}
}
