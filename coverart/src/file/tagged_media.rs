use super::{AudioFile, FileType};
use crate::asf::AsfFile;
use crate::config::WriteOptions;
use crate::error::{CoverError, Result};
use crate::flac::FlacFile;
use crate::macros::err;
use crate::mp4::Mp4File;
use crate::mpeg::MpegFile;
use crate::util::io::{FileLike, Length, Truncate};

use std::fs::OpenOptions;
use std::path::Path;

/// The tag container family that governs a file's cover art
///
/// This is decided once, when the file is read, and never changes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ContainerFamily {
	/// MPEG audio, with its cover in an ID3v2 tag
	MpegWithId3v2,
	/// FLAC, with its cover in a picture block, an ID3v2 tag, or a Xiph comment
	Flac,
	/// MP4, with its cover in the `covr` item
	Mp4,
	/// ASF, with its cover in a `WM/Picture` attribute
	Asf,
	/// Anything else
	Unsupported,
}

/// A file of any supported type
///
/// This is what [`Probe::read`](crate::probe::Probe::read) produces. Files that coverart can't
/// store cover art in are still representable, as [`TaggedMedia::Unsupported`].
///
/// # Examples
///
/// ```rust
/// use coverart::file::{ContainerFamily, FileType, TaggedMedia};
///
/// let media = TaggedMedia::Unsupported(Some(FileType::Wav));
/// assert_eq!(media.family(), ContainerFamily::Unsupported);
/// assert_eq!(media.file_type(), Some(FileType::Wav));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TaggedMedia {
	Mpeg(MpegFile),
	Flac(FlacFile),
	Mp4(Mp4File),
	Asf(AsfFile),
	/// A recognized type outside of the supported families, or an unrecognized file (`None`)
	Unsupported(Option<FileType>),
}

impl TaggedMedia {
	/// The container family of the file
	pub fn family(&self) -> ContainerFamily {
		match self {
			Self::Mpeg(_) => ContainerFamily::MpegWithId3v2,
			Self::Flac(_) => ContainerFamily::Flac,
			Self::Mp4(_) => ContainerFamily::Mp4,
			Self::Asf(_) => ContainerFamily::Asf,
			Self::Unsupported(_) => ContainerFamily::Unsupported,
		}
	}

	/// The type of the file, if it was recognized
	pub fn file_type(&self) -> Option<FileType> {
		match self {
			Self::Mpeg(_) => Some(FileType::Mpeg),
			Self::Flac(_) => Some(FileType::Flac),
			Self::Mp4(_) => Some(FileType::Mp4),
			Self::Asf(_) => Some(FileType::Asf),
			Self::Unsupported(file_type) => *file_type,
		}
	}

	/// Attempts to write all tags to a path
	///
	/// # Errors
	///
	/// * `path` does not exist
	/// * `path` is not writable
	/// * See [`TaggedMedia::save_to`]
	pub fn save_to_path(&self, path: impl AsRef<Path>, write_options: WriteOptions) -> Result<()> {
		self.save_to(
			&mut OpenOptions::new().read(true).write(true).open(path)?,
			write_options,
		)
	}

	/// Attempts to write all tags to a file
	///
	/// # Errors
	///
	/// * The file is [`TaggedMedia::Unsupported`]
	/// * See [`AudioFile::save_to`]
	pub fn save_to<F>(&self, file: &mut F, write_options: WriteOptions) -> Result<()>
	where
		F: FileLike,
		CoverError: From<<F as Truncate>::Error>,
		CoverError: From<<F as Length>::Error>,
	{
		match self {
			Self::Mpeg(mpeg) => mpeg.save_to(file, write_options),
			Self::Flac(flac) => flac.save_to(file, write_options),
			Self::Mp4(mp4) => mp4.save_to(file, write_options),
			Self::Asf(asf) => asf.save_to(file, write_options),
			Self::Unsupported(_) => err!(UnsupportedFile),
		}
	}
}

impl From<MpegFile> for TaggedMedia {
	fn from(input: MpegFile) -> Self {
		Self::Mpeg(input)
	}
}

impl From<FlacFile> for TaggedMedia {
	fn from(input: FlacFile) -> Self {
		Self::Flac(input)
	}
}

impl From<Mp4File> for TaggedMedia {
	fn from(input: Mp4File) -> Self {
		Self::Mp4(input)
	}
}

impl From<AsfFile> for TaggedMedia {
	fn from(input: AsfFile) -> Self {
		Self::Asf(input)
	}
}
