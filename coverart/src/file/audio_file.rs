use crate::config::{ParseOptions, WriteOptions};
use crate::error::{CoverError, Result};
use crate::util::io::{FileLike, Length, Truncate};

use std::fs::OpenOptions;
use std::io::{Read, Seek};
use std::path::Path;

/// Provides various methods for interaction with a file
///
/// This is implemented by every concrete file that can hold cover art.
pub trait AudioFile {
	/// Read a file from a reader
	///
	/// # Errors
	///
	/// Errors depend on the file and tags being read. See [`CoverError`]
	fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
		Self: Sized;

	/// Attempts to write all tags to a path
	///
	/// # Errors
	///
	/// * `path` does not exist
	/// * `path` is not writable
	/// * See [`AudioFile::save_to`]
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use coverart::config::{ParseOptions, WriteOptions};
	/// use coverart::file::AudioFile;
	/// use coverart::mpeg::MpegFile;
	/// use std::fs::File;
	///
	/// # fn main() -> coverart::error::Result<()> {
	/// # let path = "foo.mp3";
	/// let mut mpeg_file = MpegFile::read_from(&mut File::open(path)?, ParseOptions::new())?;
	///
	/// // Edit the tag
	///
	/// mpeg_file.save_to_path(path, WriteOptions::default())?;
	/// # Ok(()) }
	/// ```
	fn save_to_path(&self, path: impl AsRef<Path>, write_options: WriteOptions) -> Result<()> {
		self.save_to(
			&mut OpenOptions::new().read(true).write(true).open(path)?,
			write_options,
		)
	}

	/// Attempts to write all tags to a file
	///
	/// The file is expected to hold the same stream the tags were read from.
	///
	/// # Errors
	///
	/// * The file no longer holds a valid stream of this type
	/// * A tag is too large to be written
	/// * `file` fails to read or write
	fn save_to<F>(&self, file: &mut F, write_options: WriteOptions) -> Result<()>
	where
		F: FileLike,
		CoverError: From<<F as Truncate>::Error>,
		CoverError: From<<F as Length>::Error>;
}
