//! Storage that covers can be saved to
//!
//! Saving reads the whole file, edits it in memory, and writes it back. Anything offering
//! [`FileLike`] can be used, which out of the box means [`File`], [`Vec<u8>`], and a [`Cursor`]
//! over either.

use crate::error::{CoverError, Result};

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

/// Shrink or grow a storage object
///
/// After a successful `truncate`, coverart assumes the object is exactly `new_len` bytes long.
/// A downstream implementation that breaks this will corrupt files.
pub trait Truncate {
	/// Returned when the object can't be resized
	type Error: Into<CoverError>;

	/// Set the length of the object to `new_len`
	///
	/// # Errors
	///
	/// Implementation defined, [`Vec<u8>`] for example can't fail.
	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error>;
}

/// The current length of a storage object
pub trait Length {
	/// Returned when the length isn't available
	type Error: Into<CoverError>;

	/// The length of the object in bytes
	///
	/// # Errors
	///
	/// Implementation defined, [`Vec<u8>`] for example can't fail.
	fn len(&self) -> std::result::Result<u64, Self::Error>;
}

impl Truncate for File {
	type Error = std::io::Error;

	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error> {
		self.set_len(new_len)
	}
}

impl Length for File {
	type Error = std::io::Error;

	fn len(&self) -> std::result::Result<u64, Self::Error> {
		Ok(self.metadata()?.len())
	}
}

impl Truncate for Vec<u8> {
	type Error = std::convert::Infallible;

	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error> {
		Vec::truncate(self, new_len as usize);
		Ok(())
	}
}

impl Length for Vec<u8> {
	type Error = std::convert::Infallible;

	fn len(&self) -> std::result::Result<u64, Self::Error> {
		Ok(Vec::len(self) as u64)
	}
}

// Wrappers defer to what they wrap
macro_rules! forward_storage_impls {
	($(impl<$t:ident> for $ty:ty => |$this:ident| $inner:expr, $inner_mut:expr;)+) => {
		$(
			impl<$t: Truncate> Truncate for $ty {
				type Error = <$t as Truncate>::Error;

				fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error> {
					let $this = self;
					Truncate::truncate($inner_mut, new_len)
				}
			}

			impl<$t: Length> Length for $ty {
				type Error = <$t as Length>::Error;

				fn len(&self) -> std::result::Result<u64, Self::Error> {
					let $this = self;
					Length::len($inner)
				}
			}
		)+
	};
}

forward_storage_impls! {
	impl<T> for Cursor<T> => |this| this.get_ref(), this.get_mut();
	impl<T> for &mut T => |this| &**this, &mut **this;
}

/// Everything needed to save covers to a storage object
///
/// This is automatically implemented for anything that is [`Read`], [`Write`], [`Seek`],
/// [`Truncate`], and [`Length`]. See
/// [`TaggedMedia::write_cover_to`](crate::file::TaggedMedia::write_cover_to).
pub trait FileLike: Read + Write + Seek + Truncate + Length
where
	<Self as Truncate>::Error: Into<CoverError>,
	<Self as Length>::Error: Into<CoverError>,
{
}

impl<T> FileLike for T
where
	T: Read + Write + Seek + Truncate + Length,
	<T as Truncate>::Error: Into<CoverError>,
	<T as Length>::Error: Into<CoverError>,
{
}

/// The total length of a stream, leaving its position untouched
pub(crate) fn stream_len<S>(stream: &mut S) -> Result<u64>
where
	S: Seek,
{
	let position = stream.stream_position()?;
	let len = stream.seek(SeekFrom::End(0))?;
	stream.seek(SeekFrom::Start(position))?;

	Ok(len)
}

/// Reads an entire `FileLike` into memory, starting from the beginning
pub(crate) fn read_all<F>(file: &mut F) -> Result<Vec<u8>>
where
	F: FileLike,
	CoverError: From<<F as Truncate>::Error>,
	CoverError: From<<F as Length>::Error>,
{
	let mut contents = Vec::new();
	contents.try_reserve(Length::len(file)? as usize)?;

	file.rewind()?;
	file.read_to_end(&mut contents)?;

	Ok(contents)
}

/// Replaces the contents of a `FileLike` with `contents`
pub(crate) fn overwrite_all<F>(file: &mut F, contents: &[u8]) -> Result<()>
where
	F: FileLike,
	CoverError: From<<F as Truncate>::Error>,
	CoverError: From<<F as Length>::Error>,
{
	file.rewind()?;
	file.write_all(contents)?;
	file.truncate(contents.len() as u64)?;
	file.flush()?;

	Ok(())
}
