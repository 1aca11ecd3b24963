//! MP4 specific items
//!
//! ## File notes
//!
//! Cover art lives in the `covr` item of `moov.udta.meta.ilst`. See [`Ilst`] and [`CoverArt`].

mod atom_info;
mod ilst;
mod read;
mod write;

use crate::config::{ParseOptions, WriteOptions};
use crate::error::{CoverError, Result};
use crate::file::AudioFile;
use crate::util::io::{FileLike, Length, Truncate};

use std::io::{Read, Seek};

// Exports
pub use ilst::{CoverArt, Ilst};

/// An MP4 file
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mp4File {
	/// The file's major brand from `ftyp` (Ex. "M4A ")
	pub(crate) ftyp: String,
	pub(crate) ilst: Option<Ilst>,
}

impl Mp4File {
	/// Returns the file format from `ftyp`'s major brand (Ex. "M4A ", "dash")
	pub fn ftyp(&self) -> &str {
		self.ftyp.as_ref()
	}

	/// The file's `ilst` atom, if any
	pub fn ilst(&self) -> Option<&Ilst> {
		self.ilst.as_ref()
	}

	/// Mutable access to the `ilst` atom, creating an empty one if needed
	///
	/// Any missing `udta`, `meta`, or `ilst` atoms are only created once the file is saved.
	pub fn ilst_mut_or_insert(&mut self) -> &mut Ilst {
		self.ilst.get_or_insert_with(|| {
			log::debug!("Creating a new `ilst`");
			Ilst::default()
		})
	}
}

impl AudioFile for Mp4File {
	fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
		Self: Sized,
	{
		read::read_from(reader, parse_options)
	}

	// MP4 has no padding to configure
	fn save_to<F>(&self, file: &mut F, _write_options: WriteOptions) -> Result<()>
	where
		F: FileLike,
		CoverError: From<<F as Truncate>::Error>,
		CoverError: From<<F as Length>::Error>,
	{
		write::write_to(file, self)
	}
}
