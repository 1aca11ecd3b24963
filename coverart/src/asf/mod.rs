//! ASF specific items
//!
//! ## File notes
//!
//! Pictures are stored in `WM/Picture` attributes, which may be found in any of the extended
//! content description, metadata, and metadata library objects. See [`AsfTag`].

mod attribute;
pub(crate) mod guid;
mod picture;
mod read;
mod write;

use crate::config::{ParseOptions, WriteOptions};
use crate::error::{CoverError, Result};
use crate::file::AudioFile;
use crate::util::io::{FileLike, Length, Truncate};
use attribute::{Attribute, AttributeValue, PICTURE_ATTRIBUTE};

use std::io::{Read, Seek};

// Exports
pub use picture::AsfPicture;

/// The attributes of an ASF file
///
/// Attributes are kept in the order they were read: the extended content description first, then
/// the metadata object, then the metadata library. Everything other than `WM/Picture` is carried
/// through untouched when the file is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsfTag {
	pub(crate) attributes: Vec<Attribute>,
}

impl AsfTag {
	/// Returns all `WM/Picture` values, in storage order
	pub fn pictures(&self) -> impl Iterator<Item = &AsfPicture> + '_ {
		self.attributes.iter().filter_map(|attribute| match &attribute.value {
			AttributeValue::Picture(picture) if attribute.name == PICTURE_ATTRIBUTE => Some(picture),
			_ => None,
		})
	}

	/// Appends a `WM/Picture` attribute
	///
	/// Existing pictures are kept. The new attribute applies to the whole file, in the default
	/// language.
	pub fn add_picture(&mut self, picture: AsfPicture) {
		self.attributes.push(Attribute::new(
			PICTURE_ATTRIBUTE,
			AttributeValue::Picture(picture),
		));
	}

	/// The number of attributes, of any kind
	pub fn len(&self) -> usize {
		self.attributes.len()
	}

	/// Whether the tag holds no attributes at all
	pub fn is_empty(&self) -> bool {
		self.attributes.is_empty()
	}
}

/// An ASF file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsfFile {
	pub(crate) tag: AsfTag,
}

impl AsfFile {
	/// The file's attributes
	///
	/// Every ASF file has a tag, though it may be empty.
	pub fn tag(&self) -> &AsfTag {
		&self.tag
	}

	/// Mutable access to the file's attributes
	pub fn tag_mut(&mut self) -> &mut AsfTag {
		&mut self.tag
	}
}

impl AudioFile for AsfFile {
	fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
		Self: Sized,
	{
		read::read_from(reader, parse_options)
	}

	// The header is rebuilt in place, there's no padding to configure
	fn save_to<F>(&self, file: &mut F, _write_options: WriteOptions) -> Result<()>
	where
		F: FileLike,
		CoverError: From<<F as Truncate>::Error>,
		CoverError: From<<F as Length>::Error>,
	{
		write::write_to(file, &self.tag)
	}
}
