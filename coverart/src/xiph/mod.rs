//! Xiph comment items
//!
//! A Xiph comment (also known as Vorbis comments) is a vendor string followed by a list of
//! `KEY=VALUE` fields. Pictures are stored as base64 encoded [`FlacPicture`]s under the
//! `METADATA_BLOCK_PICTURE` key.
//!
//! Only FLAC embeds a Xiph comment that coverart can write, in its `VORBIS_COMMENT` block.

pub(crate) mod read;
pub(crate) mod write;

use crate::flac::FlacPicture;

/// The vendor string used for newly created comments
pub(crate) const DEFAULT_VENDOR: &str = "coverart";

/// A non-picture field
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Field {
	Text(String, String),
	/// Anything that isn't a UTF-8 `KEY=VALUE` pair, written back untouched
	Raw(Vec<u8>),
}

/// A Xiph comment
///
/// Every field other than the pictures is kept as it was read, in its original order. That
/// includes fields that aren't valid, such as ones missing a `=`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XiphComment {
	pub(crate) vendor: String,
	pub(crate) fields: Vec<Field>,
	pub(crate) pictures: Vec<FlacPicture>,
}

impl Default for XiphComment {
	fn default() -> Self {
		Self {
			vendor: String::from(DEFAULT_VENDOR),
			fields: Vec::new(),
			pictures: Vec::new(),
		}
	}
}

impl XiphComment {
	/// The vendor string
	pub fn vendor(&self) -> &str {
		&self.vendor
	}

	/// All valid non-picture fields, as `(key, value)` pairs
	pub fn items(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
		self.fields.iter().filter_map(|field| match field {
			Field::Text(key, value) => Some((key.as_str(), value.as_str())),
			Field::Raw(_) => None,
		})
	}

	/// The pictures stored in the comment, in comment order
	///
	/// Legacy `COVERART` fields are converted on read, and come after any
	/// `METADATA_BLOCK_PICTURE` fields.
	pub fn pictures(&self) -> &[FlacPicture] {
		&self.pictures
	}

	/// Append a picture
	pub fn push_picture(&mut self, picture: FlacPicture) {
		self.pictures.push(picture);
	}
}
