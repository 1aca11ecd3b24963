pub(super) mod read;
pub(super) mod write;

use crate::mime::CoverArtFormat;

pub(super) const COVR: [u8; 4] = *b"covr";

/// A single `covr` entry
///
/// MP4 has no picture types, descriptions, or free-form MIME types. An entry is just a format
/// code and the image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
	/// The format of the image
	pub format: CoverArtFormat,
	/// The image data
	pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum IlstItem {
	/// The `covr` item, with each `data` atom decoded
	CoverArt(Vec<CoverArt>),
	/// Any other item, with its content (everything after the atom header) kept as-is
	Raw { ident: [u8; 4], content: Vec<u8> },
}

/// An MP4 `ilst` atom
///
/// Only the `covr` item is decoded. Every other item is written back untouched, in its original
/// position.
///
/// # Examples
///
/// ```rust
/// use coverart::mime::CoverArtFormat;
/// use coverart::mp4::{CoverArt, Ilst};
///
/// let mut ilst = Ilst::default();
/// assert!(ilst.cover_art().is_none());
///
/// ilst.set_cover_art(vec![CoverArt {
/// 	format: CoverArtFormat::Png,
/// 	data: vec![0x89, b'P', b'N', b'G'],
/// }]);
///
/// assert_eq!(ilst.cover_art().map(<[_]>::len), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ilst {
	pub(crate) items: Vec<IlstItem>,
}

impl Ilst {
	/// The entries of the `covr` item, in atom order
	///
	/// This is `None` if the item doesn't exist at all.
	pub fn cover_art(&self) -> Option<&[CoverArt]> {
		self.items.iter().find_map(|item| match item {
			IlstItem::CoverArt(covers) => Some(covers.as_slice()),
			IlstItem::Raw { .. } => None,
		})
	}

	/// Replace the entire `covr` item
	///
	/// An existing `covr` item keeps its position, otherwise the item is appended.
	pub fn set_cover_art(&mut self, covers: Vec<CoverArt>) {
		for item in &mut self.items {
			if let IlstItem::CoverArt(existing) = item {
				*existing = covers;
				return;
			}
		}

		self.items.push(IlstItem::CoverArt(covers));
	}

	/// The number of items in the `ilst`, including `covr`
	pub fn len(&self) -> usize {
		self.items.len()
	}
}
