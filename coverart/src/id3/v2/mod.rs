//! ID3v2 items and utilities
//!
//! ## Important notes
//!
//! Only `APIC` (`PIC` in ID3v2.2) frames are decoded. Every other frame is kept as it was read,
//! and written back verbatim, so a tag always keeps its original version.
//!
//! The only exception are tag-level features that would be invalidated by a rewrite. The extended
//! header and footer are dropped, and tag-wide unsynchronisation is undone.

pub(crate) mod frame;
pub(crate) mod header;
mod picture_frame;
pub(crate) mod read;
pub(crate) mod synchsafe;
pub(crate) mod write;

use frame::Frame;

pub use header::Id3v2Version;
pub use picture_frame::AttachedPictureFrame;
pub(crate) use picture_frame::mime_to_v22_format;

/// An ID3v2 tag
///
/// # Examples
///
/// ```rust
/// use coverart::id3::v2::{AttachedPictureFrame, Id3v2Tag};
/// use coverart::picture::PictureType;
///
/// let mut tag = Id3v2Tag::new();
/// tag.push_picture(AttachedPictureFrame::new(
/// 	PictureType::CoverFront,
/// 	String::from("image/png"),
/// 	vec![0x89, b'P', b'N', b'G'],
/// ));
///
/// assert_eq!(tag.pictures().count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Id3v2Tag {
	pub(crate) version: Id3v2Version,
	pub(crate) frames: Vec<Frame>,
}

impl Default for Id3v2Tag {
	fn default() -> Self {
		Self::new()
	}
}

impl Id3v2Tag {
	/// Create a new empty ID3v2.4 tag
	pub fn new() -> Self {
		Self::with_version(Id3v2Version::V4)
	}

	pub(crate) fn with_version(version: Id3v2Version) -> Self {
		Self {
			version,
			frames: Vec::new(),
		}
	}

	/// The tag's version
	pub fn version(&self) -> Id3v2Version {
		self.version
	}

	/// The number of frames in the tag, of any kind
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Whether the tag has no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// All decoded `APIC` frames, in tag order
	pub fn pictures(&self) -> impl Iterator<Item = &AttachedPictureFrame> {
		self.frames.iter().filter_map(|frame| match frame {
			Frame::Picture(picture) => Some(picture),
			Frame::Raw(_) => None,
		})
	}

	/// Append an `APIC` frame
	///
	/// Existing pictures are left untouched.
	pub fn push_picture(&mut self, picture: AttachedPictureFrame) {
		self.frames.push(Frame::Picture(picture));
	}
}
