use crate::asf::AsfPicture;
use crate::flac::FlacPicture;
use crate::id3::v2::AttachedPictureFrame;
use crate::mp4::CoverArt;

/// A native picture entry, as far as cover selection is concerned
pub(crate) trait PictureEntry {
	fn is_front_cover(&self) -> bool;
}

impl PictureEntry for AttachedPictureFrame {
	fn is_front_cover(&self) -> bool {
		self.pic_type.is_front_cover()
	}
}

impl PictureEntry for FlacPicture {
	fn is_front_cover(&self) -> bool {
		self.pic_type.is_front_cover()
	}
}

impl PictureEntry for AsfPicture {
	fn is_front_cover(&self) -> bool {
		self.pic_type.is_front_cover()
	}
}

// `covr` entries have no type
impl PictureEntry for CoverArt {
	fn is_front_cover(&self) -> bool {
		false
	}
}

/// Pick the cover out of a list of entries
///
/// The last front cover wins. Without any front cover, the first entry is used.
pub(crate) fn select<'a, T, I>(entries: I) -> Option<&'a T>
where
	T: PictureEntry + 'a,
	I: IntoIterator<Item = &'a T>,
{
	let mut first = None;
	let mut front_cover = None;

	for entry in entries {
		if first.is_none() {
			first = Some(entry);
		}

		if entry.is_front_cover() {
			front_cover = Some(entry);
		}
	}

	front_cover.or(first)
}
