use crate::id3::v2::AttachedPictureFrame;
use crate::id3::v2::header::Id3v2Version;

/// A frame in an [`Id3v2Tag`](crate::id3::v2::Id3v2Tag)
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Frame {
	Picture(AttachedPictureFrame),
	Raw(RawFrame),
}

/// Any frame that isn't decoded
///
/// The content is stored exactly as it appeared after the frame header, so it stays consistent
/// with `flags`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RawFrame {
	pub(crate) id: Vec<u8>,
	pub(crate) flags: u16,
	pub(crate) content: Vec<u8>,
}

/// The format flags of a v2.3/v2.4 frame that change how its content is stored
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FrameFlags {
	pub grouping_identity: bool,
	pub compression: bool,
	pub encryption: bool,
	pub unsynchronisation: bool,
	pub data_length_indicator: bool,
}

impl FrameFlags {
	pub(crate) const V4_UNSYNCHRONISATION: u16 = 0x0002;

	pub(crate) fn parse(flags: u16, version: Id3v2Version) -> Self {
		match version {
			Id3v2Version::V4 => Self {
				grouping_identity: flags & 0x0040 == 0x0040,
				compression: flags & 0x0008 == 0x0008,
				encryption: flags & 0x0004 == 0x0004,
				unsynchronisation: flags & 0x0002 == 0x0002,
				data_length_indicator: flags & 0x0001 == 0x0001,
			},
			Id3v2Version::V3 => Self {
				compression: flags & 0x0080 == 0x0080,
				encryption: flags & 0x0040 == 0x0040,
				grouping_identity: flags & 0x0020 == 0x0020,
				// Compressed frames always carry their decompressed size in v2.3
				data_length_indicator: flags & 0x0080 == 0x0080,
				unsynchronisation: false,
			},
			Id3v2Version::V2 => Self::default(),
		}
	}
}

pub(crate) fn is_valid_frame_id(id: &[u8]) -> bool {
	!id.is_empty()
		&& id
			.iter()
			.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

pub(crate) fn is_picture_frame_id(id: &[u8], version: Id3v2Version) -> bool {
	match version {
		Id3v2Version::V2 => id == b"PIC",
		_ => id == b"APIC",
	}
}
