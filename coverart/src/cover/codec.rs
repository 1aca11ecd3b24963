//! Conversions between native picture entries and [`Picture`]

use crate::asf::AsfPicture;
use crate::flac::FlacPicture;
use crate::id3::v2::AttachedPictureFrame;
use crate::mime::CoverArtFormat;
use crate::mp4::CoverArt;
use crate::picture::{Picture, PictureGeometry, PictureType};

// Used for every picture block and Xiph picture written
const FLAC_DESCRIPTION: &str = "Front Cover";

pub(super) fn from_id3v2(frame: &AttachedPictureFrame) -> Picture {
	Picture::new(frame.data.clone(), frame.mime_type.as_str())
}

pub(super) fn from_flac_block(block: &FlacPicture) -> Picture {
	Picture::new(block.data.clone(), block.mime_type.as_str()).with_geometry(PictureGeometry {
		width: block.width,
		height: block.height,
		color_depth: block.color_depth,
	})
}

// Xiph pictures share the block layout, but their geometry isn't reported
pub(super) fn from_xiph(picture: &FlacPicture) -> Picture {
	Picture::new(picture.data.clone(), picture.mime_type.as_str())
}

pub(super) fn from_mp4(cover: &CoverArt) -> Picture {
	Picture::new(cover.data.clone(), cover.format.as_mime())
}

pub(super) fn from_asf(picture: &AsfPicture) -> Picture {
	Picture::new(picture.data.clone(), picture.mime_type.as_str())
}

pub(super) fn to_id3v2(picture: Picture) -> AttachedPictureFrame {
	AttachedPictureFrame::new(PictureType::CoverFront, picture.mime_type, picture.data)
}

pub(super) fn to_flac(picture: Picture) -> FlacPicture {
	let geometry = picture.geometry.unwrap_or_default();

	FlacPicture {
		pic_type: PictureType::CoverFront,
		mime_type: picture.mime_type,
		description: String::from(FLAC_DESCRIPTION),
		width: geometry.width,
		height: geometry.height,
		color_depth: geometry.color_depth,
		num_colors: 0,
		data: picture.data,
	}
}

pub(super) fn to_mp4(picture: Picture) -> CoverArt {
	CoverArt {
		format: CoverArtFormat::from_mime(&picture.mime_type),
		data: picture.data,
	}
}

pub(super) fn to_asf(picture: Picture) -> AsfPicture {
	AsfPicture::new(PictureType::CoverFront, picture.mime_type, picture.data)
}
