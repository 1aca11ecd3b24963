use super::{PictureSource, ReadStatus};
use crate::asf::AsfTag;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::file::{ContainerFamily, TaggedMedia};
use crate::flac::{FlacFile, FlacPicture};
use crate::id3::v2::Id3v2Tag;
use crate::macros::err;
use crate::mp4::{CoverArt, Ilst};
use crate::xiph::XiphComment;

/// The container that holds a file's pictures
pub(super) enum PictureContainer<'a> {
	Id3v2(&'a Id3v2Tag),
	FlacBlocks(&'a [FlacPicture]),
	Xiph(&'a XiphComment),
	// A missing `covr` item is the same as an empty one
	Mp4(&'a [CoverArt]),
	Asf(&'a AsfTag),
}

impl PictureContainer<'_> {
	pub(super) fn source(&self) -> PictureSource {
		match self {
			Self::Id3v2(_) => PictureSource::Id3v2,
			Self::FlacBlocks(_) => PictureSource::FlacPictureBlock,
			Self::Xiph(_) => PictureSource::XiphComment,
			Self::Mp4(_) => PictureSource::Mp4CoverArt,
			Self::Asf(_) => PictureSource::AsfAttribute,
		}
	}
}

/// The container to attach a new picture to
pub(super) enum PictureContainerMut<'a> {
	Id3v2(&'a mut Id3v2Tag),
	FlacBlocks(&'a mut Vec<FlacPicture>),
	Xiph(&'a mut XiphComment),
	Mp4(&'a mut Ilst),
	Asf(&'a mut AsfTag),
}

/// Find the container to read from
///
/// Nothing is created. When there is nothing to read from, the status explains why.
pub(super) fn for_read(media: &TaggedMedia) -> std::result::Result<PictureContainer<'_>, ReadStatus> {
	match media {
		TaggedMedia::Mpeg(mpeg) => mpeg
			.id3v2()
			.map(PictureContainer::Id3v2)
			.ok_or(ReadStatus::TagAbsent),
		TaggedMedia::Flac(flac) => flac_for_read(flac),
		TaggedMedia::Mp4(mp4) => Ok(PictureContainer::Mp4(
			mp4.ilst().and_then(Ilst::cover_art).unwrap_or_default(),
		)),
		TaggedMedia::Asf(asf) => Ok(PictureContainer::Asf(asf.tag())),
		TaggedMedia::Unsupported(_) => Err(ReadStatus::UnsupportedFile),
	}
}

fn flac_for_read(flac: &FlacFile) -> std::result::Result<PictureContainer<'_>, ReadStatus> {
	if !flac.pictures().is_empty() {
		return Ok(PictureContainer::FlacBlocks(flac.pictures()));
	}

	if let Some(id3v2) = flac.id3v2() {
		log::debug!("FLAC: No picture blocks, using the ID3v2 tag");
		return Ok(PictureContainer::Id3v2(id3v2));
	}

	if let Some(xiph_comment) = flac.xiph_comment() {
		log::debug!("FLAC: No picture blocks or ID3v2 tag, using the Xiph comment");
		return Ok(PictureContainer::Xiph(xiph_comment));
	}

	Err(ReadStatus::PictureListAbsent(ContainerFamily::Flac))
}

/// Find the container to write to, creating it if necessary
///
/// # Errors
///
/// The file is [`TaggedMedia::Unsupported`]
pub(super) fn for_write(
	media: &mut TaggedMedia,
	write_options: WriteOptions,
) -> Result<PictureContainerMut<'_>> {
	let container = match media {
		TaggedMedia::Mpeg(mpeg) => PictureContainerMut::Id3v2(mpeg.id3v2_mut_or_insert()),
		TaggedMedia::Flac(flac) => flac_for_write(flac, write_options),
		TaggedMedia::Mp4(mp4) => PictureContainerMut::Mp4(mp4.ilst_mut_or_insert()),
		TaggedMedia::Asf(asf) => PictureContainerMut::Asf(asf.tag_mut()),
		TaggedMedia::Unsupported(_) => err!(UnsupportedFile),
	};

	Ok(container)
}

fn flac_for_write(flac: &mut FlacFile, write_options: WriteOptions) -> PictureContainerMut<'_> {
	let FlacFile {
		id3v2_tag,
		xiph_comment,
		pictures,
	} = flac;

	if !pictures.is_empty() {
		return PictureContainerMut::FlacBlocks(pictures);
	}

	if let Some(id3v2) = id3v2_tag {
		log::debug!("FLAC: No picture blocks, writing to the ID3v2 tag");
		return PictureContainerMut::Id3v2(id3v2);
	}

	if write_options.use_flac_picture_blocks {
		return PictureContainerMut::FlacBlocks(pictures);
	}

	log::debug!("FLAC: Picture blocks disabled, writing to the Xiph comment");
	PictureContainerMut::Xiph(xiph_comment.get_or_insert_with(|| {
		log::debug!("Creating a new Xiph comment");
		XiphComment::default()
	}))
}
