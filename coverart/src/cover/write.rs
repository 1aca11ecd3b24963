use super::codec;
use super::resolve::{self, PictureContainerMut};
use crate::config::WriteOptions;
use crate::error::Result;
use crate::file::TaggedMedia;
use crate::id3::v2::{Id3v2Version, mime_to_v22_format};
use crate::picture::Picture;

/// Attach `picture` to the in-memory containers of `media`
///
/// ID3v2, FLAC blocks, Xiph comments and ASF append the new entry. MP4 replaces the entire
/// `covr` item.
pub(super) fn attach(
	media: &mut TaggedMedia,
	picture: Picture,
	write_options: WriteOptions,
) -> Result<()> {
	match resolve::for_write(media, write_options)? {
		PictureContainerMut::Id3v2(tag) => {
			// Checked up front, so a bad format can't fail halfway through a save
			if tag.version() == Id3v2Version::V2 {
				mime_to_v22_format(picture.mime_type())?;
			}

			tag.push_picture(codec::to_id3v2(picture));
		},
		PictureContainerMut::FlacBlocks(blocks) => blocks.push(codec::to_flac(picture)),
		PictureContainerMut::Xiph(comment) => comment.push_picture(codec::to_flac(picture)),
		PictureContainerMut::Mp4(ilst) => ilst.set_cover_art(vec![codec::to_mp4(picture)]),
		PictureContainerMut::Asf(tag) => tag.add_picture(codec::to_asf(picture)),
	}

	Ok(())
}

/// Attach `picture`, then `persist` the result
///
/// If either step fails, `media` is restored to its state before the call.
pub(super) fn attach_and_persist<P>(
	media: &mut TaggedMedia,
	picture: Picture,
	write_options: WriteOptions,
	persist: P,
) -> Result<()>
where
	P: FnOnce(&TaggedMedia) -> Result<()>,
{
	let snapshot = media.clone();

	let result = attach(media, picture, write_options).and_then(|()| {
		log::debug!("Persisting the new cover");
		persist(media)
	});

	if let Err(e) = &result {
		log::warn!("Failed to write the cover, restoring the previous state: {e}");
		*media = snapshot;
	}

	result
}
