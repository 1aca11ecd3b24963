use crate::util::{
	ASF_EXTENDED_CONTENT_DESCRIPTION_OBJECT, FLAC_PICTURE, apic_content, asf,
	asf_extended_content_description, asf_object, flac, flac_picture, id3v2_tag, id3v23_frame,
	mpeg_frames, temp_path, wm_picture,
};

use coverart::cover::CoverFile;
use coverart::picture::Picture;

// Other, front cover, back cover, front cover, artist
const TYPES: [u8; 5] = [0, 3, 4, 3, 8];

fn data(i: usize) -> Vec<u8> {
	vec![0xA0 + i as u8; 4]
}

fn selected(content: &[u8], ext: &str) -> Option<Vec<u8>> {
	let temp = temp_path(content, ext);
	let file = CoverFile::open(temp.path()).unwrap();
	file.read_cover().into_picture().map(Picture::into_data)
}

#[test_log::test]
fn last_front_cover_id3v2() {
	let mut frames = Vec::new();
	for (i, ty) in TYPES.into_iter().enumerate() {
		frames.extend(id3v23_frame(b"APIC", &apic_content("image/png", ty, &data(i))));
	}

	let mut content = id3v2_tag(3, 0, &frames);
	content.extend(mpeg_frames());

	assert_eq!(selected(&content, "mp3"), Some(data(3)));
}

#[test_log::test]
fn last_front_cover_flac() {
	let blocks = TYPES
		.into_iter()
		.enumerate()
		.map(|(i, ty)| {
			(
				FLAC_PICTURE,
				flac_picture(u32::from(ty), "image/png", [0, 0, 0], &data(i)),
			)
		})
		.collect::<Vec<_>>();

	assert_eq!(selected(&flac(&blocks), "flac"), Some(data(3)));
}

#[test_log::test]
fn last_front_cover_asf() {
	let pictures = TYPES
		.into_iter()
		.enumerate()
		.map(|(i, ty)| ("WM/Picture", 1, wm_picture(ty, "image/png", &data(i))))
		.collect::<Vec<_>>();

	let content = asf(&[asf_object(
		&ASF_EXTENDED_CONTENT_DESCRIPTION_OBJECT,
		&asf_extended_content_description(&pictures),
	)]);

	assert_eq!(selected(&content, "wma"), Some(data(3)));
}

#[test_log::test]
fn first_picture_without_front_cover() {
	let mut frames = Vec::new();
	for (i, ty) in [4, 0, 8].into_iter().enumerate() {
		frames.extend(id3v23_frame(b"APIC", &apic_content("image/png", ty, &data(i))));
	}

	let mut content = id3v2_tag(3, 0, &frames);
	content.extend(mpeg_frames());

	assert_eq!(selected(&content, "mp3"), Some(data(0)));
}
