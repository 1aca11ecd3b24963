use crate::util::{
	FLAC_PICTURE, flac, flac_picture, id3v2_tag, id3v22_frame, mp4, mpeg_frames, pic_content,
	temp_path,
};

use coverart::cover::CoverFile;
use coverart::picture::Picture;

fn written_mime(content: &[u8], ext: &str, mime: &str) -> String {
	let temp = temp_path(content, ext);

	let mut file = CoverFile::open(temp.path()).unwrap();
	file.write_cover(Picture::new(vec![1, 2, 3], mime)).unwrap();

	let file = CoverFile::open(temp.path()).unwrap();
	let picture = file.read_cover().into_picture().unwrap();
	picture.mime_type().to_owned()
}

#[test_log::test]
fn free_form_containers_keep_mime() {
	// Case and unusual types are kept exactly
	for mime in ["image/png", "IMAGE/JPEG", "image/webp", "application/octet-stream"] {
		assert_eq!(written_mime(&mpeg_frames(), "mp3", mime), mime);
		assert_eq!(written_mime(&flac(&[]), "flac", mime), mime);
	}
}

#[test_log::test]
fn mp4_normalizes_mime() {
	for (mime, expected) in [
		("image/jpeg", "image/jpeg"),
		("image/png", "image/png"),
		("image/bmp", "image/bmp"),
		("image/gif", "image/gif"),
		("image/jpg", ""),
		("IMAGE/PNG", ""),
		("image/webp", ""),
	] {
		assert_eq!(written_mime(&mp4(&[]), "m4a", mime), expected);
	}
}

#[test_log::test]
fn id3v22_formats() {
	let existing = id3v22_frame(b"PIC", &pic_content(b"PNG", 3, &[0]));
	let mut content = id3v2_tag(2, 0, &existing);
	content.extend(mpeg_frames());

	for mime in ["image/png", "image/jpeg"] {
		assert_eq!(written_mime(&content, "mp3", mime), mime);
	}
}

#[test_log::test]
fn flac_block_mime_is_exact() {
	let content = flac(&[(
		FLAC_PICTURE,
		flac_picture(3, "Image/PNG", [0, 0, 0], &[1]),
	)]);

	let temp = temp_path(&content, "flac");
	let file = CoverFile::open(temp.path()).unwrap();
	assert_eq!(
		file.read_cover().picture().map(Picture::mime_type),
		Some("Image/PNG")
	);
}
