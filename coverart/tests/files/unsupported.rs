use crate::util::{PNG_DATA, read_path, temp_path};

use coverart::cover::{CoverFile, ReadStatus};
use coverart::error::ErrorKind;
use coverart::file::{ContainerFamily, FileType};
use coverart::picture::Picture;

fn wav() -> Vec<u8> {
	let mut content = b"RIFF".to_vec();
	content.extend(28_u32.to_le_bytes());
	content.extend(b"WAVE");
	content.extend(b"data");
	content.extend(16_u32.to_le_bytes());
	content.extend([0; 16]);
	content
}

#[test_log::test]
fn recognized_but_unsupported() {
	let temp = temp_path(&wav(), "wav");

	let file = CoverFile::open(temp.path()).unwrap();
	assert_eq!(file.family(), ContainerFamily::Unsupported);
	assert_eq!(file.media().file_type(), Some(FileType::Wav));

	let lookup = file.read_cover();
	assert_eq!(lookup.status(), ReadStatus::UnsupportedFile);
	assert!(lookup.picture().is_none());
}

#[test_log::test]
fn unknown_content() {
	let content = b"This is not a media file, just some text.".to_vec();
	let temp = temp_path(&content, "bin");

	let file = CoverFile::open(temp.path()).unwrap();
	assert_eq!(file.family(), ContainerFamily::Unsupported);
	assert_eq!(file.media().file_type(), None);
	assert_eq!(file.read_cover().status(), ReadStatus::UnsupportedFile);
}

#[test_log::test]
fn write_is_rejected() {
	let temp = temp_path(&wav(), "wav");

	let mut file = CoverFile::open(temp.path()).unwrap();
	let err = file
		.write_cover(Picture::new(PNG_DATA.to_vec(), "image/png"))
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::UnsupportedFile));

	assert_eq!(read_path(temp.path()), wav());
	assert_eq!(file.read_cover().status(), ReadStatus::UnsupportedFile);
}
