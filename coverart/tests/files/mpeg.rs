use crate::util::{
	JPEG_DATA, PNG_DATA, apic_content, id3v2_tag, id3v22_frame, id3v23_frame, mpeg_frames,
	pic_content, read_path, temp_path,
};

use coverart::config::ParseOptions;
use coverart::cover::{CoverFile, PictureSource, ReadStatus};
use coverart::error::{ErrorKind, Id3v2ErrorKind};
use coverart::file::{AudioFile, ContainerFamily, TaggedMedia};
use coverart::id3::v2::Id3v2Version;
use coverart::mpeg::MpegFile;
use coverart::picture::Picture;

use std::io::Cursor;

fn mpeg_file(file: &CoverFile) -> &MpegFile {
	match file.media() {
		TaggedMedia::Mpeg(mpeg) => mpeg,
		other => panic!("Expected an MPEG file, got {other:?}"),
	}
}

#[test_log::test]
fn no_tag() {
	let temp = temp_path(&mpeg_frames(), "mp3");

	let file = CoverFile::open(temp.path()).unwrap();
	assert_eq!(file.family(), ContainerFamily::MpegWithId3v2);

	let lookup = file.read_cover();
	assert_eq!(lookup.status(), ReadStatus::TagAbsent);
	assert!(lookup.picture().is_none());
}

#[test_log::test]
fn tag_without_pictures() {
	let tag = id3v2_tag(3, 0, &id3v23_frame(b"TIT2", b"\0Title"));
	let mut content = tag;
	content.extend(mpeg_frames());

	let temp = temp_path(&content, "mp3");
	let file = CoverFile::open(temp.path()).unwrap();

	assert_eq!(
		file.read_cover().status(),
		ReadStatus::PictureListEmpty(PictureSource::Id3v2)
	);
}

#[test_log::test]
fn write_creates_tag() {
	let temp = temp_path(&mpeg_frames(), "mp3");

	let mut file = CoverFile::open(temp.path()).unwrap();
	file.write_cover(Picture::new(PNG_DATA.to_vec(), "image/png"))
		.unwrap();

	let written = read_path(temp.path());
	assert!(written.starts_with(b"ID3\x04"));
	assert!(written.ends_with(&mpeg_frames()));

	let file = CoverFile::open(temp.path()).unwrap();
	let picture = file.read_cover().into_picture().unwrap();
	assert_eq!(picture.data(), PNG_DATA);
	assert_eq!(picture.mime_type(), "image/png");
	assert_eq!(picture.geometry(), None);
	assert_eq!(
		mpeg_file(&file).id3v2().map(|tag| tag.version()),
		Some(Id3v2Version::V4)
	);
}

#[test_log::test]
fn other_frames_survive() {
	let title = id3v23_frame(b"TIT2", b"\0Title");
	let mut body = title.clone();
	body.extend(id3v23_frame(b"APIC", &apic_content("image/png", 4, PNG_DATA)));

	let mut content = id3v2_tag(3, 0, &body);
	content.extend(mpeg_frames());

	let temp = temp_path(&content, "mp3");

	let mut file = CoverFile::open(temp.path()).unwrap();
	// A back cover is the only picture, so it is selected
	assert_eq!(
		file.read_cover().picture().map(Picture::data),
		Some(PNG_DATA)
	);

	file.write_cover(Picture::new(JPEG_DATA.to_vec(), "image/jpeg"))
		.unwrap();

	let written = read_path(temp.path());
	assert!(written.windows(title.len()).any(|w| w == title));
	assert!(written.ends_with(&mpeg_frames()));

	let file = CoverFile::open(temp.path()).unwrap();
	let tag = mpeg_file(&file).id3v2().unwrap();
	assert_eq!(tag.version(), Id3v2Version::V3);
	assert_eq!(tag.len(), 3);
	assert_eq!(tag.pictures().count(), 2);

	// The new front cover beats the old back cover
	assert_eq!(
		file.read_cover().picture().map(Picture::data),
		Some(JPEG_DATA)
	);
}

#[test_log::test]
fn v22_round_trip() {
	let body = id3v22_frame(b"PIC", &pic_content(b"PNG", 3, PNG_DATA));
	let mut content = id3v2_tag(2, 0, &body);
	content.extend(mpeg_frames());

	let temp = temp_path(&content, "mp3");

	let mut file = CoverFile::open(temp.path()).unwrap();
	let picture = file.read_cover().into_picture().unwrap();
	assert_eq!(picture.mime_type(), "image/png");
	assert_eq!(picture.data(), PNG_DATA);

	file.write_cover(Picture::new(JPEG_DATA.to_vec(), "image/jpeg"))
		.unwrap();

	let written = read_path(temp.path());
	assert!(written.starts_with(b"ID3\x02"));
	assert!(written.windows(4).any(|w| w == b"\0JPG"));

	let file = CoverFile::open(temp.path()).unwrap();
	let picture = file.read_cover().into_picture().unwrap();
	assert_eq!(picture.mime_type(), "image/jpeg");
	assert_eq!(picture.data(), JPEG_DATA);
}

#[test_log::test]
fn v22_other_format() {
	let body = id3v22_frame(b"PIC", &pic_content(b"BMP", 3, &[1, 2, 3]));
	let mut content = id3v2_tag(2, 0, &body);
	content.extend(mpeg_frames());

	let mpeg = MpegFile::read_from(&mut Cursor::new(content), ParseOptions::new()).unwrap();
	let tag = mpeg.id3v2().unwrap();
	assert_eq!(tag.pictures().next().map(|p| p.mime_type.as_str()), Some("image/bmp"));
}

#[test_log::test]
fn v22_bad_format() {
	let body = id3v22_frame(b"PIC", &pic_content(b"PNG", 3, PNG_DATA));
	let mut content = id3v2_tag(2, 0, &body);
	content.extend(mpeg_frames());

	let temp = temp_path(&content, "mp3");
	let mut file = CoverFile::open(temp.path()).unwrap();

	// "webp" doesn't fit in a three character format
	let err = file
		.write_cover(Picture::new(vec![1, 2, 3], "image/webp"))
		.unwrap_err();
	let ErrorKind::Id3v2(id3v2_err) = err.kind() else {
		panic!("Expected an ID3v2 error, got {err:?}");
	};
	assert!(matches!(
		id3v2_err.kind(),
		Id3v2ErrorKind::BadPictureFormat(format) if format == "image/webp"
	));

	assert_eq!(read_path(temp.path()), content);
	assert_eq!(
		file.read_cover().picture().map(Picture::data),
		Some(PNG_DATA)
	);
}

#[test_log::test]
fn unsynchronised_v23_tag() {
	let frame = id3v23_frame(
		b"APIC",
		&apic_content("image/jpeg", 3, &[0xFF, 0xE0, 0x01, 0xFF, 0x00]),
	);

	let mut body = Vec::new();
	for byte in frame {
		body.push(byte);
		if byte == 0xFF {
			body.push(0);
		}
	}

	let mut content = id3v2_tag(3, 0x80, &body);
	content.extend(mpeg_frames());

	let temp = temp_path(&content, "mp3");
	let file = CoverFile::open(temp.path()).unwrap();

	assert_eq!(
		file.read_cover().picture().map(Picture::data),
		Some(&[0xFF, 0xE0, 0x01, 0xFF, 0x00][..])
	);
}
