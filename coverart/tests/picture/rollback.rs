use crate::util::{
	FLAC_PICTURE, JPEG_DATA, PNG_DATA, apic_content, flac, flac_picture, id3v2_tag, id3v23_frame,
	mpeg_frames, read_path, temp_path,
};

use coverart::config::WriteOptions;
use coverart::cover::{CoverFile, ReadStatus};
use coverart::error::ErrorKind;
use coverart::io::{Length, Truncate};
use coverart::picture::Picture;

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

/// A file that can be read, but never written
struct ReadOnly(Cursor<Vec<u8>>);

impl Read for ReadOnly {
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		self.0.read(buf)
	}
}

impl Seek for ReadOnly {
	fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
		self.0.seek(pos)
	}
}

impl Write for ReadOnly {
	fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
		Err(std::io::Error::new(
			std::io::ErrorKind::PermissionDenied,
			"read only",
		))
	}

	fn flush(&mut self) -> std::io::Result<()> {
		Ok(())
	}
}

impl Truncate for ReadOnly {
	type Error = std::io::Error;

	fn truncate(&mut self, _: u64) -> Result<(), Self::Error> {
		Err(std::io::Error::new(
			std::io::ErrorKind::PermissionDenied,
			"read only",
		))
	}
}

impl Length for ReadOnly {
	type Error = std::convert::Infallible;

	fn len(&self) -> Result<u64, Self::Error> {
		Ok(self.0.get_ref().len() as u64)
	}
}

fn tagged_mpeg() -> Vec<u8> {
	let frame = id3v23_frame(b"APIC", &apic_content("image/png", 3, PNG_DATA));
	let mut content = id3v2_tag(3, 0, &frame);
	content.extend(mpeg_frames());
	content
}

#[test_log::test]
fn failed_write_keeps_previous_cover() {
	let content = tagged_mpeg();

	let mut media = coverart::read_from(&mut Cursor::new(content.clone())).unwrap();
	let before = media.clone();

	let mut file = ReadOnly(Cursor::new(content.clone()));
	let err = media
		.write_cover_to(
			&mut file,
			Picture::new(JPEG_DATA.to_vec(), "image/jpeg"),
			WriteOptions::default(),
		)
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Io(_)));

	assert_eq!(media, before);
	assert_eq!(file.0.into_inner(), content);
	assert_eq!(
		media.read_cover().picture().map(Picture::data),
		Some(PNG_DATA)
	);
}

#[test_log::test]
fn missing_file_keeps_previous_cover() {
	let content = flac(&[(
		FLAC_PICTURE,
		flac_picture(3, "image/png", [1, 1, 24], PNG_DATA),
	)]);
	let temp = temp_path(&content, "flac");

	let mut file = CoverFile::open(temp.path()).unwrap();
	std::fs::remove_file(temp.path()).unwrap();

	let err = file
		.write_cover(Picture::new(JPEG_DATA.to_vec(), "image/jpeg"))
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Io(_)));

	let lookup = file.read_cover();
	assert_eq!(lookup.status(), ReadStatus::Found);
	assert_eq!(lookup.picture().map(Picture::data), Some(PNG_DATA));
}

#[test_log::test]
fn later_write_succeeds() {
	let temp = temp_path(&tagged_mpeg(), "mp3");

	let mut file = CoverFile::open(temp.path()).unwrap();

	// Fails before anything is written, the file is untouched
	let mut media = file.media().clone();
	let mut read_only = ReadOnly(Cursor::new(read_path(temp.path())));
	assert!(
		media
			.write_cover_to(
				&mut read_only,
				Picture::new(JPEG_DATA.to_vec(), "image/jpeg"),
				WriteOptions::default(),
			)
			.is_err()
	);
	assert_eq!(&media, file.media());

	file.write_cover(Picture::new(JPEG_DATA.to_vec(), "image/jpeg"))
		.unwrap();

	let file = CoverFile::open(temp.path()).unwrap();
	assert_eq!(
		file.read_cover().picture().map(Picture::data),
		Some(JPEG_DATA)
	);
}
