use crate::util::{
	JPEG_DATA, MP4_AUDIO, PNG_DATA, atom, covr_data, find, mp4, mp4_chunk_offset,
	mp4_mdat_payload, read_path, temp_path, udta,
};

use coverart::cover::{CoverFile, PictureSource, ReadStatus};
use coverart::file::{ContainerFamily, TaggedMedia};
use coverart::mime::CoverArtFormat;
use coverart::mp4::Mp4File;
use coverart::picture::Picture;

fn mp4_file(file: &CoverFile) -> &Mp4File {
	match file.media() {
		TaggedMedia::Mp4(mp4) => mp4,
		other => panic!("Expected an MP4 file, got {other:?}"),
	}
}

fn title_item() -> Vec<u8> {
	let mut data = vec![0, 0, 0, 1, 0, 0, 0, 0];
	data.extend(b"Title");
	atom(b"\xA9nam", &atom(b"data", &data))
}

fn assert_chunk_offset_valid(file: &[u8]) {
	assert_eq!(mp4_chunk_offset(file) as usize, mp4_mdat_payload(file));
	assert!(file.ends_with(MP4_AUDIO));
}

#[test_log::test]
fn no_metadata() {
	let temp = temp_path(&mp4(&[]), "m4a");

	let file = CoverFile::open(temp.path()).unwrap();
	assert_eq!(file.family(), ContainerFamily::Mp4);
	assert_eq!(mp4_file(&file).ftyp(), "M4A ");
	assert!(mp4_file(&file).ilst().is_none());

	// A missing `covr` item is reported the same as an empty one
	assert_eq!(
		file.read_cover().status(),
		ReadStatus::PictureListEmpty(PictureSource::Mp4CoverArt)
	);
}

#[test_log::test]
fn write_creates_udta() {
	let original = mp4(&[]);
	assert_chunk_offset_valid(&original);

	let temp = temp_path(&original, "m4a");

	let mut file = CoverFile::open(temp.path()).unwrap();
	file.write_cover(Picture::new(PNG_DATA.to_vec(), "image/png"))
		.unwrap();

	let written = read_path(temp.path());
	for ident in [b"udta", b"meta", b"hdlr", b"ilst", b"covr"] {
		assert!(find(&written, ident).is_some());
	}

	// The new atoms sit before `mdat`, so the chunk offset had to move
	assert!(mp4_chunk_offset(&written) > mp4_chunk_offset(&original));
	assert_chunk_offset_valid(&written);

	let file = CoverFile::open(temp.path()).unwrap();
	let picture = file.read_cover().into_picture().unwrap();
	assert_eq!(picture.mime_type(), "image/png");
	assert_eq!(picture.data(), PNG_DATA);
	assert_eq!(picture.geometry(), None);
}

#[test_log::test]
fn cover_is_replaced() {
	let mut items = title_item();
	items.extend(atom(
		b"covr",
		&[covr_data(13, JPEG_DATA), covr_data(14, PNG_DATA)].concat(),
	));

	let temp = temp_path(&mp4(&udta(&items)), "m4a");

	let mut file = CoverFile::open(temp.path()).unwrap();
	assert_eq!(
		mp4_file(&file)
			.ilst()
			.and_then(|ilst| ilst.cover_art())
			.map(<[_]>::len),
		Some(2)
	);

	// There are no picture types in MP4, so the first entry is used
	let picture = file.read_cover().into_picture().unwrap();
	assert_eq!(picture.mime_type(), "image/jpeg");
	assert_eq!(picture.data(), JPEG_DATA);

	file.write_cover(Picture::new(vec![b'G', b'I', b'F'], "image/gif"))
		.unwrap();

	let written = read_path(temp.path());
	assert!(find(&written, &title_item()).is_some());
	assert_chunk_offset_valid(&written);

	let file = CoverFile::open(temp.path()).unwrap();
	let ilst = mp4_file(&file).ilst().unwrap();
	assert_eq!(ilst.len(), 2);
	assert_eq!(ilst.cover_art().map(<[_]>::len), Some(1));

	let picture = file.read_cover().into_picture().unwrap();
	assert_eq!(picture.mime_type(), "image/gif");
	assert_eq!(picture.data(), b"GIF");
}

#[test_log::test]
fn known_formats() {
	let temp = temp_path(&mp4(&[]), "m4a");

	for format in [
		CoverArtFormat::Jpeg,
		CoverArtFormat::Png,
		CoverArtFormat::Bmp,
		CoverArtFormat::Gif,
	] {
		let mut file = CoverFile::open(temp.path()).unwrap();
		file.write_cover(Picture::new(vec![1, 2, 3], format.as_mime()))
			.unwrap();

		let written = read_path(temp.path());
		let covr = find(&written, b"covr").unwrap();
		assert_eq!(&written[covr + 8..covr + 12], b"data");
		assert_eq!(
			&written[covr + 12..covr + 16],
			&format.as_data_type().to_be_bytes()
		);
		assert_chunk_offset_valid(&written);

		let file = CoverFile::open(temp.path()).unwrap();
		assert_eq!(
			file.read_cover().picture().map(Picture::mime_type),
			Some(format.as_mime())
		);
	}
}

#[test_log::test]
fn unknown_format() {
	let temp = temp_path(&mp4(&[]), "m4a");

	let mut file = CoverFile::open(temp.path()).unwrap();
	file.write_cover(Picture::new(vec![1, 2, 3], "image/webp"))
		.unwrap();

	let written = read_path(temp.path());
	let covr = find(&written, b"covr").unwrap();
	assert_eq!(&written[covr + 12..covr + 16], &[0, 0, 0, 0]);

	// The MIME type can't be recovered
	let file = CoverFile::open(temp.path()).unwrap();
	let picture = file.read_cover().into_picture().unwrap();
	assert_eq!(picture.mime_type(), "");
	assert_eq!(picture.data(), &[1, 2, 3]);
}
