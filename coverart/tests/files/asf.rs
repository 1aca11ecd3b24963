use crate::util::{
	ASF_AUDIO, ASF_CONTENT_DESCRIPTION_OBJECT, ASF_EXTENDED_CONTENT_DESCRIPTION_OBJECT, JPEG_DATA,
	PNG_DATA, asf, asf_content_description, asf_extended_content_description, asf_file_size,
	asf_object, find, read_path, temp_path, utf16le, wm_picture,
};

use coverart::asf::AsfFile;
use coverart::cover::{CoverFile, PictureSource, ReadStatus};
use coverart::file::{ContainerFamily, TaggedMedia};
use coverart::picture::{Picture, PictureType};

const METADATA_LIBRARY_OBJECT: [u8; 16] = [
	0x94, 0x1C, 0x23, 0x44, 0x98, 0x94, 0xD1, 0x49, 0xA1, 0x41, 0x1D, 0x13, 0x4E, 0x45, 0x70, 0x54,
];

fn asf_file(file: &CoverFile) -> &AsfFile {
	match file.media() {
		TaggedMedia::Asf(asf) => asf,
		other => panic!("Expected an ASF file, got {other:?}"),
	}
}

fn assert_layout_valid(file: &[u8]) {
	assert_eq!(asf_file_size(file), file.len() as u64);
	assert!(file.ends_with(ASF_AUDIO));
}

#[test_log::test]
fn no_attributes() {
	let temp = temp_path(&asf(&[]), "wma");

	let file = CoverFile::open(temp.path()).unwrap();
	assert_eq!(file.family(), ContainerFamily::Asf);
	assert!(asf_file(&file).tag().is_empty());
	assert_eq!(
		file.read_cover().status(),
		ReadStatus::PictureListEmpty(PictureSource::AsfAttribute)
	);
}

#[test_log::test]
fn write_keeps_other_metadata() {
	let content_description = asf_object(
		&ASF_CONTENT_DESCRIPTION_OBJECT,
		&asf_content_description("Title"),
	);
	let extended_content_description = asf_object(
		&ASF_EXTENDED_CONTENT_DESCRIPTION_OBJECT,
		&asf_extended_content_description(&[("WM/AlbumTitle", 0, utf16le("Album"))]),
	);

	let original = asf(&[content_description.clone(), extended_content_description]);
	assert_layout_valid(&original);

	let temp = temp_path(&original, "wma");

	let mut file = CoverFile::open(temp.path()).unwrap();
	assert_eq!(asf_file(&file).tag().len(), 1);
	assert_eq!(
		file.read_cover().status(),
		ReadStatus::PictureListEmpty(PictureSource::AsfAttribute)
	);

	file.write_cover(Picture::new(PNG_DATA.to_vec(), "image/png"))
		.unwrap();

	let written = read_path(temp.path());
	assert!(written.len() > original.len());
	assert_layout_valid(&written);
	assert!(find(&written, &content_description).is_some());
	assert!(find(&written, &utf16le("Album")).is_some());

	let file = CoverFile::open(temp.path()).unwrap();
	assert_eq!(asf_file(&file).tag().len(), 2);

	let picture = file.read_cover().into_picture().unwrap();
	assert_eq!(picture.mime_type(), "image/png");
	assert_eq!(picture.data(), PNG_DATA);
	assert_eq!(picture.geometry(), None);
}

#[test_log::test]
fn new_front_cover_wins() {
	let extended_content_description = asf_object(
		&ASF_EXTENDED_CONTENT_DESCRIPTION_OBJECT,
		&asf_extended_content_description(&[(
			"WM/Picture",
			1,
			wm_picture(3, "image/jpeg", JPEG_DATA),
		)]),
	);

	let temp = temp_path(&asf(&[extended_content_description]), "wma");

	let mut file = CoverFile::open(temp.path()).unwrap();
	let picture = file.read_cover().into_picture().unwrap();
	assert_eq!(picture.mime_type(), "image/jpeg");
	assert_eq!(picture.data(), JPEG_DATA);

	file.write_cover(Picture::new(PNG_DATA.to_vec(), "image/png"))
		.unwrap();
	assert_layout_valid(&read_path(temp.path()));

	let file = CoverFile::open(temp.path()).unwrap();
	let tag = asf_file(&file).tag();
	assert_eq!(tag.pictures().count(), 2);
	assert!(
		tag.pictures()
			.all(|picture| picture.pic_type == PictureType::CoverFront)
	);

	assert_eq!(
		file.read_cover().picture().map(Picture::data),
		Some(PNG_DATA)
	);
}

#[test_log::test]
fn large_picture() {
	let temp = temp_path(&asf(&[]), "wma");

	// Too large for the 16-bit value length of the extended content description
	let data = vec![0x5A; 70_000];

	let mut file = CoverFile::open(temp.path()).unwrap();
	file.write_cover(Picture::new(data.clone(), "image/jpeg"))
		.unwrap();

	let written = read_path(temp.path());
	assert_layout_valid(&written);
	assert!(find(&written, &METADATA_LIBRARY_OBJECT).is_some());

	let file = CoverFile::open(temp.path()).unwrap();
	let picture = file.read_cover().into_picture().unwrap();
	assert_eq!(picture.mime_type(), "image/jpeg");
	assert_eq!(picture.into_data(), data);
}

#[test_log::test]
fn small_cover_after_large_cover() {
	let temp = temp_path(&asf(&[]), "wma");

	let large = vec![0x5A; 70_000];

	let mut file = CoverFile::open(temp.path()).unwrap();
	file.write_cover(Picture::new(large.clone(), "image/jpeg"))
		.unwrap();
	file.write_cover(Picture::new(PNG_DATA.to_vec(), "image/png"))
		.unwrap();
	assert_eq!(
		file.read_cover().picture().map(Picture::mime_type),
		Some("image/png")
	);

	let written = read_path(temp.path());
	assert_layout_valid(&written);
	assert!(find(&written, &ASF_EXTENDED_CONTENT_DESCRIPTION_OBJECT).is_none());

	let file = CoverFile::open(temp.path()).unwrap();
	let tag = asf_file(&file).tag();
	assert_eq!(
		tag.pictures().map(|p| p.data.len()).collect::<Vec<_>>(),
		[large.len(), PNG_DATA.len()]
	);

	let picture = file.read_cover().into_picture().unwrap();
	assert_eq!(picture.mime_type(), "image/png");
	assert_eq!(picture.data(), PNG_DATA);
}
