use crate::util::{
	FLAC_APPLICATION, FLAC_AUDIO, FLAC_PICTURE, FLAC_VORBIS_COMMENT, JPEG_DATA, PNG_DATA,
	apic_content, flac, flac_block, flac_picture, id3v2_tag, id3v23_frame, read_path, temp_path,
	vorbis_comment, vorbis_comment_bytes,
};

use coverart::config::{ParseOptions, WriteOptions};
use coverart::cover::{CoverFile, PictureSource, ReadStatus};
use coverart::file::{ContainerFamily, TaggedMedia};
use coverart::flac::FlacFile;
use coverart::picture::{Picture, PictureGeometry};

use data_encoding::BASE64;

fn flac_file(file: &CoverFile) -> &FlacFile {
	match file.media() {
		TaggedMedia::Flac(flac) => flac,
		other => panic!("Expected a FLAC file, got {other:?}"),
	}
}

fn xiph_picture_field(content: &[u8]) -> String {
	format!("METADATA_BLOCK_PICTURE={}", BASE64.encode(content))
}

#[test_log::test]
fn picture_list_absent() {
	let temp = temp_path(&flac(&[]), "flac");

	let file = CoverFile::open(temp.path()).unwrap();
	assert_eq!(file.family(), ContainerFamily::Flac);
	assert_eq!(
		file.read_cover().status(),
		ReadStatus::PictureListAbsent(ContainerFamily::Flac)
	);
}

#[test_log::test]
fn picture_blocks_keep_geometry() {
	let content = flac(&[
		(FLAC_APPLICATION, b"test".to_vec()),
		(
			FLAC_PICTURE,
			flac_picture(3, "image/png", [16, 16, 24], PNG_DATA),
		),
	]);
	let temp = temp_path(&content, "flac");

	let mut file = CoverFile::open(temp.path()).unwrap();
	let picture = file.read_cover().into_picture().unwrap();
	assert_eq!(picture.data(), PNG_DATA);
	assert_eq!(
		picture.geometry(),
		Some(PictureGeometry {
			width: 16,
			height: 16,
			color_depth: 24,
		})
	);

	let geometry = PictureGeometry {
		width: 300,
		height: 200,
		color_depth: 32,
	};
	file.write_cover(Picture::new(JPEG_DATA.to_vec(), "image/jpeg").with_geometry(geometry))
		.unwrap();

	let written = read_path(temp.path());
	assert_eq!(flac_block(&written, FLAC_APPLICATION), Some(&b"test"[..]));
	assert!(written.ends_with(FLAC_AUDIO));

	let file = CoverFile::open(temp.path()).unwrap();
	assert_eq!(flac_file(&file).pictures().len(), 2);

	let picture = file.read_cover().into_picture().unwrap();
	assert_eq!(picture.mime_type(), "image/jpeg");
	assert_eq!(picture.data(), JPEG_DATA);
	assert_eq!(picture.geometry(), Some(geometry));
}

#[test_log::test]
fn picture_without_geometry_is_written_as_zero() {
	let temp = temp_path(&flac(&[]), "flac");

	let mut file = CoverFile::open(temp.path()).unwrap();
	file.write_cover(Picture::new(PNG_DATA.to_vec(), "image/png"))
		.unwrap();

	let written = read_path(temp.path());
	// The description is always "Front Cover"
	let mut expected = 3_u32.to_be_bytes().to_vec();
	expected.extend(9_u32.to_be_bytes());
	expected.extend(b"image/png");
	expected.extend(11_u32.to_be_bytes());
	expected.extend(b"Front Cover");
	expected.extend([0; 16]);
	expected.extend((PNG_DATA.len() as u32).to_be_bytes());
	expected.extend(PNG_DATA);

	assert_eq!(flac_block(&written, FLAC_PICTURE), Some(expected.as_slice()));

	let file = CoverFile::open(temp.path()).unwrap();
	let lookup = file.read_cover();
	assert_eq!(lookup.status(), ReadStatus::Found);
	assert_eq!(
		lookup.picture().and_then(Picture::geometry),
		Some(PictureGeometry::default())
	);
}

#[test_log::test]
fn xiph_comment_pictures() {
	let fields = [
		String::from("TITLE=Foo"),
		xiph_picture_field(&flac_picture(3, "image/png", [16, 16, 24], PNG_DATA)),
	];
	let content = flac(&[(FLAC_VORBIS_COMMENT, vorbis_comment("vendor", &fields))]);
	let temp = temp_path(&content, "flac");

	let file = CoverFile::open(temp.path()).unwrap();
	let lookup = file.read_cover();
	assert_eq!(lookup.status(), ReadStatus::Found);

	let picture = lookup.into_picture().unwrap();
	assert_eq!(picture.data(), PNG_DATA);
	// Only picture blocks report their geometry
	assert_eq!(picture.geometry(), None);
}

#[test_log::test]
fn write_to_xiph_comment() {
	let fields = [String::from("TITLE=Foo")];
	let content = flac(&[(FLAC_VORBIS_COMMENT, vorbis_comment("vendor", &fields))]);
	let temp = temp_path(&content, "flac");

	let mut file = CoverFile::open_with(
		temp.path(),
		ParseOptions::new(),
		WriteOptions::new().use_flac_picture_blocks(false),
	)
	.unwrap();
	assert_eq!(
		file.read_cover().status(),
		ReadStatus::PictureListEmpty(PictureSource::XiphComment)
	);

	file.write_cover(Picture::new(JPEG_DATA.to_vec(), "image/jpeg"))
		.unwrap();

	let written = read_path(temp.path());
	assert_eq!(flac_block(&written, FLAC_PICTURE), None);

	let comment = flac_block(&written, FLAC_VORBIS_COMMENT).unwrap();
	assert!(comment.windows(9).any(|w| w == b"TITLE=Foo"));
	assert!(
		comment
			.windows(23)
			.any(|w| w == b"METADATA_BLOCK_PICTURE=")
	);

	let file = CoverFile::open(temp.path()).unwrap();
	let flac = flac_file(&file);
	assert!(flac.pictures().is_empty());
	assert_eq!(flac.xiph_comment().unwrap().vendor(), "vendor");
	assert_eq!(
		file.read_cover().picture().map(Picture::data),
		Some(JPEG_DATA)
	);
}

#[test_log::test]
fn write_keeps_invalid_xiph_fields() {
	let fields: [&[u8]; 4] = [
		b"TITLE=Foo",
		b"no separator",
		b"ARTIST=\xFF\xFE",
		b"COVERARTMIME=image/png",
	];
	let original = vorbis_comment_bytes("vendor", &fields);
	let content = flac(&[(FLAC_VORBIS_COMMENT, original.clone())]);
	let temp = temp_path(&content, "flac");

	let mut file = CoverFile::open_with(
		temp.path(),
		ParseOptions::new(),
		WriteOptions::new().use_flac_picture_blocks(false),
	)
	.unwrap();
	file.write_cover(Picture::new(JPEG_DATA.to_vec(), "image/jpeg"))
		.unwrap();

	// Vendor (4 + 6), then the field count
	let written = read_path(temp.path());
	let comment = flac_block(&written, FLAC_VORBIS_COMMENT).unwrap();
	assert_eq!(&comment[..10], &original[..10]);
	assert_eq!(&comment[10..14], &5_u32.to_le_bytes());
	assert_eq!(&comment[14..original.len()], &original[14..]);

	let file = CoverFile::open(temp.path()).unwrap();
	let comment = flac_file(&file).xiph_comment().unwrap();
	assert_eq!(comment.items().collect::<Vec<_>>(), [("TITLE", "Foo")]);
	assert_eq!(
		file.read_cover().picture().map(Picture::data),
		Some(JPEG_DATA)
	);
}

#[test_log::test]
fn legacy_coverart_fields() {
	let fields = [
		format!("COVERART={}", BASE64.encode(JPEG_DATA)),
		String::from("COVERARTMIME=image/jpeg"),
	];
	let content = flac(&[(FLAC_VORBIS_COMMENT, vorbis_comment("vendor", &fields))]);
	let temp = temp_path(&content, "flac");

	let file = CoverFile::open(temp.path()).unwrap();
	let picture = file.read_cover().into_picture().unwrap();
	assert_eq!(picture.mime_type(), "image/jpeg");
	assert_eq!(picture.data(), JPEG_DATA);
}

#[test_log::test]
fn leading_id3v2_tag() {
	let frame = id3v23_frame(b"APIC", &apic_content("image/png", 3, PNG_DATA));
	let mut content = id3v2_tag(3, 0, &frame);
	content.extend(flac(&[]));

	let temp = temp_path(&content, "flac");

	let mut file = CoverFile::open(temp.path()).unwrap();
	assert!(flac_file(&file).id3v2().is_some());
	assert_eq!(
		file.read_cover().picture().map(Picture::data),
		Some(PNG_DATA)
	);

	file.write_cover(Picture::new(JPEG_DATA.to_vec(), "image/jpeg"))
		.unwrap();

	let written = read_path(temp.path());
	assert!(written.starts_with(b"ID3\x03"));
	assert!(written.ends_with(FLAC_AUDIO));

	// The ID3v2 tag is still used, no picture block was created
	let file = CoverFile::open(temp.path()).unwrap();
	let flac = flac_file(&file);
	assert!(flac.pictures().is_empty());
	assert_eq!(flac.id3v2().unwrap().pictures().count(), 2);
	assert_eq!(
		file.read_cover().picture().map(Picture::data),
		Some(JPEG_DATA)
	);
}

#[test_log::test]
fn picture_blocks_beat_id3v2() {
	let frame = id3v23_frame(b"APIC", &apic_content("image/png", 3, PNG_DATA));
	let mut content = id3v2_tag(3, 0, &frame);
	content.extend(flac(&[(
		FLAC_PICTURE,
		flac_picture(3, "image/jpeg", [0, 0, 0], JPEG_DATA),
	)]));

	let temp = temp_path(&content, "flac");

	let file = CoverFile::open(temp.path()).unwrap();
	assert_eq!(
		file.read_cover().picture().map(Picture::data),
		Some(JPEG_DATA)
	);
}
