//! Builders for minimal files of every supported type

#![allow(dead_code)]

use std::io::Write as _;
use std::path::Path;

use tempfile::NamedTempFile;

pub const PNG_DATA: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3, 4];
pub const JPEG_DATA: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 5, 6, 7, 8];

/// Write `content` to a temporary file with the extension `ext`
pub fn temp_path(content: &[u8], ext: &str) -> NamedTempFile {
	let mut file = tempfile::Builder::new()
		.suffix(&format!(".{ext}"))
		.tempfile()
		.unwrap();
	file.write_all(content).unwrap();
	file.flush().unwrap();

	file
}

pub fn read_path(path: impl AsRef<Path>) -> Vec<u8> {
	std::fs::read(path).unwrap()
}

pub fn synchsafe(n: u32) -> [u8; 4] {
	[
		((n >> 21) & 0x7F) as u8,
		((n >> 14) & 0x7F) as u8,
		((n >> 7) & 0x7F) as u8,
		(n & 0x7F) as u8,
	]
}

// ---- MPEG ----

/// Three MPEG-1 Layer III frames (128 kbps, 44.1 kHz)
pub fn mpeg_frames() -> Vec<u8> {
	let mut frames = Vec::new();
	for i in 0..3_u8 {
		frames.extend([0xFF, 0xFB, 0x90, 0x64]);
		frames.extend(std::iter::repeat_n(i + 1, 413));
	}

	frames
}

/// An ID3v2 tag with `frames` as its body, and no padding
pub fn id3v2_tag(major: u8, flags: u8, frames: &[u8]) -> Vec<u8> {
	let mut tag = vec![b'I', b'D', b'3', major, 0, flags];
	tag.extend(synchsafe(frames.len() as u32));
	tag.extend(frames);
	tag
}

/// An ID3v2.3 frame
pub fn id3v23_frame(id: &[u8; 4], content: &[u8]) -> Vec<u8> {
	let mut frame = id.to_vec();
	frame.extend((content.len() as u32).to_be_bytes());
	frame.extend([0, 0]);
	frame.extend(content);
	frame
}

/// An ID3v2.2 frame
pub fn id3v22_frame(id: &[u8; 3], content: &[u8]) -> Vec<u8> {
	let mut frame = id.to_vec();
	frame.extend(&(content.len() as u32).to_be_bytes()[1..]);
	frame.extend(content);
	frame
}

/// The content of a Latin-1 `APIC` frame with an empty description
pub fn apic_content(mime: &str, pic_type: u8, data: &[u8]) -> Vec<u8> {
	let mut content = vec![0];
	content.extend(mime.as_bytes());
	content.push(0);
	content.push(pic_type);
	content.push(0);
	content.extend(data);
	content
}

/// The content of a Latin-1 ID3v2.2 `PIC` frame with an empty description
pub fn pic_content(format: &[u8; 3], pic_type: u8, data: &[u8]) -> Vec<u8> {
	let mut content = vec![0];
	content.extend(format);
	content.push(pic_type);
	content.push(0);
	content.extend(data);
	content
}

// ---- FLAC ----

pub const FLAC_STREAMINFO: u8 = 0;
pub const FLAC_APPLICATION: u8 = 2;
pub const FLAC_VORBIS_COMMENT: u8 = 4;
pub const FLAC_PICTURE: u8 = 6;

/// The bytes following the metadata blocks of every FLAC file built here
pub const FLAC_AUDIO: &[u8] = &[0xFF, 0xF8, 0x69, 0x08, 0x00, 0x00, 0xAB, 0xCD];

/// A FLAC file with a STREAMINFO block, followed by `blocks`
pub fn flac(blocks: &[(u8, Vec<u8>)]) -> Vec<u8> {
	let mut file = b"fLaC".to_vec();

	let mut streaminfo = vec![0x10, 0x00, 0x10, 0x00];
	streaminfo.resize(34, 0x42);

	let streaminfo = (FLAC_STREAMINFO, streaminfo);
	let all_blocks = std::iter::once(&streaminfo).chain(blocks);
	let count = blocks.len() + 1;
	for (i, (ty, content)) in all_blocks.enumerate() {
		let last = if i == count - 1 { 0x80 } else { 0 };
		file.push(last | ty);
		file.extend(&(content.len() as u32).to_be_bytes()[1..]);
		file.extend(content);
	}

	file.extend(FLAC_AUDIO);
	file
}

/// The content of a FLAC `PICTURE` block
pub fn flac_picture(pic_type: u32, mime: &str, geometry: [u32; 3], data: &[u8]) -> Vec<u8> {
	let mut content = Vec::new();
	content.extend(pic_type.to_be_bytes());
	content.extend((mime.len() as u32).to_be_bytes());
	content.extend(mime.as_bytes());
	content.extend(0_u32.to_be_bytes());
	for field in geometry {
		content.extend(field.to_be_bytes());
	}
	content.extend(0_u32.to_be_bytes());
	content.extend((data.len() as u32).to_be_bytes());
	content.extend(data);
	content
}

/// The content of a `VORBIS_COMMENT` block
pub fn vorbis_comment(vendor: &str, fields: &[String]) -> Vec<u8> {
	let fields = fields.iter().map(String::as_bytes).collect::<Vec<_>>();
	vorbis_comment_bytes(vendor, &fields)
}

/// The content of a `VORBIS_COMMENT` block, with fields that aren't necessarily valid
pub fn vorbis_comment_bytes(vendor: &str, fields: &[&[u8]]) -> Vec<u8> {
	let mut content = Vec::new();
	content.extend((vendor.len() as u32).to_le_bytes());
	content.extend(vendor.as_bytes());
	content.extend((fields.len() as u32).to_le_bytes());
	for field in fields {
		content.extend((field.len() as u32).to_le_bytes());
		content.extend(*field);
	}
	content
}

/// Find the first block of type `ty`, returning its content
pub fn flac_block(file: &[u8], ty: u8) -> Option<&[u8]> {
	let mut pos = 4;
	loop {
		let header = file.get(pos..pos + 4)?;
		let len = u32::from_be_bytes([0, header[1], header[2], header[3]]) as usize;
		if header[0] & 0x7F == ty {
			return file.get(pos + 4..pos + 4 + len);
		}

		if header[0] & 0x80 != 0 {
			return None;
		}

		pos += 4 + len;
	}
}

// ---- MP4 ----

pub const MP4_AUDIO: &[u8] = &[0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04];

pub fn atom(ident: &[u8; 4], content: &[u8]) -> Vec<u8> {
	let mut atom = ((content.len() + 8) as u32).to_be_bytes().to_vec();
	atom.extend(ident);
	atom.extend(content);
	atom
}

/// A `covr` data atom
pub fn covr_data(type_code: u32, data: &[u8]) -> Vec<u8> {
	let mut content = type_code.to_be_bytes().to_vec();
	content.extend(0_u32.to_be_bytes());
	content.extend(data);
	atom(b"data", &content)
}

/// A `moov.udta.meta` atom, with `ilst_items` as the content of its `ilst`
pub fn udta(ilst_items: &[u8]) -> Vec<u8> {
	let hdlr = {
		let mut content = vec![0; 8];
		content.extend(b"mdir");
		content.extend(b"appl");
		content.extend([0; 9]);
		atom(b"hdlr", &content)
	};

	let mut meta = vec![0; 4];
	meta.extend(hdlr);
	meta.extend(atom(b"ilst", ilst_items));

	atom(b"udta", &atom(b"meta", &meta))
}

/// An MP4 file with a single track, whose `stco` points at the `mdat` payload
///
/// `moov_extra` is appended to the content of `moov`, after the `trak`.
pub fn mp4(moov_extra: &[u8]) -> Vec<u8> {
	let mut ftyp = b"M4A ".to_vec();
	ftyp.extend(0_u32.to_be_bytes());
	ftyp.extend(b"M4A isom");
	let ftyp = atom(b"ftyp", &ftyp);

	let build_moov = |chunk_offset: u32| {
		let mut stco = vec![0; 4];
		stco.extend(1_u32.to_be_bytes());
		stco.extend(chunk_offset.to_be_bytes());

		let stbl = atom(b"stbl", &atom(b"stco", &stco));
		let minf = atom(b"minf", &stbl);
		let mdia = atom(b"mdia", &minf);
		let trak = atom(b"trak", &mdia);

		let mut moov = trak;
		moov.extend(moov_extra);
		atom(b"moov", &moov)
	};

	let moov_len = build_moov(0).len();
	let chunk_offset = (ftyp.len() + moov_len + 8) as u32;

	let mut file = ftyp;
	file.extend(build_moov(chunk_offset));
	file.extend(atom(b"mdat", MP4_AUDIO));
	file
}

/// The first `stco` chunk offset
pub fn mp4_chunk_offset(file: &[u8]) -> u32 {
	let pos = find(file, b"stco").unwrap();
	u32::from_be_bytes(file[pos + 12..pos + 16].try_into().unwrap())
}

/// The offset of the `mdat` payload
pub fn mp4_mdat_payload(file: &[u8]) -> usize {
	find(file, b"mdat").unwrap() + 4
}

pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	haystack.windows(needle.len()).position(|w| w == needle)
}

// ---- ASF ----

pub const ASF_HEADER_OBJECT: [u8; 16] = [
	0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];
pub const ASF_DATA_OBJECT: [u8; 16] = [
	0x36, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];
pub const ASF_FILE_PROPERTIES_OBJECT: [u8; 16] = [
	0xA1, 0xDC, 0xAB, 0x8C, 0x47, 0xA9, 0xCF, 0x11, 0x8E, 0xE4, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];
pub const ASF_HEADER_EXTENSION_OBJECT: [u8; 16] = [
	0xB5, 0x03, 0xBF, 0x5F, 0x2E, 0xA9, 0xCF, 0x11, 0x8E, 0xE3, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];
pub const ASF_HEADER_EXTENSION_RESERVED: [u8; 16] = [
	0x11, 0xD2, 0xD3, 0xAB, 0xBA, 0xA9, 0xCF, 0x11, 0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];
pub const ASF_CONTENT_DESCRIPTION_OBJECT: [u8; 16] = [
	0x33, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];
pub const ASF_EXTENDED_CONTENT_DESCRIPTION_OBJECT: [u8; 16] = [
	0x40, 0xA4, 0xD0, 0xD2, 0x07, 0xE3, 0xD2, 0x11, 0x97, 0xF0, 0x00, 0xA0, 0xC9, 0x5E, 0xA8, 0x50,
];

pub const ASF_AUDIO: &[u8] = &[0x82, 0x00, 0x00, 0x01, 0x5D, 0x5D, 0x5D, 0x5D];

pub fn asf_object(guid: &[u8; 16], content: &[u8]) -> Vec<u8> {
	let mut object = guid.to_vec();
	object.extend(((content.len() + 24) as u64).to_le_bytes());
	object.extend(content);
	object
}

pub fn utf16le(text: &str) -> Vec<u8> {
	text.encode_utf16()
		.chain(std::iter::once(0))
		.flat_map(u16::to_le_bytes)
		.collect()
}

/// The content of a content description object, with only a title
pub fn asf_content_description(title: &str) -> Vec<u8> {
	let title = utf16le(title);

	let mut content = (title.len() as u16).to_le_bytes().to_vec();
	content.extend([0; 8]);
	content.extend(title);
	content
}

/// The raw value of a `WM/Picture` attribute
pub fn wm_picture(pic_type: u8, mime: &str, data: &[u8]) -> Vec<u8> {
	let mut value = vec![pic_type];
	value.extend((data.len() as u32).to_le_bytes());
	value.extend(utf16le(mime));
	value.extend(utf16le(""));
	value.extend(data);
	value
}

/// The content of an extended content description object, with `(name, type, value)` records
pub fn asf_extended_content_description(attributes: &[(&str, u16, Vec<u8>)]) -> Vec<u8> {
	let mut content = (attributes.len() as u16).to_le_bytes().to_vec();
	for (name, ty, value) in attributes {
		let name = utf16le(name);
		content.extend((name.len() as u16).to_le_bytes());
		content.extend(name);
		content.extend(ty.to_le_bytes());
		content.extend((value.len() as u16).to_le_bytes());
		content.extend(value);
	}
	content
}

/// An ASF file with a file properties object, an empty header extension, `extra_objects`, and a
/// data object
pub fn asf(extra_objects: &[Vec<u8>]) -> Vec<u8> {
	let mut file_properties = vec![0; 80];
	file_properties[16..24].copy_from_slice(&[0xFF; 8]);
	let file_properties = asf_object(&ASF_FILE_PROPERTIES_OBJECT, &file_properties);

	let mut header_extension = ASF_HEADER_EXTENSION_RESERVED.to_vec();
	header_extension.extend(6_u16.to_le_bytes());
	header_extension.extend(0_u32.to_le_bytes());
	let header_extension = asf_object(&ASF_HEADER_EXTENSION_OBJECT, &header_extension);

	let mut objects = vec![file_properties, header_extension];
	objects.extend(extra_objects.iter().cloned());

	let header_size = 30 + objects.iter().map(Vec::len).sum::<usize>();

	let mut file = ASF_HEADER_OBJECT.to_vec();
	file.extend((header_size as u64).to_le_bytes());
	file.extend((objects.len() as u32).to_le_bytes());
	file.extend([1, 2]);
	for object in objects {
		file.extend(object);
	}

	let mut data = vec![0; 26];
	data.extend(ASF_AUDIO);
	file.extend(asf_object(&ASF_DATA_OBJECT, &data));

	let file_size = file.len() as u64;
	file[70..78].copy_from_slice(&file_size.to_le_bytes());
	file
}

/// The size stored in the file properties object
pub fn asf_file_size(file: &[u8]) -> u64 {
	u64::from_le_bytes(file[70..78].try_into().unwrap())
}
