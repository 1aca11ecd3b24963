use super::attribute::{Attribute, AttributeObject, read_attributes};
use super::guid::{
	DATA_OBJECT, EXTENDED_CONTENT_DESCRIPTION_OBJECT, Guid, HEADER_EXTENSION_OBJECT, HEADER_OBJECT,
	METADATA_LIBRARY_OBJECT, METADATA_OBJECT,
};
use super::{AsfFile, AsfTag};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::macros::{decode_err, err, parse_mode_choice, try_vec};

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

// GUID + size
pub(super) const OBJECT_HEADER_SIZE: u64 = 24;
// Object header + object count + 2 reserved bytes
pub(super) const HEADER_OBJECT_SIZE: u64 = 30;
// Object header + reserved GUID + reserved u16 + data size
pub(super) const HEADER_EXTENSION_SIZE: u64 = 46;

#[derive(Default)]
struct AttributeLists {
	extended_content_description: Vec<Attribute>,
	metadata: Vec<Attribute>,
	metadata_library: Vec<Attribute>,
}

impl AttributeLists {
	fn read(
		&mut self,
		guid: Guid,
		content: &[u8],
		parse_mode: ParsingMode,
	) -> Result<()> {
		let (object, list) = match guid {
			EXTENDED_CONTENT_DESCRIPTION_OBJECT => (
				AttributeObject::ExtendedContentDescription,
				&mut self.extended_content_description,
			),
			METADATA_OBJECT => (AttributeObject::Metadata, &mut self.metadata),
			METADATA_LIBRARY_OBJECT => (AttributeObject::MetadataLibrary, &mut self.metadata_library),
			_ => return Ok(()),
		};

		if !list.is_empty() {
			parse_mode_choice!(
				parse_mode,
				STRICT: decode_err!(@BAIL Asf, "Found a duplicate attribute object"),
				DEFAULT: {
					log::warn!("ASF: Skipping duplicate {object:?} object");
					return Ok(());
				}
			);
		}

		*list = read_attributes(content, object, parse_mode)?;
		Ok(())
	}

	fn into_tag(self) -> AsfTag {
		let mut attributes = self.extended_content_description;
		attributes.extend(self.metadata);
		attributes.extend(self.metadata_library);

		AsfTag { attributes }
	}
}

fn read_object_header<R>(reader: &mut R, remaining: u64) -> Result<(Guid, u64)>
where
	R: Read,
{
	let guid = Guid::read(reader)?;
	let size = reader.read_u64::<LittleEndian>()?;

	if size < OBJECT_HEADER_SIZE || size > remaining {
		log::error!("ASF: Object {guid} has an invalid size ({size})");
		err!(SizeMismatch);
	}

	Ok((guid, size - OBJECT_HEADER_SIZE))
}

fn read_content<R>(reader: &mut R, len: u64) -> Result<Vec<u8>>
where
	R: Read,
{
	let mut content = try_vec![0; len as usize];
	reader.read_exact(&mut content)?;
	Ok(content)
}

fn read_header_extension<R>(
	reader: &mut R,
	len: u64,
	lists: &mut AttributeLists,
	parse_mode: ParsingMode,
) -> Result<()>
where
	R: Read + Seek,
{
	if len < HEADER_EXTENSION_SIZE - OBJECT_HEADER_SIZE {
		decode_err!(@BAIL Asf, "Header extension object too small");
	}

	// Reserved GUID and u16
	reader.seek(SeekFrom::Current(18))?;

	let data_size = u64::from(reader.read_u32::<LittleEndian>()?);
	if data_size > len - (HEADER_EXTENSION_SIZE - OBJECT_HEADER_SIZE) {
		err!(SizeMismatch);
	}

	let mut remaining = data_size;
	while remaining >= OBJECT_HEADER_SIZE {
		let (guid, content_len) = read_object_header(reader, remaining)?;
		remaining -= content_len + OBJECT_HEADER_SIZE;

		if guid == METADATA_OBJECT || guid == METADATA_LIBRARY_OBJECT {
			let content = read_content(reader, content_len)?;
			lists.read(guid, &content, parse_mode)?;
			continue;
		}

		reader.seek(SeekFrom::Current(content_len as i64))?;
	}

	Ok(())
}

pub(super) fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<AsfFile>
where
	R: Read + Seek,
{
	let parse_mode = parse_options.parsing_mode;

	if Guid::read(reader)? != HEADER_OBJECT {
		decode_err!(@BAIL Asf, "File missing header object");
	}

	let header_size = reader.read_u64::<LittleEndian>()?;
	let object_count = reader.read_u32::<LittleEndian>()?;

	let mut reserved = [0; 2];
	reader.read_exact(&mut reserved)?;

	if header_size < HEADER_OBJECT_SIZE {
		decode_err!(@BAIL Asf, "Header object too small");
	}

	log::debug!("ASF: Header object has {object_count} children");

	let mut lists = AttributeLists::default();

	let mut remaining = header_size - HEADER_OBJECT_SIZE;
	for _ in 0..object_count {
		if remaining < OBJECT_HEADER_SIZE {
			parse_mode_choice!(
				parse_mode,
				STRICT: decode_err!(@BAIL Asf, "Header object ended before all children were read"),
				DEFAULT: break
			);
		}

		let (guid, content_len) = read_object_header(reader, remaining)?;
		remaining -= content_len + OBJECT_HEADER_SIZE;

		match guid {
			HEADER_EXTENSION_OBJECT => {
				let start = reader.stream_position()?;
				read_header_extension(reader, content_len, &mut lists, parse_mode)?;
				reader.seek(SeekFrom::Start(start + content_len))?;
			},
			EXTENDED_CONTENT_DESCRIPTION_OBJECT | METADATA_OBJECT | METADATA_LIBRARY_OBJECT => {
				let content = read_content(reader, content_len)?;
				lists.read(guid, &content, parse_mode)?;
			},
			_ => {
				reader.seek(SeekFrom::Current(content_len as i64))?;
			},
		}
	}

	if remaining > 0 {
		log::warn!("ASF: Skipping {remaining} bytes at the end of the header object");
		reader.seek(SeekFrom::Current(remaining as i64))?;
	}

	match Guid::read(reader) {
		Ok(guid) if guid == DATA_OBJECT => {},
		_ => parse_mode_choice!(
			parse_mode,
			STRICT: decode_err!(@BAIL Asf, "File missing data object"),
			DEFAULT: log::warn!("ASF: Expected a data object after the header")
		),
	}

	Ok(AsfFile {
		tag: lists.into_tag(),
	})
}
