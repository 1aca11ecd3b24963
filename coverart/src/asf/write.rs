use super::AsfTag;
use super::attribute::{AttributeObject, create_attributes};
use super::guid::{
	EXTENDED_CONTENT_DESCRIPTION_OBJECT, FILE_PROPERTIES_OBJECT, Guid, HEADER_EXTENSION_OBJECT,
	HEADER_EXTENSION_RESERVED, HEADER_OBJECT, METADATA_LIBRARY_OBJECT, METADATA_OBJECT,
};
use super::read::{HEADER_EXTENSION_SIZE, HEADER_OBJECT_SIZE, OBJECT_HEADER_SIZE};
use crate::error::{CoverError, Result};
use crate::macros::{encode_err, err};
use crate::util::io::{FileLike, Length, Truncate, overwrite_all, read_all};

use std::borrow::Cow;
use std::io::Read;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};

// Object header + file ID GUID
const FILE_SIZE_OFFSET: usize = 40;

struct Object<'a> {
	guid: Guid,
	bytes: Cow<'a, [u8]>,
}

fn read_objects(mut data: &[u8], count: Option<u32>) -> Result<Vec<Object<'_>>> {
	let mut objects = Vec::new();

	while data.len() >= OBJECT_HEADER_SIZE as usize {
		if count.is_some_and(|count| objects.len() == count as usize) {
			break;
		}

		let reader = &mut &data[..];
		let guid = Guid::read(reader)?;
		let size = reader.read_u64::<LittleEndian>()?;

		if size < OBJECT_HEADER_SIZE || size > data.len() as u64 {
			err!(SizeMismatch);
		}

		let (object, rest) = data.split_at(size as usize);
		objects.push(Object {
			guid,
			bytes: Cow::Borrowed(object),
		});
		data = rest;
	}

	Ok(objects)
}

fn create_object(guid: Guid, content: &[u8]) -> Result<Vec<u8>> {
	let mut object = Vec::with_capacity(OBJECT_HEADER_SIZE as usize + content.len());
	object.extend(guid.as_bytes());
	object.write_u64::<LittleEndian>(OBJECT_HEADER_SIZE + content.len() as u64)?;
	object.extend(content);

	Ok(object)
}

fn create_header_extension(children: &[Object<'_>]) -> Result<Vec<u8>> {
	let data_size: usize = children.iter().map(|child| child.bytes.len()).sum();
	let Ok(data_size) = u32::try_from(data_size) else {
		err!(TooMuchData);
	};

	let mut content =
		Vec::with_capacity((HEADER_EXTENSION_SIZE - OBJECT_HEADER_SIZE) as usize + data_size as usize);
	content.extend(HEADER_EXTENSION_RESERVED.as_bytes());
	content.write_u16::<LittleEndian>(6)?;
	content.write_u32::<LittleEndian>(data_size)?;
	for child in children {
		content.extend(child.bytes.iter());
	}

	create_object(HEADER_EXTENSION_OBJECT, &content)
}

// Rebuilds a header extension without its metadata objects, appending `library` if provided
fn rebuild_header_extension(extension: &[u8], library: Option<&[u8]>) -> Result<Vec<u8>> {
	if extension.len() < HEADER_EXTENSION_SIZE as usize {
		encode_err!(@BAIL Asf, "Header extension object too small");
	}

	let data_size =
		LittleEndian::read_u32(&extension[HEADER_EXTENSION_SIZE as usize - 4..]) as usize;
	let Some(data) = extension[HEADER_EXTENSION_SIZE as usize..].get(..data_size) else {
		err!(SizeMismatch);
	};

	let mut children = read_objects(data, None)?;
	children.retain(|child| child.guid != METADATA_OBJECT && child.guid != METADATA_LIBRARY_OBJECT);

	if let Some(library) = library {
		children.push(Object {
			guid: METADATA_LIBRARY_OBJECT,
			bytes: Cow::Borrowed(library),
		});
	}

	create_header_extension(&children)
}

/// Encode the tag's attributes, split between the extended content description and the metadata
/// library
///
/// Pictures are never split up. If any one of them needs the metadata library, they all go
/// there, so they are read back in the order they were added.
fn create_attribute_objects(tag: &AsfTag) -> Result<(Option<Vec<u8>>, Option<Vec<u8>>)> {
	let mut encoded = Vec::with_capacity(tag.attributes.len());
	for attribute in &tag.attributes {
		let value = attribute.encoded_value(AttributeObject::ExtendedContentDescription)?;
		let destination = attribute.destination(value.len());
		encoded.push((attribute, value, destination));
	}

	let pictures_in_library = encoded.iter().any(|(attribute, _, destination)| {
		attribute.is_picture() && *destination == AttributeObject::MetadataLibrary
	});

	let mut extended_content_description = Vec::new();
	let mut metadata_library = Vec::new();

	for (attribute, value, destination) in encoded {
		if destination == AttributeObject::ExtendedContentDescription
			&& !(pictures_in_library && attribute.is_picture())
		{
			extended_content_description.push((attribute, value));
			continue;
		}

		let value = attribute.encoded_value(AttributeObject::MetadataLibrary)?;
		metadata_library.push((attribute, value));
	}

	let extended_content_description = if extended_content_description.is_empty() {
		None
	} else {
		let content = create_attributes(
			&extended_content_description,
			AttributeObject::ExtendedContentDescription,
		)?;
		Some(create_object(EXTENDED_CONTENT_DESCRIPTION_OBJECT, &content)?)
	};

	let metadata_library = if metadata_library.is_empty() {
		None
	} else {
		let content = create_attributes(&metadata_library, AttributeObject::MetadataLibrary)?;
		Some(create_object(METADATA_LIBRARY_OBJECT, &content)?)
	};

	Ok((extended_content_description, metadata_library))
}

pub(super) fn write_to<F>(file: &mut F, tag: &AsfTag) -> Result<()>
where
	F: FileLike,
	CoverError: From<<F as Truncate>::Error>,
	CoverError: From<<F as Length>::Error>,
{
	let mut contents = read_all(file)?;

	let reader = &mut &contents[..];
	if Guid::read(reader)? != HEADER_OBJECT {
		encode_err!(@BAIL Asf, "File missing header object");
	}

	let header_size = reader.read_u64::<LittleEndian>()?;
	let object_count = reader.read_u32::<LittleEndian>()?;
	let mut reserved = [0; 2];
	reader.read_exact(&mut reserved)?;

	if header_size < HEADER_OBJECT_SIZE || header_size > contents.len() as u64 {
		encode_err!(@BAIL Asf, "Header object has an invalid size");
	}

	let header_size = header_size as usize;
	let objects = read_objects(
		&contents[HEADER_OBJECT_SIZE as usize..header_size],
		Some(object_count),
	)?;

	let (mut extended_content_description, mut metadata_library) =
		create_attribute_objects(tag)?;

	let mut new_objects = Vec::with_capacity(objects.len() + 2);
	let mut file_properties_index = None;
	let mut ecd_replaced = false;

	for object in objects {
		match object.guid {
			EXTENDED_CONTENT_DESCRIPTION_OBJECT => {
				if ecd_replaced {
					continue;
				}

				ecd_replaced = true;
				if let Some(ecd) = extended_content_description.take() {
					new_objects.push(Cow::Owned(ecd));
				}
			},
			// Metadata objects are only expected in the header extension, but they are dropped
			// wherever they appear
			METADATA_OBJECT | METADATA_LIBRARY_OBJECT => {},
			HEADER_EXTENSION_OBJECT => {
				let library = metadata_library.take();
				new_objects.push(Cow::Owned(rebuild_header_extension(
					&object.bytes,
					library.as_deref(),
				)?));
			},
			FILE_PROPERTIES_OBJECT => {
				file_properties_index = Some(new_objects.len());
				new_objects.push(object.bytes);
			},
			_ => new_objects.push(object.bytes),
		}
	}

	if let Some(ecd) = extended_content_description {
		log::debug!("ASF: Creating a new extended content description object");
		new_objects.push(Cow::Owned(ecd));
	}

	if let Some(library) = metadata_library {
		log::debug!("ASF: Creating a new header extension object");
		let library = Object {
			guid: METADATA_LIBRARY_OBJECT,
			bytes: Cow::Owned(library),
		};
		new_objects.push(Cow::Owned(create_header_extension(&[library])?));
	}

	let new_header_size =
		HEADER_OBJECT_SIZE as usize + new_objects.iter().map(|o| o.len()).sum::<usize>();
	let new_file_size = (contents.len() - header_size + new_header_size) as u64;

	if let Some(index) = file_properties_index {
		if let Some(file_size) = new_objects[index]
			.to_mut()
			.get_mut(FILE_SIZE_OFFSET..FILE_SIZE_OFFSET + 8)
		{
			LittleEndian::write_u64(file_size, new_file_size);
		}
	} else {
		log::warn!("ASF: No file properties object found, unable to update the file size");
	}

	let Ok(new_object_count) = u32::try_from(new_objects.len()) else {
		err!(TooMuchData);
	};

	let mut header = Vec::with_capacity(new_header_size);
	header.extend(HEADER_OBJECT.as_bytes());
	header.write_u64::<LittleEndian>(new_header_size as u64)?;
	header.write_u32::<LittleEndian>(new_object_count)?;
	header.extend(reserved);
	for object in &new_objects {
		header.extend(object.iter());
	}

	drop(new_objects);
	contents.splice(..header_size, header);

	overwrite_all(file, &contents)
}
