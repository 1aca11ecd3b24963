use super::guid::Guid;
use super::picture::AsfPicture;
use crate::config::ParsingMode;
use crate::error::{CoverError, ErrorKind, Result};
use crate::macros::{decode_err, err, parse_mode_choice, try_vec};
use crate::util::text::{utf16_decode, utf16le_encode};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

pub(crate) const PICTURE_ATTRIBUTE: &str = "WM/Picture";

const TYPE_UNICODE: u16 = 0;
const TYPE_BYTES: u16 = 1;
const TYPE_BOOL: u16 = 2;
const TYPE_DWORD: u16 = 3;
const TYPE_QWORD: u16 = 4;
const TYPE_WORD: u16 = 5;
const TYPE_GUID: u16 = 6;

/// The object an attribute list was read from, or will be written to
///
/// The layout of a record differs between them, as does the width of a `BOOL`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum AttributeObject {
	ExtendedContentDescription,
	Metadata,
	MetadataLibrary,
}

impl AttributeObject {
	fn bool_size(self) -> usize {
		match self {
			Self::ExtendedContentDescription => 4,
			Self::Metadata | Self::MetadataLibrary => 2,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttributeValue {
	Unicode(String),
	Bytes(Vec<u8>),
	Bool(bool),
	DWord(u32),
	QWord(u64),
	Word(u16),
	Guid(Guid),
	/// A `WM/Picture` byte array
	Picture(AsfPicture),
}

impl AttributeValue {
	fn type_code(&self) -> u16 {
		match self {
			Self::Unicode(_) => TYPE_UNICODE,
			Self::Bytes(_) | Self::Picture(_) => TYPE_BYTES,
			Self::Bool(_) => TYPE_BOOL,
			Self::DWord(_) => TYPE_DWORD,
			Self::QWord(_) => TYPE_QWORD,
			Self::Word(_) => TYPE_WORD,
			Self::Guid(_) => TYPE_GUID,
		}
	}

	fn parse(name: &str, ty: u16, data: Vec<u8>, object: AttributeObject) -> Result<Self> {
		fn fixed<const N: usize>(data: &[u8]) -> Result<[u8; N]> {
			data.try_into()
				.map_err(|_| CoverError::new(ErrorKind::SizeMismatch))
		}

		let value = match ty {
			TYPE_UNICODE => Self::Unicode(utf16_decode(&data, u16::from_le_bytes)?),
			TYPE_BYTES if name == PICTURE_ATTRIBUTE => Self::Picture(AsfPicture::parse(&data)?),
			TYPE_BYTES => Self::Bytes(data),
			TYPE_BOOL => {
				if data.len() != object.bool_size() {
					err!(SizeMismatch);
				}

				Self::Bool(data.iter().any(|b| *b != 0))
			},
			TYPE_DWORD => Self::DWord(u32::from_le_bytes(fixed(&data)?)),
			TYPE_QWORD => Self::QWord(u64::from_le_bytes(fixed(&data)?)),
			TYPE_WORD => Self::Word(u16::from_le_bytes(fixed(&data)?)),
			TYPE_GUID if object == AttributeObject::MetadataLibrary => {
				Self::Guid(Guid::read(&mut &fixed::<16>(&data)?[..])?)
			},
			_ => decode_err!(@BAIL Asf, "Found an attribute with an invalid data type"),
		};

		Ok(value)
	}

	fn encode(&self, object: AttributeObject) -> Result<Vec<u8>> {
		let bytes = match self {
			Self::Unicode(text) => utf16le_encode(text, true),
			Self::Bytes(bytes) => bytes.clone(),
			Self::Picture(picture) => picture.as_bytes()?,
			Self::Bool(value) => {
				let mut bytes = vec![0; object.bool_size()];
				bytes[0] = u8::from(*value);
				bytes
			},
			Self::DWord(value) => value.to_le_bytes().to_vec(),
			Self::QWord(value) => value.to_le_bytes().to_vec(),
			Self::Word(value) => value.to_le_bytes().to_vec(),
			Self::Guid(guid) => guid.as_bytes().to_vec(),
		};

		Ok(bytes)
	}
}

/// A single named value from one of the ASF metadata objects
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attribute {
	pub(crate) name: String,
	pub(crate) value: AttributeValue,
	pub(crate) stream: u16,
	pub(crate) language: u16,
}

impl Attribute {
	pub(crate) fn new(name: &str, value: AttributeValue) -> Self {
		Self {
			name: name.to_owned(),
			value,
			stream: 0,
			language: 0,
		}
	}

	/// The object this attribute has to be written to
	///
	/// Only attributes describing the whole file, in the default language, with a value that fits
	/// in 16 bits can use the extended content description. Everything else goes to the metadata
	/// library, which is the only object without restrictions.
	pub(crate) fn destination(&self, encoded_len: usize) -> AttributeObject {
		if self.stream == 0
			&& self.language == 0
			&& encoded_len <= u16::MAX as usize
			&& !matches!(self.value, AttributeValue::Guid(_))
		{
			return AttributeObject::ExtendedContentDescription;
		}

		AttributeObject::MetadataLibrary
	}

	pub(crate) fn is_picture(&self) -> bool {
		self.name == PICTURE_ATTRIBUTE && matches!(self.value, AttributeValue::Picture(_))
	}

	pub(crate) fn encoded_value(&self, object: AttributeObject) -> Result<Vec<u8>> {
		self.value.encode(object)
	}
}

fn read_bytes(reader: &mut &[u8], len: usize) -> Result<Vec<u8>> {
	if len > reader.len() {
		err!(SizeMismatch);
	}

	let mut bytes = try_vec![0; len];
	bytes.copy_from_slice(&reader[..len]);
	*reader = &reader[len..];

	Ok(bytes)
}

/// Parse the records of an attribute list object
///
/// `content` is the object's content, following its GUID and size.
pub(crate) fn read_attributes(
	content: &[u8],
	object: AttributeObject,
	parse_mode: ParsingMode,
) -> Result<Vec<Attribute>> {
	let reader = &mut &content[..];

	let count = reader.read_u16::<LittleEndian>()?;
	let mut attributes = Vec::with_capacity(usize::from(count));

	for _ in 0..count {
		let (name, ty, value, stream, language) = match object {
			AttributeObject::ExtendedContentDescription => {
				let name_len = reader.read_u16::<LittleEndian>()?;
				let name = read_bytes(reader, usize::from(name_len))?;
				let ty = reader.read_u16::<LittleEndian>()?;
				let value_len = reader.read_u16::<LittleEndian>()?;
				let value = read_bytes(reader, usize::from(value_len))?;

				(name, ty, value, 0, 0)
			},
			AttributeObject::Metadata | AttributeObject::MetadataLibrary => {
				let language = reader.read_u16::<LittleEndian>()?;
				let stream = reader.read_u16::<LittleEndian>()?;
				let name_len = reader.read_u16::<LittleEndian>()?;
				let ty = reader.read_u16::<LittleEndian>()?;
				let value_len = reader.read_u32::<LittleEndian>()?;
				let name = read_bytes(reader, usize::from(name_len))?;
				let value = read_bytes(reader, value_len as usize)?;

				// Reserved in the metadata object
				let language = if object == AttributeObject::Metadata { 0 } else { language };
				(name, ty, value, stream, language)
			},
		};

		push_attribute(
			&mut attributes,
			&name,
			ty,
			value,
			stream,
			language,
			object,
			parse_mode,
		)?;
	}

	if !reader.is_empty() {
		log::debug!("ASF: Skipping {} bytes after {object:?} records", reader.len());
	}

	Ok(attributes)
}

#[allow(clippy::too_many_arguments)]
fn push_attribute(
	attributes: &mut Vec<Attribute>,
	name: &[u8],
	ty: u16,
	value: Vec<u8>,
	stream: u16,
	language: u16,
	object: AttributeObject,
	parse_mode: ParsingMode,
) -> Result<()> {
	let parsed = utf16_decode(name, u16::from_le_bytes)
		.and_then(|name| AttributeValue::parse(&name, ty, value, object).map(|value| (name, value)));

	match parsed {
		Ok((name, value)) => attributes.push(Attribute {
			name,
			value,
			stream,
			language,
		}),
		Err(e) => {
			parse_mode_choice!(
				parse_mode,
				STRICT: return Err(e),
				DEFAULT: log::warn!("ASF: Discarding malformed attribute: {e}")
			);
		},
	}

	Ok(())
}

/// Create the content of an attribute list object
///
/// The caller is expected to have sorted `attributes` with [`Attribute::destination`].
pub(crate) fn create_attributes(
	attributes: &[(&Attribute, Vec<u8>)],
	object: AttributeObject,
) -> Result<Vec<u8>> {
	let Ok(count) = u16::try_from(attributes.len()) else {
		err!(TooMuchData);
	};

	let mut content = Vec::new();
	content.write_u16::<LittleEndian>(count)?;

	for (attribute, value) in attributes {
		let name = utf16le_encode(&attribute.name, true);
		let Ok(name_len) = u16::try_from(name.len()) else {
			err!(TooMuchData);
		};

		let ty = attribute.value.type_code();

		match object {
			AttributeObject::ExtendedContentDescription => {
				let Ok(value_len) = u16::try_from(value.len()) else {
					err!(TooMuchData);
				};

				content.write_u16::<LittleEndian>(name_len)?;
				content.extend(&name);
				content.write_u16::<LittleEndian>(ty)?;
				content.write_u16::<LittleEndian>(value_len)?;
				content.extend(value);
			},
			AttributeObject::Metadata | AttributeObject::MetadataLibrary => {
				let Ok(value_len) = u32::try_from(value.len()) else {
					err!(TooMuchData);
				};

				let language = if object == AttributeObject::Metadata {
					0
				} else {
					attribute.language
				};

				content.write_u16::<LittleEndian>(language)?;
				content.write_u16::<LittleEndian>(attribute.stream)?;
				content.write_u16::<LittleEndian>(name_len)?;
				content.write_u16::<LittleEndian>(ty)?;
				content.write_u32::<LittleEndian>(value_len)?;
				content.extend(&name);
				content.extend(value);
			},
		}
	}

	Ok(content)
}
