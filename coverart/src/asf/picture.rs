use crate::error::Result;
use crate::macros::{err, try_vec};
use crate::picture::PictureType;
use crate::util::text::{TextEncoding, read_terminated, utf16_decode, utf16le_encode};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

// Type, data length, and two empty terminated strings
const MIN_PICTURE_SIZE: usize = 9;

/// The value of an ASF `WM/Picture` attribute
///
/// The MIME type and description are stored as null-terminated UTF-16 LE strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsfPicture {
	/// The picture type
	pub pic_type: PictureType,
	/// The MIME type, stored exactly as found
	pub mime_type: String,
	/// The picture description
	pub description: String,
	/// The picture data
	pub data: Vec<u8>,
}

impl AsfPicture {
	/// Create a new `AsfPicture` with an empty description
	pub fn new<M>(pic_type: PictureType, mime_type: M, data: Vec<u8>) -> Self
	where
		M: Into<String>,
	{
		Self {
			pic_type,
			mime_type: mime_type.into(),
			description: String::new(),
			data,
		}
	}

	/// Parse an `AsfPicture` from the raw value of a `WM/Picture` attribute
	///
	/// # Errors
	///
	/// * `content` is too short to hold a picture
	/// * Either string is not valid UTF-16
	/// * The data length extends past the end of `content`
	pub fn parse(content: &[u8]) -> Result<Self> {
		if content.len() < MIN_PICTURE_SIZE {
			err!(NotAPicture);
		}

		let reader = &mut &content[..];

		let pic_type = PictureType::from_u8(reader.read_u8()?);
		let data_len = reader.read_u32::<LittleEndian>()? as usize;

		let mime_type = utf16_decode(
			&read_terminated(reader, TextEncoding::UTF16),
			u16::from_le_bytes,
		)?;
		let description = utf16_decode(
			&read_terminated(reader, TextEncoding::UTF16),
			u16::from_le_bytes,
		)?;

		if data_len > reader.len() {
			err!(SizeMismatch);
		}

		if data_len < reader.len() {
			log::warn!(
				"ASF: Found {} trailing bytes after `WM/Picture` data",
				reader.len() - data_len
			);
		}

		let mut data = try_vec![0; data_len];
		data.copy_from_slice(&reader[..data_len]);

		Ok(Self {
			pic_type,
			mime_type,
			description,
			data,
		})
	}

	/// Convert the picture to the raw value of a `WM/Picture` attribute
	///
	/// # Errors
	///
	/// The picture data is larger than [`u32::MAX`] bytes
	pub fn as_bytes(&self) -> Result<Vec<u8>> {
		let Ok(data_len) = u32::try_from(self.data.len()) else {
			err!(TooMuchData);
		};

		let mime_type = utf16le_encode(&self.mime_type, true);
		let description = utf16le_encode(&self.description, true);

		let mut content =
			Vec::with_capacity(5 + mime_type.len() + description.len() + self.data.len());
		content.write_u8(self.pic_type.as_u8())?;
		content.write_u32::<LittleEndian>(data_len)?;
		content.extend(mime_type);
		content.extend(description);
		content.extend(&self.data);

		Ok(content)
	}
}
