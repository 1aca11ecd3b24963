use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::{err, try_vec};
use crate::picture::PictureType;
use crate::util::text::utf8_decode;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use data_encoding::BASE64;

// Type, mime length, description length, 4 geometry fields, data length
const MIN_PICTURE_SIZE: usize = 32;

/// A FLAC `METADATA_BLOCK_PICTURE`
///
/// This is the content of a `PICTURE` metadata block, and the (base64 encoded) value of a Xiph
/// comment `METADATA_BLOCK_PICTURE` field.
///
/// Unlike the other containers, this layout stores the picture's dimensions and color depth.
/// Nothing verifies them against the actual image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlacPicture {
	/// The picture type
	pub pic_type: PictureType,
	/// The MIME type, stored exactly as found
	pub mime_type: String,
	/// The picture description
	pub description: String,
	/// The picture's width in pixels
	pub width: u32,
	/// The picture's height in pixels
	pub height: u32,
	/// The picture's color depth in bits per pixel
	pub color_depth: u32,
	/// The number of colors used, for indexed-color pictures (0 otherwise)
	pub num_colors: u32,
	/// The picture data
	pub data: Vec<u8>,
}

impl FlacPicture {
	/// Parse a picture from the raw content of a `PICTURE` block
	///
	/// # Errors
	///
	/// * `content` is too short to hold a picture
	/// * A length field extends past the end of `content`
	/// * The MIME type is not valid UTF-8
	/// * [`ParsingMode::Strict`] and the picture type doesn't fit in a byte
	pub fn parse(content: &[u8], parse_mode: ParsingMode) -> Result<Self> {
		if content.len() < MIN_PICTURE_SIZE {
			err!(NotAPicture);
		}

		let reader = &mut &content[..];

		let pic_ty = reader.read_u32::<BigEndian>()?;

		// ID3v2 APIC uses a single byte for the picture type
		let pic_type = match u8::try_from(pic_ty) {
			Ok(pic_ty) => PictureType::from_u8(pic_ty),
			Err(_) => {
				if parse_mode == ParsingMode::Strict {
					err!(NotAPicture);
				}

				log::warn!("FLAC picture has an out of range type ({pic_ty}), using `Other`");
				PictureType::Other
			},
		};

		let mime_bytes = read_sized(reader)?;
		let mime_type = utf8_decode(mime_bytes)?;

		let description_bytes = read_sized(reader)?;
		let description = match utf8_decode(description_bytes) {
			Ok(description) => description,
			Err(e) => {
				if parse_mode == ParsingMode::Strict {
					return Err(e);
				}

				log::warn!("FLAC picture has an invalid description, discarding it");
				String::new()
			},
		};

		let width = reader.read_u32::<BigEndian>()?;
		let height = reader.read_u32::<BigEndian>()?;
		let color_depth = reader.read_u32::<BigEndian>()?;
		let num_colors = reader.read_u32::<BigEndian>()?;

		let data = read_sized(reader)?;

		Ok(Self {
			pic_type,
			mime_type,
			description,
			width,
			height,
			color_depth,
			num_colors,
			data,
		})
	}

	/// Parse a picture from a base64 encoded Xiph comment value
	///
	/// # Errors
	///
	/// * `value` is not valid base64
	/// * See [`FlacPicture::parse`]
	pub fn from_base64(value: &[u8], parse_mode: ParsingMode) -> Result<Self> {
		let Ok(content) = BASE64.decode(value) else {
			err!(NotAPicture);
		};

		Self::parse(&content, parse_mode)
	}

	/// Encode the picture as the content of a `PICTURE` block
	///
	/// # Errors
	///
	/// Any of the variable-length fields is too large for a `u32` length
	pub fn as_bytes(&self) -> Result<Vec<u8>> {
		let mut bytes = Vec::with_capacity(
			MIN_PICTURE_SIZE + self.mime_type.len() + self.description.len() + self.data.len(),
		);

		bytes.write_u32::<BigEndian>(u32::from(self.pic_type.as_u8()))?;
		write_sized(&mut bytes, self.mime_type.as_bytes())?;
		write_sized(&mut bytes, self.description.as_bytes())?;
		bytes.write_u32::<BigEndian>(self.width)?;
		bytes.write_u32::<BigEndian>(self.height)?;
		bytes.write_u32::<BigEndian>(self.color_depth)?;
		bytes.write_u32::<BigEndian>(self.num_colors)?;
		write_sized(&mut bytes, &self.data)?;

		Ok(bytes)
	}

	/// Encode the picture for a Xiph comment `METADATA_BLOCK_PICTURE` field
	///
	/// # Errors
	///
	/// See [`FlacPicture::as_bytes`]
	pub fn as_base64(&self) -> Result<String> {
		Ok(BASE64.encode(&self.as_bytes()?))
	}
}

fn read_sized(reader: &mut &[u8]) -> Result<Vec<u8>> {
	let len = reader.read_u32::<BigEndian>()? as usize;
	if len > reader.len() {
		err!(SizeMismatch);
	}

	let mut content = try_vec![0; len];
	reader.read_exact(&mut content)?;

	Ok(content)
}

fn write_sized(bytes: &mut Vec<u8>, content: &[u8]) -> Result<()> {
	let Ok(len) = u32::try_from(content.len()) else {
		err!(TooMuchData);
	};

	bytes.write_u32::<BigEndian>(len)?;
	bytes.extend_from_slice(content);

	Ok(())
}
