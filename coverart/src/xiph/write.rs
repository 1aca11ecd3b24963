use super::{Field, XiphComment};
use crate::error::Result;
use crate::macros::err;

use byteorder::{LittleEndian, WriteBytesExt};

const PICTURE_KEY: &str = "METADATA_BLOCK_PICTURE";

/// Encode a Xiph comment as the content of a FLAC `VORBIS_COMMENT` block
///
/// Pictures are always written as `METADATA_BLOCK_PICTURE` fields, after all other fields.
pub(crate) fn create_comments(comment: &XiphComment) -> Result<Vec<u8>> {
	let mut content = Vec::new();
	write_field(&mut content, comment.vendor.as_bytes())?;

	let Ok(count) = u32::try_from(comment.fields.len() + comment.pictures.len()) else {
		err!(TooMuchData);
	};
	content.write_u32::<LittleEndian>(count)?;

	for field in &comment.fields {
		match field {
			Field::Text(key, value) => write_field(&mut content, format!("{key}={value}").as_bytes())?,
			Field::Raw(bytes) => write_field(&mut content, bytes)?,
		}
	}

	for picture in &comment.pictures {
		let field = format!("{PICTURE_KEY}={}", picture.as_base64()?);
		write_field(&mut content, field.as_bytes())?;
	}

	Ok(content)
}

fn write_field(content: &mut Vec<u8>, field: &[u8]) -> Result<()> {
	let Ok(len) = u32::try_from(field.len()) else {
		err!(TooMuchData);
	};

	content.write_u32::<LittleEndian>(len)?;
	content.extend_from_slice(field);

	Ok(())
}
