use super::{Field, XiphComment};
use crate::config::ParsingMode;
use crate::error::{CoverError, ErrorKind, Result};
use crate::flac::FlacPicture;
use crate::macros::{err, try_vec};
use crate::picture::PictureType;

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use data_encoding::BASE64;

/// Parse a Xiph comment from the content of a FLAC `VORBIS_COMMENT` block
pub(crate) fn read_comments(content: &[u8], parse_mode: ParsingMode) -> Result<XiphComment> {
	let data = &mut &content[..];

	let vendor_bytes = read_field(data)?;
	let vendor = match String::from_utf8(vendor_bytes) {
		Ok(vendor) => vendor,
		Err(e) => {
			if parse_mode == ParsingMode::Strict {
				return Err(e.into());
			}

			log::warn!("Xiph comment has an invalid vendor string, replacing it");
			String::from_utf8_lossy(e.as_bytes()).into_owned()
		},
	};

	let number_of_items = data.read_u32::<LittleEndian>()?;

	// Every field needs at least its length
	if u64::from(number_of_items) > (data.len() >> 2) as u64 {
		err!(SizeMismatch);
	}

	let mut comment = XiphComment {
		vendor,
		fields: Vec::with_capacity(number_of_items as usize),
		pictures: Vec::new(),
	};

	let mut legacy_covers = Vec::new();
	// The position of each `COVERARTMIME` field, and its value
	let mut legacy_mimes = Vec::new();

	for _ in 0..number_of_items {
		let field = read_field(data)?;

		// KEY=VALUE
		let Some(separator) = field.iter().position(|b| *b == b'=') else {
			log::warn!("No separator found in field, keeping it as-is");
			comment.fields.push(Field::Raw(field));
			continue;
		};

		let (key, value) = (&field[..separator], &field[separator + 1..]);
		match key {
			k if k.eq_ignore_ascii_case(b"METADATA_BLOCK_PICTURE") => {
				match FlacPicture::from_base64(value, parse_mode) {
					Ok(picture) => comment.pictures.push(picture),
					Err(e) => {
						if parse_mode == ParsingMode::Strict {
							return Err(e);
						}

						log::warn!("Failed to decode Xiph comment picture, discarding field");
					},
				}
			},
			// `COVERART` is an old deprecated image storage format, with the MIME type kept in
			// a separate `COVERARTMIME` field. They're paired up in order.
			//
			// <https://wiki.xiph.org/VorbisComment#Conversion_to_METADATA_BLOCK_PICTURE>
			k if k.eq_ignore_ascii_case(b"COVERART") => match BASE64.decode(value) {
				Ok(data) => {
					log::warn!("Found deprecated `COVERART` field, converting to a picture");
					legacy_covers.push(data);
				},
				Err(_) => {
					if parse_mode == ParsingMode::Strict {
						err!(NotAPicture);
					}

					log::warn!("Failed to decode `COVERART` field, discarding");
				},
			},
			// Kept in place until it's known whether there's a `COVERART` field to pair it with
			k if k.eq_ignore_ascii_case(b"COVERARTMIME") => {
				legacy_mimes.push((
					comment.fields.len(),
					String::from_utf8_lossy(value).into_owned(),
				));
				comment.fields.push(Field::Raw(field.clone()));
			},
			_ => match (std::str::from_utf8(key), std::str::from_utf8(value)) {
				(Ok(key), Ok(value)) => comment
					.fields
					.push(Field::Text(key.to_owned(), value.to_owned())),
				_ => {
					if parse_mode == ParsingMode::Strict {
						return Err(CoverError::new(ErrorKind::TextDecode(
							"Xiph comment field is not valid UTF-8",
						)));
					}

					log::warn!("Non UTF-8 value found, keeping the field as-is");
					comment.fields.push(Field::Raw(field.clone()));
				},
			},
		}
	}

	// Paired MIME types become part of their picture, any extras stay behind as plain fields
	let paired = legacy_covers.len().min(legacy_mimes.len());
	for (index, _) in legacy_mimes[..paired].iter().rev() {
		comment.fields.remove(*index);
	}

	let mut legacy_mimes = legacy_mimes.into_iter().map(|(_, mime)| mime);
	for data in legacy_covers {
		comment.pictures.push(FlacPicture {
			pic_type: PictureType::Other,
			mime_type: legacy_mimes.next().unwrap_or_default(),
			description: String::new(),
			width: 0,
			height: 0,
			color_depth: 0,
			num_colors: 0,
			data,
		});
	}

	Ok(comment)
}

fn read_field(data: &mut &[u8]) -> Result<Vec<u8>> {
	let len = data.read_u32::<LittleEndian>()?;
	if len as usize > data.len() {
		err!(SizeMismatch);
	}

	let mut field = try_vec![0; len as usize];
	data.read_exact(&mut field)?;

	Ok(field)
}
