use crate::error::{CoverError, ErrorKind, Result};
use crate::macros::err;

use std::io::Read;

use byteorder::ReadBytesExt;

/// Errors that can occur while encoding a picture description or MIME type
#[derive(Copy, Clone, Debug)]
pub struct TextEncodingError {
	encoding: TextEncoding,
	valid_up_to: usize,
}

impl TextEncodingError {
	/// The target text encoding
	pub fn encoding(&self) -> TextEncoding {
		self.encoding
	}

	/// The character index up to which the text could be encoded
	pub fn valid_up_to(&self) -> usize {
		self.valid_up_to
	}
}

impl core::fmt::Display for TextEncodingError {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(
			f,
			"text can't be encoded as {} past character {}",
			self.encoding.name(),
			self.valid_up_to
		)
	}
}

impl core::error::Error for TextEncodingError {}

/// The text encoding of an ID3v2 picture description
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from the encoding byte of a frame
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	fn name(self) -> &'static str {
		match self {
			Self::Latin1 => "Latin-1",
			Self::UTF16 => "UTF-16",
			Self::UTF16BE => "UTF-16 BE",
			Self::UTF8 => "UTF-8",
		}
	}

	fn terminator_len(self) -> usize {
		match self {
			Self::Latin1 | Self::UTF8 => 1,
			Self::UTF16 | Self::UTF16BE => 2,
		}
	}

	/// Encode `text`, followed by a null terminator
	pub(crate) fn encode_terminated(self, text: &str) -> std::result::Result<Vec<u8>, TextEncodingError> {
		let mut out = match self {
			Self::Latin1 => latin1_encode(text)?,
			Self::UTF16 => utf16_encode(text, u16::to_le_bytes, true),
			Self::UTF16BE => utf16_encode(text, u16::to_be_bytes, false),
			Self::UTF8 => text.as_bytes().to_vec(),
		};

		out.resize(out.len() + self.terminator_len(), 0);
		Ok(out)
	}
}

/// Read up to (and including) a null terminator
///
/// The terminator isn't part of the returned bytes. If the reader runs out first, everything that
/// was read is returned.
pub(crate) fn read_terminated<R>(reader: &mut R, encoding: TextEncoding) -> Vec<u8>
where
	R: Read,
{
	let mut text_bytes = Vec::new();

	if encoding.terminator_len() == 1 {
		while let Ok(byte) = reader.read_u8() {
			if byte == 0 {
				break;
			}

			text_bytes.push(byte);
		}

		return text_bytes;
	}

	while let (Ok(b1), Ok(b2)) = (reader.read_u8(), reader.read_u8()) {
		if b1 == 0 && b2 == 0 {
			break;
		}

		text_bytes.extend([b1, b2]);
	}

	text_bytes
}

/// Read and decode a null terminated string
pub(crate) fn decode_terminated<R>(reader: &mut R, encoding: TextEncoding) -> Result<String>
where
	R: Read,
{
	let bytes = read_terminated(reader, encoding);
	if bytes.is_empty() {
		return Ok(String::new());
	}

	match encoding {
		TextEncoding::Latin1 => Ok(bytes.iter().map(|c| char::from(*c)).collect()),
		TextEncoding::UTF16 => {
			if bytes.len() % 2 != 0 {
				err!(TextDecode("UTF-16 string has an odd length"));
			}

			match bytes[..] {
				[0xFE, 0xFF, ..] => utf16_decode(&bytes[2..], u16::from_be_bytes),
				[0xFF, 0xFE, ..] => utf16_decode(&bytes[2..], u16::from_le_bytes),
				// Some encoders skip the BOM for little endian strings
				_ => utf16_decode(&bytes, u16::from_le_bytes),
			}
		},
		TextEncoding::UTF16BE => utf16_decode(&bytes, u16::from_be_bytes),
		TextEncoding::UTF8 => utf8_decode(bytes)
			.map_err(|_| CoverError::new(ErrorKind::TextDecode("Expected a UTF-8 string"))),
	}
}

pub(crate) fn latin1_encode(text: &str) -> std::result::Result<Vec<u8>, TextEncodingError> {
	text.chars()
		.enumerate()
		.map(|(index, c)| {
			u8::try_from(c).map_err(|_| TextEncodingError {
				encoding: TextEncoding::Latin1,
				valid_up_to: index,
			})
		})
		.collect()
}

pub(crate) fn utf8_decode(bytes: Vec<u8>) -> Result<String> {
	let mut text = String::from_utf8(bytes)?;
	trim_end_nulls(&mut text);
	Ok(text)
}

/// Decode UTF-16 without a byte order mark
///
/// Any trailing nulls are removed.
pub(crate) fn utf16_decode(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> Result<String> {
	if bytes.len() % 2 != 0 {
		err!(TextDecode("UTF-16 string has an odd length"));
	}

	let units = bytes
		.chunks_exact(2)
		.map(|c| endianness([c[0], c[1]]))
		.collect::<Vec<_>>();

	let mut text = String::from_utf16(&units)
		.map_err(|_| CoverError::new(ErrorKind::TextDecode("Given an invalid UTF-16 string")))?;
	trim_end_nulls(&mut text);

	Ok(text)
}

/// Encode a UTF-16 LE string without a byte order mark, as used by ASF
pub(crate) fn utf16le_encode(text: &str, terminated: bool) -> Vec<u8> {
	let mut encoded = utf16_encode(text, u16::to_le_bytes, false);
	if terminated {
		encoded.extend([0, 0]);
	}

	encoded
}

fn trim_end_nulls(text: &mut String) {
	let new_len = text.trim_end_matches('\0').len();
	text.truncate(new_len);
}

fn utf16_encode(text: &str, endianness: fn(u16) -> [u8; 2], bom: bool) -> Vec<u8> {
	let mut encoded = Vec::new();

	if bom {
		encoded.extend(endianness(0xFEFF));
	}

	for unit in text.encode_utf16() {
		encoded.extend(endianness(unit));
	}

	encoded
}
