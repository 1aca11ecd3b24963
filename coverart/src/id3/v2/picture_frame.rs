use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::header::Id3v2Version;
use crate::macros::err;
use crate::picture::PictureType;
use crate::util::text::{TextEncoding, decode_terminated, latin1_encode};

use std::io::{Read, Write as _};

use byteorder::{ReadBytesExt as _, WriteBytesExt as _};

/// An `APIC` frame (`PIC` in ID3v2.2)
///
/// The MIME type is kept exactly as stored. In ID3v2.2 tags, the three character image format is
/// converted to and from a MIME type, see [`AttachedPictureFrame::mime_type`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttachedPictureFrame {
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// The picture's MIME type
	///
	/// In ID3v2.2, `JPG` and `PNG` are read as `image/jpeg` and `image/png`. Any other format
	/// `XYZ` is read as `image/xyz`.
	pub mime_type: String,
	/// The picture type
	pub pic_type: PictureType,
	/// The picture description
	pub description: String,
	/// The picture data
	pub data: Vec<u8>,
}

impl AttachedPictureFrame {
	/// Create a new `AttachedPictureFrame` with an empty, Latin-1 description
	pub fn new(pic_type: PictureType, mime_type: String, data: Vec<u8>) -> Self {
		Self {
			encoding: TextEncoding::Latin1,
			mime_type,
			pic_type,
			description: String::new(),
			data,
		}
	}

	/// Parse the content of an `APIC`/`PIC` frame
	///
	/// NOTE: `reader` must only contain the (already decompressed) frame content
	pub(crate) fn parse<R>(reader: &mut R, version: Id3v2Version) -> Result<Self>
	where
		R: Read,
	{
		let Some(encoding) = TextEncoding::from_u8(reader.read_u8()?) else {
			err!(NotAPicture);
		};

		let mime_type;
		if version == Id3v2Version::V2 {
			if !matches!(encoding, TextEncoding::Latin1 | TextEncoding::UTF16) {
				return Err(Id3v2Error::new(Id3v2ErrorKind::V2InvalidTextEncoding).into());
			}

			let mut format = [0; 3];
			reader.read_exact(&mut format)?;

			mime_type = v22_format_to_mime(format);
		} else {
			mime_type = decode_terminated(reader, TextEncoding::Latin1)?;
		}

		let pic_type = PictureType::from_u8(reader.read_u8()?);

		let description = decode_terminated(reader, encoding)?;

		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		Ok(Self {
			encoding,
			mime_type,
			pic_type,
			description,
			data,
		})
	}

	/// Encode the frame content for the given tag version
	pub(crate) fn as_bytes(&self, version: Id3v2Version) -> Result<Vec<u8>> {
		let encoding = match (version, self.encoding) {
			(Id3v2Version::V4, encoding) => encoding,
			// v2.2 and v2.3 only know about Latin-1 and UTF-16
			(_, TextEncoding::UTF8 | TextEncoding::UTF16BE) => TextEncoding::UTF16,
			(_, encoding) => encoding,
		};

		let mut data = vec![encoding as u8];

		if version == Id3v2Version::V2 {
			data.write_all(&mime_to_v22_format(&self.mime_type)?)?;
		} else {
			data.write_all(&latin1_encode(&self.mime_type)?)?;
			data.write_u8(0)?;
		}

		data.write_u8(self.pic_type.as_u8())?;
		data.write_all(&encoding.encode_terminated(&self.description)?)?;
		data.write_all(&self.data)?;

		Ok(data)
	}
}

fn v22_format_to_mime(format: [u8; 3]) -> String {
	match &format {
		b"JPG" => String::from("image/jpeg"),
		b"PNG" => String::from("image/png"),
		_ => {
			let format = String::from_utf8_lossy(&format).to_ascii_lowercase();
			format!("image/{}", format.trim_end_matches('\0'))
		},
	}
}

pub(crate) fn mime_to_v22_format(mime_type: &str) -> Result<[u8; 3]> {
	match mime_type {
		"image/jpeg" => return Ok(*b"JPG"),
		"image/png" => return Ok(*b"PNG"),
		_ => {},
	}

	if let Some(subtype) = mime_type.strip_prefix("image/") {
		if let [a, b, c] = subtype.as_bytes() {
			if subtype.is_ascii() {
				return Ok([
					a.to_ascii_uppercase(),
					b.to_ascii_uppercase(),
					c.to_ascii_uppercase(),
				]);
			}
		}
	}

	Err(Id3v2Error::new(Id3v2ErrorKind::BadPictureFormat(mime_type.to_owned())).into())
}
