use super::Id3v2Tag;
use super::frame::Frame;
use super::header::Id3v2Version;
use super::synchsafe::SynchsafeInteger;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::macros::err;

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

/// Encode an entire tag, including its header and padding
pub(crate) fn create_tag(tag: &Id3v2Tag, write_options: WriteOptions) -> Result<Vec<u8>> {
	let version = tag.version;

	let mut frames = Vec::new();
	for frame in &tag.frames {
		match frame {
			Frame::Picture(picture) => {
				let content = picture.as_bytes(version)?;
				let id: &[u8] = match version {
					Id3v2Version::V2 => b"PIC",
					_ => b"APIC",
				};
				write_frame(&mut frames, version, id, 0, &content)?;
			},
			Frame::Raw(raw) => write_frame(&mut frames, version, &raw.id, raw.flags, &raw.content)?,
		}
	}

	let padding = write_options.preferred_padding.unwrap_or(0) as usize;
	let size = frames.len() + padding;
	if size > 0x0FFF_FFFF {
		err!(TooMuchData);
	}

	log::debug!(
		"Writing ID3v2.{} tag, frames: {}, padding: {padding}",
		version.major(),
		tag.frames.len()
	);

	let mut out = Vec::with_capacity(10 + size);
	out.write_all(b"ID3")?;
	out.write_all(&[version.major(), 0])?;
	// No unsynchronisation, extended header, or footer
	out.write_u8(0)?;
	out.write_u32::<BigEndian>((size as u32).synch()?)?;
	out.write_all(&frames)?;
	out.resize(out.len() + padding, 0);

	Ok(out)
}

fn write_frame(
	out: &mut Vec<u8>,
	version: Id3v2Version,
	id: &[u8],
	flags: u16,
	content: &[u8],
) -> Result<()> {
	let len = content.len();

	match version {
		Id3v2Version::V2 => {
			if len > 0x00FF_FFFF {
				err!(TooMuchData);
			}

			out.write_all(id)?;
			out.write_u24::<BigEndian>(len as u32)?;
		},
		Id3v2Version::V3 => {
			let Ok(len) = u32::try_from(len) else {
				err!(TooMuchData);
			};

			out.write_all(id)?;
			out.write_u32::<BigEndian>(len)?;
			out.write_u16::<BigEndian>(flags)?;
		},
		Id3v2Version::V4 => {
			let Ok(len) = u32::try_from(len) else {
				err!(TooMuchData);
			};

			out.write_all(id)?;
			out.write_u32::<BigEndian>(len.synch()?)?;
			out.write_u16::<BigEndian>(flags)?;
		},
	}

	out.write_all(content)?;
	Ok(())
}
