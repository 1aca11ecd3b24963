use super::Id3v2Tag;
use super::frame::{Frame, FrameFlags, RawFrame, is_picture_frame_id, is_valid_frame_id};
use super::header::{Id3v2Header, Id3v2Version};
use super::picture_frame::AttachedPictureFrame;
use super::synchsafe::{SynchsafeInteger, resynchronise};
use crate::config::ParsingMode;
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::macros::parse_mode_choice;

use byteorder::{BigEndian, ByteOrder};

/// Parse the body of an ID3v2 tag
///
/// `body` is everything following the 10 byte header, up to (but excluding) the footer.
pub(crate) fn parse_id3v2(
	body: &[u8],
	header: Id3v2Header,
	parse_mode: ParsingMode,
) -> Result<Id3v2Tag> {
	log::debug!(
		"Parsing ID3v2.{} tag, size: {}",
		header.version.major(),
		body.len()
	);

	let version = header.version;

	// Prior to v2.4, unsynchronisation applies to the entire tag body
	let resynchronised;
	let mut body = body;
	if header.flags.unsynchronisation && version != Id3v2Version::V4 {
		log::trace!("Resynchronising ID3v2 tag body");
		resynchronised = resynchronise(body);
		body = &resynchronised;
	}

	let mut pos = 0;
	if header.flags.extended_header {
		pos = extended_header_size(body, version)?;
	}

	let mut tag = Id3v2Tag::with_version(version);

	let header_len = match version {
		Id3v2Version::V2 => 6,
		_ => 10,
	};

	while pos + header_len <= body.len() {
		let frame_header = &body[pos..pos + header_len];

		// Reached the padding
		if frame_header[0] == 0 {
			break;
		}

		let (id, size, flags) = match version {
			Id3v2Version::V2 => (
				&frame_header[..3],
				BigEndian::read_u24(&frame_header[3..6]),
				0,
			),
			Id3v2Version::V3 => (
				&frame_header[..4],
				BigEndian::read_u32(&frame_header[4..8]),
				BigEndian::read_u16(&frame_header[8..10]),
			),
			Id3v2Version::V4 => (
				&frame_header[..4],
				BigEndian::read_u32(&frame_header[4..8]).unsynch(),
				BigEndian::read_u16(&frame_header[8..10]),
			),
		};

		if !is_valid_frame_id(id) {
			parse_mode_choice!(
				parse_mode,
				STRICT: return Err(Id3v2Error::new(Id3v2ErrorKind::BadFrameId(id.to_vec())).into()),
				DEFAULT: {
					log::warn!("Encountered an invalid frame ID, treating the rest of the tag as padding");
					break
				}
			);
		}

		pos += header_len;

		let remaining = body.len() - pos;
		let mut size = size as usize;
		if size > remaining {
			parse_mode_choice!(
				parse_mode,
				STRICT: return Err(Id3v2Error::new(Id3v2ErrorKind::BadFrameLength).into()),
				RELAXED: {
					log::warn!("Frame size exceeds the tag, truncating it to the remaining bytes");
					size = remaining
				},
				DEFAULT: {
					log::warn!("Frame size exceeds the tag, discarding the rest of the tag");
					break
				}
			);
		}

		let content = &body[pos..pos + size];
		pos += size;

		let raw = RawFrame {
			id: id.to_vec(),
			flags: if version == Id3v2Version::V4 && header.flags.unsynchronisation {
				flags | FrameFlags::V4_UNSYNCHRONISATION
			} else {
				flags
			},
			content: content.to_vec(),
		};

		if !is_picture_frame_id(id, version) {
			tag.frames.push(Frame::Raw(raw));
			continue;
		}

		let frame_flags = FrameFlags::parse(raw.flags, version);
		let picture = match picture_content(content, frame_flags, version) {
			Ok(Some(picture_content)) => {
				AttachedPictureFrame::parse(&mut &picture_content[..], version)
			},
			Ok(None) => {
				log::debug!("Encountered an encrypted picture frame, keeping it as-is");
				tag.frames.push(Frame::Raw(raw));
				continue;
			},
			Err(e) => Err(e),
		};

		match picture {
			Ok(picture) => tag.frames.push(Frame::Picture(picture)),
			Err(e) => {
				parse_mode_choice!(
					parse_mode,
					STRICT: return Err(e),
					DEFAULT: {
						log::warn!("Failed to decode a picture frame, keeping it as-is: {e}");
						tag.frames.push(Frame::Raw(raw))
					}
				);
			},
		}
	}

	Ok(tag)
}

fn extended_header_size(body: &[u8], version: Id3v2Version) -> Result<usize> {
	if body.len() < 6 {
		return Err(Id3v2Error::new(Id3v2ErrorKind::BadExtendedHeaderSize).into());
	}

	let raw_size = BigEndian::read_u32(&body[..4]);

	// v2.3 doesn't count the size field itself, and doesn't use a synchsafe integer
	let size = match version {
		Id3v2Version::V4 => raw_size.unsynch() as usize,
		_ => (raw_size as usize).saturating_add(4),
	};

	if size < 6 || size > body.len() {
		return Err(Id3v2Error::new(Id3v2ErrorKind::BadExtendedHeaderSize).into());
	}

	Ok(size)
}

/// Strip the additional frame header data, and undo unsynchronisation and compression
///
/// Returns `None` for encrypted frames, as there's no way to decode them.
fn picture_content(
	content: &[u8],
	flags: FrameFlags,
	version: Id3v2Version,
) -> Result<Option<Vec<u8>>> {
	let mut content = content;

	let mut skip = |len: usize| -> Result<()> {
		if content.len() < len {
			return Err(Id3v2Error::new(Id3v2ErrorKind::BadFrameLength).into());
		}

		content = &content[len..];
		Ok(())
	};

	match version {
		Id3v2Version::V2 => {},
		// Decompressed size, encryption method, group identifier
		Id3v2Version::V3 => {
			if flags.data_length_indicator {
				skip(4)?;
			}

			if flags.encryption {
				return Ok(None);
			}

			if flags.grouping_identity {
				skip(1)?;
			}
		},
		// Group identifier, encryption method, data length indicator
		Id3v2Version::V4 => {
			if flags.grouping_identity {
				skip(1)?;
			}

			if flags.encryption {
				return Ok(None);
			}

			if flags.data_length_indicator {
				skip(4)?;
			} else if flags.compression {
				return Err(Id3v2Error::new(Id3v2ErrorKind::MissingDataLengthIndicator).into());
			}
		},
	}

	let mut content = content.to_vec();

	if flags.unsynchronisation {
		content = resynchronise(&content);
	}

	if flags.compression {
		content = inflate(&content)?;
	}

	Ok(Some(content))
}

#[cfg(feature = "id3v2_compression_support")]
fn inflate(content: &[u8]) -> Result<Vec<u8>> {
	use std::io::Read as _;

	let mut decompressed = Vec::new();
	flate2::read::ZlibDecoder::new(content)
		.read_to_end(&mut decompressed)
		.map_err(|e| Id3v2Error::new(Id3v2ErrorKind::Decompression(e)))?;

	Ok(decompressed)
}

#[cfg(not(feature = "id3v2_compression_support"))]
fn inflate(_: &[u8]) -> Result<Vec<u8>> {
	Err(Id3v2Error::new(Id3v2ErrorKind::CompressedFrameEncountered).into())
}
