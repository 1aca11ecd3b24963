use crate::error::Result;
use crate::macros::{encode_err, try_vec};

use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::Range;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

const LAST_BLOCK_FLAG: u8 = 0x80;
const MAX_BLOCK_SIZE: usize = 0x00FF_FFFF;

/// The metadata block types coverart cares about
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum BlockType {
	StreamInfo,
	Padding,
	VorbisComment,
	Picture,
	/// Application, seek table, cue sheet, and anything reserved
	Other(u8),
}

impl BlockType {
	fn from_u8(ty: u8) -> Self {
		match ty {
			0 => Self::StreamInfo,
			1 => Self::Padding,
			4 => Self::VorbisComment,
			6 => Self::Picture,
			other => Self::Other(other),
		}
	}

	fn as_u8(self) -> u8 {
		match self {
			Self::StreamInfo => 0,
			Self::Padding => 1,
			Self::VorbisComment => 4,
			Self::Picture => 6,
			Self::Other(ty) => ty,
		}
	}

	/// Blocks that are regenerated on every write
	pub(crate) fn is_rewritten(self) -> bool {
		matches!(self, Self::Padding | Self::VorbisComment | Self::Picture)
	}
}

pub(crate) struct Block {
	pub(crate) ty: BlockType,
	pub(crate) is_last: bool,
	pub(crate) content: Vec<u8>,
	/// Where the block was read from, header included
	pub(crate) range: Range<u64>,
}

impl Block {
	pub(crate) fn new(ty: BlockType, content: Vec<u8>) -> Self {
		Self {
			ty,
			is_last: false,
			content,
			range: 0..0,
		}
	}

	/// Read the next block
	///
	/// The content is skipped over, and left empty, for types rejected by `keep_content`.
	pub(crate) fn read<R, P>(data: &mut R, keep_content: P) -> Result<Self>
	where
		R: Read + Seek,
		P: FnOnce(BlockType) -> bool,
	{
		let start = data.stream_position()?;

		let header = data.read_u8()?;
		let ty = BlockType::from_u8(header & !LAST_BLOCK_FLAG);
		let size = data.read_u24::<BigEndian>()?;
		log::trace!("FLAC: Found a {ty:?} block, size: {size}");

		let content = if keep_content(ty) {
			let mut content = try_vec![0; size as usize];
			data.read_exact(&mut content)?;
			content
		} else {
			data.seek(SeekFrom::Current(i64::from(size)))?;
			Vec::new()
		};

		Ok(Self {
			ty,
			is_last: header & LAST_BLOCK_FLAG != 0,
			content,
			range: start..data.stream_position()?,
		})
	}

	pub(crate) fn write_to<W>(&self, writer: &mut W) -> Result<()>
	where
		W: Write,
	{
		if self.content.len() > MAX_BLOCK_SIZE {
			return Err(encode_err!(Flac, "Metadata block is too large"));
		}

		let mut header = self.ty.as_u8();
		if self.is_last {
			header |= LAST_BLOCK_FLAG;
		}

		writer.write_u8(header)?;
		writer.write_u24::<BigEndian>(self.content.len() as u32)?;
		writer.write_all(&self.content)?;

		Ok(())
	}
}
