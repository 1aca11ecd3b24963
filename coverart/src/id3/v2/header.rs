use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::synchsafe::SynchsafeInteger;
use crate::macros::err;

use std::io::Read;

use byteorder::{BigEndian, ByteOrder};

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	pub(crate) fn major(self) -> u8 {
		match self {
			Self::V2 => 2,
			Self::V3 => 3,
			Self::V4 => 4,
		}
	}
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Id3v2TagFlags {
	pub unsynchronisation: bool,
	pub extended_header: bool,
	pub footer: bool,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Id3v2Header {
	pub version: Id3v2Version,
	pub flags: Id3v2TagFlags,
	/// The size of everything after the header (including any extended header), excluding the footer
	pub size: u32,
}

impl Id3v2Header {
	pub(crate) fn parse<R>(bytes: &mut R) -> Result<Self>
	where
		R: Read,
	{
		log::trace!("Parsing ID3v2 header");

		let mut header = [0; 10];
		bytes.read_exact(&mut header)?;

		if &header[..3] != b"ID3" {
			err!(FakeTag);
		}

		let version = match header[3] {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			major => {
				return Err(
					Id3v2Error::new(Id3v2ErrorKind::BadId3v2Version(major, header[4])).into(),
				);
			},
		};

		let flags = header[5];

		// Compression was a flag only used in ID3v2.2 (bit 2).
		// The scheme was never decided on, so the tag can't be read.
		if version == Id3v2Version::V2 && flags & 0x40 == 0x40 {
			return Err(Id3v2Error::new(Id3v2ErrorKind::V2Compression).into());
		}

		let flags_parsed = Id3v2TagFlags {
			unsynchronisation: flags & 0x80 == 0x80,
			extended_header: version != Id3v2Version::V2 && flags & 0x40 == 0x40,
			footer: version == Id3v2Version::V4 && flags & 0x10 == 0x10,
		};

		let size = BigEndian::read_u32(&header[6..]).unsynch();

		Ok(Id3v2Header {
			version,
			flags: flags_parsed,
			size,
		})
	}

	pub(crate) fn footer_size(&self) -> u64 {
		if self.flags.footer { 10 } else { 0 }
	}

	/// The size of the tag, including the header and footer
	pub(crate) fn full_tag_size(&self) -> u32 {
		self.size + 10 + self.footer_size() as u32
	}
}
