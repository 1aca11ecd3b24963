use crate::error::Result;

use std::fmt::{Display, Formatter};
use std::io::Read;

/// A 128-bit ASF object identifier
///
/// The first three fields are stored little-endian, the last eight bytes as-is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Guid([u8; 16]);

impl Guid {
	pub(crate) const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
		let d1 = data1.to_le_bytes();
		let d2 = data2.to_le_bytes();
		let d3 = data3.to_le_bytes();

		Self([
			d1[0], d1[1], d1[2], d1[3], d2[0], d2[1], d3[0], d3[1], data4[0], data4[1], data4[2],
			data4[3], data4[4], data4[5], data4[6], data4[7],
		])
	}

	pub(crate) const fn as_bytes(&self) -> [u8; 16] {
		self.0
	}

	pub(crate) fn read<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		let mut guid = [0; 16];
		reader.read_exact(&mut guid)?;

		Ok(Self(guid))
	}
}

impl Display for Guid {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let b = &self.0;
		write!(
			f,
			"{:08X}-{:04X}-{:04X}-",
			u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
			u16::from_le_bytes([b[4], b[5]]),
			u16::from_le_bytes([b[6], b[7]])
		)?;

		for (i, byte) in b[8..].iter().enumerate() {
			if i == 2 {
				f.write_str("-")?;
			}

			write!(f, "{byte:02X}")?;
		}

		Ok(())
	}
}

pub(crate) const HEADER_OBJECT: Guid = Guid::new(
	0x75B2_2630,
	0x668E,
	0x11CF,
	[0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C],
);

pub(crate) const DATA_OBJECT: Guid = Guid::new(
	0x75B2_2636,
	0x668E,
	0x11CF,
	[0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C],
);

pub(crate) const FILE_PROPERTIES_OBJECT: Guid = Guid::new(
	0x8CAB_DCA1,
	0xA947,
	0x11CF,
	[0x8E, 0xE4, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65],
);

pub(crate) const HEADER_EXTENSION_OBJECT: Guid = Guid::new(
	0x5FBF_03B5,
	0xA92E,
	0x11CF,
	[0x8E, 0xE3, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65],
);

// The "Reserved Field 1" of the header extension object
pub(crate) const HEADER_EXTENSION_RESERVED: Guid = Guid::new(
	0xABD3_D211,
	0xA9BA,
	0x11CF,
	[0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65],
);

pub(crate) const CONTENT_DESCRIPTION_OBJECT: Guid = Guid::new(
	0x75B2_2633,
	0x668E,
	0x11CF,
	[0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C],
);

pub(crate) const EXTENDED_CONTENT_DESCRIPTION_OBJECT: Guid = Guid::new(
	0xD2D0_A440,
	0xE307,
	0x11D2,
	[0x97, 0xF0, 0x00, 0xA0, 0xC9, 0x5E, 0xA8, 0x50],
);

pub(crate) const METADATA_OBJECT: Guid = Guid::new(
	0xC5F8_CBEA,
	0x5BAF,
	0x4877,
	[0x84, 0x67, 0xAA, 0x8C, 0x44, 0xFA, 0x4C, 0xCA],
);

pub(crate) const METADATA_LIBRARY_OBJECT: Guid = Guid::new(
	0x4423_1C94,
	0x9498,
	0x49D1,
	[0xA1, 0x41, 0x1D, 0x13, 0x4E, 0x45, 0x70, 0x54],
);
