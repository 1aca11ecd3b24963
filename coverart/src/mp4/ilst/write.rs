use super::{COVR, CoverArt, Ilst, IlstItem};
use crate::error::Result;
use crate::macros::err;

use byteorder::{BigEndian, WriteBytesExt};

/// Encode an entire `ilst` atom, including its header
pub(in crate::mp4) fn create_ilst(ilst: &Ilst) -> Result<Vec<u8>> {
	let mut content = Vec::new();
	for item in &ilst.items {
		match item {
			IlstItem::CoverArt(covers) => {
				let covr = create_covr(covers)?;
				write_atom(&mut content, COVR, &covr)?;
			},
			IlstItem::Raw { ident, content: item_content } => {
				write_atom(&mut content, *ident, item_content)?
			},
		}
	}

	let mut ilst_bytes = Vec::with_capacity(content.len() + 8);
	write_atom(&mut ilst_bytes, *b"ilst", &content)?;

	Ok(ilst_bytes)
}

fn create_covr(covers: &[CoverArt]) -> Result<Vec<u8>> {
	let mut covr = Vec::new();
	for cover in covers {
		let mut data = Vec::with_capacity(cover.data.len() + 8);

		// Version (1) + type (3)
		data.write_u32::<BigEndian>(cover.format.as_data_type() & 0x00FF_FFFF)?;
		// Locale
		data.write_u32::<BigEndian>(0)?;
		data.extend_from_slice(&cover.data);

		write_atom(&mut covr, *b"data", &data)?;
	}

	Ok(covr)
}

pub(in crate::mp4) fn write_atom(writer: &mut Vec<u8>, ident: [u8; 4], content: &[u8]) -> Result<()> {
	let Ok(size) = u32::try_from(content.len() + 8) else {
		err!(TooMuchData);
	};

	writer.write_u32::<BigEndian>(size)?;
	writer.extend_from_slice(&ident);
	writer.extend_from_slice(content);

	Ok(())
}
