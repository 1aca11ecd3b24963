use super::{COVR, CoverArt, Ilst, IlstItem};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::err;
use crate::mime::CoverArtFormat;
use crate::mp4::atom_info::{ATOM_HEADER_LEN, AtomInfo};

use std::io::{Cursor, Seek, SeekFrom};

use byteorder::{BigEndian, ByteOrder};

const DATA: [u8; 4] = *b"data";

// Version (1) + type (3) + locale (4)
const DATA_PREFIX_LEN: usize = 8;

/// Parse the content of an `ilst` atom
pub(in crate::mp4) fn parse_ilst(content: &[u8], parse_mode: ParsingMode) -> Result<Ilst> {
	let mut ilst = Ilst::default();

	for atom in child_atoms(content, parse_mode)? {
		let item_content = atom_content(content, &atom);

		// Any further `covr` items are carried through as-is
		if atom.ident == COVR && ilst.cover_art().is_none() {
			let covers = parse_covr(item_content, parse_mode)?;
			ilst.items.push(IlstItem::CoverArt(covers));
			continue;
		}

		if atom.ident == COVR {
			log::warn!("Found multiple `covr` items, only the first is used");
		}

		ilst.items.push(IlstItem::Raw {
			ident: atom.ident,
			content: item_content.to_vec(),
		});
	}

	log::debug!("Parsed `ilst`, items: {}", ilst.items.len());
	Ok(ilst)
}

fn parse_covr(content: &[u8], parse_mode: ParsingMode) -> Result<Vec<CoverArt>> {
	let mut covers = Vec::new();

	for atom in child_atoms(content, parse_mode)? {
		// `covr` can have a `name` atom alongside its `data` atoms
		if atom.ident != DATA {
			log::debug!("Skipping non-data atom in `covr`");
			continue;
		}

		let data_content = atom_content(content, &atom);
		if data_content.len() < DATA_PREFIX_LEN {
			if parse_mode == ParsingMode::Strict {
				err!(BadAtom("Found a `covr` data atom that is too short"));
			}

			log::warn!("Found a `covr` data atom that is too short, discarding");
			continue;
		}

		// The version is the first byte, the type is stored in the 3 "flag" bytes
		let type_code = BigEndian::read_u32(&data_content[..4]) & 0x00FF_FFFF;
		let format = CoverArtFormat::from_data_type(type_code);
		log::trace!("Found `covr` entry, type: {type_code}, format: {format:?}");

		covers.push(CoverArt {
			format,
			data: data_content[DATA_PREFIX_LEN..].to_vec(),
		});
	}

	Ok(covers)
}

/// Reads the headers of all atoms directly inside `content`
pub(in crate::mp4) fn child_atoms(content: &[u8], parse_mode: ParsingMode) -> Result<Vec<AtomInfo>> {
	let mut reader = Cursor::new(content);
	let mut atoms = Vec::new();

	let len = content.len() as u64;
	while len - reader.position() >= ATOM_HEADER_LEN {
		let remaining = len - reader.position();
		let Some(atom) = AtomInfo::read(&mut reader, remaining, parse_mode)? else {
			break;
		};

		reader.seek(SeekFrom::Start(atom.end()))?;
		atoms.push(atom);
	}

	Ok(atoms)
}

/// Everything after the atom's header
pub(in crate::mp4) fn atom_content<'a>(bytes: &'a [u8], atom: &AtomInfo) -> &'a [u8] {
	&bytes[(atom.start + atom.header_size()) as usize..atom.end() as usize]
}
