use super::Mp4File;
use super::atom_info::{AtomInfo, FULL_ATOM_SIZE, is_meta_child};
use super::ilst::read::child_atoms;
use super::ilst::write::{create_ilst, write_atom};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::{CoverError, Result};
use crate::macros::{decode_err, err};
use crate::util::io::{FileLike, Length, Truncate, overwrite_all, read_all};

use std::ops::Range;

use byteorder::{BigEndian, ByteOrder};

// Atoms that may (eventually) hold `stco`, `co64`, or `tfhd` atoms
const CONTAINERS: [[u8; 4]; 7] = [
	*b"moov", *b"trak", *b"mdia", *b"minf", *b"stbl", *b"moof", *b"traf",
];

// An iTunes metadata handler, `mdir` with an `appl` manufacturer
const HDLR: [u8; 33] = [
	0, 0, 0, 33, b'h', b'd', b'l', b'r', // Header
	0, 0, 0, 0, // Version + flags
	0, 0, 0, 0, // Pre-defined
	b'm', b'd', b'i', b'r', // Handler type
	b'a', b'p', b'p', b'l', // Reserved (manufacturer)
	0, 0, 0, 0, 0, 0, 0, 0, // Reserved
	0, // Name
];

/// Rewrite the `ilst` of an MP4 file
///
/// The new `ilst` replaces the existing one in place. Any of `udta`, `meta`, and `ilst` that
/// don't exist yet are created at the end of their parent. The sizes of all enclosing atoms are
/// updated, as are any chunk offsets pointing past the modified region.
pub(super) fn write_to<F>(file: &mut F, mp4_file: &Mp4File) -> Result<()>
where
	F: FileLike,
	CoverError: From<<F as Truncate>::Error>,
	CoverError: From<<F as Length>::Error>,
{
	let Some(ilst) = &mp4_file.ilst else {
		log::debug!("MP4: No `ilst` to write");
		return Ok(());
	};

	let parse_mode = ParseOptions::DEFAULT_PARSING_MODE;

	let mut file_bytes = read_all(file)?;
	let top_level = child_atoms(&file_bytes, parse_mode)?;

	let Some(moov) = top_level.iter().find(|atom| atom.ident == *b"moov").copied() else {
		decode_err!(@BAIL Mp4, "No \"moov\" atom found");
	};

	let new_ilst = create_ilst(ilst)?;

	// Every atom enclosing the modified region, outermost first
	let mut path = vec![moov];

	let (range, replacement) = match find_child(&file_bytes, &moov, 0, *b"udta", parse_mode)? {
		None => {
			log::debug!("MP4: Creating `udta` atom");
			(insert_at(moov.end()), create_udta(&new_ilst)?)
		},
		Some(udta) => {
			path.push(udta);

			match find_child(&file_bytes, &udta, 0, *b"meta", parse_mode)? {
				None => {
					log::debug!("MP4: Creating `meta` atom");
					(insert_at(udta.end()), create_meta(&new_ilst)?)
				},
				Some(meta) => {
					path.push(meta);

					let version_flags_len = if meta_is_full(&file_bytes, &meta) { 4 } else { 0 };
					match find_child(&file_bytes, &meta, version_flags_len, *b"ilst", parse_mode)? {
						None => {
							log::debug!("MP4: Creating `ilst` atom");
							(insert_at(meta.end()), new_ilst)
						},
						Some(existing_ilst) => (
							existing_ilst.start as usize..existing_ilst.end() as usize,
							new_ilst,
						),
					}
				},
			}
		},
	};

	let difference = replacement.len() as i64 - range.len() as i64;
	log::debug!(
		"MP4: Writing {} bytes of metadata, size difference: {difference}",
		replacement.len()
	);

	if difference != 0 {
		// Everything is updated in place, before any bytes move
		update_offsets(
			&mut file_bytes,
			&top_level,
			range.start as u64,
			difference,
			parse_mode,
		)?;

		for atom in &path {
			update_size(&mut file_bytes, atom, difference)?;
		}
	}

	file_bytes.splice(range, replacement);
	overwrite_all(file, &file_bytes)
}

fn insert_at(pos: u64) -> Range<usize> {
	pos as usize..pos as usize
}

/// The atoms directly inside `parent`, with absolute positions
///
/// `skip` is the number of bytes between the parent's header and its first child.
fn children_of(
	bytes: &[u8],
	parent: &AtomInfo,
	skip: u64,
	parse_mode: ParsingMode,
) -> Result<Vec<AtomInfo>> {
	let content_start = parent.start + parent.header_size() + skip;
	if content_start > parent.end() {
		err!(BadAtom("Found an atom too short to hold its children"));
	}

	let mut children =
		child_atoms(&bytes[content_start as usize..parent.end() as usize], parse_mode)?;
	for child in &mut children {
		child.start += content_start;
	}

	Ok(children)
}

fn find_child(
	bytes: &[u8],
	parent: &AtomInfo,
	skip: u64,
	ident: [u8; 4],
	parse_mode: ParsingMode,
) -> Result<Option<AtomInfo>> {
	let children = children_of(bytes, parent, skip, parse_mode)?;
	Ok(children.into_iter().find(|child| child.ident == ident))
}

fn find_descendants(
	bytes: &[u8],
	parent: &AtomInfo,
	ident: [u8; 4],
	parse_mode: ParsingMode,
	found: &mut Vec<AtomInfo>,
) -> Result<()> {
	for child in children_of(bytes, parent, 0, parse_mode)? {
		if child.ident == ident {
			found.push(child);
		} else if CONTAINERS.contains(&child.ident) {
			find_descendants(bytes, &child, ident, parse_mode, found)?;
		}
	}

	Ok(())
}

// See `atom_info::meta_is_full`, this is the in-memory equivalent
fn meta_is_full(bytes: &[u8], meta: &AtomInfo) -> bool {
	let content_start = (meta.start + meta.header_size()) as usize;
	!bytes
		.get(content_start + 4..content_start + 8)
		.is_some_and(is_meta_child)
}

fn update_size(bytes: &mut [u8], atom: &AtomInfo, difference: i64) -> Result<()> {
	let new_len = (atom.len as i64 + difference) as u64;
	let start = atom.start as usize;

	if atom.is_extended() {
		BigEndian::write_u64(&mut bytes[start + 8..start + 16], new_len);
		return Ok(());
	}

	let Ok(new_len) = u32::try_from(new_len) else {
		err!(TooMuchData);
	};

	log::trace!(
		"Updating `{}` size from {} to {new_len}",
		String::from_utf8_lossy(&atom.ident),
		atom.len
	);

	BigEndian::write_u32(&mut bytes[start..start + 4], new_len);
	Ok(())
}

/// Shifts all absolute offsets at or past `changed_at` by `difference`
fn update_offsets(
	bytes: &mut [u8],
	top_level: &[AtomInfo],
	changed_at: u64,
	difference: i64,
	parse_mode: ParsingMode,
) -> Result<()> {
	log::debug!("Checking for offset atoms to update");

	let shift = |offset: u64| -> Option<u64> {
		if offset < changed_at {
			return None;
		}

		Some((offset as i64 + difference) as u64)
	};

	let mut stco = Vec::new();
	let mut co64 = Vec::new();
	let mut tfhd = Vec::new();
	for atom in top_level {
		match &atom.ident {
			b"moov" => {
				find_descendants(bytes, atom, *b"stco", parse_mode, &mut stco)?;
				find_descendants(bytes, atom, *b"co64", parse_mode, &mut co64)?;
			},
			b"moof" => find_descendants(bytes, atom, *b"tfhd", parse_mode, &mut tfhd)?,
			_ => {},
		}
	}

	// 32-bit offsets
	for atom in stco {
		log::trace!("Found `stco` atom");

		let entries = offset_table(bytes, &atom, 4)?;
		for entry in entries.step_by(4) {
			let offset = u64::from(BigEndian::read_u32(&bytes[entry..entry + 4]));
			if let Some(new_offset) = shift(offset) {
				let Ok(new_offset) = u32::try_from(new_offset) else {
					decode_err!(@BAIL Mp4, "Chunk offset no longer fits in a `stco` atom");
				};

				BigEndian::write_u32(&mut bytes[entry..entry + 4], new_offset);
			}
		}
	}

	// 64-bit offsets
	for atom in co64 {
		log::trace!("Found `co64` atom");

		let entries = offset_table(bytes, &atom, 8)?;
		for entry in entries.step_by(8) {
			let offset = BigEndian::read_u64(&bytes[entry..entry + 8]);
			if let Some(new_offset) = shift(offset) {
				BigEndian::write_u64(&mut bytes[entry..entry + 8], new_offset);
			}
		}
	}

	// Fragment base offsets
	for atom in tfhd {
		log::trace!("Found `tfhd` atom");

		// Version (1), flags (3), track ID (4), then the optional base data offset
		let content_start = (atom.start + atom.header_size()) as usize;
		if content_start + 8 > atom.end() as usize {
			decode_err!(@BAIL Mp4, "Found a `tfhd` atom that is too short");
		}

		let flags = BigEndian::read_u32(&bytes[content_start..content_start + 4]) & 0x00FF_FFFF;
		if flags & 0b1 == 0 {
			continue;
		}

		let offset_pos = content_start + 8;
		if offset_pos + 8 > atom.end() as usize {
			decode_err!(@BAIL Mp4, "Found a `tfhd` atom that is too short");
		}

		let offset = BigEndian::read_u64(&bytes[offset_pos..offset_pos + 8]);
		if let Some(new_offset) = shift(offset) {
			BigEndian::write_u64(&mut bytes[offset_pos..offset_pos + 8], new_offset);
		}
	}

	Ok(())
}

/// The range of an offset table's entries
fn offset_table(bytes: &[u8], atom: &AtomInfo, entry_size: usize) -> Result<Range<usize>> {
	// Version (1) + flags (3) + entry count (4)
	let content_start = (atom.start + atom.header_size()) as usize;
	if content_start + 8 > atom.end() as usize {
		decode_err!(@BAIL Mp4, "Found an offset table that is too short");
	}

	let count = BigEndian::read_u32(&bytes[content_start + 4..content_start + 8]) as usize;
	let entries_start = content_start + 8;
	let entries_end = entries_start + count * entry_size;
	if entries_end > atom.end() as usize {
		decode_err!(@BAIL Mp4, "Found an offset table with too many entries");
	}

	Ok(entries_start..entries_end)
}

fn create_meta(ilst: &[u8]) -> Result<Vec<u8>> {
	let mut content = Vec::with_capacity(4 + HDLR.len() + ilst.len());
	// Version + flags
	content.extend_from_slice(&[0; 4]);
	content.extend_from_slice(&HDLR);
	content.extend_from_slice(ilst);

	let mut meta = Vec::with_capacity(FULL_ATOM_SIZE as usize + HDLR.len() + ilst.len());
	write_atom(&mut meta, *b"meta", &content)?;

	Ok(meta)
}

fn create_udta(ilst: &[u8]) -> Result<Vec<u8>> {
	let meta = create_meta(ilst)?;

	let mut udta = Vec::with_capacity(meta.len() + 8);
	write_atom(&mut udta, *b"udta", &meta)?;

	Ok(udta)
}
