use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::err;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

/// Size (4) + identifier (4)
pub(super) const ATOM_HEADER_LEN: u64 = 8;
/// An atom header, followed by a version (1) and flags (3)
pub(super) const FULL_ATOM_SIZE: u64 = ATOM_HEADER_LEN + 4;

const EXTENDED_ATOM_HEADER_LEN: u64 = ATOM_HEADER_LEN + 8;

/// The position and size of an atom
#[derive(Debug, Copy, Clone)]
pub(crate) struct AtomInfo {
	pub(crate) start: u64,
	/// Includes the header
	pub(crate) len: u64,
	pub(crate) ident: [u8; 4],
	header_len: u64,
}

impl AtomInfo {
	/// Read an atom header
	///
	/// `parent_remaining` is the number of bytes left in the parent, counted from the start of
	/// this atom. `Ok(None)` means the rest of the parent can't be trusted and should be ignored,
	/// the reader is at the end of the stream in that case.
	pub(crate) fn read<R>(
		data: &mut R,
		parent_remaining: u64,
		parse_mode: ParsingMode,
	) -> Result<Option<Self>>
	where
		R: Read + Seek,
	{
		let start = data.stream_position()?;

		let size = data.read_u32::<BigEndian>()?;

		let mut ident = [0; 4];
		data.read_exact(&mut ident)?;

		// Any identifier is technically allowed, but then garbage would be indistinguishable from
		// an atom. Like TagLib, only printable ASCII and '©' are accepted.
		if !ident.iter().all(|b| (b' '..=b'~').contains(b) || *b == 0xA9) {
			data.seek(SeekFrom::End(0))?;

			if parse_mode == ParsingMode::Strict {
				err!(BadAtom("Encountered an atom with invalid characters"));
			}

			log::warn!("MP4: Encountered an atom with invalid characters, stopping");
			return Ok(None);
		}

		let (len, header_len) = match size {
			// Runs to the end of the parent
			0 => (parent_remaining, ATOM_HEADER_LEN),
			1 => (data.read_u64::<BigEndian>()?, EXTENDED_ATOM_HEADER_LEN),
			_ => (u64::from(size), ATOM_HEADER_LEN),
		};

		if len < header_len {
			data.seek(SeekFrom::End(0))?;
			err!(BadAtom("Found an atom smaller than its header"));
		}

		if len > parent_remaining {
			// Padding atoms are often sized carelessly, one running past the end is harmless
			let ignorable = match parse_mode {
				ParsingMode::Strict => false,
				ParsingMode::BestAttempt => ident == *b"free",
				ParsingMode::Relaxed => true,
			};

			if !ignorable {
				err!(SizeMismatch);
			}

			log::warn!(
				"MP4: `{}` atom runs past its parent, ignoring the rest",
				String::from_utf8_lossy(&ident)
			);
			data.seek(SeekFrom::End(0))?;
			return Ok(None);
		}

		Ok(Some(Self {
			start,
			len,
			ident,
			header_len,
		}))
	}

	pub(crate) fn header_size(&self) -> u64 {
		self.header_len
	}

	/// Whether the size is stored in the 64-bit field
	pub(crate) fn is_extended(&self) -> bool {
		self.header_len == EXTENDED_ATOM_HEADER_LEN
	}

	pub(crate) fn content_len(&self) -> u64 {
		self.len - self.header_len
	}

	pub(crate) fn end(&self) -> u64 {
		self.start + self.len
	}
}

/// Move the reader past an atom whose header was just read
pub(super) fn skip_atom<R>(reader: &mut R, atom: &AtomInfo) -> Result<()>
where
	R: Read + Seek,
{
	log::trace!(
		"MP4: Skipping `{}` ({} bytes)",
		String::from_utf8_lossy(&atom.ident),
		atom.content_len()
	);

	reader.seek(SeekFrom::Start(atom.end()))?;
	Ok(())
}

/// Search the next `len` bytes of the reader for an atom named `expected`
///
/// Only siblings are checked, not their children. When found, the reader is left just past the
/// child's header.
pub(super) fn find_child_atom<R>(
	reader: &mut R,
	len: u64,
	expected: [u8; 4],
	parse_mode: ParsingMode,
) -> Result<Option<AtomInfo>>
where
	R: Read + Seek,
{
	let mut remaining = len;
	while remaining >= ATOM_HEADER_LEN {
		let Some(atom) = AtomInfo::read(reader, remaining, parse_mode)? else {
			break;
		};

		if atom.ident == expected {
			return Ok(Some(atom));
		}

		remaining -= atom.len;
		skip_atom(reader, &atom)?;
	}

	Ok(None)
}

/// Whether an identifier is one that lives directly inside `meta`
///
/// `meta` is supposed to be a full atom, but some writers leave out the version and flags. If
/// a child identifier sits where the flags should end, there are none.
pub(super) fn is_meta_child(ident: &[u8]) -> bool {
	matches!(ident, b"hdlr" | b"ilst" | b"mhdr" | b"ctry" | b"lang")
}

/// Checks whether a `meta` atom has a version and flags
///
/// The reader is expected to be just past the `meta` header, and is left there.
pub(super) fn meta_is_full<R>(reader: &mut R) -> Result<bool>
where
	R: Read + Seek,
{
	let mut next = [0; 8];
	reader.read_exact(&mut next)?;
	reader.seek(SeekFrom::Current(-8))?;

	if is_meta_child(&next[4..]) {
		log::warn!("MP4: File contains a `meta` atom without a version and flags");
		return Ok(false);
	}

	Ok(true)
}
