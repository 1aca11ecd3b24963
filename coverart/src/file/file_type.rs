use crate::asf::guid::HEADER_OBJECT;
use crate::id3::v2::synchsafe::SynchsafeInteger;
use crate::mpeg::header::verify_frame_sync;

use std::ffi::OsStr;
use std::path::Path;

/// The type of file read
///
/// Only [`FileType::Mpeg`], [`FileType::Flac`], [`FileType::Mp4`], and [`FileType::Asf`] can
/// hold cover art through coverart. The remaining types are recognized, so they can be reported
/// as unsupported rather than unknown.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[allow(missing_docs)]
#[non_exhaustive]
pub enum FileType {
	Aac,
	Aiff,
	Ape,
	Asf,
	Flac,
	Mpeg,
	Mp4,
	Mpc,
	Opus,
	Vorbis,
	Speex,
	Wav,
	WavPack,
}

impl FileType {
	const ALL: [Self; 13] = [
		Self::Aac,
		Self::Aiff,
		Self::Ape,
		Self::Asf,
		Self::Flac,
		Self::Mpeg,
		Self::Mp4,
		Self::Mpc,
		Self::Opus,
		Self::Vorbis,
		Self::Speex,
		Self::Wav,
		Self::WavPack,
	];

	/// Whether coverart can read and write cover art in this file type
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::file::FileType;
	///
	/// assert!(FileType::Asf.supports_cover_art());
	/// assert!(!FileType::Wav.supports_cover_art());
	/// ```
	pub fn supports_cover_art(&self) -> bool {
		matches!(self, Self::Mpeg | Self::Flac | Self::Mp4 | Self::Asf)
	}

	/// The lowercase extensions commonly used for this file type
	///
	/// The first entry is the preferred one.
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::file::FileType;
	///
	/// assert_eq!(FileType::Asf.extensions(), &["wma", "wmv", "asf"]);
	/// ```
	pub fn extensions(self) -> &'static [&'static str] {
		match self {
			Self::Aac => &["aac"],
			Self::Aiff => &["aiff", "aif", "afc", "aifc"],
			Self::Ape => &["ape"],
			Self::Asf => &["wma", "wmv", "asf"],
			Self::Flac => &["flac"],
			Self::Mpeg => &["mp3", "mp2", "mp1"],
			Self::Mp4 => &["m4a", "mp4", "m4b", "m4p", "m4r", "m4v", "3gp"],
			Self::Mpc => &["mpc", "mp+", "mpp"],
			Self::Opus => &["opus"],
			Self::Vorbis => &["ogg"],
			Self::Speex => &["spx"],
			Self::Wav => &["wav", "wave"],
			Self::WavPack => &["wv"],
		}
	}

	/// Attempts to extract a [`FileType`] from an extension
	///
	/// The comparison is case-insensitive.
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::file::FileType;
	///
	/// assert_eq!(FileType::from_ext("M4A"), Some(FileType::Mp4));
	/// assert_eq!(FileType::from_ext("txt"), None);
	/// ```
	pub fn from_ext<E>(ext: E) -> Option<Self>
	where
		E: AsRef<OsStr>,
	{
		let ext = ext.as_ref().to_str()?.to_ascii_lowercase();

		Self::ALL
			.into_iter()
			.find(|ty| ty.extensions().contains(&ext.as_str()))
	}

	/// Attempts to determine a [`FileType`] from the extension of a path
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::file::FileType;
	/// use std::path::Path;
	///
	/// let path = Path::new("path/to/my.wma");
	/// assert_eq!(FileType::from_path(path), Some(FileType::Asf));
	/// ```
	pub fn from_path<P>(path: P) -> Option<Self>
	where
		P: AsRef<Path>,
	{
		path.as_ref().extension().and_then(Self::from_ext)
	}

	/// Attempts to identify a [`FileType`] from the first bytes of a stream
	///
	/// Only the signature at the very start of `buf` is checked. Streams that begin with an ID3v2
	/// tag or with junk need [`Probe::guess_file_type`], which is able to look further.
	///
	/// [`Probe::guess_file_type`]: crate::probe::Probe::guess_file_type
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::file::FileType;
	///
	/// assert_eq!(FileType::from_buffer(b"fLaC\0\0\0\x22"), Some(FileType::Flac));
	/// assert_eq!(FileType::from_buffer(b"\0\0\0\x18ftypM4A "), Some(FileType::Mp4));
	/// assert_eq!(FileType::from_buffer(b"ID3\x04\0\0\0\0\0\0"), None);
	/// ```
	pub fn from_buffer(buf: &[u8]) -> Option<Self> {
		match Signature::sniff(buf) {
			Signature::Known(file_type) => Some(file_type),
			_ => None,
		}
	}

	fn from_signature(buf: &[u8]) -> Option<Self> {
		let magic = |offset: usize, expected: &[u8]| {
			buf.get(offset..offset + expected.len()) == Some(expected)
		};

		if buf.len() >= 2 && verify_frame_sync([buf[0], buf[1]]) {
			return Some(frame_type(buf[1]));
		}

		if magic(0, b"fLaC") {
			return Some(Self::Flac);
		}

		if magic(4, b"ftyp") {
			return Some(Self::Mp4);
		}

		if magic(0, &HEADER_OBJECT.as_bytes()) {
			return Some(Self::Asf);
		}

		if magic(0, b"RIFF") && magic(8, b"WAVE") {
			return Some(Self::Wav);
		}

		if magic(0, b"FORM") && (magic(8, b"AIFF") || magic(8, b"AIFC")) {
			return Some(Self::Aiff);
		}

		if magic(0, b"OggS") {
			return if magic(29, b"vorbis") {
				Some(Self::Vorbis)
			} else if magic(28, b"OpusHead") {
				Some(Self::Opus)
			} else if magic(28, b"Speex   ") {
				Some(Self::Speex)
			} else {
				None
			};
		}

		if magic(0, b"MAC") {
			return Some(Self::Ape);
		}

		if magic(0, b"wvpk") {
			return Some(Self::WavPack);
		}

		if magic(0, b"MPCK") || magic(0, b"MP+") {
			return Some(Self::Mpc);
		}

		None
	}
}

/// Distinguish an ADTS header from an MPEG one, given the second byte of a frame sync
///
/// ```text
/// ADTS:                      MPEG:
/// AAAAAAAA AAAABCCX          AAAAAAAA AAABBCCX
/// ```
///
/// ADTS has a 12 bit sync word and a layer that is always zero, so a version 1 or 2 "MPEG" frame
/// with a layer of `0b00` is really AAC.
pub(crate) fn frame_type(second_sync_byte: u8) -> FileType {
	if second_sync_byte & 0b1_0000 != 0 && second_sync_byte & 0b110 == 0 {
		return FileType::Aac;
	}

	FileType::Mpeg
}

/// What the start of a stream looks like
pub(crate) enum Signature {
	/// A recognized file signature
	Known(FileType),
	/// An ID3v2 tag, the real signature follows it
	///
	/// The size excludes the 10 byte header.
	Id3v2 { tag_size: u32 },
	/// Nothing recognizable, though an MPEG frame may come after some junk
	Unknown,
}

impl Signature {
	pub(crate) fn sniff(buf: &[u8]) -> Self {
		if let Some(file_type) = FileType::from_signature(buf) {
			return Self::Known(file_type);
		}

		match buf {
			[b'I', b'D', b'3', _, _, _, a, b, c, d, ..] => Self::Id3v2 {
				tag_size: u32::from_be_bytes([*a, *b, *c, *d]).unsynch(),
			},
			_ => Self::Unknown,
		}
	}
}
