//! Contains the errors that can arise within coverart
//!
//! The primary error is [`CoverError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.
//!
//! Note that a file simply lacking cover art is *not* an error. That outcome is reported through
//! [`ReadStatus`](crate::cover::ReadStatus).

use crate::file::FileType;
pub use crate::util::text::TextEncodingError;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, CoverError>`
pub type Result<T> = std::result::Result<T, CoverError>;

/// What went wrong
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	/// Tried to write cover art to a file outside of the MPEG, FLAC, MP4, and ASF families
	UnsupportedFile,

	/// An item is larger than the allocation limit, or than its container can describe
	///
	/// See [`GlobalOptions::allocation_limit`](crate::config::GlobalOptions::allocation_limit).
	TooMuchData,
	/// A declared size doesn't fit the data around it
	///
	/// For example, an MP4 atom claiming more bytes than its parent has left.
	SizeMismatch,
	/// The file isn't a valid stream of its format
	FileDecoding(FileDecodingError),
	/// The file can't be written in its format
	FileEncoding(FileEncodingError),

	/// A picture entry is malformed
	NotAPicture,

	/// Found a tag signature, but no valid tag behind it
	FakeTag,
	/// Text in a tag isn't valid for its declared encoding
	TextDecode(&'static str),
	/// Text can't be represented in the encoding a tag requires
	TextEncode(TextEncodingError),
	/// Something specific to ID3v2, see [`Id3v2ErrorKind`]
	Id3v2(Id3v2Error),

	/// An MP4 atom is malformed
	BadAtom(&'static str),

	/// Text expected to be UTF-8 wasn't
	StringFromUtf8(std::string::FromUtf8Error),
	/// Reading or writing the underlying storage failed
	Io(std::io::Error),
	/// Memory for an item couldn't be reserved
	Alloc(TryReserveError),
	/// Can never be constructed, only exists so [`Infallible`](std::convert::Infallible) can convert
	Infallible(std::convert::Infallible),
}

/// The types of errors that can occur while interacting with ID3v2 tags
#[derive(Debug)]
#[non_exhaustive]
pub enum Id3v2ErrorKind {
	// Header
	/// Arises when an invalid ID3v2 version is found
	BadId3v2Version(u8, u8),
	/// Arises when a compressed ID3v2.2 tag is encountered
	///
	/// At the time the ID3v2.2 specification was written, a compression scheme wasn't decided.
	/// As such, it is recommended to ignore the tag entirely.
	V2Compression,
	/// Arises when an extended header has an invalid size
	BadExtendedHeaderSize,

	// Frame
	/// Arises when a frame ID contains invalid characters (must be within `'A'..'Z'` or `'0'..'9'`)
	BadFrameId(Vec<u8>),
	/// Arises when a frame doesn't have enough data
	BadFrameLength,
	/// Arises when reading a compressed frame with no data length indicator
	MissingDataLengthIndicator,
	/// Arises when a text encoding other than Latin-1 or UTF-16 appear in an ID3v2.2 tag
	V2InvalidTextEncoding,
	/// Arises when a picture format can't be represented in an ID3v2.2 `PIC` frame
	BadPictureFormat(String),

	// Compression
	#[cfg(feature = "id3v2_compression_support")]
	/// Arises when a compressed frame is unable to be decompressed
	Decompression(std::io::Error),
	#[cfg(not(feature = "id3v2_compression_support"))]
	/// Arises when a compressed frame is encountered, but support is disabled
	CompressedFrameEncountered,
}

impl Display for Id3v2ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::BadId3v2Version(major, minor) => write!(
				f,
				"Found an invalid version (v{major}.{minor}), expected any major revision in: (2, \
				 3, 4)"
			),
			Self::V2Compression => write!(f, "Encountered a compressed ID3v2.2 tag"),
			Self::BadExtendedHeaderSize => {
				write!(f, "Found an extended header with an invalid size")
			},

			Self::BadFrameId(frame_id) => write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}"),
			Self::BadFrameLength => write!(
				f,
				"Frame isn't long enough to extract the necessary information"
			),
			Self::MissingDataLengthIndicator => write!(
				f,
				"Encountered a compressed frame without a data length indicator"
			),
			Self::V2InvalidTextEncoding => {
				write!(f, "ID3v2.2 only supports Latin-1 and UTF-16 encodings")
			},
			Self::BadPictureFormat(format) => {
				write!(f, "Picture: Found unexpected format \"{format}\"")
			},

			#[cfg(feature = "id3v2_compression_support")]
			Self::Decompression(err) => write!(f, "Failed to decompress frame: {err}"),
			#[cfg(not(feature = "id3v2_compression_support"))]
			Self::CompressedFrameEncountered => write!(
				f,
				"Encountered a compressed ID3v2 frame, support is disabled"
			),
		}
	}
}

/// An error that arises while interacting with an ID3v2 tag
pub struct Id3v2Error {
	kind: Id3v2ErrorKind,
}

impl Id3v2Error {
	/// Create a new `Id3v2Error` from an [`Id3v2ErrorKind`]
	#[must_use]
	pub const fn new(kind: Id3v2ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`Id3v2ErrorKind`]
	pub fn kind(&self) -> &Id3v2ErrorKind {
		&self.kind
	}
}

impl Debug for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {:?}", self.kind)
	}
}

impl Display for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {}", self.kind)
	}
}

macro_rules! file_error {
	($(#[$meta:meta])* $name:ident => $variant:ident, $verb:literal) => {
		$(#[$meta])*
		pub struct $name {
			format: FileType,
			description: &'static str,
		}

		impl $name {
			#[doc = concat!("Create a `", stringify!($name), "` from a [`FileType`] and description")]
			#[must_use]
			pub const fn new(format: FileType, description: &'static str) -> Self {
				Self {
					format,
					description,
				}
			}

			#[doc = concat!("The [`FileType`] that failed to ", $verb)]
			pub fn format(&self) -> FileType {
				self.format
			}

			/// Returns the error description
			pub fn description(&self) -> &str {
				self.description
			}
		}

		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
				write!(f, "{:?}: {:?}", self.format, self.description)
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
				write!(f, "{:?}: {}", self.format, self.description)
			}
		}

		impl From<$name> for CoverError {
			fn from(input: $name) -> Self {
				Self {
					kind: ErrorKind::$variant(input),
				}
			}
		}
	};
}

file_error!(
	/// An error that arises while decoding a file
	FileDecodingError => FileDecoding,
	"decode"
);

file_error!(
	/// An error that arises while encoding a file
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::error::FileEncodingError;
	/// use coverart::file::FileType;
	///
	/// let flac_error = FileEncodingError::new(FileType::Flac, "Picture block is too large");
	/// assert_eq!(flac_error.format(), FileType::Flac);
	/// ```
	FileEncodingError => FileEncoding,
	"encode"
);

/// Errors that could occur within coverart
pub struct CoverError {
	pub(crate) kind: ErrorKind,
}

impl CoverError {
	/// Create a `CoverError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::error::{CoverError, ErrorKind};
	///
	/// let too_much_data = CoverError::new(ErrorKind::TooMuchData);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::error::{CoverError, ErrorKind};
	///
	/// let unsupported = CoverError::new(ErrorKind::UnsupportedFile);
	/// if let ErrorKind::UnsupportedFile = unsupported.kind() {
	/// 	println!("This file can't hold cover art");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for CoverError {}

impl Debug for CoverError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

macro_rules! wrap_error {
	($($source:ty => $variant:ident),+ $(,)?) => {
		$(
			impl From<$source> for CoverError {
				fn from(input: $source) -> Self {
					Self::new(ErrorKind::$variant(input))
				}
			}
		)+
	};
}

wrap_error! {
	Id3v2Error => Id3v2,
	TextEncodingError => TextEncode,
	std::io::Error => Io,
	std::string::FromUtf8Error => StringFromUtf8,
	TryReserveError => Alloc,
	std::convert::Infallible => Infallible,
}

impl Display for CoverError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.kind {
			ErrorKind::UnsupportedFile => f.write_str("This file type can't hold cover art"),
			ErrorKind::TooMuchData => f.write_str("Item is too large to read or write"),
			ErrorKind::SizeMismatch => f.write_str("Item size doesn't fit within its container"),
			ErrorKind::FileDecoding(err) => write!(f, "{err}"),
			ErrorKind::FileEncoding(err) => write!(f, "{err}"),
			ErrorKind::NotAPicture => f.write_str("Picture: Malformed picture entry"),
			ErrorKind::FakeTag => f.write_str("Found a tag signature without a valid tag"),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::TextEncode(err) => write!(f, "Text encoding: {err}"),
			ErrorKind::Id3v2(err) => write!(f, "{err}"),
			ErrorKind::BadAtom(message) => write!(f, "MP4 atom: {message}"),
			ErrorKind::StringFromUtf8(err) => write!(f, "{err}"),
			ErrorKind::Io(err) => write!(f, "{err}"),
			ErrorKind::Alloc(err) => write!(f, "{err}"),
			ErrorKind::Infallible(never) => match *never {},
		}
	}
}
