//! Mapping between MIME type strings and MP4 cover art formats
//!
//! MP4 is the only container that doesn't store a free-form MIME type for its pictures. Instead,
//! each `covr` data atom carries one of a few type codes. The mapping here is exact and
//! case-sensitive in both directions, no normalization takes place.

/// The image format of an MP4 `covr` entry
///
/// # Examples
///
/// ```rust
/// use coverart::mime::CoverArtFormat;
///
/// assert_eq!(CoverArtFormat::from_mime("image/png"), CoverArtFormat::Png);
/// assert_eq!(CoverArtFormat::Png.as_mime(), "image/png");
///
/// // Anything outside of the four known formats is unknown, and has no MIME type
/// assert_eq!(CoverArtFormat::from_mime("image/PNG"), CoverArtFormat::Unknown);
/// assert_eq!(CoverArtFormat::Unknown.as_mime(), "");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CoverArtFormat {
	/// `image/jpeg`
	Jpeg,
	/// `image/png`
	Png,
	/// `image/bmp`
	Bmp,
	/// `image/gif`
	Gif,
	/// Any other format
	Unknown,
}

impl CoverArtFormat {
	/// The MIME type of [`CoverArtFormat::Unknown`]
	pub const UNKNOWN_MIME: &'static str = "";

	/// Get a `CoverArtFormat` from a MIME type
	pub fn from_mime(mime_type: &str) -> Self {
		match mime_type {
			"image/jpeg" => Self::Jpeg,
			"image/png" => Self::Png,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			_ => Self::Unknown,
		}
	}

	/// The MIME type of the format
	///
	/// This will be [`Self::UNKNOWN_MIME`] for [`CoverArtFormat::Unknown`].
	pub fn as_mime(self) -> &'static str {
		match self {
			Self::Jpeg => "image/jpeg",
			Self::Png => "image/png",
			Self::Bmp => "image/bmp",
			Self::Gif => "image/gif",
			Self::Unknown => Self::UNKNOWN_MIME,
		}
	}

	/// Get a `CoverArtFormat` from a `data` atom type code
	///
	/// Any code other than JPEG (13), PNG (14), BMP (27), or GIF (12) is unknown.
	pub fn from_data_type(code: u32) -> Self {
		match code {
			13 => Self::Jpeg,
			14 => Self::Png,
			27 => Self::Bmp,
			12 => Self::Gif,
			_ => Self::Unknown,
		}
	}

	/// The `data` atom type code for this format
	///
	/// [`CoverArtFormat::Unknown`] is written with the implicit type (0).
	pub fn as_data_type(self) -> u32 {
		match self {
			Self::Jpeg => 13,
			Self::Png => 14,
			Self::Bmp => 27,
			Self::Gif => 12,
			Self::Unknown => 0,
		}
	}
}
