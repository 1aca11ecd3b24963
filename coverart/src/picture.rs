//! The format-agnostic cover picture and its type tag

/// The dimensions and color depth of a [`Picture`]
///
/// These are never decoded from the image data. They only travel with the picture where the
/// container stores them (FLAC `PICTURE` blocks).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct PictureGeometry {
	/// The picture's width in pixels
	pub width: u32,
	/// The picture's height in pixels
	pub height: u32,
	/// The picture's color depth in bits per pixel
	pub color_depth: u32,
}

/// An embedded cover picture
///
/// A `Picture` always owns its data. Pictures read from a file are copied out of the file's tag
/// structure, so they stay valid after the file is modified or dropped.
///
/// # Examples
///
/// ```rust
/// use coverart::picture::{Picture, PictureGeometry};
///
/// let picture = Picture::new(vec![0x89, b'P', b'N', b'G'], "image/png").with_geometry(
/// 	PictureGeometry {
/// 		width: 500,
/// 		height: 500,
/// 		color_depth: 24,
/// 	},
/// );
///
/// assert_eq!(picture.mime_type(), "image/png");
/// assert_eq!(picture.geometry().map(|g| g.width), Some(500));
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Picture {
	pub(crate) data: Vec<u8>,
	pub(crate) mime_type: String,
	pub(crate) geometry: Option<PictureGeometry>,
}

impl Picture {
	/// Create a new `Picture` with no geometry
	///
	/// The MIME type is stored as given. It is not validated or normalized.
	pub fn new<M>(data: Vec<u8>, mime_type: M) -> Self
	where
		M: Into<String>,
	{
		Self {
			data,
			mime_type: mime_type.into(),
			geometry: None,
		}
	}

	/// Attach a [`PictureGeometry`]
	#[must_use]
	pub fn with_geometry(mut self, geometry: PictureGeometry) -> Self {
		self.geometry = Some(geometry);
		self
	}

	/// The picture data
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Consumes the picture, returning its data
	pub fn into_data(self) -> Vec<u8> {
		self.data
	}

	/// The picture's MIME type
	///
	/// NOTE: For MP4 files, this is one of `image/jpeg`, `image/png`, `image/bmp`, `image/gif`,
	/// or an empty string when the stored format is unknown.
	pub fn mime_type(&self) -> &str {
		&self.mime_type
	}

	/// The picture's geometry, if the source container stored it
	pub fn geometry(&self) -> Option<PictureGeometry> {
		self.geometry
	}
}

macro_rules! picture_types {
	($($variant:ident => $code:literal),+ $(,)?) => {
		/// The picture type, according to ID3v2 APIC
		///
		/// The same codes are used by FLAC `PICTURE` blocks and ASF `WM/Picture` attributes.
		#[allow(missing_docs)]
		#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
		#[non_exhaustive]
		pub enum PictureType {
			$($variant,)+
			Undefined(u8),
		}

		impl PictureType {
			/// Get a `u8` from a `PictureType` according to ID3v2 APIC
			pub fn as_u8(&self) -> u8 {
				match self {
					$(Self::$variant => $code,)+
					Self::Undefined(i) => *i,
				}
			}

			/// Get a `PictureType` from a u8 according to ID3v2 APIC
			pub fn from_u8(byte: u8) -> Self {
				match byte {
					$($code => Self::$variant,)+
					i => Self::Undefined(i),
				}
			}
		}
	};
}

picture_types! {
	Other             => 0,
	Icon              => 1,
	OtherIcon         => 2,
	CoverFront        => 3,
	CoverBack         => 4,
	Leaflet           => 5,
	Media             => 6,
	LeadArtist        => 7,
	Artist            => 8,
	Conductor         => 9,
	Band              => 10,
	Composer          => 11,
	Lyricist          => 12,
	RecordingLocation => 13,
	DuringRecording   => 14,
	DuringPerformance => 15,
	ScreenCapture     => 16,
	BrightFish        => 17,
	Illustration      => 18,
	BandLogo          => 19,
	PublisherLogo     => 20,
}

impl PictureType {
	/// Whether this is the front cover type
	///
	/// This is the only distinction cover selection cares about.
	pub fn is_front_cover(self) -> bool {
		self.as_u8() == Self::CoverFront.as_u8()
	}
}
