/// Options to control how coverart writes to a file
///
/// Most settings only apply to a single container, so these are best set up once and reused.
///
/// # Examples
///
/// ```rust
/// use coverart::config::WriteOptions;
///
/// // Never pad, and keep FLAC covers in the Vorbis comments
/// let options = WriteOptions::new()
/// 	.preferred_padding(0)
/// 	.use_flac_picture_blocks(false);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) preferred_padding: Option<u32>,
	pub(crate) use_flac_picture_blocks: bool,
}

impl WriteOptions {
	/// 1 KiB
	pub const DEFAULT_PREFERRED_PADDING: u32 = 1024;

	/// Same as [`WriteOptions::default`]
	///
	/// That is 1 KiB of padding, with FLAC picture blocks enabled.
	#[must_use]
	pub const fn new() -> Self {
		Self {
			preferred_padding: Some(Self::DEFAULT_PREFERRED_PADDING),
			use_flac_picture_blocks: true,
		}
	}

	/// Padding to leave behind when a tag has to grow
	///
	/// ID3v2 tags and FLAC metadata can reserve space, so later edits don't need to move the
	/// audio. MP4 and ASF have nothing equivalent and ignore this. `0` disables padding.
	///
	/// Existing padding is used up first, this is only what a rewritten tag ends with.
	pub fn preferred_padding(mut self, preferred_padding: u32) -> Self {
		self.preferred_padding = (preferred_padding > 0).then_some(preferred_padding);
		self
	}

	/// Whether FLAC covers may be written as dedicated `PICTURE` metadata blocks
	///
	/// A FLAC file that already has picture blocks, or an embedded ID3v2 tag, always keeps using
	/// that container. This option only decides what happens to a FLAC file with neither: when
	/// `true` (the default), a new picture block is appended. When `false`, the picture is
	/// stored in the file's Vorbis comments instead, creating them if needed.
	pub fn use_flac_picture_blocks(mut self, use_flac_picture_blocks: bool) -> Self {
		self.use_flac_picture_blocks = use_flac_picture_blocks;
		self
	}
}

impl Default for WriteOptions {
	fn default() -> Self {
		Self::new()
	}
}
