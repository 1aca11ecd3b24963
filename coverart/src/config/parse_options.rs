/// Options to control how coverart parses a file
///
/// # Examples
///
/// ```rust,no_run
/// use coverart::config::{ParseOptions, ParsingMode};
/// use coverart::cover::CoverFile;
/// use coverart::config::WriteOptions;
///
/// # fn main() -> coverart::error::Result<()> {
/// let parse_options = ParseOptions::new()
/// 	.parsing_mode(ParsingMode::Strict)
/// 	.max_junk_bytes(4096);
///
/// let file = CoverFile::open_with("song.mp3", parse_options, WriteOptions::default())?;
/// # Ok(()) }
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) max_junk_bytes: usize,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// [`ParsingMode::BestAttempt`]
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// 1 KiB
	pub const DEFAULT_MAX_JUNK_BYTES: usize = 1024;

	/// Same as [`ParseOptions::default`]
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			max_junk_bytes: Self::DEFAULT_MAX_JUNK_BYTES,
		}
	}

	/// How to treat malformed picture entries and tags, see [`ParsingMode`]
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// How far to look for the first MPEG frame
	///
	/// Encoders sometimes leave garbage between an ID3v2 tag and the audio. Both file type
	/// detection and MPEG reading skip at most this many bytes before giving up.
	pub fn max_junk_bytes(&mut self, max_junk_bytes: usize) -> Self {
		self.max_junk_bytes = max_junk_bytes;
		*self
	}
}

/// How strictly input is validated
///
/// Whatever the mode, a malformed container structure (a broken FLAC block chain, an MP4 atom
/// running past its parent, an ASF header with a bad object size) is always an error.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Any malformed picture entry is an error
	///
	/// For example, a FLAC picture whose declared MIME type length runs past the end of the
	/// block.
	Strict,
	/// Malformed picture entries are skipped with a warning
	#[default]
	BestAttempt,
	/// Like [`ParsingMode::BestAttempt`], with some extra leniency for ID3v2
	///
	/// A frame claiming to be larger than the rest of the tag is cut at the end of the tag and
	/// kept, instead of ending the tag there.
	Relaxed,
}
