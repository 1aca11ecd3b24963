//! Detect the type of a file and read it into a [`TaggedMedia`]

use crate::asf::AsfFile;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::{AudioFile, FileType, Signature, TaggedMedia, frame_type};
use crate::flac::FlacFile;
use crate::mp4::Mp4File;
use crate::mpeg::MpegFile;
use crate::mpeg::header::search_for_frame_sync;

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

// Enough for every signature, the Ogg codec identifiers end at byte 36
const SNIFF_LEN: u64 = 36;

/// Reads a file whose format isn't known ahead of time
///
/// A `Probe` carries a reader and its (possibly unknown) [`FileType`]. The type can come from a
/// path, be given explicitly, or be guessed from the content with [`Probe::guess_file_type`].
///
/// ```rust,no_run
/// # fn main() -> coverart::error::Result<()> {
/// use coverart::file::FileType;
/// use coverart::probe::Probe;
///
/// // Only the extension is used here
/// let probe = Probe::open("path/to/my.mp3")?;
/// assert_eq!(probe.file_type(), Some(FileType::Mpeg));
/// # Ok(())
/// # }
/// ```
///
/// ```rust
/// # fn main() -> coverart::error::Result<()> {
/// use coverart::file::FileType;
/// use coverart::probe::Probe;
/// use std::io::Cursor;
///
/// let probe = Probe::new(Cursor::new(b"fLaC")).guess_file_type()?;
/// assert_eq!(probe.file_type(), Some(FileType::Flac));
/// # Ok(())
/// # }
/// ```
pub struct Probe<R: Read> {
	inner: R,
	options: Option<ParseOptions>,
	f_ty: Option<FileType>,
}

impl<R: Read> Probe<R> {
	/// Create a `Probe` with no known [`FileType`]
	///
	/// Unbuffered readers should be wrapped in a [`BufReader`] first, guessing the file type
	/// reads a byte at a time while searching for MPEG frames.
	#[must_use]
	pub const fn new(reader: R) -> Self {
		Self {
			inner: reader,
			options: None,
			f_ty: None,
		}
	}

	/// Create a `Probe` for a reader of a known [`FileType`]
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::file::FileType;
	/// use coverart::probe::Probe;
	/// use std::io::Cursor;
	///
	/// let probe = Probe::with_file_type(Cursor::new(Vec::new()), FileType::Mpeg);
	/// assert_eq!(probe.file_type(), Some(FileType::Mpeg));
	/// ```
	pub fn with_file_type(reader: R, file_type: FileType) -> Self {
		Self {
			f_ty: Some(file_type),
			..Self::new(reader)
		}
	}

	/// The [`FileType`] that will be used by [`Probe::read`]
	pub fn file_type(&self) -> Option<FileType> {
		self.f_ty
	}

	/// Use `options` when guessing the file type and reading
	#[must_use]
	pub fn options(mut self, options: ParseOptions) -> Self {
		self.options = Some(options);
		self
	}

	/// Take back the reader
	pub fn into_inner(self) -> R {
		self.inner
	}
}

impl Probe<BufReader<File>> {
	/// Open the file at `path`, taking the [`FileType`] from its extension
	///
	/// An unrecognized extension leaves the type unknown, see [`Probe::guess_file_type`].
	///
	/// # Errors
	///
	/// * `path` can't be opened
	pub fn open<P>(path: P) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();

		let file_type = FileType::from_path(path);
		log::debug!(
			"Probe: Opening `{}`, type from extension: {file_type:?}",
			path.display()
		);

		Ok(Self {
			inner: BufReader::new(File::open(path)?),
			options: None,
			f_ty: file_type,
		})
	}
}

impl<R: Read + Seek> Probe<R> {
	/// Guess the [`FileType`] from the content of the reader
	///
	/// A successful guess replaces the current file type, otherwise it is left alone. The reader
	/// is returned to its starting position either way.
	///
	/// Leading ID3v2 tags are skipped. An MPEG frame is searched for up to
	/// [`ParseOptions::max_junk_bytes`] bytes into the stream (or past the ID3v2 tag).
	///
	/// # Errors
	///
	/// Only I/O errors are possible. The reader is in an unknown state afterwards, so the
	/// `Probe` should be discarded.
	pub fn guess_file_type(mut self) -> std::io::Result<Self> {
		let max_junk_bytes = self
			.options
			.unwrap_or_default()
			.max_junk_bytes;

		let start = self.inner.stream_position()?;
		let guess = self.sniff(max_junk_bytes);
		self.inner.seek(SeekFrom::Start(start))?;

		if let Some(file_type) = guess? {
			self.f_ty = Some(file_type);
		}

		log::debug!("Probe: Guessed file type: {:?}", self.f_ty);
		Ok(self)
	}

	fn sniff(&mut self, max_junk_bytes: usize) -> std::io::Result<Option<FileType>> {
		let mut buf = Vec::with_capacity(SNIFF_LEN as usize);
		self.inner.by_ref().take(SNIFF_LEN).read_to_end(&mut buf)?;

		if buf.is_empty() {
			return Ok(None);
		}

		let start = self.inner.seek(SeekFrom::Current(-(buf.len() as i64)))?;

		match Signature::sniff(&buf) {
			Signature::Known(file_type) => Ok(Some(file_type)),
			Signature::Id3v2 { tag_size } => {
				let after_tag = start + 10 + u64::from(tag_size);
				log::debug!("Probe: Skipping an ID3v2 tag, resuming at {after_tag}");

				self.inner.seek(SeekFrom::Start(after_tag))?;

				let mut ident = Vec::with_capacity(4);
				self.inner.by_ref().take(4).read_to_end(&mut ident)?;
				self.inner.seek(SeekFrom::Start(after_tag))?;

				match &ident[..] {
					b"fLaC" => Ok(Some(FileType::Flac)),
					[b'M', b'A', b'C', ..] => Ok(Some(FileType::Ape)),
					b"MPCK" | [b'M', b'P', b'+', ..] => Ok(Some(FileType::Mpc)),
					_ => self.find_frame(max_junk_bytes),
				}
			},
			Signature::Unknown => self.find_frame(max_junk_bytes),
		}
	}

	fn find_frame(&mut self, max_junk_bytes: usize) -> std::io::Result<Option<FileType>> {
		let search_window = max_junk_bytes as u64 + 2;
		let Some(offset) = search_for_frame_sync(&mut self.inner.by_ref().take(search_window))?
		else {
			return Ok(None);
		};

		log::debug!("Probe: Found a frame sync after {offset} bytes of junk");

		// The search stops one byte past the sync
		self.inner.seek(SeekFrom::Current(-1))?;

		let mut second_byte = [0];
		self.inner.read_exact(&mut second_byte)?;

		Ok(Some(frame_type(second_byte[0])))
	}

	/// Read the file into a [`TaggedMedia`]
	///
	/// A [`FileType`] that can't hold cover art, or an unknown one, isn't parsed at all. It
	/// becomes [`TaggedMedia::Unsupported`].
	///
	/// # Errors
	///
	/// * The reader contains invalid data for the [`FileType`]
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::file::{ContainerFamily, FileType};
	/// use coverart::probe::Probe;
	/// use std::io::Cursor;
	///
	/// # fn main() -> coverart::error::Result<()> {
	/// let probe = Probe::new(Cursor::new(b"RIFF\0\0\0\0WAVE")).guess_file_type()?;
	///
	/// let media = probe.read()?;
	/// assert_eq!(media.family(), ContainerFamily::Unsupported);
	/// assert_eq!(media.file_type(), Some(FileType::Wav));
	/// # Ok(()) }
	/// ```
	pub fn read(mut self) -> Result<TaggedMedia> {
		let reader = &mut self.inner;
		let options = self.options.unwrap_or_default();

		let media = match self.f_ty {
			Some(FileType::Mpeg) => MpegFile::read_from(reader, options)?.into(),
			Some(FileType::Flac) => FlacFile::read_from(reader, options)?.into(),
			Some(FileType::Mp4) => Mp4File::read_from(reader, options)?.into(),
			Some(FileType::Asf) => AsfFile::read_from(reader, options)?.into(),
			other => {
				log::debug!("Probe: File type {other:?} can't hold cover art, not reading");
				TaggedMedia::Unsupported(other)
			},
		};

		Ok(media)
	}
}

/// Read a [`TaggedMedia`], guessing its type from the content
///
/// # Errors
///
/// * See [`Probe::guess_file_type`] and [`Probe::read`]
///
/// # Examples
///
/// ```rust,no_run
/// # fn main() -> coverart::error::Result<()> {
/// let mut file = std::fs::File::open("foo.mp3")?;
/// let media = coverart::read_from(&mut file)?;
/// # Ok(()) }
/// ```
pub fn read_from<R>(reader: &mut R) -> Result<TaggedMedia>
where
	R: Read + Seek,
{
	Probe::new(BufReader::new(reader)).guess_file_type()?.read()
}

/// Read a [`TaggedMedia`] from a path
///
/// The type comes from the extension, and only when that isn't recognized is the content used.
///
/// # Errors
///
/// * See [`Probe::open`] and [`Probe::read`]
pub fn read_from_path<P>(path: P) -> Result<TaggedMedia>
where
	P: AsRef<Path>,
{
	read_from_path_with_options(path, ParseOptions::new())
}

pub(crate) fn read_from_path_with_options<P>(path: P, options: ParseOptions) -> Result<TaggedMedia>
where
	P: AsRef<Path>,
{
	let mut probe = Probe::open(path)?.options(options);
	if probe.file_type().is_none() {
		probe = probe.guess_file_type()?;
	}

	probe.read()
}
