//! Read and write embedded cover art, regardless of the file format.
//!
//! coverart finds the cover picture of a media file, and attaches new ones, across four tag
//! container families:
//!
//! | Family | Pictures are stored in                                              |
//! |--------|---------------------------------------------------------------------|
//! | MPEG   | ID3v2 `APIC` frames                                                 |
//! | FLAC   | `PICTURE` blocks, a prepended ID3v2 tag, or the Xiph comment        |
//! | MP4    | The `covr` item of `moov.udta.meta.ilst`                            |
//! | ASF    | `WM/Picture` attributes                                             |
//!
//! Any other file can still be opened, it is simply classified as unsupported.
//!
//! # Examples
//!
//! ## Reading a cover
//!
//! ```rust,no_run
//! # fn main() -> coverart::error::Result<()> {
//! use coverart::cover::{CoverFile, ReadStatus};
//!
//! let file = CoverFile::open("song.m4a")?;
//!
//! let lookup = file.read_cover();
//! if lookup.status() == ReadStatus::Found {
//! 	let picture = lookup.into_picture().unwrap();
//! 	std::fs::write("cover.jpg", picture.data())?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Writing a cover
//!
//! ```rust,no_run
//! # fn main() -> coverart::error::Result<()> {
//! use coverart::cover::CoverFile;
//! use coverart::picture::Picture;
//!
//! let mut file = CoverFile::open("song.wma")?;
//! file.write_cover(Picture::new(std::fs::read("cover.png")?, "image/png"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Using an existing reader
//!
//! ```rust,no_run
//! # fn main() -> coverart::error::Result<()> {
//! use coverart::config::WriteOptions;
//! use coverart::picture::Picture;
//! use coverart::read_from;
//! use std::fs::OpenOptions;
//!
//! let mut file = OpenOptions::new().read(true).write(true).open("song.flac")?;
//!
//! // The file type is guessed from the content
//! let mut media = read_from(&mut file)?;
//! media.write_cover_to(
//! 	&mut file,
//! 	Picture::new(std::fs::read("cover.png")?, "image/png"),
//! 	WriteOptions::default(),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! Each container has its own quirks, such as MP4 only knowing four image formats. Be sure to
//! read the module documentation of each format.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod cover;
pub mod error;
pub mod file;
pub(crate) mod macros;
pub mod mime;
pub mod picture;
pub mod probe;
mod util;

pub mod asf;
pub mod flac;
pub mod id3;
pub mod mp4;
pub mod mpeg;
pub mod xiph;

pub use crate::probe::{read_from, read_from_path};

pub use util::text::TextEncoding;

pub use util::io;

pub mod prelude {
	//! A prelude for commonly used items in the library.
	//!
	//! This module is intended to be wildcard imported.
	//!
	//! ```rust
	//! use coverart::prelude::*;
	//! ```

	pub use crate::cover::{CoverFile, ReadStatus};
	pub use crate::file::AudioFile;
	pub use crate::picture::Picture;
}
