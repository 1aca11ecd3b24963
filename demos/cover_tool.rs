#![allow(missing_docs)]

use coverart::config::{ParseOptions, WriteOptions};
use coverart::cover::{CoverFile, ReadStatus};
use coverart::picture::Picture;

use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(name = "cover_tool", about = "Read and write embedded cover art")]
enum Opt {
	/// Extract the cover of a file
	Read {
		/// Where to write the picture data. Only the MIME type is printed if omitted.
		#[structopt(short, long, parse(from_os_str))]
		output: Option<PathBuf>,

		#[structopt(parse(from_os_str))]
		path: PathBuf,
	},
	/// Attach a new front cover to a file
	Write {
		/// The MIME type of the picture
		#[structopt(short, long, default_value = "image/jpeg")]
		mime_type: String,

		/// Write FLAC covers to the Vorbis comments, instead of picture blocks
		#[structopt(long)]
		xiph: bool,

		#[structopt(parse(from_os_str))]
		picture: PathBuf,

		#[structopt(parse(from_os_str))]
		path: PathBuf,
	},
}

fn main() {
	match Opt::from_args() {
		Opt::Read { output, path } => {
			let file = CoverFile::open(&path).expect("ERROR: Failed to open file!");
			println!("INFO: Container family: {:?}", file.family());

			let lookup = file.read_cover();
			if lookup.status() != ReadStatus::Found {
				eprintln!("ERROR: No cover found: {:?}", lookup.status());
				std::process::exit(1);
			}

			let picture = lookup.into_picture().unwrap();
			println!(
				"INFO: Found a cover, MIME type: {:?}, {} bytes",
				picture.mime_type(),
				picture.data().len()
			);

			if let Some(geometry) = picture.geometry() {
				println!(
					"INFO: {}x{}, {} bits per pixel",
					geometry.width, geometry.height, geometry.color_depth
				);
			}

			if let Some(output) = output {
				std::fs::write(&output, picture.data()).expect("ERROR: Failed to write picture!");
				println!("INFO: Cover written to {}", output.display());
			}
		},
		Opt::Write {
			mime_type,
			xiph,
			picture,
			path,
		} => {
			let data = std::fs::read(&picture).expect("ERROR: Failed to read picture!");

			let write_options = WriteOptions::default().use_flac_picture_blocks(!xiph);
			let mut file = CoverFile::open_with(&path, ParseOptions::new(), write_options)
				.expect("ERROR: Failed to open file!");

			file.write_cover(Picture::new(data, mime_type))
				.expect("ERROR: Failed to write the cover!");

			println!("INFO: Cover successfully written!");
		},
	}
}
