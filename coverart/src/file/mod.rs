//! Generic file handling utilities

mod audio_file;
mod file_type;
mod tagged_media;

pub use audio_file::AudioFile;
pub use file_type::FileType;
pub use tagged_media::{ContainerFamily, TaggedMedia};

pub(crate) use file_type::{Signature, frame_type};
