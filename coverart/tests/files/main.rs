#![allow(missing_docs)]

mod asf;
mod flac;
mod mp4;
mod mpeg;
mod unsupported;
#[path = "../util/mod.rs"]
pub(crate) mod util;
