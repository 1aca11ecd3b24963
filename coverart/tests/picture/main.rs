#![allow(missing_docs)]

mod mime;
mod rollback;
mod selection;
#[path = "../util/mod.rs"]
pub(crate) mod util;
