use std::cell::Cell;

thread_local! {
	static GLOBAL_OPTIONS: Cell<GlobalOptions> = const { Cell::new(GlobalOptions::new()) };
}

pub(crate) fn global_options() -> GlobalOptions {
	GLOBAL_OPTIONS.with(Cell::get)
}

/// Settings shared by every read on the current thread
///
/// These are set with [`apply_global_options`], rather than passed to each call.
///
/// # Examples
///
/// ```rust
/// use coverart::config::{GlobalOptions, apply_global_options};
///
/// // Some of my files embed posters rather than thumbnails
/// apply_global_options(GlobalOptions::new().allocation_limit(64 * 1024 * 1024));
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
#[non_exhaustive]
pub struct GlobalOptions {
	pub(crate) allocation_limit: usize,
}

impl GlobalOptions {
	/// 16 MiB
	pub const DEFAULT_ALLOCATION_LIMIT: usize = 16 * 1024 * 1024;

	/// Same as [`GlobalOptions::default`]
	#[must_use]
	pub const fn new() -> Self {
		Self {
			allocation_limit: Self::DEFAULT_ALLOCATION_LIMIT,
		}
	}

	/// The largest single allocation a read may make, in bytes
	///
	/// Sizes in a file are untrusted, a corrupt picture length shouldn't be able to exhaust
	/// memory. Anything larger fails with
	/// [`ErrorKind::TooMuchData`](crate::error::ErrorKind::TooMuchData).
	pub fn allocation_limit(&mut self, allocation_limit: usize) -> Self {
		self.allocation_limit = allocation_limit;
		*self
	}
}

impl Default for GlobalOptions {
	fn default() -> Self {
		Self::new()
	}
}

/// Replace the [`GlobalOptions`] of the current thread
pub fn apply_global_options(options: GlobalOptions) {
	GLOBAL_OPTIONS.with(|global_options| global_options.set(options));
}
