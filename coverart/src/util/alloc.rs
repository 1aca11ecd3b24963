use crate::config::global_options;
use crate::error::Result;
use crate::macros::err;

/// Backs [`try_vec!`](crate::macros::try_vec), use that instead
///
/// `len` usually comes straight from the file, so it is checked against
/// [`GlobalOptions::allocation_limit`](crate::config::GlobalOptions::allocation_limit) before
/// anything is allocated.
pub(crate) fn fallible_vec_from_element<T>(element: T, len: usize) -> Result<Vec<T>>
where
	T: Clone,
{
	if len > global_options().allocation_limit {
		log::warn!("Refusing to allocate {len} bytes, over the allocation limit");
		err!(TooMuchData);
	}

	let mut v = Vec::new();
	v.try_reserve_exact(len)?;
	v.resize(len, element);

	Ok(v)
}
