macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// Shorthand for return Err(CoverError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(CoverError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(CoverError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::CoverError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::CoverError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for FileDecodingError::new(FileType::Foo, "Message")
//
// Usage:
//
// - decode_err!(Variant, Message)
// - decode_err!(@BAIL Variant, Message)
macro_rules! decode_err {
	($file_ty:ident, $reason:literal) => {
		Into::<crate::error::CoverError>::into(crate::error::FileDecodingError::new(
			crate::file::FileType::$file_ty,
			$reason,
		))
	};
	(@BAIL $file_ty:ident, $reason:literal) => {
		return Err(decode_err!($file_ty, $reason))
	};
}

// Same as `decode_err!`, for the write side
macro_rules! encode_err {
	($file_ty:ident, $reason:literal) => {
		Into::<crate::error::CoverError>::into(crate::error::FileEncodingError::new(
			crate::file::FileType::$file_ty,
			$reason,
		))
	};
	(@BAIL $file_ty:ident, $reason:literal) => {
		return Err(encode_err!($file_ty, $reason))
	};
}

// Pick a handler for a `ParsingMode`
//
// `STRICT` and `RELAXED` are optional, any mode without a handler uses `DEFAULT`.
//
// Usage:
//
// - parse_mode_choice!(
// 		parse_mode,
// 		STRICT: some_expr,
// 		RELAXED: some_expr,
// 		DEFAULT: some_expr
// 	 )
macro_rules! parse_mode_choice {
	(
		$parse_mode:ident,
		$(STRICT: $strict_handler:expr,)?
		$(RELAXED: $relaxed_handler:expr,)?
		DEFAULT: $default:expr
	) => {
		match $parse_mode {
			$(crate::config::ParsingMode::Strict => { $strict_handler },)?
			$(crate::config::ParsingMode::Relaxed => { $relaxed_handler },)?
			#[allow(unreachable_patterns)]
			_ => { $default }
		}
	};
}

pub(crate) use {decode_err, encode_err, err, parse_mode_choice, try_vec};
