/* src/error.rs */

use std::path::PathBuf;

use thiserror::Error;

/// All errors that dirlist can produce.
#[derive(Debug, Error)]
pub enum Error {
	/// The root path of a [`DirProvider`](crate::provider::DirProvider) is invalid or does not exist.
	#[error("invalid root path '{path}': {source}")]
	InvalidRoot {
		/// The path that failed to canonicalize.
		path: PathBuf,
		/// The underlying I/O error.
		source: std::io::Error,
	},

	/// The request path cannot have the configured URL prefix cut off: it is
	/// shorter than the prefix, or the cut would split a character.
	#[error("request path '{path}' cannot be cut at prefix '{prefix}'")]
	ShortPath {
		/// The request path as received.
		path: String,
		/// The configured prefix.
		prefix: String,
	},

	/// The URI contains invalid UTF-8 percent encoding.
	#[error("invalid URI encoding: {0}")]
	InvalidEncoding(#[from] std::str::Utf8Error),

	/// The decoded URI contains a null byte.
	#[error("null byte in URI path")]
	NullByte,

	/// An I/O error raised while rendering a listing.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// The listing template failed to render.
	#[cfg(feature = "tera")]
	#[error("template error: {0}")]
	Template(#[from] tera::Error),
}
