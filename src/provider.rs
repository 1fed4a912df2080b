/* src/provider.rs */

//! Filesystem abstraction the handler reads through.
//!
//! A [`FileProvider`] resolves logical paths to open [`Handle`]s. Any backend
//! works: an OS directory ([`DirProvider`]), embedded assets
//! ([`MemoryProvider`]), or a remote store implemented by the caller.

use std::io::{self, Read};
use std::sync::Arc;

use crate::listing::Entry;

mod dir;
mod memory;

pub use dir::DirProvider;
pub use memory::MemoryProvider;

/// An open file or directory, owned by a single request.
///
/// Reading yields file content. Dropping the handle releases it.
pub trait Handle: Read + Send {
	/// Metadata of the opened entry.
	fn stat(&self) -> io::Result<Entry>;

	/// Every entry of the opened directory, in backend order.
	///
	/// Fails when the handle is not a directory.
	fn read_entries(&mut self) -> io::Result<Vec<Entry>>;
}

/// Resolves logical paths to handles.
///
/// Implementations are shared read-only across concurrent requests.
pub trait FileProvider: Send + Sync {
	/// Opens `path`, a `/`-separated logical path such as `/docs/a.txt`.
	fn open(&self, path: &str) -> io::Result<Box<dyn Handle>>;
}

impl<P: FileProvider + ?Sized> FileProvider for Arc<P> {
	fn open(&self, path: &str) -> io::Result<Box<dyn Handle>> {
		(**self).open(path)
	}
}

impl<P: FileProvider + ?Sized> FileProvider for Box<P> {
	fn open(&self, path: &str) -> io::Result<Box<dyn Handle>> {
		(**self).open(path)
	}
}
