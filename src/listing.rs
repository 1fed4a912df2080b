/* src/listing.rs */

use std::fmt;
use std::io::Read;
use std::time::SystemTime;

use http::Uri;

use crate::provider::Handle;

/// A single directory entry, as reported by a
/// [`FileProvider`](crate::provider::FileProvider) backend.
///
/// ```
/// let entry = dirlist::listing::Entry {
///     name: "readme.txt".to_owned(),
///     is_dir: false,
///     size: Some(1024),
///     modified: None,
/// };
/// assert!(!entry.is_dir);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Entry {
	/// File or directory name without any path prefix.
	pub name: String,
	/// Whether this entry is a directory.
	pub is_dir: bool,
	/// File size in bytes. `None` for directories.
	pub size: Option<u64>,
	/// Last modification time.
	pub modified: Option<SystemTime>,
}

/// Sorts entries by name, ascending, comparing raw bytes.
///
/// Uppercase ASCII sorts before lowercase and directories are not grouped.
/// The sort is stable.
///
/// ```
/// use dirlist::listing::{Entry, sort};
///
/// let mut entries = vec![
///     Entry { name: "b".to_owned(), is_dir: false, size: Some(1), modified: None },
///     Entry { name: "a".to_owned(), is_dir: false, size: Some(1), modified: None },
///     Entry { name: "C".to_owned(), is_dir: true, size: None, modified: None },
/// ];
/// sort(&mut entries);
/// let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
/// assert_eq!(names, ["C", "a", "b"]);
/// ```
pub fn sort(entries: &mut [Entry]) {
	entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
}

/// Everything a [`Renderer`](crate::render::Renderer) gets to build one
/// directory listing. Built fresh for every request.
pub struct ListingContext {
	/// Directory entries, sorted by [`sort`].
	pub entries: Vec<Entry>,
	/// The index file of the directory, when one was found.
	pub index: Option<Box<dyn Handle>>,
	/// The request URI.
	pub url: Uri,
	/// Value of the request's `Host` header.
	pub host: String,
}

impl ListingContext {
	/// Reads the remaining content of the index file as text.
	///
	/// Returns `Ok(None)` when the directory has no index. Invalid UTF-8 is
	/// replaced lossily.
	pub fn index_contents(&mut self) -> std::io::Result<Option<String>> {
		let Some(index) = self.index.as_mut() else {
			return Ok(None);
		};
		let mut buf = Vec::new();
		index.read_to_end(&mut buf)?;
		Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
	}
}

impl fmt::Debug for ListingContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ListingContext")
			.field("entries", &self.entries)
			.field("index", &self.index.is_some())
			.field("url", &self.url)
			.field("host", &self.host)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn file(name: &str) -> Entry {
		Entry {
			name: name.to_owned(),
			is_dir: false,
			size: Some(100),
			modified: None,
		}
	}

	fn dir(name: &str) -> Entry {
		Entry {
			name: name.to_owned(),
			is_dir: true,
			size: None,
			modified: None,
		}
	}

	fn names(entries: &[Entry]) -> Vec<&str> {
		entries.iter().map(|e| e.name.as_str()).collect()
	}

	#[test]
	fn byte_order_uppercase_first() {
		let mut entries = vec![file("b"), file("a"), file("C")];
		sort(&mut entries);
		assert_eq!(names(&entries), ["C", "a", "b"]);
	}

	#[test]
	fn directories_not_grouped() {
		let mut entries = vec![file("b.txt"), dir("docs"), file("a.txt"), dir("assets")];
		sort(&mut entries);
		assert_eq!(names(&entries), ["a.txt", "assets", "b.txt", "docs"]);
	}

	#[test]
	fn multibyte_names_after_ascii() {
		let mut entries = vec![file("中文.txt"), file("z.txt"), file("Z.txt")];
		sort(&mut entries);
		assert_eq!(names(&entries), ["Z.txt", "z.txt", "中文.txt"]);
	}

	#[test]
	fn prefix_sorts_first() {
		let mut entries = vec![file("index.html.bak"), file("index.html"), file("index")];
		sort(&mut entries);
		assert_eq!(names(&entries), ["index", "index.html", "index.html.bak"]);
	}

	#[test]
	fn empty_list() {
		let mut entries: Vec<Entry> = vec![];
		sort(&mut entries);
		assert!(entries.is_empty());
	}

	#[test]
	fn index_contents_absent() {
		let mut context = ListingContext {
			entries: vec![],
			index: None,
			url: Uri::from_static("/docs/"),
			host: String::new(),
		};
		assert_eq!(context.index_contents().unwrap(), None);
	}

	#[test]
	fn debug_hides_handle() {
		let context = ListingContext {
			entries: vec![file("a")],
			index: None,
			url: Uri::from_static("/"),
			host: "example.com".to_owned(),
		};
		let text = format!("{context:?}");
		assert!(text.contains("index: false"));
		assert!(text.contains("example.com"));
	}
}
