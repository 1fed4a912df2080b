/* src/path.rs */

use std::path::{Component, Path, PathBuf};

use crate::error::Error;

/// Turns a request path into the logical path handed to a
/// [`FileProvider`](crate::provider::FileProvider).
///
/// The first `prefix.len()` bytes are cut off without comparing them to
/// `prefix`, then the remainder is percent-decoded. A request path shorter
/// than the prefix, or one whose cut point splits a character, is an error
/// rather than a slice out of range.
///
/// ```
/// let logical = dirlist::path::logical("/files/a%20b.txt", "/files").unwrap();
/// assert_eq!(logical, "/a b.txt");
/// ```
pub fn logical(request_path: &str, prefix: &str) -> Result<String, Error> {
	let rest = request_path
		.get(prefix.len()..)
		.ok_or_else(|| Error::ShortPath {
			path: request_path.to_owned(),
			prefix: prefix.to_owned(),
		})?;

	let decoded = percent_encoding::percent_decode_str(rest).decode_utf8()?;
	if decoded.contains('\0') {
		return Err(Error::NullByte);
	}
	Ok(decoded.into_owned())
}

/// Lexically normalizes a logical path into a relative filesystem path.
///
/// Root, `.` and empty components are dropped. `..` pops one component but
/// never climbs above the root. No filesystem access happens here.
///
/// ```
/// use std::path::Path;
/// assert_eq!(dirlist::path::clean("/a/./b/../c"), Path::new("a/c"));
/// assert_eq!(dirlist::path::clean("/../../etc"), Path::new("etc"));
/// ```
#[must_use]
pub fn clean(logical: &str) -> PathBuf {
	let mut cleaned = PathBuf::new();
	for component in Path::new(logical).components() {
		match component {
			Component::Normal(c) => cleaned.push(c),
			Component::ParentDir => {
				cleaned.pop();
			}
			Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
		}
	}
	cleaned
}
