/* src/provider/dir.rs */

use std::fs::{self, File, Metadata};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::{FileProvider, Handle};
use crate::error::Error;
use crate::listing::Entry;
use crate::path;

/// Serves a directory of the local filesystem.
///
/// Logical paths are cleaned with [`path::clean`] and joined onto the root,
/// so `..` cannot climb out of it. Symlinks are followed as-is.
///
/// ```
/// let root = std::env::temp_dir();
/// let provider = dirlist::provider::DirProvider::new(&root);
/// assert!(provider.is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct DirProvider {
	root: PathBuf,
}

impl DirProvider {
	/// Creates a provider rooted at `root`, which must exist.
	pub fn new(root: impl AsRef<Path>) -> Result<Self, Error> {
		let root = root.as_ref();
		let canonical = root.canonicalize().map_err(|source| Error::InvalidRoot {
			path: root.to_path_buf(),
			source,
		})?;
		Ok(Self { root: canonical })
	}

	/// The canonical root directory.
	#[must_use]
	pub fn root(&self) -> &Path {
		&self.root
	}
}

impl FileProvider for DirProvider {
	fn open(&self, logical: &str) -> io::Result<Box<dyn Handle>> {
		let full = self.root.join(path::clean(logical));
		let metadata = fs::metadata(&full)?;
		let handle = if metadata.is_dir() {
			DirHandle::Dir { path: full }
		} else {
			let file = File::open(&full)?;
			DirHandle::File { path: full, file }
		};
		Ok(Box::new(handle))
	}
}

enum DirHandle {
	Dir { path: PathBuf },
	File { path: PathBuf, file: File },
}

impl DirHandle {
	fn path(&self) -> &Path {
		match self {
			Self::Dir { path } | Self::File { path, .. } => path,
		}
	}
}

fn entry(name: String, metadata: &Metadata) -> Entry {
	let is_dir = metadata.is_dir();
	Entry {
		name,
		is_dir,
		size: (!is_dir).then(|| metadata.len()),
		modified: metadata.modified().ok(),
	}
}

impl Handle for DirHandle {
	fn stat(&self) -> io::Result<Entry> {
		let metadata = match self {
			Self::Dir { path } => fs::metadata(path)?,
			Self::File { file, .. } => file.metadata()?,
		};
		let name = self
			.path()
			.file_name()
			.map_or_else(|| "/".to_owned(), |n| n.to_string_lossy().into_owned());
		Ok(entry(name, &metadata))
	}

	fn read_entries(&mut self) -> io::Result<Vec<Entry>> {
		let Self::Dir { path } = self else {
			return Err(io::Error::from(io::ErrorKind::NotADirectory));
		};
		let mut entries = Vec::new();
		for dir_entry in fs::read_dir(path)? {
			let dir_entry = dir_entry?;
			let metadata = dir_entry.metadata()?;
			let name = dir_entry.file_name().to_string_lossy().into_owned();
			entries.push(entry(name, &metadata));
		}
		Ok(entries)
	}
}

impl Read for DirHandle {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		match self {
			Self::Dir { .. } => Err(io::Error::from(io::ErrorKind::IsADirectory)),
			Self::File { file, .. } => file.read(buf),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn make_root() -> tempfile::TempDir {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir_all(dir.path().join("docs/images")).unwrap();
		fs::write(dir.path().join("docs/a.txt"), b"alpha").unwrap();
		fs::write(dir.path().join("docs/index.html"), b"<html>").unwrap();
		dir
	}

	#[test]
	fn invalid_root() {
		let result = DirProvider::new("/nonexistent_root_dir_xyz");
		assert!(matches!(result, Err(Error::InvalidRoot { .. })));
	}

	#[test]
	fn opens_file_and_reads() {
		let root = make_root();
		let provider = DirProvider::new(root.path()).unwrap();
		let mut handle = provider.open("/docs/a.txt").unwrap();
		let stat = handle.stat().unwrap();
		assert!(!stat.is_dir);
		assert_eq!(stat.name, "a.txt");
		assert_eq!(stat.size, Some(5));

		let mut content = String::new();
		handle.read_to_string(&mut content).unwrap();
		assert_eq!(content, "alpha");
	}

	#[test]
	fn opens_directory() {
		let root = make_root();
		let provider = DirProvider::new(root.path()).unwrap();
		let mut handle = provider.open("/docs/").unwrap();
		assert!(handle.stat().unwrap().is_dir);

		let mut names: Vec<_> = handle
			.read_entries()
			.unwrap()
			.into_iter()
			.map(|e| (e.name, e.is_dir))
			.collect();
		names.sort();
		assert_eq!(
			names,
			[
				("a.txt".to_owned(), false),
				("images".to_owned(), true),
				("index.html".to_owned(), false),
			]
		);
	}

	#[test]
	fn root_directory() {
		let root = make_root();
		let provider = DirProvider::new(root.path()).unwrap();
		let handle = provider.open("/").unwrap();
		assert!(handle.stat().unwrap().is_dir);
	}

	#[test]
	fn missing_is_not_found() {
		let root = make_root();
		let provider = DirProvider::new(root.path()).unwrap();
		let err = provider.open("/docs/missing.txt").err().unwrap();
		assert_eq!(err.kind(), io::ErrorKind::NotFound);
	}

	#[test]
	fn traversal_stays_inside_root() {
		let root = make_root();
		let provider = DirProvider::new(root.path()).unwrap();
		let handle = provider.open("/../../docs/a.txt").unwrap();
		assert_eq!(handle.stat().unwrap().name, "a.txt");
	}

	#[test]
	fn read_entries_on_file_fails() {
		let root = make_root();
		let provider = DirProvider::new(root.path()).unwrap();
		let mut handle = provider.open("/docs/a.txt").unwrap();
		assert!(handle.read_entries().is_err());
	}

	#[test]
	fn read_on_directory_fails() {
		let root = make_root();
		let provider = DirProvider::new(root.path()).unwrap();
		let mut handle = provider.open("/docs").unwrap();
		let mut buf = [0u8; 8];
		assert!(handle.read(&mut buf).is_err());
	}
}
