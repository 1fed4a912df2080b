/* src/provider/memory.rs */

use std::collections::BTreeMap;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{FileProvider, Handle};
use crate::listing::Entry;
use crate::path;

#[derive(Debug, Clone)]
enum Node {
	Dir,
	File(Arc<[u8]>),
}

/// An in-memory tree, for embedded assets and tests.
///
/// Parent directories of every added path are created implicitly. The root
/// always exists.
///
/// ```
/// use std::io::Read;
/// use dirlist::provider::{FileProvider, MemoryProvider};
///
/// let provider = MemoryProvider::new().file("/docs/a.txt", "alpha");
/// let mut handle = provider.open("/docs/a.txt").unwrap();
/// let mut text = String::new();
/// handle.read_to_string(&mut text).unwrap();
/// assert_eq!(text, "alpha");
/// assert!(provider.open("/docs").unwrap().stat().unwrap().is_dir);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryProvider {
	nodes: BTreeMap<PathBuf, Node>,
}

impl Default for MemoryProvider {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryProvider {
	/// Creates a tree holding only the root directory.
	#[must_use]
	pub fn new() -> Self {
		let mut nodes = BTreeMap::new();
		nodes.insert(PathBuf::new(), Node::Dir);
		Self { nodes }
	}

	/// Adds a file with `content` at `path`.
	#[must_use]
	pub fn file(mut self, path: &str, content: impl AsRef<[u8]>) -> Self {
		let key = path::clean(path);
		self.add_parents(&key);
		self.nodes.insert(key, Node::File(Arc::from(content.as_ref())));
		self
	}

	/// Adds an empty directory at `path`.
	#[must_use]
	pub fn dir(mut self, path: &str) -> Self {
		let key = path::clean(path);
		self.add_parents(&key);
		self.nodes.insert(key, Node::Dir);
		self
	}

	fn add_parents(&mut self, key: &Path) {
		for ancestor in key.ancestors().skip(1) {
			self.nodes.insert(ancestor.to_path_buf(), Node::Dir);
		}
	}

	fn entry(key: &Path, node: &Node) -> Entry {
		let name = key
			.file_name()
			.map_or_else(|| "/".to_owned(), |n| n.to_string_lossy().into_owned());
		match node {
			Node::Dir => Entry {
				name,
				is_dir: true,
				size: None,
				modified: None,
			},
			Node::File(content) => Entry {
				name,
				is_dir: false,
				size: Some(content.len() as u64),
				modified: None,
			},
		}
	}
}

impl FileProvider for MemoryProvider {
	fn open(&self, logical: &str) -> io::Result<Box<dyn Handle>> {
		let key = path::clean(logical);
		let node = self
			.nodes
			.get(&key)
			.ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
		let stat = Self::entry(&key, node);
		let handle = match node {
			Node::Dir => {
				let children = self
					.nodes
					.iter()
					.filter(|(child, _)| child.parent() == Some(key.as_path()))
					.map(|(child, node)| Self::entry(child, node))
					.collect();
				MemoryHandle::Dir { stat, children }
			}
			Node::File(content) => MemoryHandle::File {
				stat,
				content: Cursor::new(Arc::clone(content)),
			},
		};
		Ok(Box::new(handle))
	}
}

enum MemoryHandle {
	Dir { stat: Entry, children: Vec<Entry> },
	File { stat: Entry, content: Cursor<Arc<[u8]>> },
}

impl Handle for MemoryHandle {
	fn stat(&self) -> io::Result<Entry> {
		match self {
			Self::Dir { stat, .. } | Self::File { stat, .. } => Ok(stat.clone()),
		}
	}

	fn read_entries(&mut self) -> io::Result<Vec<Entry>> {
		match self {
			Self::Dir { children, .. } => Ok(children.clone()),
			Self::File { .. } => Err(io::Error::from(io::ErrorKind::NotADirectory)),
		}
	}
}

impl Read for MemoryHandle {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		match self {
			Self::Dir { .. } => Err(io::Error::from(io::ErrorKind::IsADirectory)),
			Self::File { content, .. } => content.read(buf),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> MemoryProvider {
		MemoryProvider::new()
			.file("/docs/b.txt", "bravo")
			.file("/docs/a.txt", "alpha")
			.dir("/docs/empty")
			.file("/top.txt", "top")
	}

	fn names(entries: &[Entry]) -> Vec<&str> {
		entries.iter().map(|e| e.name.as_str()).collect()
	}

	#[test]
	fn root_lists_top_level_only() {
		let provider = sample();
		let mut root = provider.open("/").unwrap();
		let entries = root.read_entries().unwrap();
		assert_eq!(names(&entries), ["docs", "top.txt"]);
	}

	#[test]
	fn implicit_parent_is_directory() {
		let provider = MemoryProvider::new().file("/a/b/c.txt", "");
		let handle = provider.open("/a/b").unwrap();
		let stat = handle.stat().unwrap();
		assert!(stat.is_dir);
		assert_eq!(stat.name, "b");
	}

	#[test]
	fn file_stat_and_read() {
		let provider = sample();
		let mut handle = provider.open("/docs/b.txt").unwrap();
		assert_eq!(handle.stat().unwrap().size, Some(5));
		let mut text = String::new();
		handle.read_to_string(&mut text).unwrap();
		assert_eq!(text, "bravo");
	}

	#[test]
	fn handles_are_independent() {
		let provider = sample();
		let mut first = provider.open("/top.txt").unwrap();
		let mut drained = Vec::new();
		first.read_to_end(&mut drained).unwrap();

		let mut second = provider.open("/top.txt").unwrap();
		let mut text = String::new();
		second.read_to_string(&mut text).unwrap();
		assert_eq!(text, "top");
	}

	#[test]
	fn empty_directory() {
		let provider = sample();
		let mut handle = provider.open("/docs/empty/").unwrap();
		assert!(handle.read_entries().unwrap().is_empty());
	}

	#[test]
	fn missing_is_not_found() {
		let provider = sample();
		let err = provider.open("/docs/c.txt").err().unwrap();
		assert_eq!(err.kind(), io::ErrorKind::NotFound);
	}

	#[test]
	fn file_is_not_a_directory() {
		let provider = sample();
		let mut handle = provider.open("/top.txt").unwrap();
		let err = handle.read_entries().unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::NotADirectory);
	}
}
