// ---------------------------------------------------------------------------
// Flat-file storage
// ---------------------------------------------------------------------------
//
// Each collection lives in `<dir>/<collection>.txt` as a single JSON value.
// Two shapes are supported:
//
//   PrimitiveStore<T>  sorted, deduplicated array of scalars
//   ObjectStore<T>     array of records in append order
//
// Reads are fail-open: a missing or unparsable file is an empty collection.
// Every `create` reads the whole file, modifies it in memory and rewrites it
// in place. There is no locking and no atomic rename, so concurrent writers
// can lose updates and a crash mid-write leaves a file that the next read
// will treat as empty.
// ---------------------------------------------------------------------------

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// File extension used for every collection.
pub const COLLECTION_EXTENSION: &str = "txt";

// ---------------------------------------------------------------------------
// FlatFile: shared read/write
// ---------------------------------------------------------------------------

/// A named JSON text resource inside a data directory.
#[derive(Debug, Clone)]
pub struct FlatFile {
	path: PathBuf,
}

impl FlatFile {
	pub fn new(dir: impl AsRef<Path>, collection: &str) -> Self {
		let path = dir
			.as_ref()
			.join(format!("{}.{}", collection, COLLECTION_EXTENSION));
		Self { path }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Load the whole file as a JSON array. Never fails.
	pub fn read<T: DeserializeOwned>(&self) -> Vec<T> {
		let raw = match fs::read_to_string(&self.path) {
			Ok(raw) => raw,
			Err(e) if e.kind() == ErrorKind::NotFound => {
				tracing::debug!(path = %self.path.display(), "collection file absent, reading as empty");
				return Vec::new();
			}
			Err(e) => {
				tracing::warn!(path = %self.path.display(), error = %e, "unreadable collection file, reading as empty");
				return Vec::new();
			}
		};

		match serde_json::from_str(&raw) {
			Ok(items) => items,
			Err(e) => {
				tracing::warn!(path = %self.path.display(), error = %e, "corrupt collection file, reading as empty");
				Vec::new()
			}
		}
	}

	/// Overwrite the file with `items`, creating the data directory if needed.
	pub fn write<T: Serialize>(&self, items: &[T]) -> Result<(), StorageError> {
		if let Some(parent) = self.path.parent() {
			if !parent.as_os_str().is_empty() {
				fs::create_dir_all(parent)?;
			}
		}
		let json = serde_json::to_string(items)?;
		fs::write(&self.path, json)?;
		tracing::debug!(path = %self.path.display(), count = items.len(), "collection written");
		Ok(())
	}
}

// ---------------------------------------------------------------------------
// PrimitiveStore
// ---------------------------------------------------------------------------

/// Sorted set of scalar values backed by a flat file.
#[derive(Debug, Clone)]
pub struct PrimitiveStore<T> {
	file: FlatFile,
	_item: PhantomData<T>,
}

impl<T> PrimitiveStore<T>
where
	T: Ord + Serialize + DeserializeOwned,
{
	pub fn new(dir: impl AsRef<Path>, collection: &str) -> Self {
		Self {
			file: FlatFile::new(dir, collection),
			_item: PhantomData,
		}
	}

	pub fn read(&self) -> Vec<T> {
		self.file.read()
	}

	/// Union `items` into the stored set and write it back sorted ascending.
	pub fn create<I>(&self, items: I) -> Result<(), StorageError>
	where
		I: IntoIterator<Item = T>,
	{
		let mut merged: BTreeSet<T> = self.file.read().into_iter().collect();
		merged.extend(items);
		let sorted: Vec<T> = merged.into_iter().collect();
		self.file.write(&sorted)
	}
}

// ---------------------------------------------------------------------------
// ObjectStore
// ---------------------------------------------------------------------------

/// Append-ordered log of records backed by a flat file.
#[derive(Debug, Clone)]
pub struct ObjectStore<T> {
	file: FlatFile,
	_item: PhantomData<T>,
}

impl<T> ObjectStore<T>
where
	T: Serialize + DeserializeOwned,
{
	pub fn new(dir: impl AsRef<Path>, collection: &str) -> Self {
		Self {
			file: FlatFile::new(dir, collection),
			_item: PhantomData,
		}
	}

	pub fn read(&self) -> Vec<T> {
		self.file.read()
	}

	/// Append one record. No deduplication.
	pub fn create(&self, item: T) -> Result<(), StorageError> {
		let mut items: Vec<T> = self.file.read();
		items.push(item);
		self.file.write(&items)
	}
}
