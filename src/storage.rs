//! Storage
//!
//! Snapshot persistence for the cart, catalog admin state and order history. Each store
//! holds a single value; callers keep the live state in memory and write it back after
//! every change.

use std::{
    cell::RefCell,
    fs, io,
    marker::PhantomData,
    path::{Path, PathBuf},
    rc::Rc,
};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Key the cart snapshot is stored under.
pub const CART_KEY: &str = "cart";

/// Key the catalog admin state is stored under.
pub const CATALOG_KEY: &str = "catalog";

/// Key the order history is stored under.
pub const ORDERS_KEY: &str = "orders";

/// Errors from loading or saving snapshots.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The stored snapshot could not be encoded or decoded.
    #[error(transparent)]
    Yaml(#[from] serde_norway::Error),
}

/// A place a single snapshot of `T` can be loaded from and saved to.
pub trait SnapshotStore<T> {
    /// Load the last saved snapshot, `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the snapshot exists but cannot be read.
    fn load(&self) -> Result<Option<T>, StorageError>;

    /// Replace the saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the snapshot cannot be written.
    fn save(&self, value: &T) -> Result<(), StorageError>;
}

impl<T, S: SnapshotStore<T> + ?Sized> SnapshotStore<T> for &S {
    fn load(&self) -> Result<Option<T>, StorageError> {
        (**self).load()
    }

    fn save(&self, value: &T) -> Result<(), StorageError> {
        (**self).save(value)
    }
}

/// In-memory store. Clones share the same slot, and the last write wins.
#[derive(Debug)]
pub struct MemoryStore<T> {
    slot: Rc<RefCell<Option<T>>>,
}

impl<T> MemoryStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
        }
    }

    /// Create a store that already holds `value`.
    pub fn with_value(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(value))),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: Clone> SnapshotStore<T> for MemoryStore<T> {
    fn load(&self) -> Result<Option<T>, StorageError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, value: &T) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = Some(value.clone());

        Ok(())
    }
}

/// Stores a snapshot as `<base_dir>/<key>.yml`.
#[derive(Debug, Clone)]
pub struct YamlFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> YamlFileStore<T> {
    /// Store under `key` in `base_dir`. Nothing touches the disk until the first save.
    pub fn new(base_dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: base_dir.as_ref().join(format!("{key}.yml")),
            _marker: PhantomData,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize + DeserializeOwned> SnapshotStore<T> for YamlFileStore<T> {
    fn load(&self) -> Result<Option<T>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_norway::from_str(&contents)?))
    }

    fn save(&self, value: &T) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_norway::to_string(value)?)?;

        Ok(())
    }
}
