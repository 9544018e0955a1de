mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::io;

/// Custom error type for key-value storage operations
#[derive(Debug)]
pub enum StorageError {
    Unavailable(io::Error),
    Corrupt(String),
}

// Implement conversion from io::Error to StorageError
impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Unavailable(error)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Unavailable(e) => write!(f, "Storage unavailable: {}", e),
            StorageError::Corrupt(msg) => write!(f, "Storage corrupt: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Unavailable(e) => Some(e),
            StorageError::Corrupt(_) => None,
        }
    }
}

/// Synchronous string key-value store, scoped to one device/profile.
///
/// Values are small JSON blobs. There is no expiry and no partial write:
/// a `set` either replaces the whole value or fails.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
