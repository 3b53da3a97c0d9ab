//! Key/value persistence for the scorecard
//!
//! Features:
//! - One string value per key, fully replaced on every write
//! - In-memory backend for tests and fallbacks
//! - File backend for the native binary (atomic rename on write)
//! - Browser LocalStorage backend on wasm32

pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod memory;

pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Failure talking to a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error on key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage rejected write to key {0:?}")]
    Rejected(String),
    #[error("could not encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A synchronous string key/value store
pub trait Storage {
    /// Read a key, `Ok(None)` if it was never written
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a key
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key (missing keys are not an error)
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}
