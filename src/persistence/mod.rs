//! Durable mirror of the catalog.
//!
//! The catalog is written as one JSON array under one key of a
//! [`StorageBackend`]. Two backends ship with the crate: [`MemoryStorage`]
//! for tests and embedding, and [`FileStorage`] for a directory on disk.

mod backend;
mod bridge;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use bridge::{Origin, PersistenceBridge, DEFAULT_SLOT_KEY};
pub use file::{FileStorage, FileStorageConfig};
pub use memory::MemoryStorage;
