//! Object store abstraction for Modshelf
//!
//! Uploaded file bundles live in a key-addressed blob store, separate from
//! the relational catalog. Keys are human-readable paths of the form
//! `<slot>/<slug>/<filename>`. The publish workflow writes a blob before it
//! touches the catalog, so a crash between the two leaves an orphaned blob
//! rather than a dangling catalog reference.

pub mod error;
pub mod fs;
pub mod memory;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use fs::FsObjectStore;
pub use memory::MemoryObjectStore;
pub use store::{ObjectStore, StoredObject};
