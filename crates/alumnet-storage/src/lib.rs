//! Alumnet Storage Library
//!
//! This crate provides the document store abstraction used by the upload
//! workflow, with a local filesystem backend and a simulated backend that stands
//! in when no remote store is configured.
//!
//! # Storage path format
//!
//! All backends use the same layout: `documents/{owner-slug}/{unix-millis}_{filename}`.
//! Paths must not contain `..` or a leading `/`. Path generation is centralized in
//! the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod simulated;
pub mod traits;

// Re-export commonly used types
pub use alumnet_core::StorageBackend;
pub use factory::create_storage;
pub use keys::generate_document_path;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use simulated::SimulatedStorage;
pub use traits::{DocumentStore, StorageError, StorageResult};
