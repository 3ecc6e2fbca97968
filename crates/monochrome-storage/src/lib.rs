//! Monochrome Storage Library
//!
//! Object storage abstraction for the image handler. The `ObjectStorage` trait
//! addresses objects by `(bucket, key)` because one invocation reads from the
//! bucket named in the event and writes to the configured output bucket.
//!
//! Keys arriving in S3 event notifications are form-encoded; decode them with
//! [`decode_object_key`] before any storage call.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::decode_object_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use monochrome_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ObjectStorage, StorageError, StorageResult, StoredObject};
