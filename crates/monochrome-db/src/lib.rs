//! Monochrome Metadata Library
//!
//! Persistence for processing records. The `MetadataStore` trait has upsert
//! semantics: writing a record for a key that already exists replaces it.

#[cfg(feature = "metadata-dynamodb")]
pub mod dynamodb;
pub mod factory;
#[cfg(feature = "metadata-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "metadata-dynamodb")]
pub use dynamodb::DynamoDbMetadataStore;
pub use factory::create_metadata_store;
#[cfg(feature = "metadata-local")]
pub use local::LocalMetadataStore;
pub use monochrome_core::{MetadataBackend, MetadataRecord};
pub use traits::{MetadataError, MetadataResult, MetadataStore};
