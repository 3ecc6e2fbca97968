//! Monochrome Core Library
//!
//! Configuration, shared models and backend selection types used by every
//! monochrome component.

pub mod config;
pub mod constants;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use models::{Dimensions, MetadataRecord, ProcessResponse, ProcessedBody};
pub use storage_types::{LogFormat, MetadataBackend, StorageBackend};
