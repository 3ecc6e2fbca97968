//! Monochrome Handler
//!
//! Turns an S3 "object created" notification into a width-capped grayscale
//! copy of the object in the output bucket, plus a metadata record.

pub mod error;
pub mod event;
pub mod handler;
pub mod telemetry;

// Re-export commonly used types
pub use error::ProcessError;
pub use event::TriggerNotification;
pub use handler::{function_handler, HandlerConfig, ImageTransformHandler};
