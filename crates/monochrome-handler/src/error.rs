//! Handler error taxonomy
//!
//! Every variant is fatal for the invocation. A failed metadata write is not
//! represented here because it never propagates.

use monochrome_processing::ProcessingError;
use monochrome_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(#[source] StorageError),

    #[error("Failed to fetch {bucket}/{key}: {source}")]
    Fetch {
        bucket: String,
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("Failed to decode image: {0}")]
    Decode(#[source] ProcessingError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] ProcessingError),

    #[error("Failed to upload {bucket}/{key}: {source}")]
    Upload {
        bucket: String,
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("Failed to build response: {0}")]
    Response(#[from] serde_json::Error),
}

impl ProcessError {
    /// Machine-readable tag logged alongside the message
    pub fn error_kind(&self) -> &'static str {
        match self {
            ProcessError::InvalidEvent(_) | ProcessError::InvalidKey(_) => "invalid_event",
            ProcessError::Fetch { .. } => "fetch",
            ProcessError::Decode(_) => "decode",
            ProcessError::Encode(_) => "encode",
            ProcessError::Upload { .. } => "upload",
            ProcessError::Response(_) => "response",
        }
    }

    /// Log the error with its kind tag
    pub fn log(&self) {
        tracing::error!(error = %self, error_kind = self.error_kind(), "Image processing failed");
    }
}

/// Split processing errors into the decode and encode stages
impl From<ProcessingError> for ProcessError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::Encode { .. } => ProcessError::Encode(err),
            ProcessingError::Decode(_) | ProcessingError::Io(_) => ProcessError::Decode(err),
        }
    }
}
