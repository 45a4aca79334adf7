//! Stream error types

use crate::logging::codes;
use crate::utils::Position;

/// Errors raised by the character stream and by source loading
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StreamError {
    #[error("Read past end of stream at {position}")]
    Exhausted { position: Position },

    #[error("Seek target {target} outside buffered source of {length} characters")]
    SeekOutOfRange { target: usize, length: usize },

    #[error("Source too large: {size} bytes (max: {max_size})")]
    TooLarge { size: u64, max_size: u64 },

    #[error("I/O error reading {origin}: {message}")]
    Io { origin: String, message: String },

    #[error("Invalid UTF-8 encoding in {origin}: {message}")]
    InvalidEncoding { origin: String, message: String },

    #[error("Source not found: {path}")]
    NotFound { path: String },
}

impl StreamError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            StreamError::Exhausted { .. } => codes::stream::STREAM_EXHAUSTED,
            StreamError::SeekOutOfRange { .. } => codes::stream::SEEK_OUT_OF_RANGE,
            StreamError::TooLarge { .. } => codes::stream::SOURCE_TOO_LARGE,
            StreamError::Io { .. } => codes::stream::SOURCE_IO_ERROR,
            StreamError::InvalidEncoding { .. } => codes::stream::INVALID_ENCODING,
            StreamError::NotFound { .. } => codes::stream::SOURCE_NOT_FOUND,
        }
    }

    /// Check if this error should halt processing
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Get error severity
    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }
}

/// Result type for stream operations
pub type StreamResult<T> = Result<T, StreamError>;
