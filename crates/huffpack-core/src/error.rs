//! Error types for codec operations.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Codec error types.
#[derive(Debug, Error)]
pub enum Error {
    /// There is nothing to encode.
    #[error("empty input: nothing to encode")]
    EmptyInput,

    /// Stream header is inconsistent with its declared sizes.
    #[error("malformed header: {message}")]
    MalformedHeader { message: String },

    /// Packed payload does not decode to a valid run of codes.
    #[error("corrupt stream: {message}")]
    CorruptStream { message: String },

    /// Input exceeds the configured size limit.
    #[error("input too large: {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge { size: u64, limit: u64 },

    /// Buffer too small for output.
    #[error("buffer too small: need {required} bytes, got {provided}")]
    BufferTooSmall { required: usize, provided: usize },

    /// I/O error from an underlying reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a malformed header error.
    pub fn malformed_header(message: impl Into<String>) -> Self {
        Error::MalformedHeader {
            message: message.into(),
        }
    }

    /// Create a corrupt stream error.
    pub fn corrupt_stream(message: impl Into<String>) -> Self {
        Error::CorruptStream {
            message: message.into(),
        }
    }

    /// Create a corrupt stream error with bit offset context.
    pub fn corrupt_at(message: impl Into<String>, bit_offset: u64) -> Self {
        Error::CorruptStream {
            message: format!("{} at bit {}", message.into(), bit_offset),
        }
    }

    /// Create an input too large error.
    pub fn input_too_large(size: u64, limit: u64) -> Self {
        Error::InputTooLarge { size, limit }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(required: usize, provided: usize) -> Self {
        Error::BufferTooSmall { required, provided }
    }

    /// Check if the caller can recover (skip the operation or retry with a
    /// larger buffer).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::EmptyInput | Error::BufferTooSmall { .. })
    }

    /// Get error category for metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Error::EmptyInput => "empty_input",
            Error::MalformedHeader { .. } => "malformed_header",
            Error::CorruptStream { .. } => "corrupt_stream",
            Error::InputTooLarge { .. } => "input_too_large",
            Error::BufferTooSmall { .. } => "buffer_too_small",
            Error::Io(_) => "io_error",
        }
    }
}
