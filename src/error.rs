//! Error handling for the pixora library
//!
//! All codec operations share a single error type. Every error is terminal for
//! the call that raised it: the codec never retries internally and never
//! returns partial results.

use thiserror::Error;

/// Main error type for the pixora library
#[derive(Error, Debug)]
pub enum PixoraError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Empty or shape-mismatched input handed to the encoder
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error message describing the issue
        message: String,
    },

    /// The encoder met a symbol absent from its own code table
    #[error("No code for symbol {symbol}")]
    MissingCode {
        /// The symbol without a code table entry
        symbol: u8,
    },

    /// The decoder cannot resolve the bitstream against the code table
    #[error("Corrupt stream: {message}")]
    CorruptStream {
        /// Error message describing the corruption
        message: String,
    },

    /// Decoded element count disagrees with the declared image shape
    #[error("Shape mismatch: expected {expected} elements, decoded {actual}")]
    ShapeMismatch {
        /// Element count implied by the declared shape
        expected: u64,
        /// Element count actually decoded
        actual: u64,
    },
}

impl PixoraError {
    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a missing code error
    pub fn missing_code(symbol: u8) -> Self {
        Self::MissingCode { symbol }
    }

    /// Create a corrupt stream error
    pub fn corrupt_stream<S: Into<String>>(message: S) -> Self {
        Self::CorruptStream {
            message: message.into(),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: u64, actual: u64) -> Self {
        Self::ShapeMismatch { expected, actual }
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::InvalidInput { .. } => "input",
            Self::MissingCode { .. } => "code",
            Self::CorruptStream { .. } => "stream",
            Self::ShapeMismatch { .. } => "shape",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PixoraError>;
