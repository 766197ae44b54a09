//! Domain error types
//!
//! This module defines the error hierarchy for Tabex.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Tabex error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum TabexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Row source errors (paginated fetch failures)
    #[error("Row source error: {0}")]
    Source(#[from] SourceError),

    /// Codec errors (workbook or document encoding)
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Delivery errors (writing the produced file)
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised while walking a paginated row source
///
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to reach the list endpoint
    #[error("Failed to connect to row source: {0}")]
    ConnectionFailed(String),

    /// Invalid response body
    #[error("Invalid response from row source: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// A single page could not be fetched
    #[error("Failed to fetch page {page}: {message}")]
    PageFailed { page: u32, message: String },
}

/// Errors raised by the lazily loaded format codecs
#[derive(Debug, Error)]
pub enum CodecError {
    /// The codec could not be acquired
    #[error("Failed to load {format} codec: {message}")]
    LoadFailed { format: String, message: String },

    /// The codec rejected the table while encoding
    #[error("Failed to encode {format}: {message}")]
    EncodeFailed { format: String, message: String },

    /// The codec panicked while encoding
    #[error("{format} encoder aborted: {message}")]
    Aborted { format: String, message: String },
}

impl CodecError {
    /// Creates an encode failure for the given format label
    pub fn encode(format: impl Into<String>, message: impl ToString) -> Self {
        CodecError::EncodeFailed {
            format: format.into(),
            message: message.to_string(),
        }
    }

    /// Creates a load failure for the given format label
    pub fn load(format: impl Into<String>, message: impl ToString) -> Self {
        CodecError::LoadFailed {
            format: format.into(),
            message: message.to_string(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for TabexError {
    fn from(err: std::io::Error) -> Self {
        TabexError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TabexError {
    fn from(err: serde_json::Error) -> Self {
        TabexError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TabexError {
    fn from(err: toml::de::Error) -> Self {
        TabexError::Configuration(format!("TOML parse error: {err}"))
    }
}
