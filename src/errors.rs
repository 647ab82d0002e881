//! Error types for the payrs library.
//!
//! This module defines all error types that can occur while classifying,
//! encoding, or decoding gateway requests and replies.

use thiserror::Error;

/// Main error type for gateway codec operations.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request object does not match a known operation shape.
    ///
    /// Raised by the variant registry before any encoding takes place.
    #[error("Unsupported request variant: {0}")]
    UnsupportedVariant(String),

    /// An inconsistent field combination was discovered mid-encode.
    #[error("Encode error: {0}")]
    Encode(String),

    /// A required field was absent from a request in a context that needs it.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Reply bytes do not parse as the expected syntax, or a discriminator
    /// is unrecognized in a context requiring a specific shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The numeric status code at position 0 of a flat reply record is not
    /// one of the four documented outcomes.
    #[error("Unknown gateway status code: {0}")]
    UnknownStatusCode(u32),

    /// Error raised by the underlying XML parser.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Result type alias for gateway codec operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
