//! Error types for the PDF serializer.
//!
//! This module defines all error types that can occur while validating
//! serializer input and assembling PDF bytes.

use crate::writer::ImageError;

/// Result type alias for PDF library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during PDF generation.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// Input rejected before any bytes were written (empty image list,
    /// empty JPEG payload, zero pixel dimension).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input text was not valid UTF-8, or output could not be encoded.
    #[error("Encoding failure: {0}")]
    EncodingFailure(String),

    /// Object number was never allocated, or was written twice
    #[error("Invalid object number: {0}")]
    InvalidObjectNumber(u32),

    /// Cross-reference table could not be read back
    #[error("Invalid cross-reference table: {0}")]
    InvalidXref(String),

    /// Image error
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
