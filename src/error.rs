//! Error types for facade material export.

use thiserror::Error;

/// Result type alias using ExportError.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Main error type for material and texture export operations.
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read or write an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// A style color value could not be parsed.
    ///
    /// Recoverable: callers may fall back to "no cladding color".
    #[error("Invalid color format: {0}")]
    InvalidColorFormat(String),

    /// The texture synthesizer could not produce the requested image.
    ///
    /// Aborts that one material, not the whole export run.
    #[error("Texture synthesis failed: {0}")]
    TextureSynthesis(String),

    /// The material template collection is missing or malformed.
    ///
    /// Fatal: no material can be instantiated without the template.
    #[error("Material template error: {0}")]
    MaterialTemplate(String),

    /// The host material store rejected a material registration.
    #[error("Material store error: {0}")]
    Store(String),

    /// A texture descriptor referenced by a style block is unknown.
    #[error("Unknown texture descriptor: {0}")]
    UnknownTexture(String),
}

impl ExportError {
    /// Whether this error aborts the whole export run rather than a
    /// single material.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExportError::MaterialTemplate(_))
    }
}
