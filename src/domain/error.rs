//! Error types for the Glyphdeck plugin.
//!
//! [`GlyphdeckError`] covers everything that can go wrong while reading and
//! parsing fonts or loading themes. Renderers never surface
//! these to the UI: at their boundary an error becomes "no output".

use thiserror::Error;

/// The main error type for Glyphdeck operations.
///
/// # Examples
///
/// ```
/// use glyphdeck::GlyphdeckError;
///
/// let err = GlyphdeckError::FontParse {
///     name: "broken".to_string(),
///     reason: "missing header".to_string(),
/// };
/// assert_eq!(err.to_string(), "Font `broken` could not be parsed: missing header");
/// ```
#[derive(Debug, Error)]
pub enum GlyphdeckError {
    /// A font file was read but its contents are not a valid font.
    #[error("Font `{name}` could not be parsed: {reason}")]
    FontParse {
        /// Font name (file stem or built-in name).
        name: String,
        /// Parser message.
        reason: String,
    },

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed (font tables, worker payloads).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The bitmap rasterizer could not produce a matrix.
    #[error("Raster error: {0}")]
    Raster(String),
}

/// A specialized `Result` type for Glyphdeck operations.
pub type Result<T> = std::result::Result<T, GlyphdeckError>;
